//! Catalog store: the books and the current reader for one session.

pub mod models;
pub mod views;

use std::collections::HashSet;

use async_trait::async_trait;

use crate::api::ApiError;
use crate::error::SessionError;
use crate::reader::{self, UnlockOutcome};
use crate::seed;
use models::{Author, Book, BookId, ChapterId, User};

/// Remote collaborator the catalog refreshes from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_books(&self) -> Result<Vec<Book>, ApiError>;
    async fn fetch_me(&self) -> Result<User, ApiError>;
}

/// What a `load` actually replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub books_refreshed: bool,
    pub user_refreshed: bool,
    /// Fetched books dropped because they broke catalog invariants.
    pub books_rejected: usize,
}

#[derive(Debug, Clone)]
pub struct CatalogStore {
    books: Vec<Book>,
    user: User,
    authors: Vec<Author>,
    /// Chapters paid for in this session; they stay free across loads.
    unlocked: HashSet<(BookId, ChapterId)>,
}

impl CatalogStore {
    pub fn new(books: Vec<Book>, user: User, authors: Vec<Author>) -> Self {
        let mut store = Self {
            books: Vec::new(),
            user,
            authors,
            unlocked: HashSet::new(),
        };
        store.replace_books(books);
        store
    }

    /// Store holding the bundled sample catalog.
    pub fn seeded() -> Self {
        Self::new(seed::books(), seed::user(), seed::authors())
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn book(&self, id: &BookId) -> Option<&Book> {
        self.books.iter().find(|book| &book.id == id)
    }

    pub fn book_mut(&mut self, id: &BookId) -> Option<&mut Book> {
        self.books.iter_mut().find(|book| &book.id == id)
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn user_mut(&mut self) -> &mut User {
        &mut self.user
    }

    /// Split borrow for operations that charge the reader for a book.
    pub fn book_and_user_mut(&mut self, id: &BookId) -> Option<(&mut Book, &mut User)> {
        let book = self.books.iter_mut().find(|book| &book.id == id)?;
        Some((book, &mut self.user))
    }

    /// Charge the user for a locked chapter and remember the unlock.
    pub fn unlock_chapter(
        &mut self,
        book_id: &BookId,
        chapter: &ChapterId,
    ) -> Result<UnlockOutcome, SessionError> {
        let (book, user) = self
            .book_and_user_mut(book_id)
            .ok_or_else(|| SessionError::BookNotFound(book_id.clone()))?;
        let outcome = reader::unlock_chapter(book, chapter, user)?;

        if let UnlockOutcome::Unlocked { .. } = outcome {
            self.unlocked.insert((book_id.clone(), chapter.clone()));
        }
        Ok(outcome)
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    /// Swap in a new book list, keeping only books that pass validation.
    /// Chapters unlocked earlier in the session stay free. Returns how many
    /// books were rejected.
    pub fn replace_books(&mut self, books: Vec<Book>) -> usize {
        let total = books.len();
        let unlocked = &self.unlocked;
        self.books = books
            .into_iter()
            .filter(|book| match book.validate() {
                Ok(()) => true,
                Err(err) => {
                    tracing::warn!(book = %book.id, error = %err, "dropping invalid book");
                    false
                }
            })
            .map(|mut book| {
                for chapter in book.chapters.iter_mut().filter(|c| c.is_paid) {
                    if unlocked.contains(&(book.id.clone(), chapter.id.clone())) {
                        chapter.is_paid = false;
                    }
                }
                book
            })
            .collect();
        total - self.books.len()
    }

    /// Refresh books and user from `source`. A failed fetch keeps whatever
    /// was held before; nothing is retried.
    pub async fn load(&mut self, source: &dyn CatalogSource) -> LoadReport {
        let (me, books) = tokio::join!(source.fetch_me(), source.fetch_books());
        let mut report = LoadReport::default();

        match me {
            Ok(user) => {
                self.user = user;
                report.user_refreshed = true;
            }
            Err(err) => tracing::warn!(error = %err, "keeping previous user after failed fetch"),
        }

        match books {
            Ok(books) => {
                report.books_rejected = self.replace_books(books);
                report.books_refreshed = true;
            }
            Err(err) => tracing::warn!(error = %err, "keeping previous catalog after failed fetch"),
        }

        tracing::info!(
            books = self.books.len(),
            coins = self.user.coins,
            books_refreshed = report.books_refreshed,
            user_refreshed = report.user_refreshed,
            "catalog loaded"
        );
        report
    }
}
