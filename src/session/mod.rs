//! The reading session: one reader, one catalog, one screen at a time.
//!
//! A `Session` is owned by whoever drives the UI. Every operation is
//! synchronous and takes `&mut self`; to share a session across tasks wrap
//! it in a [`SessionHandle`], which confines it to a single owning task.

mod handle;

pub use handle::{SessionClosed, SessionHandle};

use crate::carousel::Carousel;
use crate::catalog::models::{Book, BookId, CategoryChip, Chapter, ChapterId, Genre, HeroSlide, User};
use crate::catalog::views::{self, HomeFeed};
use crate::catalog::{CatalogSource, CatalogStore, LoadReport};
use crate::error::SessionError;
use crate::navigation::{NavigationError, Navigator, Screen, Tab};
use crate::reader::{self, UnlockOutcome, VoteIntent};
use crate::seed;
use crate::wallet::payment::{InstantPayment, PaymentMethod, PaymentProvider};
use crate::wallet::{self, CoinBundle, PurchaseReceipt};

/// What the current screen shows, borrowed from the session.
#[derive(Debug)]
pub enum View<'a> {
    Home(HomeFeed<'a>),
    Library { books: &'a [Book] },
    ReadingList { books: Vec<&'a Book> },
    Profile { user: &'a User },
    BookDetail { book: &'a Book, coins: u32 },
    ChapterReader { book: &'a Book, chapter: &'a Chapter },
}

impl View<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            View::Home(_) => "home",
            View::Library { .. } => "library",
            View::ReadingList { .. } => "reading-list",
            View::Profile { .. } => "profile",
            View::BookDetail { .. } => "book-detail",
            View::ChapterReader { .. } => "chapter-reader",
        }
    }
}

pub struct Session {
    store: CatalogStore,
    navigator: Navigator,
    carousel: Carousel,
    slides: Vec<HeroSlide>,
    categories: Vec<CategoryChip>,
    home_filter: Option<Genre>,
    bundles: Vec<CoinBundle>,
    payments: Box<dyn PaymentProvider>,
    pending_votes: Vec<VoteIntent>,
}

impl Session {
    pub fn new(store: CatalogStore) -> Self {
        let slides = seed::hero_slides();
        tracing::info!(
            books = store.books().len(),
            user = %store.user().id,
            "session created"
        );

        Self {
            store,
            navigator: Navigator::new(),
            carousel: Carousel::new(slides.len()),
            slides,
            categories: seed::categories(),
            home_filter: None,
            bundles: wallet::bundles(),
            payments: Box::new(InstantPayment),
            pending_votes: Vec::new(),
        }
    }

    /// Session over the bundled sample catalog.
    pub fn seeded() -> Self {
        Self::new(CatalogStore::seeded())
    }

    /// Seeded session refreshed from `source`; fetch failures keep the seed.
    pub async fn start(source: &dyn CatalogSource) -> Self {
        let mut session = Self::seeded();
        session.reload(source).await;
        session
    }

    pub fn with_payment_provider(mut self, provider: impl PaymentProvider + 'static) -> Self {
        self.payments = Box::new(provider);
        self
    }

    /// Refresh the catalog, then reapply votes the service has not seen yet.
    pub async fn reload(&mut self, source: &dyn CatalogSource) -> LoadReport {
        let report = self.store.load(source).await;

        for intent in &self.pending_votes {
            let Some(book) = self.store.book_mut(&intent.book) else {
                continue;
            };
            if let Err(err) = reader::toggle_vote(book, &intent.chapter, intent.liked) {
                tracing::debug!(chapter = %intent.chapter, error = %err, "pending vote no longer applies");
            }
        }
        report
    }

    /// Tear the session down, handing back votes never reconciled.
    pub fn end(self) -> Vec<VoteIntent> {
        tracing::info!(
            coins = self.store.user().coins,
            pending_votes = self.pending_votes.len(),
            "session ended"
        );
        self.pending_votes
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn user(&self) -> &User {
        self.store.user()
    }

    pub fn screen(&self) -> &Screen {
        self.navigator.screen()
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn bundles(&self) -> &[CoinBundle] {
        &self.bundles
    }

    pub fn home_filter(&self) -> Option<Genre> {
        self.home_filter
    }

    pub fn select_book(&mut self, id: &BookId) -> Result<(), SessionError> {
        if self.store.book(id).is_none() {
            return Err(SessionError::BookNotFound(id.clone()));
        }
        self.navigator.select_book(id.clone());
        Ok(())
    }

    /// Open a chapter of the book on screen. Locked chapters are paid for
    /// first, so the paywall cannot be skipped by navigating.
    pub fn select_chapter(&mut self, chapter: &ChapterId) -> Result<UnlockOutcome, SessionError> {
        let book = self
            .navigator
            .screen()
            .selected_book()
            .cloned()
            .ok_or(NavigationError::NoBookSelected)?;
        self.unlock_chapter(&book, chapter)
    }

    pub fn go_back(&mut self) {
        self.navigator.go_back();
    }

    pub fn select_tab(&mut self, tab: Tab) -> Result<(), SessionError> {
        self.navigator.select_tab(tab)?;
        Ok(())
    }

    /// Pay for `chapter` if it is locked, then show it.
    pub fn unlock_chapter(
        &mut self,
        book_id: &BookId,
        chapter: &ChapterId,
    ) -> Result<UnlockOutcome, SessionError> {
        let outcome = self.store.unlock_chapter(book_id, chapter)?;

        if self.navigator.screen().selected_book() != Some(book_id) {
            self.navigator.select_book(book_id.clone());
        }
        self.navigator.select_chapter(chapter.clone())?;
        Ok(outcome)
    }

    /// Like or unlike a chapter; returns its like count afterwards.
    pub fn toggle_vote(
        &mut self,
        book_id: &BookId,
        chapter: &ChapterId,
        will_like: bool,
    ) -> Result<u32, SessionError> {
        let book = self
            .store
            .book_mut(book_id)
            .ok_or_else(|| SessionError::BookNotFound(book_id.clone()))?;

        match reader::toggle_vote(book, chapter, will_like)? {
            Some(intent) => {
                let likes = intent.likes;
                self.pending_votes.push(intent);
                Ok(likes)
            }
            None => Ok(book.chapter(chapter).map_or(0, |c| c.likes)),
        }
    }

    pub fn pending_votes(&self) -> &[VoteIntent] {
        &self.pending_votes
    }

    /// Drain votes for reconciliation with the catalog service.
    pub fn take_pending_votes(&mut self) -> Vec<VoteIntent> {
        std::mem::take(&mut self.pending_votes)
    }

    pub fn open_purchase(&mut self) {
        self.navigator.open_purchase();
    }

    pub fn close_purchase(&mut self) {
        self.navigator.close_purchase();
    }

    /// Bundles to show while the purchase sheet is open.
    pub fn purchase_sheet(&self) -> Option<&[CoinBundle]> {
        self.navigator.purchase_open().then_some(self.bundles.as_slice())
    }

    pub fn purchase(
        &mut self,
        bundle_index: usize,
        method: PaymentMethod,
    ) -> Result<PurchaseReceipt, SessionError> {
        let bundle = *self
            .bundles
            .get(bundle_index)
            .ok_or(SessionError::BundleNotFound(bundle_index))?;

        let receipt = wallet::purchase(
            self.store.user_mut(),
            &bundle,
            method,
            self.payments.as_ref(),
        )?;
        self.navigator.close_purchase();
        Ok(receipt)
    }

    /// Select a category chip; selecting the active chip clears the filter.
    pub fn toggle_category(&mut self, genre: Genre) {
        self.home_filter = if self.home_filter == Some(genre) {
            None
        } else {
            Some(genre)
        };
    }

    pub fn advance_carousel(&mut self) {
        self.carousel.advance();
    }

    pub fn retreat_carousel(&mut self) {
        self.carousel.retreat();
    }

    pub fn jump_carousel(&mut self, index: usize) -> bool {
        self.carousel.jump(index)
    }

    pub fn current_slide(&self) -> Option<&HeroSlide> {
        self.slides.get(self.carousel.current())
    }

    pub fn home_feed(&self) -> HomeFeed<'_> {
        HomeFeed::build(
            self.store.books(),
            self.store.authors(),
            self.current_slide(),
            &self.categories,
            self.home_filter,
        )
    }

    /// Resolve the current screen against the catalog. A reader whose
    /// chapter vanished falls back to the book, a missing book to home.
    pub fn view(&self) -> View<'_> {
        match self.navigator.screen() {
            Screen::Home => View::Home(self.home_feed()),
            Screen::Library => View::Library {
                books: self.store.books(),
            },
            Screen::ReadingList => View::ReadingList {
                books: views::reading_list(self.store.books()),
            },
            Screen::Profile => View::Profile {
                user: self.store.user(),
            },
            Screen::BookDetail { book } => self.detail_view(book),
            Screen::ChapterReader { book, chapter } => {
                match self.store.book(book).and_then(|b| Some((b, b.chapter(chapter)?))) {
                    Some((book, chapter)) => View::ChapterReader { book, chapter },
                    None => self.detail_view(book),
                }
            }
        }
    }

    fn detail_view(&self, id: &BookId) -> View<'_> {
        match self.store.book(id) {
            Some(book) => View::BookDetail {
                book,
                coins: self.store.user().coins,
            },
            None => View::Home(self.home_feed()),
        }
    }
}
