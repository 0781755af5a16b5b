//! Derived shelves. Every function borrows the catalog and never reorders it.

use super::models::{Author, Book, CategoryChip, Genre, HeroSlide};

pub const RECOMMENDED_LIMIT: usize = 6;
pub const POPULAR_LIMIT: usize = 6;
pub const READING_LIST_LIMIT: usize = 2;

/// First books in catalog order.
pub fn recommended(books: &[Book]) -> Vec<&Book> {
    books.iter().take(RECOMMENDED_LIMIT).collect()
}

/// Most liked books. Ties keep catalog order.
pub fn popular(books: &[Book]) -> Vec<&Book> {
    let mut ranked: Vec<&Book> = books.iter().collect();
    ranked.sort_by(|a, b| b.total_likes.cmp(&a.total_likes));
    ranked.truncate(POPULAR_LIMIT);
    ranked
}

pub fn by_genre(books: &[Book], genre: Genre) -> Vec<&Book> {
    books.iter().filter(|book| book.category == genre).collect()
}

pub fn romance(books: &[Book]) -> Vec<&Book> {
    by_genre(books, Genre::Romance)
}

pub fn dark(books: &[Book]) -> Vec<&Book> {
    books.iter().filter(|book| book.category.is_dark()).collect()
}

/// Saved books. There is no bookmark store yet, so this is the head of the catalog.
pub fn reading_list(books: &[Book]) -> Vec<&Book> {
    books.iter().take(READING_LIST_LIMIT).collect()
}

/// An author card with its top book resolved against the catalog.
#[derive(Debug, Clone, Copy)]
pub struct FeaturedAuthor<'a> {
    pub author: &'a Author,
    pub top_book: Option<&'a Book>,
}

/// Everything the home screen shows, computed fresh for each render.
#[derive(Debug, Clone)]
pub struct HomeFeed<'a> {
    pub slide: Option<&'a HeroSlide>,
    pub categories: &'a [CategoryChip],
    /// Books matching the selected category chip, if one is selected.
    pub filtered: Option<(Genre, Vec<&'a Book>)>,
    pub recommended: Vec<&'a Book>,
    pub popular: Vec<&'a Book>,
    pub authors: Vec<FeaturedAuthor<'a>>,
    pub romance: Vec<&'a Book>,
    pub dark: Vec<&'a Book>,
}

impl<'a> HomeFeed<'a> {
    pub fn build(
        books: &'a [Book],
        authors: &'a [Author],
        slide: Option<&'a HeroSlide>,
        categories: &'a [CategoryChip],
        filter: Option<Genre>,
    ) -> Self {
        let authors = authors
            .iter()
            .map(|author| FeaturedAuthor {
                author,
                top_book: author
                    .top_book
                    .as_ref()
                    .and_then(|id| books.iter().find(|book| &book.id == id)),
            })
            .collect();

        Self {
            slide,
            categories,
            filtered: filter.map(|genre| (genre, by_genre(books, genre))),
            recommended: recommended(books),
            popular: popular(books),
            authors,
            romance: romance(books),
            dark: dark(books),
        }
    }
}
