use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::SessionError;

/// Defines a string-backed identifier that cannot be mixed up with other ids.
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

define_id!(BookId);
define_id!(ChapterId);
define_id!(UserId);
define_id!(AuthorId);
define_id!(CommentId);

/// Fixed set of category labels used by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Romance,
    Trahison,
    Thriller,
    #[serde(rename = "Mystère")]
    Mystere,
    Fantastique,
    Drame,
    Aventure,
    /// Any label the catalog service sends that we do not know about.
    #[serde(other)]
    Other,
}

impl Genre {
    /// Genres grouped under the home screen's dark shelf.
    pub const DARK: [Genre; 3] = [Genre::Trahison, Genre::Thriller, Genre::Mystere];

    pub fn label(self) -> &'static str {
        match self {
            Genre::Romance => "Romance",
            Genre::Trahison => "Trahison",
            Genre::Thriller => "Thriller",
            Genre::Mystere => "Mystère",
            Genre::Fantastique => "Fantastique",
            Genre::Drame => "Drame",
            Genre::Aventure => "Aventure",
            Genre::Other => "Other",
        }
    }

    /// Case-insensitive lookup by label; accepts "Mystere" without the accent.
    pub fn from_label(label: &str) -> Option<Genre> {
        let wanted = label.trim().to_lowercase();
        [
            Genre::Romance,
            Genre::Trahison,
            Genre::Thriller,
            Genre::Mystere,
            Genre::Fantastique,
            Genre::Drame,
            Genre::Aventure,
        ]
        .into_iter()
        .find(|genre| {
            genre.label().to_lowercase() == wanted
                || (wanted == "mystere" && *genre == Genre::Mystere)
        })
    }

    pub fn is_dark(self) -> bool {
        Self::DARK.contains(&self)
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub user_id: UserId,
    pub user_name: String,
    pub user_avatar: String,
    pub text: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: ChapterId,
    /// 1-based position within the book
    pub number: u32,
    pub title: String,
    pub content: String,
    pub word_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub likes: u32,
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Whether the current reader liked this chapter; session-local.
    #[serde(default)]
    pub is_liked: bool,
    /// Paywall flag. Once cleared it is never set again in a session.
    pub is_paid: bool,
    /// Only meaningful while `is_paid` holds.
    #[serde(default)]
    pub coin_cost: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub author_id: AuthorId,
    pub cover: String,
    pub description: String,
    pub chapters: Vec<Chapter>,
    pub total_likes: u64,
    pub is_paid: bool,
    pub free_chapters_count: u32,
    pub category: Genre,
    pub rating: f32,
}

impl Book {
    pub fn chapter(&self, id: &ChapterId) -> Option<&Chapter> {
        self.chapters.iter().find(|chapter| &chapter.id == id)
    }

    pub fn chapter_mut(&mut self, id: &ChapterId) -> Option<&mut Chapter> {
        self.chapters.iter_mut().find(|chapter| &chapter.id == id)
    }

    /// Chapters still behind the paywall.
    pub fn locked_chapters(&self) -> impl Iterator<Item = &Chapter> {
        self.chapters.iter().filter(|chapter| chapter.is_paid)
    }

    /// Check the structural invariants the reader relies on.
    pub fn validate(&self) -> Result<(), SessionError> {
        let invalid = |reason: String| SessionError::InvalidBook {
            id: self.id.clone(),
            reason,
        };

        if self.free_chapters_count as usize > self.chapters.len() {
            return Err(invalid(format!(
                "{} free chapters declared but only {} present",
                self.free_chapters_count,
                self.chapters.len()
            )));
        }

        for (position, chapter) in self.chapters.iter().enumerate() {
            let expected = position as u32 + 1;
            if chapter.number != expected {
                return Err(invalid(format!(
                    "chapter '{}' is numbered {} but sits at position {}",
                    chapter.id, chapter.number, expected
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub avatar: String,
    pub coins: u32,
    pub books_written: u32,
}

impl User {
    /// Check-and-decrement in one step; the balance is untouched on failure.
    pub fn spend(&mut self, amount: u32) -> Result<u32, SessionError> {
        let remaining = self
            .coins
            .checked_sub(amount)
            .ok_or(SessionError::InsufficientCoins {
                required: amount,
                available: self.coins,
            })?;
        self.coins = remaining;
        Ok(remaining)
    }

    pub fn credit(&mut self, amount: u32) -> u32 {
        self.coins = self.coins.saturating_add(amount);
        self.coins
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
    pub avatar: String,
    pub bio: String,
    pub total_books: u32,
    pub total_reads: u64,
    /// Looked up in the catalog when displayed; the author does not own it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_book: Option<BookId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSlide {
    pub id: String,
    pub image: String,
    pub title: String,
    pub description: String,
    pub cta_text: String,
}

/// Filter chip shown above the home shelves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryChip {
    pub id: String,
    pub name: Genre,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chapter_json(id: &str, number: u32) -> serde_json::Value {
        json!({
            "id": id,
            "number": number,
            "title": "Le départ",
            "content": "Il pleuvait sur Abidjan.",
            "wordCount": 4,
            "likes": 12,
            "isPaid": false
        })
    }

    #[test]
    fn book_decodes_from_backend_json() {
        let book: Book = serde_json::from_value(json!({
            "id": "b-1",
            "title": "Les Ombres",
            "author": "Awa Koné",
            "authorId": "a-1",
            "cover": "https://img.example.com/ombres.jpg",
            "description": "Une enquête.",
            "chapters": [chapter_json("c-1", 1), chapter_json("c-2", 2)],
            "totalLikes": 1200,
            "isPaid": true,
            "freeChaptersCount": 2,
            "category": "Mystère",
            "rating": 4.6
        }))
        .unwrap();

        assert_eq!(book.category, Genre::Mystere);
        assert_eq!(book.chapters.len(), 2);
        let first = &book.chapters[0];
        assert!(!first.is_liked);
        assert_eq!(first.coin_cost, 0);
        assert!(first.comments.is_empty());
        assert!(book.validate().is_ok());
    }

    #[test]
    fn unknown_category_falls_back_to_other() {
        let genre: Genre = serde_json::from_value(json!("Science-fiction")).unwrap();
        assert_eq!(genre, Genre::Other);
    }

    #[test]
    fn genre_labels_round_trip_through_lookup() {
        assert_eq!(Genre::from_label("romance"), Some(Genre::Romance));
        assert_eq!(Genre::from_label("Mystere"), Some(Genre::Mystere));
        assert_eq!(Genre::from_label("Mystère"), Some(Genre::Mystere));
        assert_eq!(Genre::from_label("poetry"), None);
        assert!(Genre::Thriller.is_dark());
        assert!(!Genre::Romance.is_dark());
    }

    #[test]
    fn comment_date_is_rfc3339() {
        let comment: Comment = serde_json::from_value(json!({
            "id": "m-1",
            "userId": "u-2",
            "userName": "Yao",
            "userAvatar": "https://img.example.com/yao.jpg",
            "text": "Vivement la suite",
            "date": "2024-03-12T18:30:00Z"
        }))
        .unwrap();
        assert_eq!(comment.date.year(), 2024);
    }

    #[test]
    fn validate_rejects_too_many_free_chapters() {
        let mut book: Book = serde_json::from_value(json!({
            "id": "b-2",
            "title": "Court",
            "author": "X",
            "authorId": "a-9",
            "cover": "",
            "description": "",
            "chapters": [chapter_json("c-1", 1)],
            "totalLikes": 0,
            "isPaid": false,
            "freeChaptersCount": 3,
            "category": "Drame",
            "rating": 3.0
        }))
        .unwrap();
        assert!(matches!(
            book.validate(),
            Err(SessionError::InvalidBook { .. })
        ));

        book.free_chapters_count = 1;
        book.chapters[0].number = 2;
        assert!(book.validate().is_err());
    }

    #[test]
    fn spend_never_goes_negative() {
        let mut user = User {
            id: "u-1".into(),
            name: "Aminata".to_string(),
            avatar: String::new(),
            coins: 4,
            books_written: 0,
        };

        assert_eq!(
            user.spend(5),
            Err(SessionError::InsufficientCoins {
                required: 5,
                available: 4
            })
        );
        assert_eq!(user.coins, 4);
        assert_eq!(user.spend(4), Ok(0));
        assert_eq!(user.credit(u32::MAX), u32::MAX);
    }
}
