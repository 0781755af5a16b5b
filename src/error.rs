//! Errors surfaced by reading-session operations.

use thiserror::Error;

use crate::catalog::models::{BookId, ChapterId};
use crate::navigation::NavigationError;
use crate::wallet::payment::PaymentError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("book '{0}' is not in the catalog")]
    BookNotFound(BookId),

    #[error("chapter '{0}' not found")]
    ChapterNotFound(ChapterId),

    /// Shown to the reader as a notice; nothing was charged.
    #[error("not enough coins: {required} required, {available} available")]
    InsufficientCoins { required: u32, available: u32 },

    #[error("coin bundle #{0} does not exist")]
    BundleNotFound(usize),

    #[error("invalid book '{id}': {reason}")]
    InvalidBook { id: BookId, reason: String },

    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error(transparent)]
    Payment(#[from] PaymentError),
}

impl SessionError {
    /// Lookup misses leave the screen where it was and are not worth a notice.
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            SessionError::BookNotFound(_)
                | SessionError::ChapterNotFound(_)
                | SessionError::Navigation(_)
        )
    }
}
