//! Plume reading session library
//!
//! Catalog, navigation, chapter paywall and coin purchases for one reader,
//! plus the seeded mock backend the session can be pointed at.

pub mod api;
pub mod carousel;
pub mod catalog;
pub mod error;
pub mod modules;
pub mod navigation;
pub mod reader;
pub mod seed;
pub mod session;
pub mod wallet;

pub use error::SessionError;
pub use session::{Session, SessionHandle, View};
