//! Screen routing for the reader app.
//!
//! Detail screens carry the ids they need, so "reader with no chapter" cannot
//! be represented. Back navigation is a flat lookup rather than a history
//! stack: reader goes to detail, detail goes home, nothing else moves.

use thiserror::Error;

use crate::catalog::models::{BookId, ChapterId};

/// Root screens reachable from the tab bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Home,
    Library,
    ReadingList,
    Profile,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Home, Tab::Library, Tab::ReadingList, Tab::Profile];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Home,
    Library,
    ReadingList,
    Profile,
    BookDetail { book: BookId },
    ChapterReader { book: BookId, chapter: ChapterId },
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Home => "home",
            Screen::Library => "library",
            Screen::ReadingList => "reading-list",
            Screen::Profile => "profile",
            Screen::BookDetail { .. } => "book-detail",
            Screen::ChapterReader { .. } => "chapter-reader",
        }
    }

    /// The tab bar is hidden inside the two detail screens.
    pub fn shows_tab_bar(&self) -> bool {
        !matches!(self, Screen::BookDetail { .. } | Screen::ChapterReader { .. })
    }

    pub fn selected_book(&self) -> Option<&BookId> {
        match self {
            Screen::BookDetail { book } | Screen::ChapterReader { book, .. } => Some(book),
            _ => None,
        }
    }

    pub fn tab(&self) -> Option<Tab> {
        match self {
            Screen::Home => Some(Tab::Home),
            Screen::Library => Some(Tab::Library),
            Screen::ReadingList => Some(Tab::ReadingList),
            Screen::Profile => Some(Tab::Profile),
            _ => None,
        }
    }
}

impl From<Tab> for Screen {
    fn from(tab: Tab) -> Self {
        match tab {
            Tab::Home => Screen::Home,
            Tab::Library => Screen::Library,
            Tab::ReadingList => Screen::ReadingList,
            Tab::Profile => Screen::Profile,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("no book is selected")]
    NoBookSelected,

    #[error("tab bar is hidden on the {0} screen")]
    TabBarHidden(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    screen: Screen,
    purchase_open: bool,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            screen: Screen::Home,
            purchase_open: false,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Whether the coin purchase sheet is over the current screen.
    pub fn purchase_open(&self) -> bool {
        self.purchase_open
    }

    pub fn select_book(&mut self, book: BookId) {
        self.transition(Screen::BookDetail { book });
    }

    /// Open `chapter` of the book on screen. Whether the chapter exists is
    /// checked when the screen renders.
    pub fn select_chapter(&mut self, chapter: ChapterId) -> Result<(), NavigationError> {
        let book = self
            .screen
            .selected_book()
            .cloned()
            .ok_or(NavigationError::NoBookSelected)?;
        self.transition(Screen::ChapterReader { book, chapter });
        Ok(())
    }

    pub fn go_back(&mut self) {
        let previous = match &self.screen {
            Screen::ChapterReader { book, .. } => Screen::BookDetail { book: book.clone() },
            Screen::BookDetail { .. } => Screen::Home,
            _ => return,
        };
        self.transition(previous);
    }

    pub fn select_tab(&mut self, tab: Tab) -> Result<(), NavigationError> {
        if !self.screen.shows_tab_bar() {
            return Err(NavigationError::TabBarHidden(self.screen.name()));
        }
        self.transition(tab.into());
        Ok(())
    }

    pub fn open_purchase(&mut self) {
        self.purchase_open = true;
    }

    pub fn close_purchase(&mut self) {
        self.purchase_open = false;
    }

    fn transition(&mut self, next: Screen) {
        tracing::debug!(from = self.screen.name(), to = next.name(), "screen transition");
        self.screen = next;
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader_on(book: &str, chapter: &str) -> Navigator {
        let mut nav = Navigator::new();
        nav.select_book(book.into());
        nav.select_chapter(chapter.into()).unwrap();
        nav
    }

    #[test]
    fn starts_on_home_with_tab_bar() {
        let nav = Navigator::new();
        assert_eq!(nav.screen(), &Screen::Home);
        assert!(nav.screen().shows_tab_bar());
        assert!(!nav.purchase_open());
    }

    #[test]
    fn back_from_reader_lands_on_detail_of_same_book() {
        let mut nav = reader_on("b-1", "c-3");
        nav.go_back();
        assert_eq!(nav.screen(), &Screen::BookDetail { book: "b-1".into() });
        nav.go_back();
        assert_eq!(nav.screen(), &Screen::Home);
    }

    #[test]
    fn back_from_detail_goes_home_even_when_entered_from_library() {
        let mut nav = Navigator::new();
        nav.select_tab(Tab::Library).unwrap();
        nav.select_book("b-2".into());
        nav.go_back();
        assert_eq!(nav.screen(), &Screen::Home);
    }

    #[test]
    fn back_on_root_screens_is_a_no_op() {
        for tab in Tab::ALL {
            let mut nav = Navigator::new();
            nav.select_tab(tab).unwrap();
            nav.go_back();
            assert_eq!(nav.screen(), &Screen::from(tab));
        }
    }

    #[test]
    fn chapter_needs_a_selected_book() {
        let mut nav = Navigator::new();
        assert_eq!(
            nav.select_chapter("c-1".into()),
            Err(NavigationError::NoBookSelected)
        );
        assert_eq!(nav.screen(), &Screen::Home);
    }

    #[test]
    fn switching_chapters_inside_the_reader_keeps_the_book() {
        let mut nav = reader_on("b-1", "c-1");
        nav.select_chapter("c-2".into()).unwrap();
        assert_eq!(
            nav.screen(),
            &Screen::ChapterReader {
                book: "b-1".into(),
                chapter: "c-2".into()
            }
        );
    }

    #[test]
    fn tabs_are_unavailable_inside_detail_screens() {
        let mut nav = reader_on("b-1", "c-1");
        assert_eq!(
            nav.select_tab(Tab::Profile),
            Err(NavigationError::TabBarHidden("chapter-reader"))
        );
        nav.go_back();
        assert_eq!(
            nav.select_tab(Tab::Profile),
            Err(NavigationError::TabBarHidden("book-detail"))
        );
        nav.go_back();
        assert!(nav.select_tab(Tab::Profile).is_ok());
        assert_eq!(nav.screen().tab(), Some(Tab::Profile));
    }

    #[test]
    fn purchase_sheet_toggles_without_moving_screens() {
        let mut nav = Navigator::new();
        nav.select_tab(Tab::Profile).unwrap();
        nav.open_purchase();
        assert!(nav.purchase_open());
        assert_eq!(nav.screen(), &Screen::Profile);
        nav.close_purchase();
        assert!(!nav.purchase_open());
    }
}
