//! Chapter paywall and vote bookkeeping.

use crate::catalog::models::{Book, BookId, ChapterId, User};
use crate::error::SessionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockOutcome {
    /// The chapter was free already; nothing was charged.
    AlreadyFree,
    Unlocked { spent: u32 },
}

/// A like or unlike applied locally and not yet confirmed by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteIntent {
    pub book: BookId,
    pub chapter: ChapterId,
    pub liked: bool,
    /// Like count after the local change.
    pub likes: u32,
}

/// Pay for a locked chapter out of `user`'s balance.
///
/// On `InsufficientCoins` neither the balance nor the chapter changes.
pub fn unlock_chapter(
    book: &mut Book,
    chapter_id: &ChapterId,
    user: &mut User,
) -> Result<UnlockOutcome, SessionError> {
    let chapter = book
        .chapter_mut(chapter_id)
        .ok_or_else(|| SessionError::ChapterNotFound(chapter_id.clone()))?;

    if !chapter.is_paid {
        return Ok(UnlockOutcome::AlreadyFree);
    }

    let cost = chapter.coin_cost;
    let remaining = user.spend(cost)?;
    chapter.is_paid = false;

    tracing::info!(
        book = %book.id,
        chapter = %chapter_id,
        spent = cost,
        remaining,
        "chapter unlocked"
    );
    Ok(UnlockOutcome::Unlocked { spent: cost })
}

/// Record a like (`will_like`) or unlike on a chapter.
///
/// Returns `None` when the chapter is already in the requested state.
pub fn toggle_vote(
    book: &mut Book,
    chapter_id: &ChapterId,
    will_like: bool,
) -> Result<Option<VoteIntent>, SessionError> {
    let chapter = book
        .chapter_mut(chapter_id)
        .ok_or_else(|| SessionError::ChapterNotFound(chapter_id.clone()))?;

    if chapter.is_liked == will_like {
        return Ok(None);
    }

    chapter.is_liked = will_like;
    chapter.likes = if will_like {
        chapter.likes.saturating_add(1)
    } else {
        chapter.likes.saturating_sub(1)
    };
    let likes = chapter.likes;

    Ok(Some(VoteIntent {
        book: book.id.clone(),
        chapter: chapter_id.clone(),
        liked: will_like,
        likes,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn paid_book(cost: u32) -> Book {
        let mut book = seed::books().remove(0);
        let last = book.chapters.len() - 1;
        book.chapters[last].is_paid = true;
        book.chapters[last].coin_cost = cost;
        book
    }

    fn reader(coins: u32) -> User {
        User {
            coins,
            ..seed::user()
        }
    }

    fn last_chapter(book: &Book) -> ChapterId {
        book.chapters[book.chapters.len() - 1].id.clone()
    }

    #[test]
    fn unlock_succeeds_iff_balance_covers_cost() {
        for (coins, cost) in [(0, 0), (4, 5), (5, 5), (6, 5), (50, 5), (5, 50)] {
            let mut book = paid_book(cost);
            let mut user = reader(coins);
            let id = last_chapter(&book);

            let result = unlock_chapter(&mut book, &id, &mut user);

            if coins >= cost {
                assert_eq!(result, Ok(UnlockOutcome::Unlocked { spent: cost }));
                assert_eq!(user.coins, coins - cost);
                assert!(!book.chapter(&id).unwrap().is_paid);
            } else {
                assert_eq!(
                    result,
                    Err(SessionError::InsufficientCoins {
                        required: cost,
                        available: coins
                    })
                );
                assert_eq!(user.coins, coins);
                assert!(book.chapter(&id).unwrap().is_paid);
            }
        }
    }

    #[test]
    fn unlocked_chapters_stay_free() {
        let mut book = paid_book(5);
        let mut user = reader(12);
        let id = last_chapter(&book);

        unlock_chapter(&mut book, &id, &mut user).unwrap();
        let again = unlock_chapter(&mut book, &id, &mut user).unwrap();

        assert_eq!(again, UnlockOutcome::AlreadyFree);
        assert_eq!(user.coins, 7);
        assert!(!book.chapter(&id).unwrap().is_paid);
    }

    #[test]
    fn unknown_chapter_is_reported_without_side_effects() {
        let mut book = paid_book(5);
        let before = book.clone();
        let mut user = reader(10);

        let result = unlock_chapter(&mut book, &"nope".into(), &mut user);

        assert_eq!(result, Err(SessionError::ChapterNotFound("nope".into())));
        assert_eq!(book, before);
        assert_eq!(user.coins, 10);
    }

    #[test]
    fn like_then_unlike_restores_the_count() {
        let mut book = paid_book(5);
        let id = book.chapters[0].id.clone();
        let original = book.chapters[0].likes;

        let liked = toggle_vote(&mut book, &id, true).unwrap().unwrap();
        assert_eq!(liked.likes, original + 1);
        assert!(liked.liked);

        let unliked = toggle_vote(&mut book, &id, false).unwrap().unwrap();
        assert_eq!(unliked.likes, original);

        let chapter = book.chapter(&id).unwrap();
        assert_eq!(chapter.likes, original);
        assert!(!chapter.is_liked);
    }

    #[test]
    fn repeated_vote_in_same_direction_is_ignored() {
        let mut book = paid_book(5);
        let id = book.chapters[0].id.clone();
        let original = book.chapters[0].likes;

        toggle_vote(&mut book, &id, true).unwrap();
        assert_eq!(toggle_vote(&mut book, &id, true).unwrap(), None);
        assert_eq!(book.chapter(&id).unwrap().likes, original + 1);
    }

    #[test]
    fn unlike_never_underflows() {
        let mut book = paid_book(5);
        book.chapters[0].likes = 0;
        book.chapters[0].is_liked = true;
        let id = book.chapters[0].id.clone();

        let intent = toggle_vote(&mut book, &id, false).unwrap().unwrap();
        assert_eq!(intent.likes, 0);
    }
}
