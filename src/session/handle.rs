use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior};

use plume_kernel::settings::SessionSettings;

use super::Session;
use crate::reader::VoteIntent;

type Job = Box<dyn FnOnce(&mut Session) + Send>;

enum Command {
    Apply(Job),
    Shutdown(oneshot::Sender<Vec<VoteIntent>>),
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("session task has stopped")]
pub struct SessionClosed;

/// Cloneable handle to a session owned by a single background task.
///
/// Operations are queued and run one at a time, so a check and the mutation
/// it guards (coins before an unlock, say) can never interleave with another
/// caller. The same task drives the hero carousel timer.
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<Command>,
}

impl SessionHandle {
    pub fn spawn(session: Session, settings: &SessionSettings) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(64);
        let period = (settings.carousel_interval_secs > 0)
            .then(|| Duration::from_secs(settings.carousel_interval_secs));

        let task = tokio::spawn(run(session, rx, period));
        (Self { tx }, task)
    }

    /// Run `f` against the session and hand back its result.
    pub async fn apply<F, R>(&self, f: F) -> Result<R, SessionClosed>
    where
        F: FnOnce(&mut Session) -> R + Send + 'static,
        R: Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        let job: Job = Box::new(move |session| {
            let _ = reply_tx.send(f(session));
        });

        self.tx
            .send(Command::Apply(job))
            .await
            .map_err(|_| SessionClosed)?;
        reply_rx.await.map_err(|_| SessionClosed)
    }

    /// Stop the session task and collect votes it never reconciled.
    pub async fn shutdown(self) -> Result<Vec<VoteIntent>, SessionClosed> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Command::Shutdown(reply_tx))
            .await
            .map_err(|_| SessionClosed)?;
        reply_rx.await.map_err(|_| SessionClosed)
    }
}

async fn run(mut session: Session, mut rx: mpsc::Receiver<Command>, period: Option<Duration>) {
    let mut ticker = period.map(|period| {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    });
    tracing::debug!(carousel_period = ?period, "session task started");

    loop {
        tokio::select! {
            command = rx.recv() => match command {
                Some(Command::Apply(job)) => job(&mut session),
                Some(Command::Shutdown(reply)) => {
                    let _ = reply.send(session.end());
                    return;
                }
                None => {
                    session.end();
                    return;
                }
            },
            _ = next_tick(&mut ticker), if ticker.is_some() => {
                session.advance_carousel();
                tracing::trace!(slide = session.carousel().current(), "carousel advanced");
            }
        }
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogStore;
    use crate::error::SessionError;

    fn settings(secs: u64) -> SessionSettings {
        SessionSettings {
            carousel_interval_secs: secs,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn carousel_advances_on_the_timer() {
        let (handle, _task) = SessionHandle::spawn(Session::seeded(), &settings(5));

        tokio::time::sleep(Duration::from_millis(5_100)).await;
        let index = handle.apply(|s| s.carousel().current()).await.unwrap();
        assert_eq!(index, 1);

        tokio::time::sleep(Duration::from_secs(10)).await;
        let index = handle.apply(|s| s.carousel().current()).await.unwrap();
        assert_eq!(index, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_interval_disables_auto_advance() {
        let (handle, _task) = SessionHandle::spawn(Session::seeded(), &settings(0));

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(handle.apply(|s| s.carousel().current()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn concurrent_unlocks_never_overdraw() {
        let mut store = CatalogStore::seeded();
        store.user_mut().coins = 12;
        let locked: Vec<_> = store
            .books()
            .iter()
            .flat_map(|book| book.locked_chapters().map(|c| (book.id.clone(), c.id.clone())))
            .take(6)
            .collect();
        let (handle, _task) = SessionHandle::spawn(Session::new(store), &settings(0));

        let mut tasks = Vec::new();
        for (book, chapter) in locked {
            let handle = handle.clone();
            tasks.push(tokio::spawn(async move {
                handle
                    .apply(move |s| s.unlock_chapter(&book, &chapter))
                    .await
                    .unwrap()
            }));
        }

        let mut unlocked = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => unlocked += 1,
                Err(err) => assert!(matches!(err, SessionError::InsufficientCoins { .. })),
            }
        }

        assert_eq!(unlocked, 2);
        assert_eq!(handle.apply(|s| s.user().coins).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn shutdown_returns_pending_votes_and_closes() {
        let (handle, task) = SessionHandle::spawn(Session::seeded(), &settings(0));
        let probe = handle.clone();

        handle
            .apply(|s| {
                let book = s.store().books()[0].id.clone();
                let chapter = s.store().books()[0].chapters[0].id.clone();
                s.toggle_vote(&book, &chapter, true)
            })
            .await
            .unwrap()
            .unwrap();

        let votes = handle.shutdown().await.unwrap();
        assert_eq!(votes.len(), 1);
        task.await.unwrap();
        assert_eq!(probe.apply(|s| s.user().coins).await, Err(SessionClosed));
    }
}
