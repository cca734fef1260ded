//! Once-per-screen memoisation for enrichment calls.
//!
//! A screen instance is identified by `(session id, screen entry)`. The first
//! request for an instance spawns the work on the runtime; concurrent and
//! later requests for the same instance await that same task. The task runs
//! to completion even if every caller goes away, so a dropped request never
//! causes a second call. Moving to a new screen entry replaces the session's
//! slot.
//!
//! Slots are dropped explicitly with [`ScreenCache::evict`] once a session
//! leaves the screen kind the cache serves, and any slot left untouched for
//! longer than the idle TTL is swept on the next insert.

use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::domain::foundation::SessionId;

/// Idle lifetime of a slot when none is configured.
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(60 * 60);

/// The spawned task panicked or was aborted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("screen task failed: {0}")]
pub struct ScreenTaskError(String);

type SharedTask<T> = Shared<BoxFuture<'static, Result<T, ScreenTaskError>>>;

struct Slot<T> {
    screen_entry: u64,
    last_used: Instant,
    task: SharedTask<T>,
}

pub struct ScreenCache<T: Clone> {
    entries: Mutex<HashMap<SessionId, Slot<T>>>,
    idle_ttl: Duration,
}

impl<T> ScreenCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::with_idle_ttl(DEFAULT_IDLE_TTL)
    }

    pub fn with_idle_ttl(idle_ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            idle_ttl,
        }
    }

    /// Returns the result for this screen instance, starting `init` only if
    /// nothing has been started for it yet.
    pub async fn get_or_start<F, Fut>(
        &self,
        session: SessionId,
        screen_entry: u64,
        init: F,
    ) -> Result<T, ScreenTaskError>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = T> + Send + 'static,
    {
        let now = Instant::now();
        let task = {
            let mut entries = self.lock();
            match entries.get_mut(&session) {
                Some(slot) if slot.screen_entry == screen_entry => {
                    slot.last_used = now;
                    slot.task.clone()
                }
                Some(slot) if slot.screen_entry > screen_entry => {
                    // A newer screen already owns the slot; run detached.
                    spawn_shared(init())
                }
                _ => {
                    let idle_ttl = self.idle_ttl;
                    entries.retain(|_, slot| now.duration_since(slot.last_used) <= idle_ttl);
                    let task = spawn_shared(init());
                    entries.insert(
                        session,
                        Slot {
                            screen_entry,
                            last_used: now,
                            task: task.clone(),
                        },
                    );
                    task
                }
            }
        };
        task.await
    }

    /// Drops the session's slot. A task still running keeps running, but
    /// its result is no longer kept.
    pub fn evict(&self, session: &SessionId) -> bool {
        self.lock().remove(session).is_some()
    }

    /// Number of sessions with a cached screen.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, Slot<T>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Default for ScreenCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

fn spawn_shared<T, Fut>(fut: Fut) -> SharedTask<T>
where
    T: Clone + Send + Sync + 'static,
    Fut: Future<Output = T> + Send + 'static,
{
    tokio::spawn(fut)
        .map(|joined| joined.map_err(|e| ScreenTaskError(e.to_string())))
        .boxed()
        .shared()
}
