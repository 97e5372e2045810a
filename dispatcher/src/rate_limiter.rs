//! Per-user throttle: at most one admitted action per user per window.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;
use tracing::debug;

pub const DEFAULT_WINDOW: Duration = Duration::from_secs(2);
pub const DEFAULT_CAPACITY: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Admit,
    Reject,
}

/// Last-admitted instant per user id, bounded by `capacity`.
///
/// A rejected check never touches the stored instant. Two concurrent checks for the same user at
/// the window boundary may both admit; this is a soft limit, not a quota.
#[derive(Debug)]
pub struct RateLimiter {
    window: Duration,
    capacity: usize,
    last_admitted: Mutex<HashMap<i64, Instant>>,
}

impl RateLimiter {
    pub fn new(window: Duration, capacity: usize) -> Self {
        Self {
            window,
            capacity: capacity.max(1),
            last_admitted: Mutex::new(HashMap::new()),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Admits when the user has no entry or its window has elapsed at `now`, recording `now`.
    pub fn check(&self, user_id: i64, now: Instant) -> Decision {
        let mut map = self.lock();

        if let Some(last) = map.get(&user_id) {
            if now.saturating_duration_since(*last) < self.window {
                return Decision::Reject;
            }
        } else if map.len() >= self.capacity {
            self.make_room(&mut map, now);
        }

        map.insert(user_id, now);
        Decision::Admit
    }

    /// Drops entries whose window has elapsed at `now`; they can no longer cause a rejection.
    /// Returns how many were removed.
    pub fn sweep(&self, now: Instant) -> usize {
        let mut map = self.lock();
        Self::sweep_locked(&mut map, self.window, now)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Runs [`sweep`](Self::sweep) every `every` until the runtime shuts down.
    pub fn spawn_sweeper(self: &Arc<Self>, every: Duration) -> JoinHandle<()> {
        let limiter = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let removed = limiter.sweep(Instant::now());
                if removed > 0 {
                    debug!(removed, remaining = limiter.len(), "rate limiter sweep");
                }
            }
        })
    }

    fn make_room(&self, map: &mut HashMap<i64, Instant>, now: Instant) {
        if Self::sweep_locked(map, self.window, now) > 0 {
            return;
        }
        let oldest = map
            .iter()
            .min_by_key(|(_, admitted)| **admitted)
            .map(|(user_id, _)| *user_id);
        if let Some(user_id) = oldest {
            map.remove(&user_id);
            debug!(user_id, capacity = self.capacity, "rate limiter full, evicted oldest entry");
        }
    }

    fn sweep_locked(map: &mut HashMap<i64, Instant>, window: Duration, now: Instant) -> usize {
        let before = map.len();
        map.retain(|_, admitted| now.saturating_duration_since(*admitted) < window);
        before - map.len()
    }

    // A panic while holding the lock cannot leave the map half-updated, so recover from poison.
    fn lock(&self) -> MutexGuard<'_, HashMap<i64, Instant>> {
        self.last_admitted
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW, DEFAULT_CAPACITY)
    }
}
