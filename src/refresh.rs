//! Background refresh of the quiz cache
//!
//! Runs the same freshness check the request handlers use on a fixed interval,
//! so requests after midnight UTC normally find today's quiz already cached.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::cache::QuizCache;

/// Spawns the refresh loop. The first tick fires immediately, warming the
/// cache at startup. Abort the returned handle to stop it.
pub fn spawn(cache: Arc<QuizCache>, every: Duration) -> JoinHandle<()> {
    spawn_with_clock(cache, every, Utc::now)
}

/// Same as [`spawn`], reading the current instant from `clock` on every tick.
pub fn spawn_with_clock<C>(cache: Arc<QuizCache>, every: Duration, clock: C) -> JoinHandle<()>
where
    C: Fn() -> DateTime<Utc> + Send + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            debug!("Background freshness check");
            cache.ensure_fresh_at(clock()).await;
        }
    })
}
