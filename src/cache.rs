//! In-memory quiz cache and its once-a-day refresh policy.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::api::models::QuizSnapshot;
use crate::error::Result;
use crate::scraper::{parse_quiz, QuizSource};

/// Everything a refresh produces, swapped in as one value.
#[derive(Clone)]
struct CacheEntry {
    snapshot: Arc<QuizSnapshot>,
    refreshed_on: NaiveDate,
    refreshed_at: DateTime<Utc>,
}

/// Holds at most one snapshot. Readers get a shared handle and never see a
/// half-written entry.
pub struct QuizCache {
    source: Arc<dyn QuizSource>,
    entry: RwLock<Option<CacheEntry>>,
    // Held for the whole fetch so concurrent stale readers trigger one request
    refresh_gate: Mutex<()>,
}

impl QuizCache {
    pub fn new(source: Arc<dyn QuizSource>) -> Self {
        Self {
            source,
            entry: RwLock::new(None),
            refresh_gate: Mutex::new(()),
        }
    }

    pub fn snapshot(&self) -> Option<Arc<QuizSnapshot>> {
        self.read_entry().map(|entry| entry.snapshot)
    }

    pub fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.read_entry().map(|entry| entry.refreshed_at)
    }

    pub fn is_outdated(&self) -> bool {
        self.is_outdated_at(Utc::now())
    }

    /// True when nothing has been cached yet or the last refresh happened on a
    /// different UTC calendar date than `now`.
    pub fn is_outdated_at(&self, now: DateTime<Utc>) -> bool {
        match self.read_entry() {
            Some(entry) => entry.refreshed_on != now.date_naive(),
            None => true,
        }
    }

    pub async fn refresh(&self) -> Result<Arc<QuizSnapshot>> {
        self.refresh_at(Utc::now()).await
    }

    /// Fetches and parses the page, then replaces the cached entry. A failed
    /// fetch leaves the cache untouched.
    pub async fn refresh_at(&self, now: DateTime<Utc>) -> Result<Arc<QuizSnapshot>> {
        info!("Refreshing quiz data");
        let html = self.source.fetch().await?;

        let snapshot = Arc::new(parse_quiz(&html, now));
        let entry = CacheEntry {
            snapshot: Arc::clone(&snapshot),
            refreshed_on: now.date_naive(),
            refreshed_at: now,
        };
        *self.entry.write().unwrap_or_else(PoisonError::into_inner) = Some(entry);

        info!(
            quiz_date = %snapshot.quiz_date,
            questions = snapshot.questions.len(),
            "Quiz data successfully scraped and updated"
        );
        Ok(snapshot)
    }

    /// Refreshes when outdated and returns whatever is cached afterwards,
    /// which may be stale or absent if the fetch failed.
    pub async fn ensure_fresh(&self) -> Option<Arc<QuizSnapshot>> {
        self.ensure_fresh_at(Utc::now()).await
    }

    pub async fn ensure_fresh_at(&self, now: DateTime<Utc>) -> Option<Arc<QuizSnapshot>> {
        if self.is_outdated_at(now) {
            let _gate = self.refresh_gate.lock().await;

            // Another caller may have refreshed while we waited
            if self.is_outdated_at(now) {
                if let Err(err) = self.refresh_at(now).await {
                    warn!(error = %err, "Failed to refresh quiz data, serving cached copy");
                }
            }
        }

        self.snapshot()
    }

    fn read_entry(&self) -> Option<CacheEntry> {
        self.entry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
