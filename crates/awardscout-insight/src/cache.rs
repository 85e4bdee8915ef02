//! Session-scoped analysis cache and the sequential top-N batch.
//!
//! The cache owns the `award_id -> ChanceAnalysis` map for one matching
//! session. An entry, once stored, is never replaced. The in-flight counter
//! per award id only drives loading indicators; it does not deduplicate
//! concurrent fetches, so two callers racing on the same id may both reach
//! the model and the first to finish wins.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use awardscout_core::{AppConfig, Award, AwardLookup, ChanceAnalysis, MatchResult, StudentProfile};

use crate::analysis::request_chance_analysis;
use crate::error::InsightError;
use crate::model::GenerativeModel;

/// Tuning for [`AnalysisCache::batch_top`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Number of leading matches to analyze.
    pub top_n: usize,
    /// Pause between consecutive model calls. Zero disables it.
    pub delay: Duration,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            top_n: 5,
            delay: Duration::ZERO,
        }
    }
}

impl BatchOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            top_n: config.batch_size,
            delay: Duration::from_millis(config.batch_delay_ms),
        }
    }
}

/// Outcome counts of one [`AnalysisCache::batch_top`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Awards for which a model call was made.
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Awards skipped because an analysis was already cached.
    pub already_cached: usize,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<String, ChanceAnalysis>,
    in_flight: HashMap<String, usize>,
    /// Bumped by `reset`; fetches started under an older generation do not
    /// store their result.
    generation: u64,
}

#[derive(Default)]
pub struct AnalysisCache {
    state: Mutex<CacheState>,
}

/// Clears one in-flight mark on drop, whether the fetch succeeded, failed or
/// was cancelled.
struct InFlightGuard<'a> {
    cache: &'a AnalysisCache,
    award_id: &'a str,
    generation: u64,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.cache.lock();
        if state.generation != self.generation {
            return;
        }
        if let Some(count) = state.in_flight.get_mut(self.award_id) {
            *count -= 1;
            if *count == 0 {
                state.in_flight.remove(self.award_id);
            }
        }
    }
}

impl AnalysisCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // The lock is never held across an await point.
    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn get(&self, award_id: &str) -> Option<ChanceAnalysis> {
        self.lock().entries.get(award_id).cloned()
    }

    #[must_use]
    pub fn contains(&self, award_id: &str) -> bool {
        self.lock().entries.contains_key(award_id)
    }

    #[must_use]
    pub fn is_in_flight(&self, award_id: &str) -> bool {
        self.lock().in_flight.contains_key(award_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Copy of every cached analysis.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<String, ChanceAnalysis> {
        self.lock().entries.clone()
    }

    /// Discards every entry and in-flight mark. Fetches still running when
    /// this is called finish normally but their results are not stored.
    pub fn reset(&self) {
        let mut state = self.lock();
        state.entries.clear();
        state.in_flight.clear();
        state.generation += 1;
    }

    /// Returns the cached analysis for `award_id`, or fetches and stores one.
    ///
    /// # Errors
    ///
    /// Returns [`InsightError::AwardNotFound`] if `lookup` has no such award,
    /// otherwise any error from
    /// [`request_chance_analysis`](crate::request_chance_analysis). On error
    /// nothing is stored and the in-flight mark is cleared.
    pub async fn get_or_fetch<M, L>(
        &self,
        model: &M,
        award_id: &str,
        profile: &StudentProfile,
        lookup: &L,
    ) -> Result<ChanceAnalysis, InsightError>
    where
        M: GenerativeModel,
        L: AwardLookup + ?Sized,
    {
        let cached = self.get(award_id);
        if let Some(analysis) = cached {
            tracing::debug!(award_id, "chance analysis cache hit");
            return Ok(analysis);
        }

        let award = lookup
            .find_award(award_id)
            .ok_or_else(|| InsightError::AwardNotFound(award_id.to_string()))?;

        self.fetch(model, profile, award).await
    }

    async fn fetch<M: GenerativeModel>(
        &self,
        model: &M,
        profile: &StudentProfile,
        award: &Award,
    ) -> Result<ChanceAnalysis, InsightError> {
        let guard = self.mark_in_flight(&award.id);
        let analysis = request_chance_analysis(model, profile, award).await?;

        let stored = {
            let mut state = self.lock();
            if state.generation == guard.generation {
                Some(
                    state
                        .entries
                        .entry(award.id.clone())
                        .or_insert(analysis.clone())
                        .clone(),
                )
            } else {
                None
            }
        };

        tracing::info!(
            award_id = %award.id,
            chance_level = %analysis.chance_level,
            chance_percentage = analysis.chance_percentage,
            "chance analysis fetched"
        );
        Ok(stored.unwrap_or(analysis))
    }

    fn mark_in_flight<'a>(&'a self, award_id: &'a str) -> InFlightGuard<'a> {
        let mut state = self.lock();
        *state.in_flight.entry(award_id.to_string()).or_insert(0) += 1;
        InFlightGuard {
            cache: self,
            award_id,
            generation: state.generation,
        }
    }

    /// Fetches analyses for the first `options.top_n` matches, one at a time.
    ///
    /// Each call is awaited before the next begins. Awards already cached are
    /// skipped. A failed award is logged and skipped; this method never
    /// returns an error.
    pub async fn batch_top<M: GenerativeModel>(
        &self,
        model: &M,
        profile: &StudentProfile,
        matches: &[MatchResult],
        options: &BatchOptions,
    ) -> BatchReport {
        let mut report = BatchReport::default();

        for result in matches.iter().take(options.top_n) {
            let award = &result.award;
            if self.contains(&award.id) {
                report.already_cached += 1;
                continue;
            }

            if report.attempted > 0 && !options.delay.is_zero() {
                tokio::time::sleep(options.delay).await;
            }

            report.attempted += 1;
            match self.fetch(model, profile, award).await {
                Ok(_) => report.succeeded += 1,
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!(
                        award_id = %award.id,
                        kind = e.kind(),
                        error = %e,
                        "chance analysis failed, skipping award"
                    );
                }
            }
        }

        tracing::info!(
            attempted = report.attempted,
            succeeded = report.succeeded,
            failed = report.failed,
            already_cached = report.already_cached,
            "top matches batch complete"
        );
        report
    }
}

#[cfg(test)]
#[path = "cache_test.rs"]
mod tests;
