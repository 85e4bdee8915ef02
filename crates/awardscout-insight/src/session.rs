//! One matching session: a profile, its scored matches and their analysis
//! cache.

use awardscout_core::{
    categorize, match_awards, Award, AwardLookup, CategorizedMatches, ChanceAnalysis, CoreError,
    EligibilityScorer, EssayGuide, MatchResult, StudentProfile,
};

use crate::analysis::request_essay_guide;
use crate::cache::{AnalysisCache, BatchOptions, BatchReport};
use crate::error::InsightError;
use crate::model::GenerativeModel;

pub struct MatchSession {
    profile: StudentProfile,
    matches: Vec<MatchResult>,
    categorized: CategorizedMatches,
    cache: AnalysisCache,
}

impl MatchSession {
    /// Validates `profile`, scores it against `catalog` and categorizes the
    /// matches. The session starts with an empty cache.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidProfile`] if the profile fails validation.
    pub fn start<S>(
        profile: StudentProfile,
        catalog: &[Award],
        scorer: &S,
    ) -> Result<Self, CoreError>
    where
        S: EligibilityScorer + ?Sized,
    {
        profile.validate()?;
        let matches = match_awards(&profile, catalog, scorer);
        let categorized = categorize(&matches);
        tracing::info!(
            matches = matches.len(),
            perfect = categorized.perfect.len(),
            good = categorized.good.len(),
            partial = categorized.partial.len(),
            "matching session started"
        );
        Ok(Self {
            profile,
            matches,
            categorized,
            cache: AnalysisCache::new(),
        })
    }

    #[must_use]
    pub fn profile(&self) -> &StudentProfile {
        &self.profile
    }

    /// Matches ordered by descending score.
    #[must_use]
    pub fn matches(&self) -> &[MatchResult] {
        &self.matches
    }

    #[must_use]
    pub fn categorized(&self) -> &CategorizedMatches {
        &self.categorized
    }

    #[must_use]
    pub fn cache(&self) -> &AnalysisCache {
        &self.cache
    }

    /// Chance analysis for one matched award, cached for the session.
    ///
    /// # Errors
    ///
    /// See [`AnalysisCache::get_or_fetch`]. Awards that did not match are
    /// reported as [`InsightError::AwardNotFound`].
    pub async fn analyze<M: GenerativeModel>(
        &self,
        model: &M,
        award_id: &str,
    ) -> Result<ChanceAnalysis, InsightError> {
        self.cache
            .get_or_fetch(model, award_id, &self.profile, self.matches.as_slice())
            .await
    }

    /// Runs the sequential batch over the leading matches.
    pub async fn analyze_top<M: GenerativeModel>(
        &self,
        model: &M,
        options: &BatchOptions,
    ) -> BatchReport {
        self.cache
            .batch_top(model, &self.profile, &self.matches, options)
            .await
    }

    /// Essay guide for one matched award. Not cached.
    ///
    /// # Errors
    ///
    /// [`InsightError::AwardNotFound`] for an unmatched award, otherwise see
    /// [`request_essay_guide`].
    pub async fn essay_guide<M: GenerativeModel>(
        &self,
        model: &M,
        award_id: &str,
    ) -> Result<EssayGuide, InsightError> {
        let award = self
            .matches
            .as_slice()
            .find_award(award_id)
            .ok_or_else(|| InsightError::AwardNotFound(award_id.to_string()))?;
        request_essay_guide(model, &self.profile, award).await
    }

    /// Starts a new search: every cached analysis is discarded.
    pub fn reset(&self) {
        self.cache.reset();
        tracing::debug!("matching session cache reset");
    }
}
