//! The two stateless insight operations.

use awardscout_core::{Award, ChanceAnalysis, EssayGuide, StudentProfile};

use crate::error::InsightError;
use crate::model::{ensure_configured, GenerativeModel};
use crate::parse::{parse_chance_analysis, parse_essay_guide};
use crate::prompts::{build_chance_prompt, build_essay_prompt};

/// Asks `model` for the student's chance of winning `award`.
///
/// # Errors
///
/// - [`InsightError::Configuration`] if `model` has no credential. No call is made.
/// - [`InsightError::Upstream`] or [`InsightError::Http`] if the call fails.
/// - [`InsightError::Parse`] if the reply holds no valid analysis object.
pub async fn request_chance_analysis<M: GenerativeModel>(
    model: &M,
    profile: &StudentProfile,
    award: &Award,
) -> Result<ChanceAnalysis, InsightError> {
    ensure_configured(model)?;
    let prompt = build_chance_prompt(profile, award);
    let reply = model.generate(&prompt).await?;
    parse_chance_analysis(&reply, award)
}

/// Asks `model` for an essay outline for `award`. Nothing is cached.
///
/// # Errors
///
/// Same taxonomy as [`request_chance_analysis`].
pub async fn request_essay_guide<M: GenerativeModel>(
    model: &M,
    profile: &StudentProfile,
    award: &Award,
) -> Result<EssayGuide, InsightError> {
    ensure_configured(model)?;
    let prompt = build_essay_prompt(profile, award);
    let reply = model.generate(&prompt).await?;
    let guide = parse_essay_guide(&reply)?;
    tracing::debug!(
        award_id = %award.id,
        sections = guide.structure.len(),
        "essay guide generated"
    );
    Ok(guide)
}
