//! Builds a [`MatchSession`] from the files named on the command line.

use std::path::Path;

use anyhow::Context;
use awardscout_core::{load_catalog, AppConfig, RuleScorer, StudentProfile};
use awardscout_insight::MatchSession;

use crate::SessionArgs;

/// Reads the profile and catalog, then scores and categorizes.
///
/// # Errors
///
/// Returns an error if either file cannot be read or parsed, or the profile
/// fails validation.
pub(crate) fn start(args: &SessionArgs, config: &AppConfig) -> anyhow::Result<MatchSession> {
    let profile = read_profile(&args.profile)?;
    let catalog_path = args.catalog.as_deref().unwrap_or(config.catalog_path.as_path());
    let catalog = load_catalog(catalog_path)?;
    tracing::debug!(
        catalog = %catalog_path.display(),
        awards = catalog.awards.len(),
        "award catalog loaded"
    );

    Ok(MatchSession::start(profile, &catalog.awards, &RuleScorer)?)
}

pub(crate) fn read_profile(path: &Path) -> anyhow::Result<StudentProfile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read profile {}", path.display()))?;
    parse_profile(&raw).with_context(|| format!("invalid profile {}", path.display()))
}

pub(crate) fn parse_profile(raw: &str) -> anyhow::Result<StudentProfile> {
    Ok(serde_json::from_str(raw)?)
}
