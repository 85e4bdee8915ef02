//! Domain model and pure matching logic for awardscout.
//!
//! Everything here is synchronous and free of network access: student
//! profiles, award records, eligibility scoring, match categorization and
//! the shapes of the AI-generated artifacts that `awardscout-insight`
//! produces.

pub mod app_config;
pub mod award;
pub mod catalog;
pub mod config;
pub mod eligibility;
pub mod insight;
pub mod matching;
pub mod profile;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use award::{Award, AwardAmount, AwardLookup, EligibilityCriteria};
pub use catalog::{load_catalog, AwardCatalog};
pub use config::{load_app_config, load_app_config_from_env};
pub use eligibility::{match_awards, Eligibility, EligibilityScorer, RuleScorer};
pub use insight::{ChanceAnalysis, ChanceLevel, EssayGuide, EssaySection, FactorPolarity};
pub use matching::{categorize, CategorizedMatches, MatchCategory, MatchResult};
pub use profile::{Affiliation, Campus, CitizenshipStatus, StudentProfile};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid student profile: {0}")]
    InvalidProfile(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read award catalog at {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse award catalog: {0}")]
    CatalogFileParse(#[source] serde_yaml::Error),

    #[error("award catalog validation failed: {0}")]
    Validation(String),
}
