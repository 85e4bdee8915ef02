//! AI decision support for matched awards.
//!
//! Builds prompts from a student profile and an award, sends them to a
//! generative-language-model service, and parses the free-form reply into
//! a [`ChanceAnalysis`](awardscout_core::ChanceAnalysis) or an
//! [`EssayGuide`](awardscout_core::EssayGuide). [`AnalysisCache`] keeps
//! chance analyses for the lifetime of one matching session and runs the
//! sequential top-N batch.

pub mod analysis;
pub mod cache;
pub mod error;
pub mod gemini;
pub mod model;
pub mod parse;
pub mod prompts;
pub mod session;

pub use analysis::{request_chance_analysis, request_essay_guide};
pub use cache::{AnalysisCache, BatchOptions, BatchReport};
pub use error::InsightError;
pub use gemini::GeminiClient;
pub use model::GenerativeModel;
pub use session::MatchSession;

#[cfg(test)]
mod test_support;
