//! Shapes of the AI-generated artifacts: chance analyses and essay guides.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChanceLevel {
    High,
    Medium,
    Low,
}

impl ChanceLevel {
    /// Strict parse of the model's token; anything but `HIGH`, `MEDIUM` or
    /// `LOW` is rejected.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "HIGH" => Some(ChanceLevel::High),
            "MEDIUM" => Some(ChanceLevel::Medium),
            "LOW" => Some(ChanceLevel::Low),
            _ => None,
        }
    }
}

impl std::fmt::Display for ChanceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChanceLevel::High => write!(f, "HIGH"),
            ChanceLevel::Medium => write!(f, "MEDIUM"),
            ChanceLevel::Low => write!(f, "LOW"),
        }
    }
}

/// Polarity marker a key factor may carry as its first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorPolarity {
    Positive,
    Negative,
    Neutral,
}

pub const POSITIVE_MARK: char = '✓';
pub const NEGATIVE_MARK: char = '✗';

impl FactorPolarity {
    /// Splits a factor into its polarity and the text after the marker.
    #[must_use]
    pub fn split(factor: &str) -> (Self, &str) {
        if let Some(rest) = factor.strip_prefix(POSITIVE_MARK) {
            (FactorPolarity::Positive, rest.trim_start())
        } else if let Some(rest) = factor.strip_prefix(NEGATIVE_MARK) {
            (FactorPolarity::Negative, rest.trim_start())
        } else {
            (FactorPolarity::Neutral, factor)
        }
    }
}

/// AI estimate of a student's odds for one award. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChanceAnalysis {
    pub award_id: String,
    pub award_name: String,
    pub summary: String,
    pub chance_level: ChanceLevel,
    pub chance_percentage: u8,
    pub key_factors: Vec<String>,
    pub advice: String,
}

impl ChanceAnalysis {
    pub fn factors(&self) -> impl Iterator<Item = (FactorPolarity, &str)> {
        self.key_factors.iter().map(|f| FactorPolarity::split(f))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EssaySection {
    pub section: String,
    pub guidance: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EssayGuide {
    pub hook: String,
    pub talking_points: Vec<String>,
    pub structure: Vec<EssaySection>,
}

impl EssayGuide {
    /// Plain-text outline suitable for copying into a document.
    #[must_use]
    pub fn to_plain_text(&self, award_name: &str) -> String {
        let points = self
            .talking_points
            .iter()
            .map(|p| format!("- {p}"))
            .collect::<Vec<_>>()
            .join("\n");
        let structure = self
            .structure
            .iter()
            .map(|s| format!("[{}]\n{}", s.section, s.guidance))
            .collect::<Vec<_>>()
            .join("\n\n");
        format!(
            "ESSAY GUIDE: {award_name}\n\nHOOK:\n{}\n\nKEY TALKING POINTS:\n{points}\n\nSTRUCTURE:\n{structure}\n",
            self.hook
        )
    }
}
