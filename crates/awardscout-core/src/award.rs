//! Award records as read from the catalog.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::matching::MatchResult;
use crate::profile::{Affiliation, Campus, CitizenshipStatus};

/// Award value: a fixed dollar amount, or free text such as `"Varies"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AwardAmount {
    Fixed(#[serde(with = "rust_decimal::serde::float")] Decimal),
    Text(String),
}

impl std::fmt::Display for AwardAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AwardAmount::Text(text) => f.write_str(text),
            AwardAmount::Fixed(value) => {
                let rounded = value.round_dp(2);
                let whole = rounded.trunc().abs().to_string();
                let cents = (rounded.fract().abs() * Decimal::ONE_HUNDRED).round();
                let sign = if rounded.is_sign_negative() { "-" } else { "" };
                write!(f, "{sign}${}", group_thousands(&whole))?;
                if !cents.is_zero() {
                    write!(f, ".{:0>2}", cents.to_string())?;
                }
                Ok(())
            }
        }
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Structured eligibility criteria.
///
/// Only the eligibility scorer interprets these fields. Keys the scorer does
/// not know are kept in `extra` so the full payload still reaches the prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityCriteria {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub faculties: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub programs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_year: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_year: Option<u8>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub min_gpa: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campus: Option<Campus>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub citizenship: Vec<CitizenshipStatus>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub requires_indigenous: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub requires_disability: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub requires_financial_need: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub requires_student_loan: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub requires_former_youth_in_care: bool,
    /// `Some(false)` restricts the award to full-time students.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_time_eligible: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genders: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affiliations: Vec<Affiliation>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Award {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub award_type: String,
    pub amount: AwardAmount,
    #[serde(default)]
    pub eligibility: EligibilityCriteria,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_deadline: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

impl Award {
    /// Awards without a deadline never close.
    #[must_use]
    pub fn is_closed_on(&self, date: NaiveDate) -> bool {
        self.application_deadline
            .is_some_and(|deadline| deadline < date)
    }
}

/// Read-only access to award records by id.
pub trait AwardLookup {
    fn find_award(&self, award_id: &str) -> Option<&Award>;
}

impl AwardLookup for [Award] {
    fn find_award(&self, award_id: &str) -> Option<&Award> {
        self.iter().find(|a| a.id == award_id)
    }
}

impl AwardLookup for [MatchResult] {
    fn find_award(&self, award_id: &str) -> Option<&Award> {
        self.iter().map(|m| &m.award).find(|a| a.id == award_id)
    }
}
