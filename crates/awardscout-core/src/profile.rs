//! Student profile submitted to a matching session.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::CoreError;

/// Highest GPA on the 4.33 scale.
pub const MAX_GPA: Decimal = Decimal::from_parts(433, 0, 0, false, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Campus {
    Vancouver,
    Okanagan,
}

impl std::fmt::Display for Campus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Campus::Vancouver => write!(f, "Vancouver"),
            Campus::Okanagan => write!(f, "Okanagan"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CitizenshipStatus {
    #[serde(rename = "Canadian Citizen")]
    CanadianCitizen,
    #[serde(rename = "Permanent Resident")]
    PermanentResident,
    Refugee,
    International,
}

impl CitizenshipStatus {
    /// Citizens, permanent residents and refugees are "domestic" for award purposes.
    #[must_use]
    pub fn is_domestic(self) -> bool {
        !matches!(self, CitizenshipStatus::International)
    }
}

impl std::fmt::Display for CitizenshipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CitizenshipStatus::CanadianCitizen => write!(f, "Canadian Citizen"),
            CitizenshipStatus::PermanentResident => write!(f, "Permanent Resident"),
            CitizenshipStatus::Refugee => write!(f, "Refugee"),
            CitizenshipStatus::International => write!(f, "International"),
        }
    }
}

/// Community, heritage and membership affiliations some awards are restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Affiliation {
    AlphaGammaDelta,
    CanadianArmedForces,
    ChineseAncestry,
    IranianHeritage,
    SwedishHeritage,
    Ilwu,
    Ufcw,
    BeemCreditUnion,
    SikhCommunity,
    PipingIndustry,
    RoyalCanadianLegion,
    KnightsPythias,
}

impl Affiliation {
    pub const ALL: [Affiliation; 12] = [
        Affiliation::AlphaGammaDelta,
        Affiliation::CanadianArmedForces,
        Affiliation::ChineseAncestry,
        Affiliation::IranianHeritage,
        Affiliation::SwedishHeritage,
        Affiliation::Ilwu,
        Affiliation::Ufcw,
        Affiliation::BeemCreditUnion,
        Affiliation::SikhCommunity,
        Affiliation::PipingIndustry,
        Affiliation::RoyalCanadianLegion,
        Affiliation::KnightsPythias,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Affiliation::AlphaGammaDelta => "Alpha Gamma Delta Member",
            Affiliation::CanadianArmedForces => "Canadian Armed Forces",
            Affiliation::ChineseAncestry => "Chinese Ancestry",
            Affiliation::IranianHeritage => "Persian/Iranian Heritage",
            Affiliation::SwedishHeritage => "Swedish Heritage",
            Affiliation::Ilwu => "ILWU Member/Family",
            Affiliation::Ufcw => "UFCW Local 1518",
            Affiliation::BeemCreditUnion => "Beem Credit Union",
            Affiliation::SikhCommunity => "Sikh Community",
            Affiliation::PipingIndustry => "Piping Industry/UA 170",
            Affiliation::RoyalCanadianLegion => "Royal Canadian Legion",
            Affiliation::KnightsPythias => "Knights Pythias",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub faculty: Option<String>,
    /// Year of study; 5 means "5th year or later".
    pub year: u8,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub program: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub gpa: Decimal,
    pub campus: Campus,
    pub citizenship_status: CitizenshipStatus,
    #[serde(default)]
    pub indigenous_status: bool,
    #[serde(default)]
    pub has_disability: bool,
    #[serde(default)]
    pub has_student_loan: bool,
    #[serde(default)]
    pub has_financial_need: bool,
    #[serde(default)]
    pub former_youth_in_care: bool,
    #[serde(default)]
    pub part_time_student: bool,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub gender: Option<String>,
    #[serde(default)]
    pub affiliations: BTreeMap<Affiliation, bool>,
}

impl StudentProfile {
    /// Absent affiliation keys count as `false`.
    #[must_use]
    pub fn has_affiliation(&self, affiliation: Affiliation) -> bool {
        self.affiliations.get(&affiliation).copied().unwrap_or(false)
    }

    /// Selected affiliations in their canonical order.
    pub fn active_affiliations(&self) -> impl Iterator<Item = Affiliation> + '_ {
        Affiliation::ALL
            .into_iter()
            .filter(|a| self.has_affiliation(*a))
    }

    /// Rejects values outside the ranges the rest of the pipeline assumes.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidProfile`] when `year` is zero or the GPA
    /// falls outside `0.00..=4.33`.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.year == 0 {
            return Err(CoreError::InvalidProfile(
                "year must be at least 1".to_string(),
            ));
        }
        if self.gpa.is_sign_negative() || self.gpa > MAX_GPA {
            return Err(CoreError::InvalidProfile(format!(
                "gpa {} is outside 0.00..=4.33",
                self.gpa
            )));
        }
        Ok(())
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_json() -> serde_json::Value {
        serde_json::json!({
            "faculty": "Science",
            "year": 2,
            "program": "",
            "gpa": 3.7,
            "campus": "Vancouver",
            "citizenshipStatus": "Permanent Resident",
            "indigenousStatus": false,
            "hasDisability": true,
            "hasStudentLoan": false,
            "hasFinancialNeed": true,
            "gender": "",
            "affiliations": { "chineseAncestry": true, "ilwu": false }
        })
    }

    #[test]
    fn deserializes_wizard_payload() {
        let profile: StudentProfile = serde_json::from_value(profile_json()).expect("parse");
        assert_eq!(profile.faculty.as_deref(), Some("Science"));
        assert_eq!(profile.program, None, "empty strings become None");
        assert_eq!(profile.gender, None);
        assert_eq!(profile.gpa, Decimal::new(37, 1));
        assert_eq!(profile.citizenship_status, CitizenshipStatus::PermanentResident);
        assert!(!profile.former_youth_in_care, "missing flags default to false");
        assert!(profile.has_affiliation(Affiliation::ChineseAncestry));
        assert!(!profile.has_affiliation(Affiliation::Ilwu));
        assert!(!profile.has_affiliation(Affiliation::SikhCommunity));
    }

    #[test]
    fn rejects_unknown_affiliation_key() {
        let mut json = profile_json();
        json["affiliations"] = serde_json::json!({ "chessClub": true });
        assert!(serde_json::from_value::<StudentProfile>(json).is_err());
    }

    #[test]
    fn active_affiliations_follow_canonical_order() {
        let mut profile: StudentProfile = serde_json::from_value(profile_json()).unwrap();
        profile.affiliations.insert(Affiliation::AlphaGammaDelta, true);
        let active: Vec<_> = profile.active_affiliations().collect();
        assert_eq!(
            active,
            vec![Affiliation::AlphaGammaDelta, Affiliation::ChineseAncestry]
        );
    }

    #[test]
    fn validate_bounds() {
        let mut profile: StudentProfile = serde_json::from_value(profile_json()).unwrap();
        assert!(profile.validate().is_ok());

        profile.gpa = MAX_GPA;
        assert!(profile.validate().is_ok(), "4.33 is inclusive");

        profile.gpa = Decimal::new(434, 2);
        assert!(profile.validate().is_err());

        profile.gpa = Decimal::new(30, 1);
        profile.year = 0;
        assert!(profile.validate().is_err());
    }

    #[test]
    fn citizenship_domestic_classification() {
        assert!(CitizenshipStatus::Refugee.is_domestic());
        assert!(!CitizenshipStatus::International.is_domestic());
    }
}
