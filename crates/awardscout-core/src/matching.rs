//! Match results and their Perfect / Good / Partial categorization.

use serde::{Deserialize, Serialize};

use crate::award::Award;

/// Lowest score that counts as a perfect match.
pub const PERFECT_THRESHOLD: u8 = 90;
/// Lowest score that counts as a good match.
pub const GOOD_THRESHOLD: u8 = 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub award: Award,
    /// 0..=100, produced by the eligibility scorer and never recomputed here.
    pub match_score: u8,
    pub match_reasons: Vec<String>,
    pub missing_requirements: Vec<String>,
}

impl MatchResult {
    #[must_use]
    pub fn category(&self) -> MatchCategory {
        MatchCategory::of(self.match_score)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchCategory {
    Perfect,
    Good,
    Partial,
}

impl MatchCategory {
    /// Boundary scores fall into the higher bucket: 90 is perfect, 60 is good.
    #[must_use]
    pub fn of(score: u8) -> Self {
        if score >= PERFECT_THRESHOLD {
            MatchCategory::Perfect
        } else if score >= GOOD_THRESHOLD {
            MatchCategory::Good
        } else {
            MatchCategory::Partial
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MatchCategory::Perfect => "Perfect Match",
            MatchCategory::Good => "Good Match",
            MatchCategory::Partial => "Partial Match",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorizedMatches {
    pub perfect: Vec<MatchResult>,
    pub good: Vec<MatchResult>,
    pub partial: Vec<MatchResult>,
}

impl CategorizedMatches {
    #[must_use]
    pub fn len(&self) -> usize {
        self.perfect.len() + self.good.len() + self.partial.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Buckets in display order, each paired with its category.
    pub fn buckets(&self) -> [(MatchCategory, &[MatchResult]); 3] {
        [
            (MatchCategory::Perfect, self.perfect.as_slice()),
            (MatchCategory::Good, self.good.as_slice()),
            (MatchCategory::Partial, self.partial.as_slice()),
        ]
    }
}

/// Stable single-pass partition of `results` into the three buckets.
///
/// Every result lands in exactly one bucket and keeps its relative order.
#[must_use]
pub fn categorize(results: &[MatchResult]) -> CategorizedMatches {
    let mut out = CategorizedMatches::default();
    for result in results {
        let bucket = match result.category() {
            MatchCategory::Perfect => &mut out.perfect,
            MatchCategory::Good => &mut out.good,
            MatchCategory::Partial => &mut out.partial,
        };
        bucket.push(result.clone());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::award::{AwardAmount, EligibilityCriteria};

    fn result(id: &str, score: u8) -> MatchResult {
        MatchResult {
            award: Award {
                id: id.to_string(),
                name: format!("Award {id}"),
                description: String::new(),
                award_type: "Scholarship".to_string(),
                amount: AwardAmount::Text("Varies".to_string()),
                eligibility: EligibilityCriteria::default(),
                application_deadline: None,
                source_url: None,
            },
            match_score: score,
            match_reasons: vec![],
            missing_requirements: vec![],
        }
    }

    fn ids(bucket: &[MatchResult]) -> Vec<&str> {
        bucket.iter().map(|m| m.award.id.as_str()).collect()
    }

    #[test]
    fn boundary_scores_fall_into_higher_bucket() {
        assert_eq!(MatchCategory::of(100), MatchCategory::Perfect);
        assert_eq!(MatchCategory::of(90), MatchCategory::Perfect);
        assert_eq!(MatchCategory::of(89), MatchCategory::Good);
        assert_eq!(MatchCategory::of(60), MatchCategory::Good);
        assert_eq!(MatchCategory::of(59), MatchCategory::Partial);
        assert_eq!(MatchCategory::of(0), MatchCategory::Partial);
    }

    #[test]
    fn empty_input_yields_empty_buckets() {
        let out = categorize(&[]);
        assert!(out.perfect.is_empty());
        assert!(out.good.is_empty());
        assert!(out.partial.is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn partition_is_complete_and_stable() {
        let input = vec![
            result("a", 59),
            result("b", 90),
            result("c", 60),
            result("d", 100),
            result("e", 89),
            result("f", 10),
        ];
        let out = categorize(&input);

        assert_eq!(ids(&out.perfect), vec!["b", "d"]);
        assert_eq!(ids(&out.good), vec!["c", "e"]);
        assert_eq!(ids(&out.partial), vec!["a", "f"]);
        assert_eq!(out.len(), input.len());
    }

    #[test]
    fn categorizing_twice_is_idempotent() {
        let input = vec![result("a", 95), result("b", 70), result("c", 30)];
        let once = categorize(&input);
        let flattened: Vec<MatchResult> = once
            .buckets()
            .into_iter()
            .flat_map(|(_, bucket)| bucket.iter().cloned())
            .collect();
        assert_eq!(categorize(&flattened), once);
    }

    #[test]
    fn category_labels() {
        assert_eq!(MatchCategory::Perfect.label(), "Perfect Match");
        assert_eq!(MatchCategory::Good.label(), "Good Match");
        assert_eq!(MatchCategory::Partial.label(), "Partial Match");
    }
}
