//! Eligibility scoring: turns a profile and an award's criteria into a score
//! with human-readable reasons.
//!
//! The pipeline depends only on the [`EligibilityScorer`] contract.
//! [`RuleScorer`] is the reference rule set used by the CLI and server.

use crate::award::{Award, EligibilityCriteria};
use crate::matching::MatchResult;
use crate::profile::StudentProfile;

/// Output of an eligibility check for one award.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eligibility {
    pub match_score: u8,
    pub match_reasons: Vec<String>,
    pub missing_requirements: Vec<String>,
}

pub trait EligibilityScorer {
    fn score(&self, profile: &StudentProfile, award: &Award) -> Eligibility;
}

/// One reason or one missing requirement per criterion the award states.
///
/// Score is `round(100 * satisfied / stated)`; an award stating no criteria
/// scores 100.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleScorer;

impl EligibilityScorer for RuleScorer {
    fn score(&self, profile: &StudentProfile, award: &Award) -> Eligibility {
        let mut tally = Tally::default();
        check_academics(profile, &award.eligibility, &mut tally);
        check_status(profile, &award.eligibility, &mut tally);
        check_circumstances(profile, &award.eligibility, &mut tally);
        tally.finish()
    }
}

#[derive(Default)]
struct Tally {
    reasons: Vec<String>,
    missing: Vec<String>,
}

impl Tally {
    fn record(&mut self, satisfied: bool, reason: String, missing: String) {
        if satisfied {
            self.reasons.push(reason);
        } else {
            self.missing.push(missing);
        }
    }

    fn finish(self) -> Eligibility {
        let satisfied = self.reasons.len();
        let total = satisfied + self.missing.len();
        let match_score = if total == 0 {
            100
        } else {
            // Integer round-half-up of 100 * satisfied / total.
            u8::try_from((200 * satisfied + total) / (2 * total)).unwrap_or(100)
        };
        Eligibility {
            match_score,
            match_reasons: self.reasons,
            missing_requirements: self.missing,
        }
    }
}

fn contains_ignore_case(options: &[String], value: Option<&str>) -> bool {
    value.is_some_and(|v| options.iter().any(|o| o.eq_ignore_ascii_case(v.trim())))
}

fn check_academics(profile: &StudentProfile, criteria: &EligibilityCriteria, tally: &mut Tally) {
    if !criteria.faculties.is_empty() {
        tally.record(
            contains_ignore_case(&criteria.faculties, profile.faculty.as_deref()),
            format!("Faculty of {}", profile.faculty.as_deref().unwrap_or("")),
            format!("Faculty must be one of: {}", criteria.faculties.join(", ")),
        );
    }

    if !criteria.programs.is_empty() {
        tally.record(
            contains_ignore_case(&criteria.programs, profile.program.as_deref()),
            format!("Enrolled in {}", profile.program.as_deref().unwrap_or("")),
            format!("Program must be one of: {}", criteria.programs.join(", ")),
        );
    }

    if let Some(min_year) = criteria.min_year {
        tally.record(
            profile.year >= min_year,
            format!("Year {} meets minimum year {min_year}", profile.year),
            format!("Must be in year {min_year} or later"),
        );
    }

    if let Some(max_year) = criteria.max_year {
        tally.record(
            profile.year <= max_year,
            format!("Year {} is within year {max_year} limit", profile.year),
            format!("Must be in year {max_year} or earlier"),
        );
    }

    if let Some(min_gpa) = criteria.min_gpa {
        tally.record(
            profile.gpa >= min_gpa,
            format!("GPA {:.2} meets minimum {min_gpa:.2}", profile.gpa),
            format!("Minimum GPA of {min_gpa:.2} required"),
        );
    }

    if let Some(campus) = criteria.campus {
        tally.record(
            profile.campus == campus,
            format!("Studying at {campus} campus"),
            format!("Must study at {campus} campus"),
        );
    }
}

fn check_status(profile: &StudentProfile, criteria: &EligibilityCriteria, tally: &mut Tally) {
    if !criteria.citizenship.is_empty() {
        let allowed: Vec<String> = criteria.citizenship.iter().map(ToString::to_string).collect();
        tally.record(
            criteria.citizenship.contains(&profile.citizenship_status),
            format!("{} status is eligible", profile.citizenship_status),
            format!("Citizenship must be one of: {}", allowed.join(", ")),
        );
    }

    if criteria.requires_indigenous {
        tally.record(
            profile.indigenous_status,
            "Self-identifies as Indigenous".to_string(),
            "Open to Indigenous students only".to_string(),
        );
    }

    if !criteria.genders.is_empty() {
        tally.record(
            contains_ignore_case(&criteria.genders, profile.gender.as_deref()),
            format!("Gender: {}", profile.gender.as_deref().unwrap_or("")),
            format!("Open to: {}", criteria.genders.join(", ")),
        );
    }

    if !criteria.affiliations.is_empty() {
        let held: Vec<&str> = criteria
            .affiliations
            .iter()
            .filter(|a| profile.has_affiliation(**a))
            .map(|a| a.label())
            .collect();
        let required: Vec<&str> = criteria.affiliations.iter().map(|a| a.label()).collect();
        tally.record(
            !held.is_empty(),
            format!("Affiliated with: {}", held.join(", ")),
            format!("Requires affiliation with: {}", required.join(", ")),
        );
    }
}

fn check_circumstances(
    profile: &StudentProfile,
    criteria: &EligibilityCriteria,
    tally: &mut Tally,
) {
    if criteria.requires_disability {
        tally.record(
            profile.has_disability,
            "Has a documented disability".to_string(),
            "Open to students with a disability".to_string(),
        );
    }

    if criteria.requires_financial_need {
        tally.record(
            profile.has_financial_need,
            "Demonstrated financial need".to_string(),
            "Demonstrated financial need required".to_string(),
        );
    }

    if criteria.requires_student_loan {
        tally.record(
            profile.has_student_loan,
            "Receiving government student loans".to_string(),
            "Government student loan required".to_string(),
        );
    }

    if criteria.requires_former_youth_in_care {
        tally.record(
            profile.former_youth_in_care,
            "Former youth in care".to_string(),
            "Open to former youth in care".to_string(),
        );
    }

    if criteria.part_time_eligible == Some(false) {
        tally.record(
            !profile.part_time_student,
            "Full-time enrollment".to_string(),
            "Full-time enrollment required".to_string(),
        );
    }
}

/// Scores every award and returns the candidates best-first.
///
/// Awards scoring 0 satisfy none of their stated criteria and are dropped.
/// Ties keep catalog order.
pub fn match_awards<S>(profile: &StudentProfile, awards: &[Award], scorer: &S) -> Vec<MatchResult>
where
    S: EligibilityScorer + ?Sized,
{
    let mut matches: Vec<MatchResult> = awards
        .iter()
        .filter_map(|award| {
            let eligibility = scorer.score(profile, award);
            (eligibility.match_score > 0).then(|| MatchResult {
                award: award.clone(),
                match_score: eligibility.match_score,
                match_reasons: eligibility.match_reasons,
                missing_requirements: eligibility.missing_requirements,
            })
        })
        .collect();
    matches.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    matches
}

#[cfg(test)]
#[path = "eligibility_test.rs"]
mod tests;
