//! Hand-written `GenerativeModel` stub and fixtures shared by unit tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use awardscout_core::{
    Award, AwardAmount, Campus, CitizenshipStatus, EligibilityCriteria, MatchResult,
    StudentProfile,
};
use rust_decimal::Decimal;
use tokio::sync::Notify;

use crate::error::InsightError;
use crate::model::GenerativeModel;

/// Replies with a valid analysis whose `chancePercentage` is the 1-based call
/// number, so repeated calls are distinguishable.
#[derive(Default)]
pub(crate) struct StubModel {
    pub unconfigured: bool,
    /// Prompts containing this text fail with an upstream error.
    pub fail_on: Option<String>,
    /// When set, each call waits for one notification before replying.
    pub gate: Option<Arc<Notify>>,
    /// Overrides the analysis reply.
    pub reply: Option<String>,
    pub calls: AtomicUsize,
}

impl StubModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl GenerativeModel for StubModel {
    fn is_configured(&self) -> bool {
        !self.unconfigured
    }

    async fn generate(&self, prompt: &str) -> Result<String, InsightError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if let Some(needle) = &self.fail_on {
            if prompt.contains(needle.as_str()) {
                return Err(InsightError::Upstream("HTTP 429: quota exceeded".to_string()));
            }
        }
        if let Some(reply) = &self.reply {
            return Ok(reply.clone());
        }
        Ok(format!(
            "Here you go:\n```json\n{{\"summary\":\"call {call}\",\"chanceLevel\":\"MEDIUM\",\
             \"chancePercentage\":{call},\"keyFactors\":[\"✓ Meets GPA\"],\"advice\":\"Apply.\"}}\n```"
        ))
    }
}

pub(crate) fn profile() -> StudentProfile {
    StudentProfile {
        faculty: Some("Science".to_string()),
        year: 2,
        program: None,
        gpa: Decimal::new(350, 2),
        campus: Campus::Vancouver,
        citizenship_status: CitizenshipStatus::CanadianCitizen,
        indigenous_status: false,
        has_disability: false,
        has_student_loan: true,
        has_financial_need: true,
        former_youth_in_care: false,
        part_time_student: false,
        gender: None,
        affiliations: BTreeMap::new(),
    }
}

pub(crate) fn award(n: usize) -> Award {
    Award {
        id: format!("award-{n}"),
        name: format!("Award Number {n}"),
        description: format!("Description for award {n}."),
        award_type: "Bursary".to_string(),
        amount: AwardAmount::Fixed(Decimal::new(1000, 0)),
        eligibility: EligibilityCriteria::default(),
        application_deadline: None,
        source_url: None,
    }
}

/// Matches for awards `1..=count`, in order, with descending scores.
pub(crate) fn matches(count: usize) -> Vec<MatchResult> {
    (1..=count)
        .map(|n| MatchResult {
            award: award(n),
            match_score: u8::try_from(100 - n).unwrap_or(0),
            match_reasons: vec![],
            missing_requirements: vec![],
        })
        .collect()
}
