//! Plain-text rendering of session output for the terminal.

use std::fmt::Write as _;

use awardscout_core::{CategorizedMatches, ChanceAnalysis, FactorPolarity, MatchResult};
use awardscout_insight::{BatchReport, MatchSession};
use chrono::NaiveDate;

pub(crate) fn matches(categorized: &CategorizedMatches, today: NaiveDate) -> String {
    if categorized.is_empty() {
        return "no matching awards; check the profile and catalog\n".to_string();
    }

    let mut out = String::new();
    for (category, bucket) in categorized.buckets() {
        if bucket.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{} ({})", category.label(), bucket.len());
        for result in bucket {
            write_match(&mut out, result, today);
        }
        out.push('\n');
    }
    out
}

fn write_match(out: &mut String, result: &MatchResult, today: NaiveDate) {
    let award = &result.award;
    let deadline = match award.application_deadline {
        Some(d) if award.is_closed_on(today) => format!("  closed {d}"),
        Some(d) => format!("  due {d}"),
        None => String::new(),
    };
    let amount = award.amount.to_string();
    let _ = writeln!(
        out,
        "  {:>3}%  {amount:<12}{} [{}]{deadline}",
        result.match_score, award.name, award.id
    );
    for reason in &result.match_reasons {
        let _ = writeln!(out, "         \u{2713} {reason}");
    }
    for missing in &result.missing_requirements {
        let _ = writeln!(out, "         \u{2717} {missing}");
    }
}

pub(crate) fn analysis(analysis: &ChanceAnalysis) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} [{}]", analysis.award_name, analysis.award_id);
    let _ = writeln!(
        out,
        "Chance: {} ({}%)",
        analysis.chance_level, analysis.chance_percentage
    );
    let _ = writeln!(out, "\n{}", analysis.summary);

    if !analysis.key_factors.is_empty() {
        out.push_str("\nKey factors:\n");
        for (polarity, text) in analysis.factors() {
            let mark = match polarity {
                FactorPolarity::Positive => '+',
                FactorPolarity::Negative => '-',
                FactorPolarity::Neutral => '*',
            };
            let _ = writeln!(out, "  {mark} {text}");
        }
    }

    let _ = writeln!(out, "\nAdvice:\n{}", analysis.advice);
    out
}

/// Every cached analysis in match order, followed by the batch summary.
pub(crate) fn batch(session: &MatchSession, report: &BatchReport) -> String {
    let mut out = String::new();
    for result in session.matches() {
        if let Some(found) = session.cache().get(&result.award.id) {
            out.push_str(&analysis(&found));
            out.push_str("\n---\n\n");
        }
    }
    let _ = writeln!(
        out,
        "analyzed {} of {} attempted ({} failed, {} already cached)",
        report.succeeded, report.attempted, report.failed, report.already_cached
    );
    out
}
