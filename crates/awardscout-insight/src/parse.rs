//! Extraction and validation of the JSON objects embedded in model replies.
//!
//! Model output is untrusted text. It may wrap the object in prose or
//! markdown fences, so the reply is scanned for a balanced `{...}` span that
//! parses as a JSON object before any schema check happens.

use serde::Deserialize;
use serde_json::{Map, Value};

use awardscout_core::{Award, ChanceAnalysis, ChanceLevel, EssayGuide, EssaySection};

use crate::error::InsightError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawChanceAnalysis {
    #[serde(default)]
    award_name: Option<String>,
    summary: String,
    chance_level: String,
    chance_percentage: f64,
    key_factors: Vec<String>,
    advice: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEssayGuide {
    hook: String,
    talking_points: Vec<String>,
    structure: Vec<EssaySection>,
}

/// Returns the first balanced `{...}` span in `text` that parses as a JSON
/// object.
///
/// Every `{` is tried as a starting point in order, so a stray brace in the
/// surrounding prose does not hide the real payload.
///
/// # Errors
///
/// Returns [`InsightError::Parse`] when `text` holds no `{` at all, or when
/// no candidate span is a valid JSON object.
pub fn extract_json_object(text: &str) -> Result<Map<String, Value>, InsightError> {
    let mut saw_brace = false;

    for (start, _) in text.match_indices('{') {
        saw_brace = true;
        let Some(candidate) = balanced_span(&text[start..]) else {
            continue;
        };
        if let Ok(Value::Object(object)) = serde_json::from_str::<Value>(candidate) {
            return Ok(object);
        }
    }

    Err(InsightError::Parse(if saw_brace {
        "response contained no valid JSON object".to_string()
    } else {
        "response contained no JSON object".to_string()
    }))
}

/// `text` must start with `{`. Returns the slice up to its matching `}`,
/// skipping braces inside string literals.
fn balanced_span(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
                continue;
            }
            match ch {
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[..=idx]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Parses a chance-analysis reply for `award`.
///
/// The award id always comes from `award`. The award name comes from the
/// reply when it carries a non-empty one.
///
/// # Errors
///
/// Returns [`InsightError::Parse`] when no JSON object is found, a required
/// field is missing or mistyped, `chanceLevel` is not `HIGH`, `MEDIUM` or
/// `LOW`, or `chancePercentage` falls outside `0..=100`.
pub fn parse_chance_analysis(text: &str, award: &Award) -> Result<ChanceAnalysis, InsightError> {
    let object = extract_json_object(text)?;
    let raw: RawChanceAnalysis = serde_json::from_value(Value::Object(object))
        .map_err(|e| InsightError::Parse(format!("chance analysis: {e}")))?;

    let chance_level = ChanceLevel::from_token(raw.chance_level.trim()).ok_or_else(|| {
        InsightError::Parse(format!(
            "chance analysis: unknown chanceLevel '{}'",
            raw.chance_level
        ))
    })?;

    let chance_percentage = percentage(raw.chance_percentage).ok_or_else(|| {
        InsightError::Parse(format!(
            "chance analysis: chancePercentage {} is outside 0..=100",
            raw.chance_percentage
        ))
    })?;

    let award_name = raw
        .award_name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| award.name.clone());

    Ok(ChanceAnalysis {
        award_id: award.id.clone(),
        award_name,
        summary: raw.summary,
        chance_level,
        chance_percentage,
        key_factors: raw.key_factors,
        advice: raw.advice,
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percentage(value: f64) -> Option<u8> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        // In range, so the rounded value fits in a u8.
        Some(value.round() as u8)
    } else {
        None
    }
}

/// Parses an essay-guide reply.
///
/// The section count is not enforced; the prompt asks for four.
///
/// # Errors
///
/// Returns [`InsightError::Parse`] when no JSON object is found, a required
/// field is missing or mistyped, or `talkingPoints` is empty.
pub fn parse_essay_guide(text: &str) -> Result<EssayGuide, InsightError> {
    let object = extract_json_object(text)?;
    let raw: RawEssayGuide = serde_json::from_value(Value::Object(object))
        .map_err(|e| InsightError::Parse(format!("essay guide: {e}")))?;

    if raw.talking_points.is_empty() {
        return Err(InsightError::Parse(
            "essay guide: talkingPoints is empty".to_string(),
        ));
    }

    Ok(EssayGuide {
        hook: raw.hook,
        talking_points: raw.talking_points,
        structure: raw.structure,
    })
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
