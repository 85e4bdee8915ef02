use awardscout_core::{AwardAmount, EligibilityCriteria};
use rust_decimal::Decimal;

use super::*;

fn award() -> Award {
    Award {
        id: "trek-excellence".to_string(),
        name: "Trek Excellence Scholarship".to_string(),
        description: String::new(),
        award_type: "Scholarship".to_string(),
        amount: AwardAmount::Fixed(Decimal::new(1000, 0)),
        eligibility: EligibilityCriteria::default(),
        application_deadline: None,
        source_url: None,
    }
}

const ANALYSIS_JSON: &str = r#"{"awardName":"X","summary":"Good fit.","chanceLevel":"HIGH","chancePercentage":82,"keyFactors":["✓ GPA well above minimum","✗ Only one reference"],"advice":"Apply early."}"#;

#[test]
fn extracts_object_wrapped_in_prose_and_fences() {
    let reply = format!("Sure! Here's the analysis:\n```json\n{ANALYSIS_JSON}\n```\nGood luck!");
    let analysis = parse_chance_analysis(&reply, &award()).unwrap();
    assert_eq!(analysis.award_id, "trek-excellence");
    assert_eq!(analysis.award_name, "X");
    assert_eq!(analysis.chance_level, ChanceLevel::High);
    assert_eq!(analysis.chance_percentage, 82);
    assert_eq!(analysis.key_factors.len(), 2);
    assert_eq!(analysis.advice, "Apply early.");
}

#[test]
fn reply_without_brace_is_parse_error() {
    let err = parse_chance_analysis("I cannot help with that request.", &award()).unwrap_err();
    assert!(matches!(err, InsightError::Parse(ref m) if m.contains("no JSON object")));
}

#[test]
fn stray_brace_in_prose_is_skipped() {
    let reply = format!("Use {{your name}} below.\n{ANALYSIS_JSON}");
    let analysis = parse_chance_analysis(&reply, &award()).unwrap();
    assert_eq!(analysis.chance_percentage, 82);
}

#[test]
fn braces_inside_strings_do_not_end_the_object() {
    let object =
        extract_json_object(r#"note: {"summary":"uses } and { freely","n":{"k":"\"}"}} tail"#)
            .unwrap();
    assert_eq!(object["summary"], "uses } and { freely");
    assert_eq!(object["n"]["k"], "\"}");
}

#[test]
fn unbalanced_object_is_parse_error() {
    let err = extract_json_object(r#"{"summary": "cut off"#).unwrap_err();
    assert!(matches!(err, InsightError::Parse(ref m) if m.contains("no valid JSON object")));
}

#[test]
fn missing_required_field_is_parse_error() {
    let reply = r#"{"summary":"ok","chanceLevel":"LOW","chancePercentage":10,"keyFactors":[]}"#;
    let err = parse_chance_analysis(reply, &award()).unwrap_err();
    assert!(matches!(err, InsightError::Parse(ref m) if m.contains("advice")));
}

#[test]
fn unknown_chance_level_is_parse_error() {
    let reply = ANALYSIS_JSON.replace("\"HIGH\"", "\"VERY HIGH\"");
    let err = parse_chance_analysis(&reply, &award()).unwrap_err();
    assert!(matches!(err, InsightError::Parse(ref m) if m.contains("VERY HIGH")));

    let lowercase = ANALYSIS_JSON.replace("\"HIGH\"", "\"high\"");
    assert!(parse_chance_analysis(&lowercase, &award()).is_err());
}

#[test]
fn percentage_is_rounded_and_range_checked() {
    let fractional = ANALYSIS_JSON.replace("82", "66.6");
    assert_eq!(
        parse_chance_analysis(&fractional, &award())
            .unwrap()
            .chance_percentage,
        67
    );

    let too_high = ANALYSIS_JSON.replace("82", "140");
    assert!(matches!(
        parse_chance_analysis(&too_high, &award()),
        Err(InsightError::Parse(_))
    ));
}

#[test]
fn blank_award_name_falls_back_to_catalog_name() {
    let reply = ANALYSIS_JSON.replace("\"awardName\":\"X\"", "\"awardName\":\"  \"");
    let analysis = parse_chance_analysis(&reply, &award()).unwrap();
    assert_eq!(analysis.award_name, "Trek Excellence Scholarship");
}

#[test]
fn essay_guide_parses_and_allows_other_section_counts() {
    let reply = r#"```json
{
  "hook": "Start with the night the power went out.",
  "talkingPoints": ["Community tutoring", "Persistence through financial strain"],
  "structure": [
    {"section": "Introduction", "guidance": "Open with the story."},
    {"section": "Conclusion", "guidance": "Return to the opening image."}
  ]
}
```"#;
    let guide = parse_essay_guide(reply).unwrap();
    assert_eq!(guide.talking_points.len(), 2);
    assert_eq!(guide.structure.len(), 2);
    assert_eq!(guide.structure[1].section, "Conclusion");
}

#[test]
fn essay_guide_requires_talking_points() {
    let reply = r#"{"hook":"h","talkingPoints":[],"structure":[]}"#;
    assert!(matches!(
        parse_essay_guide(reply),
        Err(InsightError::Parse(ref m)) if m.contains("talkingPoints")
    ));

    let no_structure = r#"{"hook":"h","talkingPoints":["a"]}"#;
    assert!(matches!(
        parse_essay_guide(no_structure),
        Err(InsightError::Parse(_))
    ));
}
