//! Prompt builders for the two insight operations.
//!
//! Both prompts render the full profile and the award's criteria payload in
//! a fixed order, so identical inputs always produce identical prompt text.

use std::fmt::Write as _;

use awardscout_core::{Award, StudentProfile};

const NOT_SPECIFIED: &str = "Not specified";

const CHANCE_SCHEMA: &str = r#"{
  "awardName": "Name of the award",
  "summary": "One or two sentences on how well the student fits this award.",
  "chanceLevel": "HIGH | MEDIUM | LOW",
  "chancePercentage": 0,
  "keyFactors": [
    "✓ A factor that helps the student",
    "✗ A factor that hurts the student"
  ],
  "advice": "Concrete next steps to strengthen the application."
}"#;

const ESSAY_SCHEMA: &str = r#"{
  "hook": "A compelling opening sentence or hook tailored to this award and student.",
  "talkingPoints": [
    "Specific point 1 linking student's profile to award criteria",
    "Specific point 2",
    "Specific point 3"
  ],
  "structure": [
    { "section": "Introduction", "guidance": "What to cover in the intro..." },
    { "section": "Body Paragraph 1", "guidance": "Focus on..." },
    { "section": "Body Paragraph 2", "guidance": "Discuss..." },
    { "section": "Conclusion", "guidance": "How to wrap up..." }
  ]
}"#;

/// Prompt asking the model to estimate the student's odds for `award`.
#[must_use]
pub fn build_chance_prompt(profile: &StudentProfile, award: &Award) -> String {
    let mut prompt = String::from(
        "You are an experienced university awards adjudicator. Estimate how likely \
         this student is to win the award below, based only on the information given.\n\n",
    );
    write_profile(&mut prompt, profile);
    write_award(&mut prompt, award);
    prompt.push_str(
        "TASK:\n\
         Assess the student's chance of receiving THIS award.\n\
         - chanceLevel must be exactly one of HIGH, MEDIUM or LOW.\n\
         - chancePercentage must be an integer from 0 to 100.\n\
         - Prefix each key factor with \"✓ \" if it helps the student or \"✗ \" if it hurts.\n\
         Return ONLY valid JSON in the following format:\n\n",
    );
    prompt.push_str(CHANCE_SCHEMA);
    prompt.push('\n');
    prompt
}

/// Prompt asking the model for an essay outline for `award`.
#[must_use]
pub fn build_essay_prompt(profile: &StudentProfile, award: &Award) -> String {
    let mut prompt = String::from(
        "You are an expert scholarship essay coach. A student is applying for the \
         following award. Help them structure their essay.\n\n",
    );
    write_profile(&mut prompt, profile);
    write_award(&mut prompt, award);
    prompt.push_str(
        "TASK:\n\
         Generate a structured guide to help the student write a winning essay for THIS specific award.\n\
         Use exactly four structure sections: Introduction, two body paragraphs, Conclusion.\n\
         Return ONLY valid JSON in the following format:\n\n",
    );
    prompt.push_str(ESSAY_SCHEMA);
    prompt.push('\n');
    prompt
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn write_profile(out: &mut String, profile: &StudentProfile) {
    let affiliations = profile
        .active_affiliations()
        .map(awardscout_core::Affiliation::label)
        .collect::<Vec<_>>();
    let affiliations = if affiliations.is_empty() {
        "None provided".to_string()
    } else {
        affiliations.join(", ")
    };

    // Writing to a String cannot fail.
    let _ = write!(
        out,
        "STUDENT PROFILE:\n\
         - Faculty: {}\n\
         - Year: {}\n\
         - Program: {}\n\
         - GPA: {}\n\
         - Campus: {}\n\
         - Citizenship: {}\n\
         - Indigenous Status: {}\n\
         - Has Disability: {}\n\
         - Has Student Loan: {}\n\
         - Financial Need: {}\n\
         - Former Youth in Care: {}\n\
         - Part-time Student: {}\n\
         - Gender: {}\n\
         - Affiliations: {affiliations}\n\n",
        profile.faculty.as_deref().unwrap_or(NOT_SPECIFIED),
        profile.year,
        profile.program.as_deref().unwrap_or(NOT_SPECIFIED),
        profile.gpa.round_dp(2),
        profile.campus,
        profile.citizenship_status,
        yes_no(profile.indigenous_status),
        yes_no(profile.has_disability),
        yes_no(profile.has_student_loan),
        yes_no(profile.has_financial_need),
        yes_no(profile.former_youth_in_care),
        yes_no(profile.part_time_student),
        profile.gender.as_deref().unwrap_or(NOT_SPECIFIED),
    );
}

fn write_award(out: &mut String, award: &Award) {
    // serde_json::Map is ordered by key, so the payload is stable.
    let criteria = serde_json::to_string(&award.eligibility).unwrap_or_else(|_| "{}".to_string());
    let _ = write!(
        out,
        "AWARD DETAILS:\n\
         - Name: {}\n\
         - Type: {}\n\
         - Amount: {}\n\
         - Description: {}\n\
         - Application Deadline: {}\n\
         - Criteria: {criteria}\n\n",
        award.name,
        if award.award_type.is_empty() {
            NOT_SPECIFIED
        } else {
            &award.award_type
        },
        award.amount,
        award.description,
        award
            .application_deadline
            .map_or_else(|| NOT_SPECIFIED.to_string(), |d| d.to_string()),
    );
}
