use thiserror::Error;

/// Errors returned by the AI insight operations.
#[derive(Debug, Error)]
pub enum InsightError {
    /// The service credential is absent. Raised before any network call.
    #[error("AI service not configured: {0}")]
    Configuration(String),

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with an error status or an unusable envelope.
    #[error("AI service error: {0}")]
    Upstream(String),

    /// The model reply held no extractable JSON object matching the schema.
    #[error("AI response malformed: {0}")]
    Parse(String),

    /// The requested award id is not present in the supplied lookup.
    #[error("award not found: {0}")]
    AwardNotFound(String),
}

impl InsightError {
    /// Transport failures and service-side errors are both upstream errors.
    #[must_use]
    pub fn is_upstream(&self) -> bool {
        matches!(self, InsightError::Http(_) | InsightError::Upstream(_))
    }

    /// Stable snake_case code for logs and HTTP error bodies.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            InsightError::Configuration(_) => "configuration_error",
            InsightError::Http(_) | InsightError::Upstream(_) => "upstream_error",
            InsightError::Parse(_) => "parse_error",
            InsightError::AwardNotFound(_) => "award_not_found",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_distinct_per_taxonomy_entry() {
        assert_eq!(
            InsightError::Configuration("x".into()).kind(),
            "configuration_error"
        );
        assert_eq!(InsightError::Upstream("x".into()).kind(), "upstream_error");
        assert_eq!(InsightError::Parse("x".into()).kind(), "parse_error");
        assert_eq!(
            InsightError::AwardNotFound("x".into()).kind(),
            "award_not_found"
        );
    }

    #[test]
    fn upstream_classification() {
        assert!(InsightError::Upstream("quota".into()).is_upstream());
        assert!(!InsightError::Parse("no json".into()).is_upstream());
        assert!(!InsightError::Configuration("no key".into()).is_upstream());
    }
}
