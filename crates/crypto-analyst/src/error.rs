//! Error Types for the Crypto Analyst

use thiserror::Error;

/// Result type alias for analyst operations
pub type Result<T> = std::result::Result<T, AnalystError>;

/// Analyst error types
#[derive(Error, Debug)]
pub enum AnalystError {
    /// Symbol not recognized by the price source
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Price source unreachable and no cached fallback available
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// A single feed source failed; absorbed inside the aggregator
    #[error("Feed error: {0}")]
    Feed(String),

    /// An optional capability (AI translation, article fetch) failed;
    /// triggers the local fallback path, never surfaced to the caller
    #[error("Capability error: {0}")]
    Capability(String),

    /// One analysis agent could not produce a score
    #[error("Agent error: {0}")]
    Agent(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AnalystError {
    /// Whether this error aborts a whole `analyze` call or only degrades it
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AnalystError::NotFound(_) | AnalystError::UpstreamUnavailable(_)
        )
    }

    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            AnalystError::NotFound(symbol) => {
                format!("Could not fetch data for {symbol}. Please check the symbol and try again.")
            }
            AnalystError::UpstreamUnavailable(_) => {
                "Market data is currently unavailable. Please try again later.".into()
            }
            AnalystError::Agent(name) => {
                format!("{name}: analysis temporarily unavailable")
            }
            _ => "An unexpected error occurred.".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_market_data_errors_are_terminal() {
        assert!(AnalystError::NotFound("XYZ".into()).is_terminal());
        assert!(AnalystError::UpstreamUnavailable("timeout".into()).is_terminal());

        assert!(!AnalystError::Feed("no items".into()).is_terminal());
        assert!(!AnalystError::Capability("model offline".into()).is_terminal());
        assert!(!AnalystError::Agent("bad input".into()).is_terminal());
        assert!(!AnalystError::Config("missing table".into()).is_terminal());
    }

    #[test]
    fn user_messages_stay_presentable() {
        let msg = AnalystError::NotFound("XYZ".into()).user_message();
        assert_eq!(
            msg,
            "Could not fetch data for XYZ. Please check the symbol and try again."
        );

        let msg = AnalystError::UpstreamUnavailable("503".into()).user_message();
        assert_eq!(msg, "Market data is currently unavailable. Please try again later.");
        // Internal detail never leaks into the user-facing text
        assert!(!msg.contains("503"));

        let msg = AnalystError::Feed("connection reset".into()).user_message();
        assert_eq!(msg, "An unexpected error occurred.");
    }
}
