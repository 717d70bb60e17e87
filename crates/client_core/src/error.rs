use thiserror::Error;

/// Failures of a single `/generate` round trip that are not reported by the
/// service itself. The page shows one generic message for all of them.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("request to itinerary service failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("itinerary response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SubmitError {
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
