use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{ItineraryResponse, TripRequest};
use tracing::debug;

pub mod config;
pub mod controller;
pub mod error;
pub mod page;
pub mod render;

pub use config::{load_settings, Settings};
pub use controller::{
    events::{FormEvent, RenderSummary, SubmitOutcome},
    FormController,
};
pub use error::SubmitError;
pub use page::{FormField, MemoryPage, Page};

/// The single remote call behind the trip form.
#[async_trait]
pub trait ItineraryApi: Send + Sync {
    async fn generate(&self, request: &TripRequest) -> Result<ItineraryResponse, SubmitError>;
}

pub struct TripPlannerClient {
    http: Client,
    endpoint: String,
}

impl TripPlannerClient {
    pub fn new(server_url: &str) -> Self {
        Self::with_path(server_url, config::DEFAULT_GENERATE_PATH)
    }

    pub fn with_path(server_url: &str, generate_path: &str) -> Self {
        Self {
            http: Client::new(),
            endpoint: config::endpoint_url(server_url, generate_path),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_path(&settings.server_url, &settings.generate_path)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ItineraryApi for TripPlannerClient {
    /// Status codes are not inspected: the body decides between error,
    /// itinerary and decode failure.
    async fn generate(&self, request: &TripRequest) -> Result<ItineraryResponse, SubmitError> {
        let response = self.http.post(&self.endpoint).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(endpoint = %self.endpoint, %status, bytes = body.len(), "itinerary response received");
        Ok(ItineraryResponse::from_json_str(&body)?)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
