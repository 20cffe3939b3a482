use std::sync::Arc;

use reviewhub_config::ServerConfig;
use reviewhub_core::{LoadError, ReviewRecord, StartupError};
use tracing::{error, info};

use crate::dto::{HealthResponse, HealthStatus};

/// Result of the one load attempt made at startup.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(Vec<ReviewRecord>),
    Failed(StartupError),
}

impl From<Result<Vec<ReviewRecord>, LoadError>> for LoadOutcome {
    fn from(result: Result<Vec<ReviewRecord>, LoadError>) -> Self {
        match result {
            Ok(reviews) => LoadOutcome::Loaded(reviews),
            Err(e) => LoadOutcome::Failed(e.into()),
        }
    }
}

/// Read-only snapshot shared by every request handler.
///
/// Built once before the listener starts and never mutated afterwards.
#[derive(Debug)]
pub struct ServerState {
    reviews: Arc<[ReviewRecord]>,
    startup_error: Option<StartupError>,
}

impl ServerState {
    pub fn new(outcome: LoadOutcome) -> Self {
        match outcome {
            LoadOutcome::Loaded(reviews) => Self {
                reviews: reviews.into(),
                startup_error: None,
            },
            LoadOutcome::Failed(err) => {
                error!(kind = ?err.kind, "{}", err.message);
                Self {
                    reviews: Vec::new().into(),
                    startup_error: Some(err),
                }
            }
        }
    }

    /// Runs the loader against the configured data file and captures the outcome.
    pub async fn initialize(config: &ServerConfig) -> Self {
        let outcome: LoadOutcome = match &config.data_path {
            Some(path) => reviewhub_loader::load(path).await.into(),
            None => {
                let err = LoadError::DependencyMissing("DATA_PATH is set but empty".into());
                LoadOutcome::Failed(err.into())
            }
        };
        let state = Self::new(outcome);
        info!(reviews = state.reviews.len(), "Server state initialized");
        state
    }

    /// Loaded reviews, or the recorded startup failure.
    ///
    /// The reviews are shared: cloning the returned handle does not copy records.
    pub fn reviews(&self) -> Result<&Arc<[ReviewRecord]>, &StartupError> {
        match &self.startup_error {
            Some(err) => Err(err),
            None => Ok(&self.reviews),
        }
    }

    pub fn startup_error(&self) -> Option<&StartupError> {
        self.startup_error.as_ref()
    }

    pub fn health(&self) -> HealthResponse {
        HealthResponse {
            status: match self.startup_error {
                Some(_) => HealthStatus::Error,
                None => HealthStatus::Ok,
            },
            reviews_count: self.reviews.len(),
            startup_error: self.startup_error.as_ref().map(|e| e.message.clone()),
        }
    }
}
