use fresq_core::{
    order::{Order, Vehicle},
    stop::Stop,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum OptimizerError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

#[derive(Serialize)]
struct OptimizeRequestBody<'a> {
    vehicle: &'a Vehicle,
    orders: &'a [Order],
}

/// The optimizer's output shape. Its algorithm is a black box; the
/// ordered stop list is consumed as-is, never re-validated.
#[derive(Debug, Clone, Deserialize)]
pub struct OptimizedMission {
    pub route: Vec<Stop>,
    /// Meters over the whole route.
    pub total_distance: f64,
}

pub struct OptimizerClientParams {
    pub base_url: String,
}

pub const DEFAULT_OPTIMIZER_URL: &str = "http://127.0.0.1:9100";

pub struct OptimizerClient {
    params: OptimizerClientParams,
    client: reqwest::Client,
}

impl OptimizerClient {
    pub fn new(params: OptimizerClientParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(OptimizerClientParams {
            base_url: std::env::var("FRESQ_OPTIMIZER_URL")
                .unwrap_or_else(|_| DEFAULT_OPTIMIZER_URL.to_string()),
        })
    }

    pub async fn optimize(
        &self,
        vehicle: &Vehicle,
        orders: &[Order],
    ) -> Result<OptimizedMission, OptimizerError> {
        let url = format!("{}/api/optimize", self.params.base_url);
        let response = self
            .client
            .post(url)
            .json(&OptimizeRequestBody { vehicle, orders })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(OptimizerError::Api { status, message });
        }

        let mission: OptimizedMission = response.json().await?;
        debug!(
            "OptimizerClient: got {} stops over {:.0}m",
            mission.route.len(),
            mission.total_distance
        );

        Ok(mission)
    }
}
