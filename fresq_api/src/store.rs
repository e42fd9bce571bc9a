use fresq_core::{ngo::NgoSite, order::Order};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

#[derive(Serialize)]
struct StatusUpdateBody<'a> {
    order_id: &'a str,
    status: &'a str,
}

pub struct StoreClientParams {
    pub base_url: String,
}

pub const DEFAULT_STORE_URL: &str = "http://127.0.0.1:9000";

/// Read-mostly client for the order/NGO data store. The store is owned
/// by the donor side of the system; this dashboard only reads orders and
/// flips their status once a task is done.
pub struct StoreClient {
    params: StoreClientParams,
    client: reqwest::Client,
}

impl StoreClient {
    pub fn new(params: StoreClientParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(StoreClientParams {
            base_url: std::env::var("FRESQ_STORE_URL")
                .unwrap_or_else(|_| DEFAULT_STORE_URL.to_string()),
        })
    }

    pub async fn fetch_orders(&self) -> Result<Vec<Order>, StoreError> {
        let url = format!("{}/api/orders", self.params.base_url);
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api { status, message });
        }

        let orders: Vec<Order> = response.json().await?;
        debug!("StoreClient: fetched {} pending orders", orders.len());

        Ok(orders)
    }

    pub async fn fetch_ngo_sites(&self) -> Result<Vec<NgoSite>, StoreError> {
        let url = format!("{}/api/ngos", self.params.base_url);
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api { status, message });
        }

        Ok(response.json().await?)
    }

    pub async fn update_status(&self, order_id: &str, status: &str) -> Result<(), StoreError> {
        let url = format!("{}/api/update_status", self.params.base_url);
        let response = self
            .client
            .post(url)
            .json(&StatusUpdateBody { order_id, status })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api { status, message });
        }

        Ok(())
    }
}
