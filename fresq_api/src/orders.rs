use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use fresq_core::{order::Order, stop::LocationLookup, urgency::UrgencyTier};
use jiff::Timestamp;
use serde::Serialize;
use tracing::info;

use crate::{error::ApiError, state::AppState, store::StoreError};

#[derive(Serialize)]
pub struct ClassifiedOrder {
    #[serde(flatten)]
    pub order: Order,
    pub urgency: UrgencyTier,
    pub minutes_remaining: i64,
}

#[derive(Serialize)]
pub struct StatusResponse {
    status: &'static str,
}

/// Fetches pending orders from the store and swaps them into the
/// session. Urgency is derived per order against the current clock, not
/// stored. On a store failure the prior order list stays as it was.
pub async fn get_orders_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ClassifiedOrder>>, ApiError> {
    let orders = state.store.fetch_orders().await?;

    let now = Timestamp::now();
    let classified = orders
        .iter()
        .map(|order| {
            let minutes_remaining = order.pickup_window.minutes_until_close(now);
            ClassifiedOrder {
                order: order.clone(),
                urgency: UrgencyTier::from_minutes_remaining(minutes_remaining),
                minutes_remaining,
            }
        })
        .collect();

    let no_orders_left = {
        let mut session = state.session.write().await;
        session.orders = Arc::new(orders);
        if let Some(vehicle) = session.vehicle.clone() {
            session.lookup = Arc::new(LocationLookup::build(&vehicle, &session.orders));
        }

        if session.orders.is_empty() {
            session.stops = Arc::new(Vec::new());
            session.total_distance = 0.0;
        }

        session.orders.is_empty()
    };

    if no_orders_left {
        // nothing left to drive to; drop the drawn route as well
        state.resolver.clear().await;
    }

    Ok(Json(classified))
}

pub async fn complete_order_handler(
    Path(order_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, ApiError> {
    state
        .store
        .update_status(&order_id, "completed")
        .await
        .map_err(|error| complete_error(&order_id, error))?;
    info!("order {order_id} marked completed");

    Ok(Json(StatusResponse { status: "success" }))
}

/// The store answers 404 for an order id it does not know; pass that
/// through instead of blaming the gateway.
fn complete_error(order_id: &str, error: StoreError) -> ApiError {
    match error {
        StoreError::Api { status: 404, .. } => {
            ApiError::NotFound(format!("order {order_id} not found"))
        }
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_order_maps_to_not_found() {
        let error = StoreError::Api {
            status: 404,
            message: "Order not found".to_string(),
        };

        assert!(matches!(
            complete_error("order42", error),
            ApiError::NotFound(_)
        ));
    }

    #[test]
    fn test_store_outage_stays_a_gateway_error() {
        let error = StoreError::Api {
            status: 500,
            message: "internal error".to_string(),
        };

        assert!(matches!(
            complete_error("order1", error),
            ApiError::BadGateway(_)
        ));
    }
}
