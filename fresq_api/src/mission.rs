use std::sync::Arc;

use axum::{Json, extract::State};
use fresq_core::stop::Stop;
use serde::Serialize;
use tracing::info;

use crate::{error::ApiError, state::AppState};

#[derive(Serialize)]
pub struct MissionResponse {
    pub route: Vec<Stop>,
    pub total_distance: f64,
}

/// Re-optimizes the mission from the current session state and kicks off
/// route-geometry resolution in the background. The response carries the
/// new stop sequence immediately; the drawable path shows up in the
/// scene once its resolution lands (stale ones are discarded).
pub async fn refresh_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MissionResponse>, ApiError> {
    let (vehicle, orders) = {
        let session = state.session.read().await;

        let Some(vehicle) = session.vehicle.clone() else {
            return Err(ApiError::BadRequest(
                "no driver position yet - send the vehicle location before optimizing".to_string(),
            ));
        };

        if session.orders.is_empty() {
            return Err(ApiError::BadRequest(
                "no pending orders to optimize - fetch orders first".to_string(),
            ));
        }

        (vehicle, Arc::clone(&session.orders))
    };

    let mission = state.optimizer.optimize(&vehicle, &orders).await?;
    info!(
        "optimizer returned {} stops over {:.0}m",
        mission.route.len(),
        mission.total_distance
    );

    // the ticket is taken under the same lock as the snapshot, so a
    // later refresh always outranks this one even if its task runs first
    let (ticket, stops, lookup) = {
        let mut session = state.session.write().await;
        session.stops = Arc::new(mission.route);
        session.total_distance = mission.total_distance;

        let ticket = state.resolver.begin();
        (ticket, Arc::clone(&session.stops), Arc::clone(&session.lookup))
    };

    let route = stops.as_ref().clone();

    let background = Arc::clone(&state);
    tokio::spawn(async move {
        background.resolver.resolve(ticket, &stops, &lookup).await;
    });

    Ok(Json(MissionResponse {
        route,
        total_distance: mission.total_distance,
    }))
}
