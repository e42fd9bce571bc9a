use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use fresq_core::{order::Vehicle, stop::LocationLookup};
use tracing::info;

use crate::state::AppState;

/// The driver's GPS position is the depot. Replacing the vehicle moves
/// the route origin, so the lookup is rebuilt against the current orders.
pub async fn put_vehicle_handler(
    State(state): State<Arc<AppState>>,
    Json(vehicle): Json<Vehicle>,
) -> StatusCode {
    info!(
        "session vehicle set to {} at ({}, {})",
        vehicle.id, vehicle.start_location.lat, vehicle.start_location.lon
    );

    let mut session = state.session.write().await;
    session.lookup = Arc::new(LocationLookup::build(&vehicle, &session.orders));
    session.vehicle = Some(vehicle);

    StatusCode::NO_CONTENT
}
