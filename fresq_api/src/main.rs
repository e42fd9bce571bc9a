mod error;
mod mission;
mod optimizer;
mod orders;
mod scene;
mod state;
mod store;
mod vehicle;

use std::sync::Arc;

use axum::http::Method;
use axum::routing::{get, post, put};
use axum::{Router, serve};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::{Level, info};

use crate::state::AppState;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() {
    dotenvy::from_filename("./.env.local").ok();
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let state = Arc::new(AppState::from_env());

    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_origin(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/api/session/vehicle", put(vehicle::put_vehicle_handler))
        .route("/api/orders", get(orders::get_orders_handler))
        .route(
            "/api/orders/{order_id}/complete",
            post(orders::complete_order_handler),
        )
        .route("/api/mission/refresh", post(mission::refresh_handler))
        .route("/api/mission/scene", get(scene::scene_handler))
        .layer(ServiceBuilder::new().layer(cors_layer))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:8080")
        .await
        .unwrap();

    info!("fresq driver api listening on 127.0.0.1:8080");

    serve(listener, app).await.unwrap();
}
