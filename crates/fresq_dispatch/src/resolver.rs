use std::sync::atomic::{AtomicU64, Ordering};

use fresq_core::{
    geopoint::GeoPoint,
    route_path::RoutePath,
    stop::{DEPOT_LOCATION_ID, LocationLookup, Stop},
};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::route_service::RouteGeometryService;

/// Maps each stop to a coordinate through the lookup, order-preserving.
/// Stops without a lookup entry are dropped, not an error: the dashboard
/// must tolerate partial or late data. The depot, when known, is always
/// the implicit origin, so explicit DEPOT stops are skipped.
pub fn extract_waypoints(stops: &[Stop], locations: &LocationLookup) -> Vec<GeoPoint> {
    let mut waypoints = Vec::with_capacity(stops.len() + 1);

    if let Some(depot) = locations.depot() {
        waypoints.push(depot);
    }

    for stop in stops {
        if stop.location_id == DEPOT_LOCATION_ID {
            continue;
        }

        if let Some(point) = locations.get(&stop.location_id) {
            waypoints.push(point);
        }
    }

    waypoints
}

/// Resolves an ordered stop list into a drawable path. One service call
/// per attempt; any failure degrades to straight lines between the
/// waypoints instead of raising.
pub async fn resolve_path<S: RouteGeometryService>(
    service: &S,
    stops: &[Stop],
    locations: &LocationLookup,
) -> RoutePath {
    let waypoints = extract_waypoints(stops, locations);

    if waypoints.len() < 2 {
        return RoutePath::empty();
    }

    match service.fetch_geometry(&waypoints).await {
        Ok(points) if !points.is_empty() => RoutePath::road(points),
        Ok(_) => {
            warn!("routing service returned empty geometry, drawing straight lines");
            RoutePath::straight_line(waypoints)
        }
        Err(error) => {
            warn!("routing service unavailable ({error}), drawing straight lines");
            RoutePath::straight_line(waypoints)
        }
    }
}

/// Owns the currently displayed path and guards it against stale
/// resolutions: a generation ticket is taken the moment an input
/// snapshot is made ([`RouteResolver::begin`]), and a completed
/// resolution is applied only if its ticket is still the newest. The
/// in-flight network call itself is never cancelled, only its effect is
/// suppressed.
pub struct RouteResolver<S> {
    service: S,
    generation: AtomicU64,
    current: RwLock<RoutePath>,
}

impl<S: RouteGeometryService> RouteResolver<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            generation: AtomicU64::new(0),
            current: RwLock::new(RoutePath::empty()),
        }
    }

    pub async fn current_path(&self) -> RoutePath {
        self.current.read().await.clone()
    }

    /// Registers a new resolution generation. Call this while taking
    /// the (stops, locations) snapshot, so ticket order matches
    /// snapshot order even when the resolutions themselves are
    /// scheduled out of order.
    pub fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Resolves and, if `ticket` is still the newest, swaps the
    /// displayed path wholesale. Returns whether the result was
    /// applied.
    pub async fn resolve(&self, ticket: u64, stops: &[Stop], locations: &LocationLookup) -> bool {
        let path = resolve_path(&self.service, stops, locations).await;

        let mut current = self.current.write().await;
        if self.generation.load(Ordering::SeqCst) != ticket {
            debug!("discarding stale route resolution (ticket {ticket})");
            return false;
        }

        *current = path;
        true
    }

    /// Drops the displayed path and invalidates anything still in flight.
    pub async fn clear(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        *self.current.write().await = RoutePath::empty();
    }
}
