use fresq_core::geopoint::GeoPoint;
use fresq_osrm::client::OsrmRouteClient;

/// Source of road geometry for an ordered waypoint sequence. The seam
/// exists so the resolver can be exercised against a stub service.
#[allow(async_fn_in_trait)]
pub trait RouteGeometryService {
    /// Returns the path geometry following actual roads, in (lat, lon)
    /// axis order. A single outbound call per invocation; no retries.
    async fn fetch_geometry(&self, waypoints: &[GeoPoint]) -> anyhow::Result<Vec<GeoPoint>>;
}

pub struct OsrmGeometryService {
    client: OsrmRouteClient,
}

impl OsrmGeometryService {
    pub fn new(client: OsrmRouteClient) -> Self {
        Self { client }
    }

    pub fn from_env() -> Self {
        Self::new(OsrmRouteClient::from_env())
    }
}

impl RouteGeometryService for OsrmGeometryService {
    async fn fetch_geometry(&self, waypoints: &[GeoPoint]) -> anyhow::Result<Vec<GeoPoint>> {
        let geometry = self.client.fetch_route(waypoints).await?;
        Ok(geometry.points)
    }
}
