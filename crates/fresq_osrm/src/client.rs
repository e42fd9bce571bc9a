use fresq_core::geopoint::GeoPoint;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum OsrmError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Response contained no route")]
    NoRoute,
}

#[derive(Deserialize)]
struct OsrmRouteResponse {
    routes: Vec<OsrmRoute>,
}

#[derive(Deserialize)]
struct OsrmRoute {
    /// Distance in meters
    distance: f64,

    /// Travel time in seconds
    duration: f64,

    geometry: OsrmGeometry,
}

#[derive(Deserialize)]
struct OsrmGeometry {
    /// GeoJSON axis order: (lon, lat)
    coordinates: Vec<[f64; 2]>,
}

/// Road geometry for an ordered waypoint sequence, with coordinates
/// already flipped to (lat, lon).
pub struct RouteGeometry {
    pub distance: f64,
    pub duration: f64,
    pub points: Vec<GeoPoint>,
}

pub struct OsrmRouteClientParams {
    pub osrm_url: String,
}

pub const OSRM_ROUTE_API_PATH: &str = "/route/v1/driving/";
pub const DEFAULT_OSRM_URL: &str = "https://router.project-osrm.org";

pub struct OsrmRouteClient {
    params: OsrmRouteClientParams,
    client: reqwest::Client,
}

impl OsrmRouteClient {
    pub fn new(params: OsrmRouteClientParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(OsrmRouteClientParams {
            osrm_url: std::env::var("FRESQ_OSRM_URL")
                .unwrap_or_else(|_| DEFAULT_OSRM_URL.to_string()),
        })
    }

    /// One request for the whole waypoint sequence. The public OSRM
    /// instance is rate-limited and best-effort; every error here is
    /// recoverable by the caller.
    pub async fn fetch_route<P>(&self, points: &[P]) -> Result<RouteGeometry, OsrmError>
    where
        for<'a> &'a P: Into<geo_types::Point>,
    {
        let mut url = self.params.osrm_url.clone();
        url.push_str(OSRM_ROUTE_API_PATH);

        for (i, point) in points.iter().enumerate() {
            let point: geo_types::Point = point.into();
            url.push_str(&format!("{},{}", point.x(), point.y()));

            if i < points.len() - 1 {
                url.push(';');
            }
        }

        let response = self
            .client
            .get(url)
            .query(&[("overview", "full"), ("geometries", "geojson")])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(OsrmError::Api { status, message });
        }

        let body = response.text().await?;
        let geometry = parse_route_body(&body)?;

        debug!(
            "OsrmRouteClient: fetched route with {} points over {:.0}m",
            geometry.points.len(),
            geometry.distance
        );

        Ok(geometry)
    }
}

fn parse_route_body(body: &str) -> Result<RouteGeometry, OsrmError> {
    let response: OsrmRouteResponse = serde_json::from_str(body)?;

    let route = response.routes.into_iter().next().ok_or(OsrmError::NoRoute)?;

    // OSRM emits (lon, lat); internal axis order is (lat, lon)
    let points = route
        .geometry
        .coordinates
        .iter()
        .map(|pair| GeoPoint::new(pair[1], pair[0]))
        .collect();

    Ok(RouteGeometry {
        distance: route.distance,
        duration: route.duration,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_BODY: &str = r#"{
        "code": "Ok",
        "routes": [{
            "distance": 8250.3,
            "duration": 911.4,
            "geometry": {
                "type": "LineString",
                "coordinates": [[75.8236, 25.1825], [75.8402, 25.1911], [75.85, 25.20]]
            }
        }],
        "waypoints": []
    }"#;

    #[test]
    fn test_parse_flips_axis_order() {
        let geometry = parse_route_body(SAMPLE_BODY).unwrap();

        assert_eq!(geometry.points.len(), 3);
        assert_eq!(geometry.points[0], GeoPoint::new(25.1825, 75.8236));
        assert_eq!(geometry.points[2], GeoPoint::new(25.20, 75.85));
        assert_eq!(geometry.distance, 8250.3);
    }

    #[test]
    fn test_empty_route_list_is_an_error() {
        let body = r#"{"code": "NoRoute", "routes": [], "waypoints": []}"#;
        assert!(matches!(parse_route_body(body), Err(OsrmError::NoRoute)));
    }

    #[test]
    fn test_malformed_body_is_an_error() {
        let body = r#"{"code": "Ok", "routes": [{"distance": "far"}]}"#;
        assert!(matches!(
            parse_route_body(body),
            Err(OsrmError::Deserialize(_))
        ));
    }
}
