use std::sync::Arc;

use axum::{Json, extract::State};
use fresq_core::{geopoint::GeoPoint, ngo::NgoSite, route_path::RouteFidelity};
use fresq_dispatch::compositor::{FlowIndicator, MapLayer, StopMarker, compose_scene};
use geojson::Value::LineString;
use geojson::{Feature, GeoJson, Geometry};
use serde::Serialize;

use crate::{error::ApiError, state::AppState};

#[derive(Serialize)]
pub struct SceneResponse {
    pub layers: Vec<ApiLayer>,
}

/// Wire form of a composed layer. The route line goes out as GeoJSON so
/// map clients can feed it straight into their line source.
#[derive(Serialize)]
#[serde(tag = "layer", rename_all = "snake_case")]
pub enum ApiLayer {
    BaseTiles,
    NgoMarkers {
        sites: Vec<NgoSite>,
    },
    RouteLine {
        path: GeoJson,
        fidelity: RouteFidelity,
    },
    FlowIndicators {
        indicators: Vec<FlowIndicator>,
    },
    StopMarkers {
        markers: Vec<StopMarker>,
    },
}

pub async fn scene_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SceneResponse>, ApiError> {
    let sites = state
        .ngo_sites
        .get_or_try_init(|| state.store.fetch_ngo_sites())
        .await?;

    let (stops, lookup) = {
        let session = state.session.read().await;
        (Arc::clone(&session.stops), Arc::clone(&session.lookup))
    };
    let path = state.resolver.current_path().await;

    let scene = compose_scene(&path, &stops, &lookup, sites);

    Ok(Json(SceneResponse {
        layers: scene.layers.into_iter().map(to_api_layer).collect(),
    }))
}

fn to_api_layer(layer: MapLayer) -> ApiLayer {
    match layer {
        MapLayer::BaseTiles => ApiLayer::BaseTiles,
        MapLayer::NgoMarkers { sites } => ApiLayer::NgoMarkers { sites },
        MapLayer::RouteLine { points, fidelity } => ApiLayer::RouteLine {
            path: route_line_feature(&points),
            fidelity,
        },
        MapLayer::FlowIndicators { indicators } => ApiLayer::FlowIndicators { indicators },
        MapLayer::StopMarkers { markers } => ApiLayer::StopMarkers { markers },
    }
}

fn route_line_feature(points: &[GeoPoint]) -> GeoJson {
    // GeoJSON wants (lon, lat) back
    let coordinates: Vec<Vec<f64>> = points.iter().map(|point| vec![point.lon, point.lat]).collect();

    let feature = Feature {
        geometry: Some(Geometry::new(LineString(coordinates))),
        ..Default::default()
    };

    GeoJson::Feature(feature)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_line_feature_axis_order() {
        let points = vec![GeoPoint::new(25.1825, 75.8236), GeoPoint::new(25.20, 75.85)];

        let GeoJson::Feature(feature) = route_line_feature(&points) else {
            panic!("expected a feature");
        };
        let Some(Geometry {
            value: LineString(coordinates),
            ..
        }) = feature.geometry
        else {
            panic!("expected a line string");
        };

        assert_eq!(coordinates[0], vec![75.8236, 25.1825]);
    }
}
