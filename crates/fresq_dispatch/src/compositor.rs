use fresq_core::{
    geopoint::GeoPoint,
    ngo::NgoSite,
    route_path::{RouteFidelity, RoutePath},
    stop::{LocationLookup, Stop, StopKind},
};
use serde::Serialize;

/// Distance between two directional markers along the route line.
pub const FLOW_INDICATOR_SPACING_METERS: f64 = 400.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopMarkerKind {
    Pickup,
    Delivery,
    Generic,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopMarker {
    pub location: GeoPoint,
    pub kind: StopMarkerKind,
    /// 1-based position over the rendered markers, for the numbered pins.
    pub sequence: u32,
}

/// A directional marker along the route line. Keyed to the path
/// geometry, so the whole set is rebuilt whenever the path changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowIndicator {
    pub location: GeoPoint,
    /// Travel direction in degrees, clockwise from north.
    pub bearing_deg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "layer", rename_all = "snake_case")]
pub enum MapLayer {
    BaseTiles,
    NgoMarkers {
        sites: Vec<NgoSite>,
    },
    RouteLine {
        points: Vec<GeoPoint>,
        fidelity: RouteFidelity,
    },
    FlowIndicators {
        indicators: Vec<FlowIndicator>,
    },
    StopMarkers {
        markers: Vec<StopMarker>,
    },
}

/// One frame of the map, back to front. Re-derived in full on every
/// input change; there is no incremental layer diffing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapScene {
    pub layers: Vec<MapLayer>,
}

pub fn compose_scene(
    path: &RoutePath,
    stops: &[Stop],
    locations: &LocationLookup,
    ngo_sites: &[NgoSite],
) -> MapScene {
    let mut layers = vec![
        MapLayer::BaseTiles,
        MapLayer::NgoMarkers {
            sites: ngo_sites.to_vec(),
        },
    ];

    if !path.is_empty() {
        layers.push(MapLayer::RouteLine {
            points: path.points().to_vec(),
            fidelity: path.fidelity(),
        });
        layers.push(MapLayer::FlowIndicators {
            indicators: flow_indicators(path.points()),
        });
    }

    layers.push(MapLayer::StopMarkers {
        markers: stop_markers(stops, locations),
    });

    MapScene { layers }
}

/// Start stops are suppressed: the depot is already implied by the
/// vehicle icon, a second pin there would only add noise. Stops without
/// a lookup entry are silently skipped.
fn stop_markers(stops: &[Stop], locations: &LocationLookup) -> Vec<StopMarker> {
    let mut markers = Vec::with_capacity(stops.len());

    for stop in stops {
        let kind = match stop.kind {
            StopKind::Start => continue,
            StopKind::Pickup => StopMarkerKind::Pickup,
            StopKind::Delivery => StopMarkerKind::Delivery,
            StopKind::Other => StopMarkerKind::Generic,
        };

        let Some(location) = locations.get(&stop.location_id) else {
            continue;
        };

        markers.push(StopMarker {
            location,
            kind,
            sequence: markers.len() as u32 + 1,
        });
    }

    markers
}

fn flow_indicators(points: &[GeoPoint]) -> Vec<FlowIndicator> {
    let mut indicators = Vec::new();
    let mut since_last = 0.0;

    for pair in points.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let length = from.haversine_distance(&to);
        if length <= 0.0 {
            continue;
        }

        let bearing_deg = from.bearing(&to);

        // a long segment (straight-line fallback legs especially) gets a
        // marker at every spacing multiple it crosses, interpolated;
        // leftover distance carries into the next segment
        let mut offset = FLOW_INDICATOR_SPACING_METERS - since_last;
        while offset <= length {
            let fraction = offset / length;
            indicators.push(FlowIndicator {
                location: GeoPoint::new(
                    from.lat + (to.lat - from.lat) * fraction,
                    from.lon + (to.lon - from.lon) * fraction,
                ),
                bearing_deg,
            });
            offset += FLOW_INDICATOR_SPACING_METERS;
        }

        since_last = (since_last + length) % FLOW_INDICATOR_SPACING_METERS;
    }

    indicators
}

#[cfg(test)]
mod tests {
    use fresq_core::{
        order::{Order, Vehicle},
        stop::{DEPOT_LOCATION_ID, delivery_location_id, pickup_location_id},
        time_window::TimeWindowBuilder,
    };

    use super::*;

    fn fixture() -> (Vec<Stop>, LocationLookup, Vec<NgoSite>) {
        let vehicle = Vehicle {
            id: "me".to_string(),
            capacity: 100,
            start_location: GeoPoint::new(25.1825, 75.8236),
        };
        let order = Order {
            id: "order1".to_string(),
            details: "Cooked meals".to_string(),
            ngo_name: "Dadabari Relief Center".to_string(),
            pickup_location: GeoPoint::new(25.20, 75.85),
            delivery_location: GeoPoint::new(25.15, 75.80),
            pickup_window: TimeWindowBuilder::default()
                .with_iso_start("2026-08-29T08:00:00+05:30")
                .with_iso_end("2026-08-29T20:00:00+05:30")
                .build(),
        };
        let lookup = LocationLookup::build(&vehicle, std::slice::from_ref(&order));
        let stops = vec![
            Stop::new(DEPOT_LOCATION_ID, StopKind::Start),
            Stop::new(pickup_location_id(&order.id), StopKind::Pickup),
            Stop::new(delivery_location_id(&order.id), StopKind::Delivery),
        ];
        let sites = vec![NgoSite {
            name: "Dadabari Relief Center".to_string(),
            city: "Kota".to_string(),
            location: GeoPoint::new(25.1580, 75.8280),
        }];

        (stops, lookup, sites)
    }

    #[test]
    fn test_layer_order_is_fixed() {
        let (stops, lookup, sites) = fixture();
        let path = RoutePath::road(vec![
            GeoPoint::new(25.1825, 75.8236),
            GeoPoint::new(25.20, 75.85),
        ]);

        let scene = compose_scene(&path, &stops, &lookup, &sites);

        assert_eq!(scene.layers.len(), 5);
        assert!(matches!(scene.layers[0], MapLayer::BaseTiles));
        assert!(matches!(scene.layers[1], MapLayer::NgoMarkers { .. }));
        assert!(matches!(scene.layers[2], MapLayer::RouteLine { .. }));
        assert!(matches!(scene.layers[3], MapLayer::FlowIndicators { .. }));
        assert!(matches!(scene.layers[4], MapLayer::StopMarkers { .. }));
    }

    #[test]
    fn test_empty_path_has_no_route_layers() {
        let (stops, lookup, sites) = fixture();

        let scene = compose_scene(&RoutePath::empty(), &stops, &lookup, &sites);

        assert_eq!(scene.layers.len(), 3);
        assert!(
            !scene
                .layers
                .iter()
                .any(|layer| matches!(layer, MapLayer::RouteLine { .. }))
        );
    }

    #[test]
    fn test_start_stop_is_suppressed() {
        let (stops, lookup, _) = fixture();

        let markers = stop_markers(&stops, &lookup);

        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].kind, StopMarkerKind::Pickup);
        assert_eq!(markers[0].sequence, 1);
        assert_eq!(markers[1].kind, StopMarkerKind::Delivery);
        assert_eq!(markers[1].sequence, 2);
    }

    #[test]
    fn test_unmatched_stop_is_skipped() {
        let (mut stops, lookup, _) = fixture();
        stops.push(Stop::new("order9_pickup", StopKind::Pickup));

        let markers = stop_markers(&stops, &lookup);

        // the late order is not in the lookup yet; render what we have
        assert_eq!(markers.len(), 2);
    }

    #[test]
    fn test_flow_indicators_follow_spacing() {
        // ~1.1km of path due north, points every ~222m
        let points: Vec<GeoPoint> = (0..6)
            .map(|i| GeoPoint::new(25.0 + f64::from(i) * 0.002, 75.0))
            .collect();

        let indicators = flow_indicators(&points);

        assert_eq!(indicators.len(), 2);
        for indicator in &indicators {
            assert!(indicator.bearing_deg.abs() < 1.0);
        }
    }

    #[test]
    fn test_long_segments_get_interpolated_indicators() {
        // a single ~5.5km fallback leg due north, far coarser than the
        // marker spacing
        let start = GeoPoint::new(25.0, 75.0);
        let end = GeoPoint::new(25.05, 75.0);

        let indicators = flow_indicators(&[start, end]);

        let expected =
            (start.haversine_distance(&end) / FLOW_INDICATOR_SPACING_METERS).floor() as usize;
        assert_eq!(indicators.len(), expected);
        assert!(expected > 10);

        // markers walk the leg in travel order, strictly inside it
        for pair in indicators.windows(2) {
            assert!(pair[0].location.lat < pair[1].location.lat);
        }
        assert!(indicators[0].location.lat > start.lat);
        assert!(indicators.last().unwrap().location.lat < end.lat);

        // spacing holds between consecutive markers
        let gap = indicators[0]
            .location
            .haversine_distance(&indicators[1].location);
        assert!((gap - FLOW_INDICATOR_SPACING_METERS).abs() < 1.0);
    }

    #[test]
    fn test_spacing_carries_across_segments() {
        let start = GeoPoint::new(25.0, 75.0);
        let mid = GeoPoint::new(25.025, 75.0);
        let end = GeoPoint::new(25.05, 75.0);

        let split = flow_indicators(&[start, mid, end]);
        let whole = flow_indicators(&[start, end]);

        // splitting a leg must not shift or drop markers
        assert_eq!(split.len(), whole.len());
        for (a, b) in split.iter().zip(&whole) {
            assert!(a.location.haversine_distance(&b.location) < 1.0);
        }
    }

    #[test]
    fn test_short_path_has_no_flow_indicators() {
        let points = vec![GeoPoint::new(25.0, 75.0), GeoPoint::new(25.0001, 75.0)];
        assert!(flow_indicators(&points).is_empty());
    }
}
