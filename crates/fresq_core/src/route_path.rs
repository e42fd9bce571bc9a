use serde::{Deserialize, Serialize};

use crate::geopoint::GeoPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteFidelity {
    /// Geometry returned by the road-routing service.
    Road,
    /// Straight lines between waypoints, used when the routing service is
    /// unreachable. Coarse but still drivable by eye.
    StraightLine,
}

/// The literal sequence of coordinates drawn on the map between stops.
/// Recomputed on every resolution cycle, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePath {
    points: Vec<GeoPoint>,
    fidelity: RouteFidelity,
}

impl RoutePath {
    /// Nothing to draw. Not an error state.
    pub fn empty() -> Self {
        Self {
            points: Vec::new(),
            fidelity: RouteFidelity::StraightLine,
        }
    }

    pub fn road(points: Vec<GeoPoint>) -> Self {
        Self {
            points,
            fidelity: RouteFidelity::Road,
        }
    }

    pub fn straight_line(points: Vec<GeoPoint>) -> Self {
        Self {
            points,
            fidelity: RouteFidelity::StraightLine,
        }
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn fidelity(&self) -> RouteFidelity {
        self.fidelity
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Default for RoutePath {
    fn default() -> Self {
        Self::empty()
    }
}
