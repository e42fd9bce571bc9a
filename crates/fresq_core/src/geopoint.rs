use geo::{Bearing, Distance, Haversine};
use serde::{Deserialize, Serialize};

/// A coordinate on the map. Immutable value, identified only by its
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance in meters.
    pub fn haversine_distance(&self, to: &GeoPoint) -> f64 {
        let haversine = Haversine;

        haversine.distance(geo::Point::from(self), geo::Point::from(to))
    }

    /// Bearing towards `dest` in degrees, clockwise from north.
    pub fn bearing(&self, dest: &GeoPoint) -> f64 {
        let haversine = Haversine;

        haversine.bearing(geo::Point::from(self), geo::Point::from(dest))
    }
}

impl From<&GeoPoint> for geo::Point<f64> {
    fn from(point: &GeoPoint) -> Self {
        geo::Point::new(point.lon, point.lat)
    }
}

impl From<GeoPoint> for geo::Point<f64> {
    fn from(point: GeoPoint) -> Self {
        geo::Point::new(point.lon, point.lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_axis_order() {
        // geo points are (x, y) = (lon, lat)
        let point = GeoPoint::new(25.1825, 75.8236);
        let geo_point: geo::Point = (&point).into();

        assert_eq!(geo_point.x(), 75.8236);
        assert_eq!(geo_point.y(), 25.1825);
    }

    #[test]
    fn test_haversine_distance() {
        let kota_station = GeoPoint::new(25.2215, 75.8810);
        let dadabari = GeoPoint::new(25.1580, 75.8280);

        let distance = kota_station.haversine_distance(&dadabari);
        assert!(distance > 8_000.0 && distance < 10_000.0);
    }
}
