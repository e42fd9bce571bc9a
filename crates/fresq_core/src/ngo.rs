use serde::{Deserialize, Serialize};

use crate::geopoint::GeoPoint;

/// A recipient organization. Fetched once per dashboard session and
/// rendered as a static marker layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NgoSite {
    pub name: String,
    pub city: String,
    #[serde(flatten)]
    pub location: GeoPoint,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let site: NgoSite = serde_json::from_str(
            r#"{"name": "Dadabari Relief Center", "city": "Kota", "lat": 25.1580, "lon": 75.8280}"#,
        )
        .unwrap();

        assert_eq!(site.location, GeoPoint::new(25.1580, 75.8280));
        assert_eq!(site.city, "Kota");
    }
}
