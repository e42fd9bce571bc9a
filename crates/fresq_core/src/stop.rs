use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    geopoint::GeoPoint,
    order::{Order, Vehicle},
};

/// Symbolic id of the vehicle's start location.
pub const DEPOT_LOCATION_ID: &str = "DEPOT";

pub fn pickup_location_id(order_id: &str) -> String {
    format!("{order_id}_pickup")
}

pub fn delivery_location_id(order_id: &str) -> String {
    format!("{order_id}_delivery")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopKind {
    Start,
    Pickup,
    Delivery,
    /// Stop kinds this dashboard does not know about yet. The optimizer
    /// is an external collaborator and may grow new kinds before we do.
    #[serde(other)]
    Other,
}

/// One element of the optimizer's ordered output. `location_id` keys into
/// a [`LocationLookup`], it is not a coordinate itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub location_id: String,
    #[serde(rename = "type")]
    pub kind: StopKind,
}

impl Stop {
    pub fn new(location_id: impl Into<String>, kind: StopKind) -> Self {
        Self {
            location_id: location_id.into(),
            kind,
        }
    }
}

/// Mapping from symbolic location ids to coordinates. Rebuilt wholesale
/// whenever the vehicle or the order list changes; never mutated in
/// place, so readers never observe a partially updated lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationLookup(HashMap<String, GeoPoint>);

impl LocationLookup {
    pub fn build(vehicle: &Vehicle, orders: &[Order]) -> Self {
        let mut entries = HashMap::with_capacity(orders.len() * 2 + 1);
        entries.insert(DEPOT_LOCATION_ID.to_string(), vehicle.start_location);

        for order in orders {
            entries.insert(pickup_location_id(&order.id), order.pickup_location);
            entries.insert(delivery_location_id(&order.id), order.delivery_location);
        }

        Self(entries)
    }

    pub fn get(&self, location_id: &str) -> Option<GeoPoint> {
        self.0.get(location_id).copied()
    }

    pub fn depot(&self) -> Option<GeoPoint> {
        self.get(DEPOT_LOCATION_ID)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_window::TimeWindowBuilder;

    fn order(id: &str, pickup: GeoPoint, delivery: GeoPoint) -> Order {
        Order {
            id: id.to_string(),
            details: "Cooked meals".to_string(),
            ngo_name: "Dadabari Relief Center".to_string(),
            pickup_location: pickup,
            delivery_location: delivery,
            pickup_window: TimeWindowBuilder::default()
                .with_iso_start("2026-08-29T08:00:00+05:30")
                .with_iso_end("2026-08-29T20:00:00+05:30")
                .build(),
        }
    }

    #[test]
    fn test_build_lookup() {
        let vehicle = Vehicle {
            id: "me".to_string(),
            capacity: 100,
            start_location: GeoPoint::new(25.1825, 75.8236),
        };
        let orders = vec![order(
            "order1",
            GeoPoint::new(25.20, 75.85),
            GeoPoint::new(25.15, 75.80),
        )];

        let lookup = LocationLookup::build(&vehicle, &orders);

        assert_eq!(lookup.len(), 3);
        assert_eq!(lookup.depot(), Some(GeoPoint::new(25.1825, 75.8236)));
        assert_eq!(
            lookup.get("order1_pickup"),
            Some(GeoPoint::new(25.20, 75.85))
        );
        assert_eq!(lookup.get("order1_missing"), None);
    }

    #[test]
    fn test_stop_wire_format() {
        let stop: Stop =
            serde_json::from_str(r#"{"location_id": "order1_pickup", "type": "pickup"}"#).unwrap();
        assert_eq!(stop, Stop::new("order1_pickup", StopKind::Pickup));

        // unknown kinds coming from a newer optimizer must not fail
        let stop: Stop =
            serde_json::from_str(r#"{"location_id": "order1_pickup", "type": "charging"}"#)
                .unwrap();
        assert_eq!(stop.kind, StopKind::Other);
    }
}
