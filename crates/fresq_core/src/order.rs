use serde::{Deserialize, Serialize};

use crate::{geopoint::GeoPoint, time_window::TimeWindow};

/// A rescue order produced by the donor side of the system. Read-only
/// here: the driver dashboard consumes it, it never edits one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub details: String,
    pub ngo_name: String,
    pub pickup_location: GeoPoint,
    pub delivery_location: GeoPoint,
    pub pickup_window: TimeWindow,
}

/// The driver's vehicle. Exactly one per session; its start location is
/// the implicit route origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub capacity: u32,
    pub start_location: GeoPoint,
}
