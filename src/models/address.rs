use serde::{Deserialize, Serialize};

/// Latitude/longitude in decimal degrees. Ranges are not validated;
/// out-of-range values produce mathematically defined but meaningless
/// distances.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

/// A pickup or dropoff address. Immutable once attached to a delivery
/// request. The coordinate is optional: addresses without one cannot be
/// distance-filtered and are skipped by the matcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub coordinate: Option<Coordinate>,
    pub delivery_instructions: Option<String>,
}
