use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::address::Address;

/// Driver-facing projection of a pending request. Built fresh on every
/// poll, never stored. `distance_miles` is the pickup-to-dropoff distance
/// priced at creation time, not the driver's current distance to pickup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableDelivery {
    pub id: Uuid,
    pub listing_title: String,
    pub listing_image: Option<String>,
    pub pickup_address: Address,
    pub delivery_address: Address,
    pub distance_miles: f64,
    pub delivery_fee: f64,
    pub driver_earnings: f64,
    pub item_weight_lbs: f64,
    pub special_instructions: Option<String>,
    pub estimated_duration_minutes: u32,
    pub created_at: DateTime<Utc>,
}
