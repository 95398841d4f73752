use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::address::Address;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DeliveryStatus {
    Pending,
    Accepted,
    PickedUp,
    InTransit,
    Delivered,
    Cancelled,
    Failed,
}

impl DeliveryStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            DeliveryStatus::Delivered | DeliveryStatus::Cancelled | DeliveryStatus::Failed
        )
    }

    /// Forward progression is linear; Cancelled and Failed are reachable
    /// from any non-terminal state. Pending -> Accepted is excluded here
    /// because acceptance goes through the compare-and-swap accept path,
    /// which also records the driver.
    pub fn can_transition_to(self, next: DeliveryStatus) -> bool {
        if next == DeliveryStatus::Cancelled || next == DeliveryStatus::Failed {
            return !self.is_terminal();
        }

        matches!(
            (self, next),
            (DeliveryStatus::Accepted, DeliveryStatus::PickedUp)
                | (DeliveryStatus::PickedUp, DeliveryStatus::InTransit)
                | (DeliveryStatus::InTransit, DeliveryStatus::Delivered)
        )
    }
}

/// A priced delivery request. `distance_miles`, `delivery_fee` and
/// `driver_earnings` are fixed at creation time; the matcher never
/// reprices a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryRequest {
    pub id: Uuid,
    pub listing_title: String,
    pub listing_image: Option<String>,
    pub pickup_address: Address,
    pub delivery_address: Address,
    pub distance_miles: f64,
    pub delivery_fee: f64,
    pub driver_earnings: f64,
    pub item_weight_lbs: f64,
    pub item_value: f64,
    pub special_instructions: Option<String>,
    pub status: DeliveryStatus,
    pub assigned_driver: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Broadcast to websocket subscribers when a driver wins a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptanceEvent {
    pub delivery_id: Uuid,
    pub driver_id: Uuid,
    pub accepted_at: DateTime<Utc>,
}
