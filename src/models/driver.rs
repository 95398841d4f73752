use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::address::Coordinate;

/// A driver's last reported position. Absent until the first location
/// update comes in; a driver with no known location matches nothing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DriverLocation {
    pub coordinate: Coordinate,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    pub id: Uuid,
    pub name: String,
    pub location: Option<DriverLocation>,
    pub created_at: DateTime<Utc>,
}
