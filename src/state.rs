use dashmap::DashMap;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::models::delivery::{AcceptanceEvent, DeliveryRequest};
use crate::models::driver::Driver;
use crate::observability::metrics::Metrics;

pub struct AppState {
    pub drivers: DashMap<Uuid, Driver>,
    pub deliveries: DashMap<Uuid, DeliveryRequest>,
    pub acceptance_events_tx: broadcast::Sender<AcceptanceEvent>,
    pub match_radius_miles: f64,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(event_buffer_size: usize, match_radius_miles: f64) -> Self {
        let (acceptance_events_tx, _unused_rx) = broadcast::channel(event_buffer_size);

        Self {
            drivers: DashMap::new(),
            deliveries: DashMap::new(),
            acceptance_events_tx,
            match_radius_miles,
            metrics: Metrics::new(),
        }
    }
}
