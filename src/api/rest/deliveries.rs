use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{get, patch, post};
use axum::Json;
use axum::Router;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::geo::distance_miles;
use crate::matching::find_available_deliveries;
use crate::models::address::Address;
use crate::models::available::AvailableDelivery;
use crate::models::delivery::{AcceptanceEvent, DeliveryRequest, DeliveryStatus};
use crate::pricing::calculate_fee;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/deliveries", post(create_delivery))
        .route("/deliveries/:id", get(get_delivery))
        .route("/deliveries/:id/accept", post(accept_delivery))
        .route("/deliveries/:id/status", patch(update_delivery_status))
        .route(
            "/drivers/:id/available-deliveries",
            get(available_deliveries),
        )
}

#[derive(Deserialize)]
pub struct CreateDeliveryRequest {
    pub listing_title: String,
    pub listing_image: Option<String>,
    pub pickup_address: Address,
    pub delivery_address: Address,
    #[serde(default)]
    pub item_weight_lbs: f64,
    #[serde(default)]
    pub item_value: f64,
    pub special_instructions: Option<String>,
}

#[derive(Deserialize)]
pub struct AcceptDeliveryRequest {
    pub driver_id: Uuid,
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: DeliveryStatus,
}

#[derive(Deserialize)]
pub struct AvailableQuery {
    pub max_distance_miles: Option<f64>,
}

async fn create_delivery(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateDeliveryRequest>,
) -> Result<Json<DeliveryRequest>, AppError> {
    if payload.listing_title.trim().is_empty() {
        return Err(AppError::BadRequest(
            "listing_title cannot be empty".to_string(),
        ));
    }

    // The calculation itself takes inputs as given, so non-negativity is
    // enforced here at the boundary.
    if !payload.item_weight_lbs.is_finite() || payload.item_weight_lbs < 0.0 {
        return Err(AppError::BadRequest(
            "item_weight_lbs must be a non-negative number".to_string(),
        ));
    }

    if !payload.item_value.is_finite() || payload.item_value < 0.0 {
        return Err(AppError::BadRequest(
            "item_value must be a non-negative number".to_string(),
        ));
    }

    let pickup = payload
        .pickup_address
        .coordinate
        .ok_or_else(|| AppError::BadRequest("pickup_address needs a coordinate".to_string()))?;
    let dropoff = payload
        .delivery_address
        .coordinate
        .ok_or_else(|| AppError::BadRequest("delivery_address needs a coordinate".to_string()))?;

    let trip_miles = distance_miles(&pickup, &dropoff);
    let fee = calculate_fee(trip_miles, payload.item_weight_lbs, payload.item_value);

    let delivery = DeliveryRequest {
        id: Uuid::new_v4(),
        listing_title: payload.listing_title,
        listing_image: payload.listing_image,
        pickup_address: payload.pickup_address,
        delivery_address: payload.delivery_address,
        distance_miles: trip_miles,
        delivery_fee: fee.total_fee,
        driver_earnings: fee.driver_earnings,
        item_weight_lbs: payload.item_weight_lbs,
        item_value: payload.item_value,
        special_instructions: payload.special_instructions,
        status: DeliveryStatus::Pending,
        assigned_driver: None,
        created_at: Utc::now(),
    };

    state.deliveries.insert(delivery.id, delivery.clone());
    state.metrics.deliveries_created_total.inc();
    state.metrics.pending_deliveries.inc();

    tracing::info!(
        delivery_id = %delivery.id,
        distance_miles = trip_miles,
        delivery_fee = fee.total_fee,
        "delivery request created"
    );

    Ok(Json(delivery))
}

async fn get_delivery(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeliveryRequest>, AppError> {
    let delivery = state
        .deliveries
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("delivery {} not found", id)))?;

    Ok(Json(delivery.value().clone()))
}

async fn available_deliveries(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(query): Query<AvailableQuery>,
) -> Result<Json<Vec<AvailableDelivery>>, AppError> {
    let location = state
        .drivers
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("driver {} not found", id)))?
        .location;

    let max_distance = query.max_distance_miles.unwrap_or(state.match_radius_miles);

    // Snapshot of pending, unassigned requests in creation order; the
    // matcher keeps whatever order it is fed.
    let mut candidates: Vec<DeliveryRequest> = state
        .deliveries
        .iter()
        .filter_map(|entry| {
            let delivery = entry.value();
            let open = delivery.status == DeliveryStatus::Pending
                && delivery.assigned_driver.is_none();

            if open {
                Some(delivery.clone())
            } else {
                None
            }
        })
        .collect();
    candidates.sort_by_key(|delivery| delivery.created_at);

    let timer = state.metrics.match_duration_seconds.start_timer();
    let available = find_available_deliveries(
        location.as_ref().map(|loc| &loc.coordinate),
        &candidates,
        max_distance,
    );
    timer.observe_duration();

    Ok(Json(available))
}

async fn accept_delivery(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AcceptDeliveryRequest>,
) -> Result<Json<DeliveryRequest>, AppError> {
    if !state.drivers.contains_key(&payload.driver_id) {
        return Err(AppError::NotFound(format!(
            "driver {} not found",
            payload.driver_id
        )));
    }

    // The entry lock makes the pending-and-unassigned check and the
    // assignment a single atomic step, so two drivers racing for the
    // same request cannot both win.
    let mut delivery = state
        .deliveries
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("delivery {} not found", id)))?;

    if delivery.status != DeliveryStatus::Pending || delivery.assigned_driver.is_some() {
        state
            .metrics
            .delivery_accepts_total
            .with_label_values(&["conflict"])
            .inc();
        return Err(AppError::Conflict(format!(
            "delivery {} is no longer available",
            id
        )));
    }

    delivery.status = DeliveryStatus::Accepted;
    delivery.assigned_driver = Some(payload.driver_id);

    state
        .metrics
        .delivery_accepts_total
        .with_label_values(&["success"])
        .inc();
    state.metrics.pending_deliveries.dec();

    let event = AcceptanceEvent {
        delivery_id: delivery.id,
        driver_id: payload.driver_id,
        accepted_at: Utc::now(),
    };
    let _ = state.acceptance_events_tx.send(event);

    tracing::info!(
        delivery_id = %delivery.id,
        driver_id = %payload.driver_id,
        "delivery accepted"
    );

    Ok(Json(delivery.clone()))
}

async fn update_delivery_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<DeliveryRequest>, AppError> {
    if payload.status == DeliveryStatus::Accepted {
        return Err(AppError::BadRequest(
            "acceptance goes through POST /deliveries/:id/accept".to_string(),
        ));
    }

    let mut delivery = state
        .deliveries
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("delivery {} not found", id)))?;

    if !delivery.status.can_transition_to(payload.status) {
        return Err(AppError::BadRequest(format!(
            "cannot move delivery from {:?} to {:?}",
            delivery.status, payload.status
        )));
    }

    if delivery.status == DeliveryStatus::Pending {
        // Only cancel/fail can leave Pending here; the request drops out
        // of the matchable pool either way.
        state.metrics.pending_deliveries.dec();
    }

    delivery.status = payload.status;

    Ok(Json(delivery.clone()))
}
