use crate::geo::distance_miles;
use crate::models::address::Coordinate;
use crate::models::available::AvailableDelivery;
use crate::models::delivery::DeliveryRequest;

pub const DEFAULT_MAX_DISTANCE_MILES: f64 = 25.0;

/// Assumed average driving speed of ~20 mph for the duration estimate.
const MINUTES_PER_MILE: f64 = 3.0;

/// Filters pending requests to those whose pickup lies within
/// `max_distance_miles` of the driver (inclusive) and projects each into
/// its driver-facing shape.
///
/// A driver with no known location sees nothing; that is a defined empty
/// result, not an error. Candidates whose pickup address carries no
/// coordinate cannot be distance-filtered and are skipped. Candidate
/// order is preserved.
pub fn find_available_deliveries(
    driver_location: Option<&Coordinate>,
    candidates: &[DeliveryRequest],
    max_distance_miles: f64,
) -> Vec<AvailableDelivery> {
    let Some(location) = driver_location else {
        return Vec::new();
    };

    candidates
        .iter()
        .filter_map(|request| {
            let pickup = request.pickup_address.coordinate.as_ref()?;

            if distance_miles(location, pickup) > max_distance_miles {
                return None;
            }

            Some(project(request))
        })
        .collect()
}

fn project(request: &DeliveryRequest) -> AvailableDelivery {
    // The duration estimate uses the distance priced at creation time
    // (pickup to dropoff), not the driver's current distance to pickup.
    let estimated_duration_minutes = (request.distance_miles * MINUTES_PER_MILE).ceil() as u32;

    AvailableDelivery {
        id: request.id,
        listing_title: request.listing_title.clone(),
        listing_image: request.listing_image.clone(),
        pickup_address: request.pickup_address.clone(),
        delivery_address: request.delivery_address.clone(),
        distance_miles: request.distance_miles,
        delivery_fee: request.delivery_fee,
        driver_earnings: request.driver_earnings,
        item_weight_lbs: request.item_weight_lbs,
        special_instructions: request.special_instructions.clone(),
        estimated_duration_minutes,
        created_at: request.created_at,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::{find_available_deliveries, DEFAULT_MAX_DISTANCE_MILES};
    use crate::geo::distance_miles;
    use crate::models::address::{Address, Coordinate};
    use crate::models::delivery::{DeliveryRequest, DeliveryStatus};

    fn address(coordinate: Option<Coordinate>) -> Address {
        Address {
            street: "120 W Second St".to_string(),
            city: "Dayton".to_string(),
            state: "OH".to_string(),
            zip: "45402".to_string(),
            coordinate,
            delivery_instructions: None,
        }
    }

    fn request(pickup: Option<Coordinate>, distance_miles: f64) -> DeliveryRequest {
        DeliveryRequest {
            id: Uuid::new_v4(),
            listing_title: "mid-century dresser".to_string(),
            listing_image: None,
            pickup_address: address(pickup),
            delivery_address: address(Some(Coordinate {
                lat: 39.74,
                lon: -84.2,
            })),
            distance_miles,
            delivery_fee: 10.25,
            driver_earnings: 8.20,
            item_weight_lbs: 40.0,
            item_value: 150.0,
            special_instructions: None,
            status: DeliveryStatus::Pending,
            assigned_driver: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn driver_without_location_sees_nothing() {
        let candidates = vec![request(Some(Coordinate { lat: 39.76, lon: -84.19 }), 3.5)];
        let found = find_available_deliveries(None, &candidates, DEFAULT_MAX_DISTANCE_MILES);
        assert!(found.is_empty());
    }

    #[test]
    fn candidate_without_pickup_coordinate_is_skipped() {
        let driver = Coordinate {
            lat: 39.759,
            lon: -84.191,
        };
        let candidates = vec![
            request(None, 3.5),
            request(Some(Coordinate { lat: 39.764, lon: -84.192 }), 3.5),
        ];

        let found =
            find_available_deliveries(Some(&driver), &candidates, DEFAULT_MAX_DISTANCE_MILES);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, candidates[1].id);
    }

    #[test]
    fn radius_boundary_is_inclusive() {
        let driver = Coordinate { lat: 0.0, lon: 0.0 };
        let pickup = Coordinate { lat: 0.0, lon: 0.2 };
        let exact_radius = distance_miles(&driver, &pickup);

        let candidates = vec![request(Some(pickup), exact_radius)];

        let at_boundary = find_available_deliveries(Some(&driver), &candidates, exact_radius);
        assert_eq!(at_boundary.len(), 1);

        let tightened = find_available_deliveries(Some(&driver), &candidates, exact_radius - 0.01);
        assert!(tightened.is_empty());
    }

    #[test]
    fn candidate_order_is_preserved() {
        let driver = Coordinate {
            lat: 39.759,
            lon: -84.191,
        };
        // Farther pickup listed first stays first; no nearest-first sort.
        let far_first = request(Some(Coordinate { lat: 39.9, lon: -84.3 }), 12.0);
        let near_second = request(Some(Coordinate { lat: 39.764, lon: -84.192 }), 0.35);
        let candidates = vec![far_first.clone(), near_second.clone()];

        let found =
            find_available_deliveries(Some(&driver), &candidates, DEFAULT_MAX_DISTANCE_MILES);

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].id, far_first.id);
        assert_eq!(found[1].id, near_second.id);
    }

    #[test]
    fn duration_estimate_uses_creation_time_distance() {
        let driver = Coordinate {
            lat: 39.759,
            lon: -84.191,
        };
        let candidates = vec![request(Some(Coordinate { lat: 39.764, lon: -84.192 }), 0.35)];

        let found =
            find_available_deliveries(Some(&driver), &candidates, DEFAULT_MAX_DISTANCE_MILES);

        assert_eq!(found.len(), 1);
        // ceil(0.35 * 3) = 2 minutes
        assert_eq!(found[0].estimated_duration_minutes, 2);
    }

    #[test]
    fn projection_carries_the_priced_fees_through() {
        let driver = Coordinate {
            lat: 39.759,
            lon: -84.191,
        };
        let candidates = vec![request(Some(Coordinate { lat: 39.764, lon: -84.192 }), 0.35)];

        let found =
            find_available_deliveries(Some(&driver), &candidates, DEFAULT_MAX_DISTANCE_MILES);

        assert_eq!(found[0].delivery_fee, 10.25);
        assert_eq!(found[0].driver_earnings, 8.20);
        assert_eq!(found[0].distance_miles, 0.35);
    }
}
