use crate::models::address::Coordinate;

const EARTH_RADIUS_MILES: f64 = 3_959.0;

/// Great-circle distance in statute miles, rounded to 2 decimal places.
/// Inputs are taken as given; no range checks.
pub fn distance_miles(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lon = (b.lon - a.lon).to_radians();

    let sin_lat = (delta_lat / 2.0).sin();
    let sin_lon = (delta_lon / 2.0).sin();

    let haversine = sin_lat * sin_lat + lat1.cos() * lat2.cos() * sin_lon * sin_lon;
    let central_angle = 2.0 * haversine.sqrt().atan2((1.0 - haversine).sqrt());

    round_hundredths(EARTH_RADIUS_MILES * central_angle)
}

fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
