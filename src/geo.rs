//! Great-circle distance and walking time estimates.
//!
//! Pure functions, no state. Everything here is cheap enough to run per venue on
//! every location change.

use crate::models::Coordinate;

/// Mean Earth radius in meters (spherical approximation)
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Walking pace in meters per minute (4 km/h)
pub const WALKING_SPEED_M_PER_MIN: f64 = 66.67;

/// Haversine distance between two coordinates, rounded to the nearest meter.
///
/// Symmetric in its arguments and zero for identical points. Any finite pair is valid
/// input, including the poles and antipodal points.
pub fn distance_meters(a: Coordinate, b: Coordinate) -> u32 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1.0 for antipodal points
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    (EARTH_RADIUS_M * c).round() as u32
}

/// Estimated walking time in whole minutes, rounded up.
///
/// Zero meters is zero minutes; any positive distance is at least one minute.
pub fn walking_minutes(distance_m: u32) -> u32 {
    if distance_m == 0 {
        return 0;
    }
    (f64::from(distance_m) / WALKING_SPEED_M_PER_MIN).ceil() as u32
}

/// Human readable distance: meters below 1 km, otherwise kilometers with one decimal.
pub fn distance_label(distance_m: u32) -> String {
    if distance_m < 1000 {
        format!("{}m", distance_m)
    } else {
        format!("{:.1}km", f64::from(distance_m) / 1000.0)
    }
}
