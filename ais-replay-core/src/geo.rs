//! Great-circle calculations on a spherical earth.
//!
//! Haversine distances, bearings, midpoints and destination points,
//! after the formulae collected at movable-type.co.uk/scripts/latlong.

use serde::{Deserialize, Serialize};

const EARTH_RADIUS_METRES: f64 = 6371e3;
const EARTH_RADIUS_NAUTICAL_MILES: f64 = 3440.065;

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Position {
            latitude,
            longitude,
        }
    }
}

fn haversine_angle(from: Position, to: Position) -> f64 {
    let phi1 = from.latitude.to_radians();
    let phi2 = to.latitude.to_radians();
    let delta_phi = (to.latitude - from.latitude).to_radians();
    let delta_lambda = (to.longitude - from.longitude).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Great-circle distance in metres.
pub fn distance_metres(from: Position, to: Position) -> f64 {
    EARTH_RADIUS_METRES * haversine_angle(from, to)
}

/// Great-circle distance in kilometres.
pub fn distance_kilometres(from: Position, to: Position) -> f64 {
    distance_metres(from, to) / 1000.0
}

/// Great-circle distance in nautical miles.
pub fn distance_nautical_miles(from: Position, to: Position) -> f64 {
    EARTH_RADIUS_NAUTICAL_MILES * haversine_angle(from, to)
}

/// Initial bearing from one position towards another, degrees [0, 360).
pub fn initial_bearing(from: Position, to: Position) -> f64 {
    let phi1 = from.latitude.to_radians();
    let phi2 = to.latitude.to_radians();
    let delta_lambda = (to.longitude - from.longitude).to_radians();

    let y = delta_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();
    (y.atan2(x).to_degrees() + 360.0) % 360.0
}

/// Bearing on arrival at `to`, degrees [0, 360).
pub fn final_bearing(from: Position, to: Position) -> f64 {
    (initial_bearing(to, from) + 180.0) % 360.0
}

/// Midpoint of the great-circle path between two positions.
pub fn midpoint(from: Position, to: Position) -> Position {
    let phi1 = from.latitude.to_radians();
    let phi2 = to.latitude.to_radians();
    let lambda1 = from.longitude.to_radians();
    let delta_lambda = (to.longitude - from.longitude).to_radians();

    let bx = phi2.cos() * delta_lambda.cos();
    let by = phi2.cos() * delta_lambda.sin();

    let phi3 = (phi1.sin() + phi2.sin()).atan2(((phi1.cos() + bx).powi(2) + by * by).sqrt());
    let lambda3 = lambda1 + by.atan2(phi1.cos() + bx);

    Position::new(phi3.to_degrees(), normalize_longitude(lambda3))
}

/// Destination reached from `start` along `bearing` (degrees) after
/// `distance_metres` on the great circle.
pub fn destination_point(start: Position, bearing: f64, distance_metres: f64) -> Position {
    let phi1 = start.latitude.to_radians();
    let lambda1 = start.longitude.to_radians();
    let theta = bearing.to_radians();
    let delta = distance_metres / EARTH_RADIUS_METRES;

    let phi2 = (phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos()).asin();
    let lambda2 = lambda1
        + (theta.sin() * delta.sin() * phi1.cos()).atan2(delta.cos() - phi1.sin() * phi2.sin());

    Position::new(phi2.to_degrees(), normalize_longitude(lambda2))
}

/// [`destination_point`] with the distance given in kilometres.
pub fn destination_point_km(start: Position, bearing: f64, distance_km: f64) -> Position {
    destination_point(start, bearing, distance_km * 1000.0)
}

/// Signed cross-track distance in metres from `point` to the
/// great-circle path `path_start` -> `path_end`. Negative means the
/// point lies to the left of the path.
pub fn cross_track_distance_metres(
    point: Position,
    path_start: Position,
    path_end: Position,
) -> f64 {
    let delta13 = distance_metres(path_start, point) / EARTH_RADIUS_METRES;
    let theta13 = initial_bearing(path_start, point).to_radians();
    let theta12 = initial_bearing(path_start, path_end).to_radians();

    EARTH_RADIUS_METRES * (delta13.sin() * (theta13 - theta12).sin()).asin()
}

fn normalize_longitude(lambda: f64) -> f64 {
    use std::f64::consts::PI;
    let wrapped = ((lambda + PI).rem_euclid(2.0 * PI)) - PI;
    wrapped.to_degrees()
}
