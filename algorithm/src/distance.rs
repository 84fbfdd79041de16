// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use common::position::Position;

/// Mean earth radius of the spherical model in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Conversion factor from kilometers to statute miles.
pub const KM_TO_MILES: f64 = 0.621371;

/// Mean earth radius of the spherical model in miles.
pub const EARTH_RADIUS_MILES: f64 = EARTH_RADIUS_KM * KM_TO_MILES;

/// Calculates the great-circle distance in miles between two coordinates.
///
/// Implements the haversine formula on a sphere with the mean earth radius
/// and converts the result from kilometers to miles.
///
/// # Parameters
/// - `lat1`, `lng1`: First coordinate in decimal degrees.
/// - `lat2`, `lng2`: Second coordinate in decimal degrees.
///
/// # Returns
/// The distance in miles, always `>= 0`. The result is symmetric in its two
/// coordinates down to the last bit and exactly `0.0` for identical inputs.
///
/// # Example
/// ```
/// use algorithm::distance_miles;
///
/// let d = distance_miles(40.7128, -74.0060, 40.7829, -73.9654);
/// assert!(d > 5.0 && d < 6.0);
/// ```
pub fn distance_miles(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    // Absolute deltas keep the result independent of the argument order.
    let d_lat = (lat2 - lat1).abs().to_radians();
    let d_lng = (lng2 - lng1).abs().to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c * KM_TO_MILES
}

/// Calculates the great-circle distance in miles between two positions.
///
/// See [`distance_miles`].
pub fn distance_between(pos1: &Position, pos2: &Position) -> f64 {
    distance_miles(
        pos1.latitude,
        pos1.longitude,
        pos2.latitude,
        pos2.longitude,
    )
}

/// Lower bound of the distance in miles between two positions.
///
/// The meridian arc between the two latitudes is never longer than the
/// great-circle distance, which makes it a cheap pre-check before the full
/// haversine evaluation.
pub(crate) fn latitude_arc_miles(pos1: &Position, pos2: &Position) -> f64 {
    (pos1.latitude - pos2.latitude).abs().to_radians() * EARTH_RADIUS_MILES
}
