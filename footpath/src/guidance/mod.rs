//! Presentation helpers: arrow rotation, distance and ETA formatting
//!
//! Pure functions over snapshot values. The arrow rotation maps the
//! bearing to the destination into device-relative screen space; the
//! formatters render distance and walking ETA for display.

use crate::geo::{initial_bearing_degrees, Coordinate};
use crate::router::WALK_SPEED_MPS;

/// Rotation of the guidance arrow in degrees, [0, 360).
///
/// The angle, relative to the device's forward direction, at which the
/// destination lies: 0 means directly ahead, 90 means to the right.
/// Purely a function of its inputs; adding 360 to the heading does not
/// change the result.
#[inline]
pub fn rotation_degrees(current: Coordinate, destination: Coordinate, heading_degrees: f64) -> f64 {
    (initial_bearing_degrees(current, destination) - heading_degrees).rem_euclid(360.0)
}

/// Formats a distance for display: meters below 1 km, one-decimal
/// kilometers above.
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{:.0} m", meters)
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}

/// Formats a duration in seconds as a compact ETA string.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;

    if total < 60 {
        format!("{} s", total)
    } else {
        let minutes = (total + 30) / 60;
        if minutes < 60 {
            format!("{} min", minutes)
        } else {
            format!("{} h {:02} min", minutes / 60, minutes % 60)
        }
    }
}

/// Expected walking time to cover `meters` at average pace, in seconds.
#[inline]
pub fn walking_eta_seconds(meters: f64) -> f64 {
    meters / WALK_SPEED_MPS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_destination_directly_ahead() {
        // ~111 m due north, heading north: arrow points straight ahead.
        let current = Coordinate::new_unchecked(37.0, -122.0);
        let destination = Coordinate::new_unchecked(37.001, -122.0);

        let rotation = rotation_degrees(current, destination, 0.0);
        assert!(rotation < 0.01 || rotation > 359.99, "Got {}°", rotation);
    }

    #[test]
    fn test_rotation_subtracts_heading() {
        // Destination due east, facing north: arrow points right (90°).
        let current = Coordinate::new_unchecked(0.0, 0.0);
        let destination = Coordinate::new_unchecked(0.0, 1.0);

        let rotation = rotation_degrees(current, destination, 0.0);
        assert!((rotation - 90.0).abs() < 0.01, "Got {}°", rotation);

        // Facing east already: arrow points ahead.
        let rotation = rotation_degrees(current, destination, 90.0);
        assert!(rotation.abs() < 0.01, "Got {}°", rotation);

        // Facing south: destination is over the left shoulder (270°).
        let rotation = rotation_degrees(current, destination, 180.0);
        assert!((rotation - 270.0).abs() < 0.01, "Got {}°", rotation);
    }

    #[test]
    fn test_rotation_invariant_under_full_turns() {
        let current = Coordinate::new_unchecked(10.0, 10.0);
        let destination = Coordinate::new_unchecked(10.5, 10.5);

        let base = rotation_degrees(current, destination, 45.0);
        let wrapped = rotation_degrees(current, destination, 45.0 + 360.0);
        assert!((base - wrapped).abs() < 1e-9);
    }

    #[test]
    fn test_rotation_in_range() {
        let current = Coordinate::new_unchecked(0.0, 0.0);
        let destination = Coordinate::new_unchecked(-1.0, -1.0);

        for heading in [0.0, 90.0, 179.9, 271.5, 359.9] {
            let rotation = rotation_degrees(current, destination, heading);
            assert!(
                (0.0..360.0).contains(&rotation),
                "Rotation {} out of range for heading {}",
                rotation,
                heading
            );
        }
    }

    #[test]
    fn test_rotation_degenerate_position_reports_heading_mirror() {
        // At the destination the bearing policy is 0, so the rotation is
        // just the reflected heading.
        let spot = Coordinate::new_unchecked(10.0, 10.0);
        assert_eq!(rotation_degrees(spot, spot, 90.0), 270.0);
    }

    #[test]
    fn test_format_distance_meters() {
        assert_eq!(format_distance(0.0), "0 m");
        assert_eq!(format_distance(8.4), "8 m");
        assert_eq!(format_distance(999.4), "999 m");
    }

    #[test]
    fn test_format_distance_kilometers() {
        assert_eq!(format_distance(1000.0), "1.0 km");
        assert_eq!(format_distance(1250.0), "1.2 km");
        assert_eq!(format_distance(12_345.0), "12.3 km");
    }

    #[test]
    fn test_format_duration_seconds() {
        assert_eq!(format_duration(0.0), "0 s");
        assert_eq!(format_duration(45.4), "45 s");
    }

    #[test]
    fn test_format_duration_minutes() {
        assert_eq!(format_duration(60.0), "1 min");
        assert_eq!(format_duration(750.0), "13 min");
        assert_eq!(format_duration(3569.0), "59 min");
    }

    #[test]
    fn test_format_duration_hours() {
        assert_eq!(format_duration(3600.0), "1 h 00 min");
        assert_eq!(format_duration(3900.0), "1 h 05 min");
        assert_eq!(format_duration(7500.0), "2 h 05 min");
    }

    #[test]
    fn test_format_duration_negative_clamped() {
        assert_eq!(format_duration(-5.0), "0 s");
    }

    #[test]
    fn test_walking_eta() {
        assert_eq!(walking_eta_seconds(140.0), 100.0);
    }
}
