//! Great-circle geometry on geographic coordinates
//!
//! Provides the haversine distance and initial bearing (forward azimuth)
//! used by the router fallback, the fusion engine, and the arrow mapper.
//! All functions are pure and operate on [`Coordinate`] values.

mod types;

pub use types::{
    Coordinate, GeoError, EARTH_RADIUS_M, MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE,
};

/// Great-circle distance between two coordinates in meters.
///
/// Uses the haversine formula with a mean Earth radius of 6 371 000 m.
/// Symmetric in its arguments; returns exactly 0 for equal coordinates.
#[inline]
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    if a == b {
        return 0.0;
    }

    let lat1 = a.latitude().to_radians();
    let lat2 = b.latitude().to_radians();
    let d_lat = (b.latitude() - a.latitude()).to_radians();
    let d_lon = (b.longitude() - a.longitude()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    // h stays in [0, 1] for valid coordinates; clamp guards rounding at
    // antipodal points before the sqrt.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// Initial bearing (forward azimuth) from `a` to `b` in degrees, [0, 360).
///
/// 0 = north, 90 = east. The bearing is undefined for equal coordinates;
/// this function reports 0 in that case, which is the policy callers rely
/// on when origin and destination coincide.
#[inline]
pub fn initial_bearing_degrees(a: Coordinate, b: Coordinate) -> f64 {
    if a == b {
        return 0.0;
    }

    let lat1 = a.latitude().to_radians();
    let lat2 = b.latitude().to_radians();
    let d_lon = (b.longitude() - a.longitude()).to_radians();

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

    y.atan2(x).to_degrees().rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Meters per degree of latitude, for building test offsets.
    const M_PER_DEG_LAT: f64 = 111_195.0;

    #[test]
    fn test_distance_one_degree_east_on_equator() {
        // 1° of longitude along the equator is ~111,195 m.
        let a = Coordinate::new_unchecked(0.0, 0.0);
        let b = Coordinate::new_unchecked(0.0, 1.0);

        let d = distance_meters(a, b);
        let expected = 111_195.0;
        assert!(
            (d - expected).abs() / expected < 0.005,
            "Expected ~{} m, got {} m",
            expected,
            d
        );
    }

    #[test]
    fn test_distance_zero_for_equal_coordinates() {
        let a = Coordinate::new_unchecked(10.0, 10.0);
        assert_eq!(distance_meters(a, a), 0.0);
    }

    #[test]
    fn test_distance_symmetric() {
        let a = Coordinate::new_unchecked(53.5511, 9.9937);
        let b = Coordinate::new_unchecked(48.8566, 2.3522);
        assert_eq!(distance_meters(a, b), distance_meters(b, a));
    }

    #[test]
    fn test_distance_hamburg_to_paris() {
        // Hamburg to Paris is ~745 km; sanity-check the scale.
        let hamburg = Coordinate::new_unchecked(53.5511, 9.9937);
        let paris = Coordinate::new_unchecked(48.8566, 2.3522);

        let d = distance_meters(hamburg, paris);
        assert!(d > 700_000.0 && d < 800_000.0, "Got {} m", d);
    }

    #[test]
    fn test_distance_across_antimeridian() {
        // 0.2° of longitude straddling the ±180° seam must measure the short
        // way around, not nearly the full circumference.
        let west = Coordinate::new_unchecked(0.0, 179.9);
        let east = Coordinate::new_unchecked(0.0, -179.9);

        let d = distance_meters(west, east);
        let same_span = distance_meters(
            Coordinate::new_unchecked(0.0, 0.0),
            Coordinate::new_unchecked(0.0, 0.2),
        );
        assert!(
            (d - same_span).abs() < 1.0,
            "Seam distance {} m differs from equivalent span {} m",
            d,
            same_span
        );
    }

    #[test]
    fn test_distance_near_pole() {
        let a = Coordinate::new_unchecked(89.99, 0.0);
        let b = Coordinate::new_unchecked(89.99, 180.0);

        // Two points 0.01° from the pole on opposite meridians are ~2.2 km
        // apart over the top.
        let d = distance_meters(a, b);
        let expected = 2.0 * 0.01 * M_PER_DEG_LAT;
        assert!(
            (d - expected).abs() / expected < 0.01,
            "Expected ~{} m, got {} m",
            expected,
            d
        );
    }

    #[test]
    fn test_distance_antipodal_is_finite() {
        let a = Coordinate::new_unchecked(0.0, 0.0);
        let b = Coordinate::new_unchecked(0.0, 180.0);

        let d = distance_meters(a, b);
        assert!(d.is_finite());
        // Half the circumference at the mean radius.
        let expected = std::f64::consts::PI * EARTH_RADIUS_M;
        assert!((d - expected).abs() < 1_000.0, "Got {} m", d);
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = Coordinate::new_unchecked(0.0, 0.0);

        let north = initial_bearing_degrees(origin, Coordinate::new_unchecked(1.0, 0.0));
        let east = initial_bearing_degrees(origin, Coordinate::new_unchecked(0.0, 1.0));
        let south = initial_bearing_degrees(origin, Coordinate::new_unchecked(-1.0, 0.0));
        let west = initial_bearing_degrees(origin, Coordinate::new_unchecked(0.0, -1.0));

        assert!((north - 0.0).abs() < 0.01, "North: {}", north);
        assert!((east - 90.0).abs() < 0.01, "East: {}", east);
        assert!((south - 180.0).abs() < 0.01, "South: {}", south);
        assert!((west - 270.0).abs() < 0.01, "West: {}", west);
    }

    #[test]
    fn test_bearing_equal_coordinates_reports_zero() {
        let a = Coordinate::new_unchecked(37.0, -122.0);
        assert_eq!(initial_bearing_degrees(a, a), 0.0);
    }

    #[test]
    fn test_bearing_across_antimeridian() {
        // From just west of the seam to just east of it: due east.
        let west = Coordinate::new_unchecked(0.0, 179.9);
        let east = Coordinate::new_unchecked(0.0, -179.9);

        let bearing = initial_bearing_degrees(west, east);
        assert!((bearing - 90.0).abs() < 0.01, "Got {}°", bearing);
    }

    #[test]
    fn test_bearing_toward_pole() {
        let a = Coordinate::new_unchecked(80.0, 10.0);
        let b = Coordinate::new_unchecked(89.0, 10.0);

        let bearing = initial_bearing_degrees(a, b);
        assert!((bearing - 0.0).abs() < 0.01, "Got {}°", bearing);
    }

    // Property-based tests using proptest
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_distance_symmetric_property(
                lat1 in -90.0..90.0_f64,
                lon1 in -180.0..180.0_f64,
                lat2 in -90.0..90.0_f64,
                lon2 in -180.0..180.0_f64
            ) {
                let a = Coordinate::new_unchecked(lat1, lon1);
                let b = Coordinate::new_unchecked(lat2, lon2);

                prop_assert_eq!(distance_meters(a, b), distance_meters(b, a));
            }

            #[test]
            fn test_distance_zero_iff_equal(
                lat in -90.0..90.0_f64,
                lon in -180.0..180.0_f64
            ) {
                let a = Coordinate::new_unchecked(lat, lon);
                prop_assert_eq!(distance_meters(a, a), 0.0);
            }

            #[test]
            fn test_distance_non_negative_and_bounded(
                lat1 in -90.0..90.0_f64,
                lon1 in -180.0..180.0_f64,
                lat2 in -90.0..90.0_f64,
                lon2 in -180.0..180.0_f64
            ) {
                let a = Coordinate::new_unchecked(lat1, lon1);
                let b = Coordinate::new_unchecked(lat2, lon2);

                let d = distance_meters(a, b);
                // Never exceeds half the circumference.
                let max = std::f64::consts::PI * EARTH_RADIUS_M;
                prop_assert!(d >= 0.0);
                prop_assert!(d <= max + 1.0, "Distance {} exceeds half circumference", d);
            }

            #[test]
            fn test_bearing_in_range(
                lat1 in -90.0..90.0_f64,
                lon1 in -180.0..180.0_f64,
                lat2 in -90.0..90.0_f64,
                lon2 in -180.0..180.0_f64
            ) {
                let a = Coordinate::new_unchecked(lat1, lon1);
                let b = Coordinate::new_unchecked(lat2, lon2);

                let bearing = initial_bearing_degrees(a, b);
                prop_assert!(
                    (0.0..360.0).contains(&bearing),
                    "Bearing {} out of [0, 360)",
                    bearing
                );
            }

            #[test]
            fn test_bearing_finite(
                lat1 in -90.0..90.0_f64,
                lon1 in -180.0..180.0_f64,
                lat2 in -90.0..90.0_f64,
                lon2 in -180.0..180.0_f64
            ) {
                let a = Coordinate::new_unchecked(lat1, lon1);
                let b = Coordinate::new_unchecked(lat2, lon2);

                prop_assert!(initial_bearing_degrees(a, b).is_finite());
            }
        }
    }
}
