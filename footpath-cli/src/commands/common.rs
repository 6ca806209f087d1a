//! Shared helpers for CLI commands.

use footpath::Coordinate;

use crate::error::CliError;

/// Parses a `LAT,LON` decimal-degree pair.
pub fn parse_coordinate(input: &str) -> Result<Coordinate, CliError> {
    let mut parts = input.split(',');

    let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CliError::InvalidCoordinate(format!(
            "'{}' (expected LAT,LON)",
            input
        )));
    };

    let latitude: f64 = lat
        .trim()
        .parse()
        .map_err(|_| CliError::InvalidCoordinate(format!("latitude '{}'", lat.trim())))?;
    let longitude: f64 = lon
        .trim()
        .parse()
        .map_err(|_| CliError::InvalidCoordinate(format!("longitude '{}'", lon.trim())))?;

    Coordinate::new(latitude, longitude)
        .map_err(|e| CliError::InvalidCoordinate(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_pair() {
        let coord = parse_coordinate("53.5511,9.9937").unwrap();
        assert_eq!(coord.latitude(), 53.5511);
        assert_eq!(coord.longitude(), 9.9937);
    }

    #[test]
    fn test_parse_with_spaces() {
        let coord = parse_coordinate(" -33.86 , 151.21 ").unwrap();
        assert_eq!(coord.latitude(), -33.86);
        assert_eq!(coord.longitude(), 151.21);
    }

    #[test]
    fn test_parse_rejects_wrong_arity() {
        assert!(parse_coordinate("53.5511").is_err());
        assert!(parse_coordinate("1,2,3").is_err());
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert!(parse_coordinate("north,west").is_err());
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!(parse_coordinate("91.0,0.0").is_err());
        assert!(parse_coordinate("0.0,181.0").is_err());
    }
}
