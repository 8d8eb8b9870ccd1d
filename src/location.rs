//! User location input and the fallback used when it cannot be acquired.

use crate::models::Coordinate;

/// Shibuya Station. Used whenever the user's position is unavailable.
pub const DEFAULT_ORIGIN: Coordinate = Coordinate::new(35.658034, 139.701636);

/// Failure reported by the geolocation collaborator.
///
/// The `Display` text is user facing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("Could not get your location. Please allow location access.")]
    PermissionDenied,

    #[error("Your browser does not support geolocation.")]
    Unsupported,
}

/// The outcome of resolving a location: where to rank from, and what to tell the user.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub coordinate: Coordinate,
    pub error: Option<String>,
}

impl ResolvedLocation {
    pub fn is_fallback(&self) -> bool {
        self.error.is_some()
    }
}

/// Turn a geolocation result into a usable coordinate.
///
/// Failures never stop ranking: the fallback coordinate is substituted and the
/// error message is kept for display.
pub fn resolve(
    result: Result<Coordinate, LocationError>,
    fallback: Coordinate,
) -> ResolvedLocation {
    match result {
        Ok(coordinate) => ResolvedLocation {
            coordinate,
            error: None,
        },
        Err(e) => {
            tracing::warn!(
                "Location unavailable ({}), falling back to {}, {}",
                e,
                fallback.lat,
                fallback.lng
            );
            ResolvedLocation {
                coordinate: fallback,
                error: Some(e.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_success_keeps_coordinate() {
        let here = Coordinate::new(35.681236, 139.767125);
        let resolved = resolve(Ok(here), DEFAULT_ORIGIN);
        assert_eq!(resolved.coordinate, here);
        assert!(resolved.error.is_none());
        assert!(!resolved.is_fallback());
    }

    #[test]
    fn test_resolve_failure_uses_fallback() {
        let resolved = resolve(Err(LocationError::PermissionDenied), DEFAULT_ORIGIN);
        assert_eq!(resolved.coordinate, DEFAULT_ORIGIN);
        assert_eq!(
            resolved.error.as_deref(),
            Some("Could not get your location. Please allow location access.")
        );
        assert!(resolved.is_fallback());
    }

    #[test]
    fn test_resolve_unsupported_message() {
        let resolved = resolve(Err(LocationError::Unsupported), DEFAULT_ORIGIN);
        assert!(resolved.error.unwrap().contains("does not support"));
    }
}
