//! Request DTOs for venue and quote endpoints.

use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::location::LocationError;
use crate::models::Coordinate;
use crate::ranking::SortKey;

use super::context::{ContextUpdate, DayType, DiscountTier, PriceType};

/// Query parameters shared by the venue list and venue detail endpoints
#[derive(Debug, Default, Deserialize)]
pub struct VenueQuery {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    /// Stay length in minutes
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub tier: Option<DiscountTier>,
    #[serde(default)]
    pub price_type: Option<PriceType>,
    #[serde(default)]
    pub sort: Option<SortKey>,
    /// Overrides the clock-derived day type
    #[serde(default)]
    pub day: Option<DayType>,
}

impl VenueQuery {
    /// The client's position, or the geolocation failure to fall back from.
    ///
    /// A request with neither coordinate counts as a client without geolocation.
    pub fn location(&self) -> Result<std::result::Result<Coordinate, LocationError>> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => {
                if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
                    return Err(AppError::BadRequest(format!(
                        "coordinate out of range: {lat}, {lng}"
                    )));
                }
                Ok(Ok(Coordinate::new(lat, lng)))
            }
            (None, None) => Ok(Err(LocationError::Unsupported)),
            _ => Err(AppError::BadRequest(
                "lat and lng must be given together".to_string(),
            )),
        }
    }

    /// The context change this request asks for.
    ///
    /// Without an explicit price type, prices are shown for the selected tier.
    pub fn context_update(&self, default_duration: u32, today: DayType) -> ContextUpdate {
        ContextUpdate {
            duration_minutes: Some(self.duration.unwrap_or(i64::from(default_duration))),
            day_type: Some(self.day.unwrap_or(today)),
            discount_tier: self.tier,
            price_type: self.price_type.or(self.tier.map(|t| t.price_type())),
        }
    }
}

/// Request to quote a stay at one venue
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub venue_id: String,
    pub duration_minutes: i64,
    #[serde(default)]
    pub day_type: Option<DayType>,
    #[serde(default)]
    pub tier: Option<DiscountTier>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_both_coordinates() {
        let query = VenueQuery {
            lat: Some(35.0),
            lng: Some(139.0),
            ..VenueQuery::default()
        };
        assert_eq!(query.location().unwrap(), Ok(Coordinate::new(35.0, 139.0)));
    }

    #[test]
    fn test_location_missing_is_unsupported() {
        let query = VenueQuery::default();
        assert_eq!(query.location().unwrap(), Err(LocationError::Unsupported));
    }

    #[test]
    fn test_location_half_given_is_rejected() {
        let query = VenueQuery {
            lat: Some(35.0),
            ..VenueQuery::default()
        };
        assert!(matches!(query.location(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_location_out_of_range_is_rejected() {
        let query = VenueQuery {
            lat: Some(95.0),
            lng: Some(139.0),
            ..VenueQuery::default()
        };
        assert!(matches!(query.location(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_context_update_defaults() {
        let update = VenueQuery::default().context_update(120, DayType::Weekend);
        assert_eq!(update.duration_minutes, Some(120));
        assert_eq!(update.day_type, Some(DayType::Weekend));
        assert_eq!(update.discount_tier, None);
        assert_eq!(update.price_type, None);
    }

    #[test]
    fn test_context_update_price_type_follows_tier() {
        let query = VenueQuery {
            tier: Some(DiscountTier::Member),
            day: Some(DayType::Weekday),
            ..VenueQuery::default()
        };
        let update = query.context_update(120, DayType::Weekend);
        assert_eq!(update.price_type, Some(PriceType::Member));
        assert_eq!(update.day_type, Some(DayType::Weekday));
    }

    #[test]
    fn test_context_update_explicit_price_type_wins() {
        let query = VenueQuery {
            tier: Some(DiscountTier::Member),
            price_type: Some(PriceType::Regular),
            ..VenueQuery::default()
        };
        let update = query.context_update(60, DayType::Weekday);
        assert_eq!(update.price_type, Some(PriceType::Regular));
    }
}
