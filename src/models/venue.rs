//! Venue and coordinate models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whole yen. The only currency unit the engine knows about.
pub type Yen = u64;

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Static venue attributes as supplied by the catalog.
///
/// Free-time fields are `None` when the venue offers no flat rate for that day type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: String,
    pub name: String,
    pub address: String,
    pub location: Coordinate,
    /// Price per 30-minute interval
    pub base_price: Yen,
    #[serde(default)]
    pub free_time_price_weekday: Option<Yen>,
    #[serde(default)]
    pub free_time_price_weekend: Option<Yen>,
    #[serde(default)]
    pub student_discount_rate: Decimal,
    #[serde(default)]
    pub member_discount_rate: Decimal,
    pub rating: f64,
    pub open_now: bool,
}

impl Venue {
    /// Whether the venue offers any flat free-time rate at all
    pub fn has_free_time(&self) -> bool {
        self.free_time_price_weekday.is_some() || self.free_time_price_weekend.is_some()
    }
}
