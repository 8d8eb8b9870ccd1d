//! Response DTOs for venue and quote endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::geo;
use crate::models::{Coordinate, Yen};
use crate::ranking::{RankedVenue, SortKey};

use super::calculators::{free_time_price, PriceBreakdown, PriceSet};
use super::context::{duration_label, DayType, DiscountTier, PriceType, PricingContext};

/// The pricing inputs a response was computed with
#[derive(Debug, Serialize)]
pub struct ContextResponse {
    pub duration_minutes: u32,
    pub duration_label: String,
    pub day_type: DayType,
    pub discount_tier: DiscountTier,
    pub price_type: PriceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortKey>,
}

impl ContextResponse {
    pub fn new(ctx: &PricingContext, sort: Option<SortKey>) -> Self {
        Self {
            duration_minutes: ctx.duration_minutes,
            duration_label: duration_label(ctx.duration_minutes),
            day_type: ctx.day_type,
            discount_tier: ctx.discount_tier,
            price_type: ctx.price_type,
            sort,
        }
    }
}

/// One venue as shown in the list and detail views
#[derive(Debug, Serialize)]
pub struct VenueResponse {
    pub id: String,
    pub name: String,
    pub address: String,
    pub location: Coordinate,
    pub rating: f64,
    pub open_now: bool,
    pub distance_m: Option<u32>,
    pub distance_label: Option<String>,
    pub walking_minutes: Option<u32>,
    pub base_price: Yen,
    /// Free-time rate for the context's day type
    pub free_time_price: Option<Yen>,
    #[serde(with = "rust_decimal::serde::str")]
    pub student_discount_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub member_discount_rate: Decimal,
    pub prices: PriceSet,
    /// Price for the selected discount tier
    pub active_price: Yen,
    /// Price for the selected display price type
    pub display_price: Yen,
}

impl VenueResponse {
    pub fn from_ranked(ranked: &RankedVenue, ctx: &PricingContext) -> Self {
        let venue = &ranked.venue;
        Self {
            id: venue.id.clone(),
            name: venue.name.clone(),
            address: venue.address.clone(),
            location: venue.location,
            rating: venue.rating,
            open_now: venue.open_now,
            distance_m: ranked.distance_m,
            distance_label: ranked.distance_m.map(geo::distance_label),
            walking_minutes: ranked.walking_minutes,
            base_price: venue.base_price,
            free_time_price: free_time_price(venue, ctx.day_type),
            student_discount_rate: venue.student_discount_rate,
            member_discount_rate: venue.member_discount_rate,
            prices: ranked.prices,
            active_price: ranked.prices.active(ctx.discount_tier),
            display_price: ranked.prices.get(ctx.price_type),
        }
    }
}

/// Response for the ranked venue list
#[derive(Debug, Serialize)]
pub struct VenueListResponse {
    pub context: ContextResponse,
    pub location: Option<Coordinate>,
    pub location_error: Option<String>,
    pub venues: Vec<VenueResponse>,
}

/// Response for a single venue
#[derive(Debug, Serialize)]
pub struct VenueDetailResponse {
    pub context: ContextResponse,
    pub location: Option<Coordinate>,
    pub location_error: Option<String>,
    pub venue: VenueResponse,
}

/// Response for a stay quote
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub venue_id: String,
    pub context: ContextResponse,
    #[serde(flatten)]
    pub breakdown: PriceBreakdown,
    pub active_price: Yen,
}

/// Response for the health check
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub venues: usize,
}

/// Generic error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
}
