//! Tariff engine for karaoke stays.
//!
//! Computes regular, student and member prices from a venue's tariff and a
//! pricing context, and exposes them over HTTP/JSON.

pub mod calculators;
pub mod context;
pub mod requests;
pub mod responses;
pub mod routes;

// Re-export commonly used items
pub use calculators::{
    apply_discount, compute_price, free_time_price, interval_count, interval_price,
    price_breakdown, round_yen, PriceBreakdown, PriceSet, PricingError,
};
pub use context::{
    duration_label, validate_duration, ContextUpdate, DayType, DiscountTier, PriceType,
    PricingContext, DEFAULT_DURATION_MINUTES,
};
pub use routes::router;
