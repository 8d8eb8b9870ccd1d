//! Core tariff calculation functions.
//!
//! Pure functions for pricing math - no I/O, no clock reads. The day type and the
//! stay duration always arrive through a [`PricingContext`].

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Venue, Yen};

use super::context::{DayType, DiscountTier, PriceType, PricingContext};

/// Length of one billing interval in minutes.
pub const BILLING_INTERVAL_MINUTES: u32 = 30;

/// Pricing calculation error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("Stay duration must be a positive number of minutes (got {minutes})")]
    InvalidDuration { minutes: i64 },
}

/// Round a decimal amount to whole yen, halves rounding up.
///
/// Negative amounts clamp to zero; a discount can make a price free but never
/// negative.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use karaoke_finder::pricing::round_yen;
///
/// assert_eq!(round_yen(dec!(2.5)), 3);
/// assert_eq!(round_yen(dec!(1119.4)), 1119);
/// assert_eq!(round_yen(dec!(-1)), 0);
/// ```
pub fn round_yen(amount: Decimal) -> Yen {
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .unwrap_or(0)
}

/// Number of billed 30-minute intervals; partial intervals bill in full.
pub fn interval_count(duration_minutes: u32) -> u64 {
    u64::from(duration_minutes.div_ceil(BILLING_INTERVAL_MINUTES))
}

/// Price of a stay billed per interval.
pub fn interval_price(duration_minutes: u32, base_price: Yen) -> Yen {
    interval_count(duration_minutes).saturating_mul(base_price)
}

/// The venue's flat free-time rate for the given day type, if it offers one.
pub fn free_time_price(venue: &Venue, day_type: DayType) -> Option<Yen> {
    match day_type {
        DayType::Weekday => venue.free_time_price_weekday,
        DayType::Weekend => venue.free_time_price_weekend,
    }
}

/// Apply a fractional discount rate to an amount and round to whole yen.
pub fn apply_discount(amount: Yen, rate: Decimal) -> Yen {
    round_yen(Decimal::from(amount) * (Decimal::ONE - rate))
}

/// The three tier prices for one venue under one context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PriceSet {
    pub regular: Yen,
    pub student: Yen,
    pub member: Yen,
}

impl PriceSet {
    pub fn get(&self, price_type: PriceType) -> Yen {
        match price_type {
            PriceType::Regular => self.regular,
            PriceType::Student => self.student,
            PriceType::Member => self.member,
        }
    }

    /// The price a customer in `tier` actually pays.
    pub fn active(&self, tier: DiscountTier) -> Yen {
        self.get(tier.price_type())
    }
}

/// Full derivation of a venue's prices, kept for quote responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    pub interval_count: u64,
    pub interval_price: Yen,
    pub free_time_price: Option<Yen>,
    /// Whether the free-time rate undercut the interval price
    pub free_time_applied: bool,
    pub prices: PriceSet,
}

/// Work out every candidate and tier price for a venue.
///
/// Returns `PricingError::InvalidDuration` if the context carries a zero duration.
pub fn price_breakdown(
    venue: &Venue,
    ctx: &PricingContext,
) -> Result<PriceBreakdown, PricingError> {
    ctx.validate()?;

    let by_interval = interval_price(ctx.duration_minutes, venue.base_price);
    let flat = free_time_price(venue, ctx.day_type);

    // Strict comparison: a tie keeps the interval price (same number either way)
    let (regular, free_time_applied) = match flat {
        Some(flat) if flat < by_interval => (flat, true),
        _ => (by_interval, false),
    };

    Ok(PriceBreakdown {
        interval_count: interval_count(ctx.duration_minutes),
        interval_price: by_interval,
        free_time_price: flat,
        free_time_applied,
        prices: PriceSet {
            regular,
            student: apply_discount(regular, venue.student_discount_rate),
            member: apply_discount(regular, venue.member_discount_rate),
        },
    })
}

/// Compute the regular, student and member prices for a venue.
///
/// All three are always computed; the context's tier and price type only matter to
/// whoever reads the result.
pub fn compute_price(venue: &Venue, ctx: &PricingContext) -> Result<PriceSet, PricingError> {
    price_breakdown(venue, ctx).map(|b| b.prices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;
    use rust_decimal_macros::dec;

    fn venue(base_price: Yen, weekday: Option<Yen>, weekend: Option<Yen>) -> Venue {
        Venue {
            id: "v".to_string(),
            name: "Test Venue".to_string(),
            address: "Shibuya".to_string(),
            location: Coordinate::new(35.66, 139.70),
            base_price,
            free_time_price_weekday: weekday,
            free_time_price_weekend: weekend,
            student_discount_rate: dec!(0.2),
            member_discount_rate: dec!(0.1),
            rating: 4.0,
            open_now: true,
        }
    }

    fn ctx(duration_minutes: u32, day_type: DayType) -> PricingContext {
        PricingContext {
            duration_minutes,
            day_type,
            ..PricingContext::default()
        }
    }

    // ==================== round_yen / apply_discount tests ====================

    #[test]
    fn test_round_yen_half_up() {
        assert_eq!(round_yen(dec!(0.5)), 1);
        assert_eq!(round_yen(dec!(2.5)), 3);
        assert_eq!(round_yen(dec!(2.4999)), 2);
        assert_eq!(round_yen(dec!(1000)), 1000);
    }

    #[test]
    fn test_round_yen_negative_clamps_to_zero() {
        assert_eq!(round_yen(dec!(-0.4)), 0);
        assert_eq!(round_yen(dec!(-250)), 0);
    }

    #[test]
    fn test_apply_discount() {
        assert_eq!(apply_discount(1000, dec!(0.2)), 800);
        assert_eq!(apply_discount(1000, dec!(0.1)), 900);
        assert_eq!(apply_discount(1000, Decimal::ZERO), 1000);
        // 1399 * 0.75 = 1049.25
        assert_eq!(apply_discount(1399, dec!(0.25)), 1049);
        // 1050 * 0.7 = 735 exactly, 1125 * 0.9 = 1012.5 rounds up
        assert_eq!(apply_discount(1050, dec!(0.3)), 735);
        assert_eq!(apply_discount(1125, dec!(0.1)), 1013);
    }

    #[test]
    fn test_apply_discount_full_rate_is_free() {
        assert_eq!(apply_discount(1500, Decimal::ONE), 0);
    }

    // ==================== interval tests ====================

    #[test]
    fn test_interval_count_rounds_partial_up() {
        assert_eq!(interval_count(1), 1);
        assert_eq!(interval_count(30), 1);
        assert_eq!(interval_count(31), 2);
        assert_eq!(interval_count(360), 12);
    }

    #[test]
    fn test_interval_price_31_minutes() {
        assert_eq!(interval_price(31, 400), 800);
    }

    #[test]
    fn test_interval_price_saturates() {
        assert_eq!(interval_price(u32::MAX, Yen::MAX), Yen::MAX);
    }

    // ==================== compute_price tests ====================

    #[test]
    fn test_free_time_wins_when_cheaper() {
        // 120 min = 4 intervals * 400 = 1600 > 1500
        let v = venue(400, Some(1500), Some(2000));
        let prices = compute_price(&v, &ctx(120, DayType::Weekday)).unwrap();
        assert_eq!(prices.regular, 1500);
    }

    #[test]
    fn test_weekend_uses_weekend_free_time() {
        // 2000 > 1600, interval price wins on weekends
        let v = venue(400, Some(1500), Some(2000));
        let prices = compute_price(&v, &ctx(120, DayType::Weekend)).unwrap();
        assert_eq!(prices.regular, 1600);

        let long = compute_price(&v, &ctx(360, DayType::Weekend)).unwrap();
        assert_eq!(long.regular, 2000);
    }

    #[test]
    fn test_no_free_time_is_interval_only() {
        let v = venue(350, None, None);
        for day in [DayType::Weekday, DayType::Weekend] {
            let prices = compute_price(&v, &ctx(60, day)).unwrap();
            assert_eq!(prices.regular, 700);
        }
    }

    #[test]
    fn test_only_weekday_free_time_offered() {
        let v = venue(400, Some(1000), None);
        assert_eq!(compute_price(&v, &ctx(180, DayType::Weekday)).unwrap().regular, 1000);
        assert_eq!(compute_price(&v, &ctx(180, DayType::Weekend)).unwrap().regular, 2400);
    }

    #[test]
    fn test_tie_between_flat_and_interval() {
        let v = venue(400, Some(1600), None);
        let breakdown = price_breakdown(&v, &ctx(120, DayType::Weekday)).unwrap();
        assert_eq!(breakdown.prices.regular, 1600);
        assert!(!breakdown.free_time_applied);
    }

    #[test]
    fn test_discounts_do_not_compound() {
        // 30 min * 1000 = 1000 regular
        let v = venue(1000, None, None);
        let prices = compute_price(&v, &ctx(30, DayType::Weekday)).unwrap();
        assert_eq!(prices.regular, 1000);
        assert_eq!(prices.student, 800);
        assert_eq!(prices.member, 900);
    }

    #[test]
    fn test_all_tiers_computed_regardless_of_selection() {
        let v = venue(1000, None, None);
        let mut c = ctx(30, DayType::Weekday);
        c.discount_tier = DiscountTier::Member;
        c.price_type = PriceType::Student;

        let prices = compute_price(&v, &c).unwrap();
        assert_eq!(prices, compute_price(&v, &ctx(30, DayType::Weekday)).unwrap());
        assert_eq!(prices.active(DiscountTier::Member), 900);
        assert_eq!(prices.get(PriceType::Student), 800);
        assert_eq!(prices.active(DiscountTier::None), 1000);
    }

    #[test]
    fn test_compute_price_is_idempotent() {
        let v = venue(450, Some(1600), Some(2200));
        let c = ctx(150, DayType::Weekend);
        assert_eq!(compute_price(&v, &c).unwrap(), compute_price(&v, &c).unwrap());
    }

    #[test]
    fn test_compute_price_rejects_zero_duration() {
        let v = venue(400, None, None);
        let result = compute_price(&v, &ctx(0, DayType::Weekday));
        assert_eq!(result, Err(PricingError::InvalidDuration { minutes: 0 }));
    }

    #[test]
    fn test_breakdown_reports_candidates() {
        let v = venue(400, Some(1500), Some(2000));
        let breakdown = price_breakdown(&v, &ctx(120, DayType::Weekday)).unwrap();
        assert_eq!(breakdown.interval_count, 4);
        assert_eq!(breakdown.interval_price, 1600);
        assert_eq!(breakdown.free_time_price, Some(1500));
        assert!(breakdown.free_time_applied);
        assert_eq!(breakdown.prices.student, 1200);
        assert_eq!(breakdown.prices.member, 1350);
    }

    #[test]
    fn test_pricing_error_display() {
        let err = PricingError::InvalidDuration { minutes: -5 };
        assert!(err.to_string().contains("-5"));
    }
}
