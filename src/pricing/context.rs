//! Pricing context: the inputs that drive price recomputation.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::PricingError;

/// Default stay length used until the caller picks one.
pub const DEFAULT_DURATION_MINUTES: u32 = 120;

/// Weekday/weekend classification selecting which free-time rate applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    #[default]
    Weekday,
    Weekend,
}

impl DayType {
    /// Saturday and Sunday are weekend days; everything else is a weekday.
    pub fn from_date(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Sat | Weekday::Sun => DayType::Weekend,
            _ => DayType::Weekday,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayType::Weekday => "weekday",
            DayType::Weekend => "weekend",
        }
    }
}

/// The customer category whose discount is applied. Exactly one at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountTier {
    #[default]
    None,
    Student,
    Member,
}

impl DiscountTier {
    /// The price type a recommendation under this tier is quoted in.
    pub fn price_type(&self) -> PriceType {
        match self {
            DiscountTier::None => PriceType::Regular,
            DiscountTier::Student => PriceType::Student,
            DiscountTier::Member => PriceType::Member,
        }
    }
}

/// Which of the three computed prices to show and sort by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceType {
    #[default]
    Regular,
    Student,
    Member,
}

/// Current pricing inputs. Owned and mutated only by the ranking coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingContext {
    pub duration_minutes: u32,
    pub day_type: DayType,
    pub discount_tier: DiscountTier,
    pub price_type: PriceType,
}

impl Default for PricingContext {
    fn default() -> Self {
        Self {
            duration_minutes: DEFAULT_DURATION_MINUTES,
            day_type: DayType::default(),
            discount_tier: DiscountTier::default(),
            price_type: PriceType::default(),
        }
    }
}

impl PricingContext {
    /// Check the context satisfies the tariff engine's preconditions.
    pub fn validate(&self) -> Result<(), PricingError> {
        validate_duration(i64::from(self.duration_minutes))
    }
}

/// Reject non-positive stay durations before they reach the interval math.
pub fn validate_duration(minutes: i64) -> Result<(), PricingError> {
    if minutes <= 0 || minutes > i64::from(u32::MAX) {
        return Err(PricingError::InvalidDuration { minutes });
    }
    Ok(())
}

/// A partial change to the pricing context, applied atomically.
///
/// Fields left as `None` keep their current value. Duration is signed so that a
/// negative value from an untrusted caller is rejected rather than wrapped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContextUpdate {
    pub duration_minutes: Option<i64>,
    pub day_type: Option<DayType>,
    pub discount_tier: Option<DiscountTier>,
    pub price_type: Option<PriceType>,
}

impl ContextUpdate {
    pub fn duration(mut self, minutes: i64) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    pub fn day_type(mut self, day_type: DayType) -> Self {
        self.day_type = Some(day_type);
        self
    }

    pub fn discount_tier(mut self, tier: DiscountTier) -> Self {
        self.discount_tier = Some(tier);
        self
    }

    pub fn price_type(mut self, price_type: PriceType) -> Self {
        self.price_type = Some(price_type);
        self
    }

    /// Produce the context that results from applying this update to `current`.
    ///
    /// Nothing is applied unless every field validates.
    pub fn apply_to(&self, current: &PricingContext) -> Result<PricingContext, PricingError> {
        let duration_minutes = match self.duration_minutes {
            Some(minutes) => {
                validate_duration(minutes)?;
                minutes as u32
            }
            None => current.duration_minutes,
        };

        Ok(PricingContext {
            duration_minutes,
            day_type: self.day_type.unwrap_or(current.day_type),
            discount_tier: self.discount_tier.unwrap_or(current.discount_tier),
            price_type: self.price_type.unwrap_or(current.price_type),
        })
    }
}

/// Format a stay length the way the venue list shows it, e.g. `2時間 30分`.
pub fn duration_label(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if mins > 0 {
        format!("{}時間 {}分", hours, mins)
    } else {
        format!("{}時間", hours)
    }
}
