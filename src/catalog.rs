//! Venue catalog providers.
//!
//! The ranking engine only needs an ordered list of venues keyed by a stable id.
//! Where the list comes from is up to the provider.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{Coordinate, Venue};

/// Catalog loading errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Venue {id} has {field} {rate} outside [0, 1]")]
    InvalidDiscountRate {
        id: String,
        field: &'static str,
        rate: Decimal,
    },

    #[error("Duplicate venue id: {0}")]
    DuplicateId(String),
}

/// Source of the venue list for a session.
pub trait VenueCatalog {
    /// Return venues in their natural display order.
    fn venues(&self) -> Result<Vec<Venue>, CatalogError>;
}

/// Check ids are unique and discount rates are usable fractions.
///
/// A rate of exactly 1 (free) is accepted.
pub fn validate_catalog(venues: &[Venue]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for venue in venues {
        if !seen.insert(venue.id.as_str()) {
            return Err(CatalogError::DuplicateId(venue.id.clone()));
        }
        for (field, rate) in [
            ("student_discount_rate", venue.student_discount_rate),
            ("member_discount_rate", venue.member_discount_rate),
        ] {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(CatalogError::InvalidDiscountRate {
                    id: venue.id.clone(),
                    field,
                    rate,
                });
            }
        }
    }
    Ok(())
}

/// In-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    venues: Vec<Venue>,
}

impl StaticCatalog {
    pub fn new(venues: Vec<Venue>) -> Self {
        Self { venues }
    }

    /// The built-in list of karaoke venues around Shibuya Station.
    pub fn shibuya() -> Self {
        Self::new(vec![
            shibuya_venue(
                "1",
                "カラオケ ビッグエコー 渋谷センター街店",
                "東京都渋谷区宇田川町25-5",
                (35.660232, 139.698152),
                400,
                (Some(1500), Some(2000)),
                (dec!(0.2), dec!(0.1)),
                4.2,
                true,
            ),
            shibuya_venue(
                "2",
                "カラオケ館 渋谷本店",
                "東京都渋谷区宇田川町23-4",
                (35.661301, 139.697753),
                350,
                (Some(1400), Some(1900)),
                (dec!(0.3), dec!(0.15)),
                4.0,
                true,
            ),
            shibuya_venue(
                "3",
                "カラオケの鉄人 渋谷道玄坂店",
                "東京都渋谷区道玄坂2-29-8",
                (35.659069, 139.696512),
                300,
                (Some(1300), Some(1800)),
                (dec!(0.2), dec!(0.1)),
                4.3,
                true,
            ),
            shibuya_venue(
                "4",
                "ジョイカラ 渋谷店",
                "東京都渋谷区宇田川町36-6",
                (35.662432, 139.695872),
                450,
                (Some(1600), Some(2200)),
                (dec!(0.1), dec!(0.05)),
                3.9,
                false,
            ),
            shibuya_venue(
                "5",
                "カラオケパセラ 渋谷店",
                "東京都渋谷区宇田川町26-5",
                (35.660789, 139.699324),
                500,
                (Some(1800), Some(2500)),
                (dec!(0.25), dec!(0.2)),
                4.5,
                true,
            ),
        ])
    }
}

#[allow(clippy::too_many_arguments)]
fn shibuya_venue(
    id: &str,
    name: &str,
    address: &str,
    (lat, lng): (f64, f64),
    base_price: u64,
    (weekday, weekend): (Option<u64>, Option<u64>),
    (student, member): (Decimal, Decimal),
    rating: f64,
    open_now: bool,
) -> Venue {
    Venue {
        id: id.to_string(),
        name: name.to_string(),
        address: address.to_string(),
        location: Coordinate::new(lat, lng),
        base_price,
        free_time_price_weekday: weekday,
        free_time_price_weekend: weekend,
        student_discount_rate: student,
        member_discount_rate: member,
        rating,
        open_now,
    }
}

impl VenueCatalog for StaticCatalog {
    fn venues(&self) -> Result<Vec<Venue>, CatalogError> {
        validate_catalog(&self.venues)?;
        Ok(self.venues.clone())
    }
}

/// Catalog read from a JSON array of venues on disk.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VenueCatalog for JsonFileCatalog {
    fn venues(&self) -> Result<Vec<Venue>, CatalogError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|source| CatalogError::Io {
            path: self.path.clone(),
            source,
        })?;
        let venues = parse_catalog(&raw)?;
        tracing::info!("Loaded {} venues from {}", venues.len(), self.path.display());
        Ok(venues)
    }
}

/// Parse and validate a JSON venue list.
pub fn parse_catalog(json: &str) -> Result<Vec<Venue>, CatalogError> {
    let venues: Vec<Venue> = serde_json::from_str(json)?;
    validate_catalog(&venues)?;
    Ok(venues)
}
