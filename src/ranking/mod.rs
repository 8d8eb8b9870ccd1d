//! Venue ranking: enriched venue records, the session coordinator and sort rules.

pub mod coordinator;
pub mod sort;

use serde::Serialize;

use crate::geo;
use crate::models::{Coordinate, Venue};
use crate::pricing::{compute_price, PriceSet, PricingContext, PricingError};

pub use coordinator::{CatalogLoadError, RankingCoordinator};
pub use sort::{sort_venues, SortKey};

/// A catalog venue plus everything derived from the user's location and the
/// pricing context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedVenue {
    #[serde(flatten)]
    pub venue: Venue,
    /// Meters from the user, `None` until a location is known
    pub distance_m: Option<u32>,
    pub walking_minutes: Option<u32>,
    pub prices: PriceSet,
}

impl RankedVenue {
    /// Build the full derived-field set for a venue.
    pub fn enrich(
        venue: Venue,
        origin: Option<Coordinate>,
        ctx: &PricingContext,
    ) -> Result<Self, PricingError> {
        let prices = compute_price(&venue, ctx)?;
        let distance_m = origin.map(|o| geo::distance_meters(o, venue.location));
        Ok(Self {
            walking_minutes: distance_m.map(geo::walking_minutes),
            distance_m,
            prices,
            venue,
        })
    }
}
