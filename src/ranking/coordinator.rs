//! Session coordinator owning the pricing context and the ranked venue collection.
//!
//! Every change produces a fresh, fully derived collection that replaces the
//! previous one; readers holding a [`snapshot`](RankingCoordinator::snapshot) keep a
//! consistent view across updates.

use std::sync::Arc;

use crate::catalog::{CatalogError, VenueCatalog};
use crate::geo;
use crate::location::{self, LocationError, DEFAULT_ORIGIN};
use crate::models::{Coordinate, Venue};
use crate::pricing::{compute_price, ContextUpdate, PricingContext, PricingError};

use super::sort::{sort_venues, SortKey};
use super::RankedVenue;

#[derive(Debug, Clone)]
pub struct RankingCoordinator {
    context: PricingContext,
    sort_key: SortKey,
    venues: Arc<[RankedVenue]>,
    location: Option<Coordinate>,
    location_error: Option<String>,
    fallback: Coordinate,
}

impl Default for RankingCoordinator {
    fn default() -> Self {
        Self {
            context: PricingContext::default(),
            sort_key: SortKey::default(),
            venues: Arc::from(Vec::new()),
            location: None,
            location_error: None,
            fallback: DEFAULT_ORIGIN,
        }
    }
}

impl RankingCoordinator {
    /// Create a coordinator with an initial pricing context.
    pub fn new(context: PricingContext) -> Result<Self, PricingError> {
        context.validate()?;
        Ok(Self {
            context,
            ..Self::default()
        })
    }

    /// Use a different coordinate when geolocation fails.
    pub fn with_fallback(mut self, fallback: Coordinate) -> Self {
        self.fallback = fallback;
        self
    }

    /// Replace the venue set.
    ///
    /// Distances are only computed when a location is known, either passed here or
    /// resolved earlier. Resets the sort key to distance.
    pub fn load(
        &mut self,
        venues: Vec<Venue>,
        location: Option<Coordinate>,
    ) -> Result<(), PricingError> {
        if location.is_some() {
            self.location = location;
            self.location_error = None;
        }

        let ranked = venues
            .into_iter()
            .map(|venue| RankedVenue::enrich(venue, self.location, &self.context))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            "Loaded {} venues (location {})",
            ranked.len(),
            if self.location.is_some() { "known" } else { "pending" }
        );

        self.venues = ranked.into();
        self.sort_key = SortKey::Distance;
        Ok(())
    }

    /// Load from a catalog provider.
    pub fn load_catalog(
        &mut self,
        catalog: &dyn VenueCatalog,
        location: Option<Coordinate>,
    ) -> Result<(), CatalogLoadError> {
        let venues = catalog.venues()?;
        self.load(venues, location)?;
        Ok(())
    }

    /// Accept the geolocation outcome and refresh distances.
    ///
    /// A failure substitutes the fallback coordinate and records a message for
    /// display; ranking continues either way.
    pub fn resolve_location(&mut self, result: Result<Coordinate, LocationError>) {
        let resolved = location::resolve(result, self.fallback);
        self.location = Some(resolved.coordinate);
        self.location_error = resolved.error;
        self.recompute_distances();
    }

    fn recompute_distances(&mut self) {
        let origin = self.location;
        self.venues = self
            .venues
            .iter()
            .map(|v| {
                let distance_m = origin.map(|o| geo::distance_meters(o, v.venue.location));
                RankedVenue {
                    distance_m,
                    walking_minutes: distance_m.map(geo::walking_minutes),
                    ..v.clone()
                }
            })
            .collect();
        tracing::debug!("Recomputed distances for {} venues", self.venues.len());
    }

    /// Apply a context change atomically, then recompute every price set.
    ///
    /// On a validation error nothing changes.
    pub fn update_context(&mut self, update: ContextUpdate) -> Result<(), PricingError> {
        let next = update.apply_to(&self.context)?;
        self.context = next;
        self.recompute_prices()
    }

    /// Recompute price sets for every held venue with the current context.
    ///
    /// Calling this repeatedly with an unchanged context gives identical results.
    pub fn recompute_prices(&mut self) -> Result<(), PricingError> {
        let ctx = self.context;
        let venues = self
            .venues
            .iter()
            .map(|v| {
                Ok(RankedVenue {
                    prices: compute_price(&v.venue, &ctx)?,
                    ..v.clone()
                })
            })
            .collect::<Result<Vec<_>, PricingError>>()?;

        tracing::debug!(
            "Recomputed prices for {} venues ({} min, {}, {:?})",
            venues.len(),
            ctx.duration_minutes,
            ctx.day_type.as_str(),
            ctx.discount_tier
        );

        self.venues = venues.into();
        Ok(())
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.sort_key = key;
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    /// Venues in display order for the current sort key.
    ///
    /// Computed-price sorting follows the context's display price type.
    pub fn ranked(&self) -> Vec<&RankedVenue> {
        sort_venues(&self.venues, self.sort_key, self.context.price_type)
    }

    /// The current collection in catalog order.
    pub fn snapshot(&self) -> Arc<[RankedVenue]> {
        Arc::clone(&self.venues)
    }

    pub fn venue(&self, id: &str) -> Option<&RankedVenue> {
        self.venues.iter().find(|v| v.venue.id == id)
    }

    pub fn context(&self) -> &PricingContext {
        &self.context
    }

    pub fn location(&self) -> Option<Coordinate> {
        self.location
    }

    pub fn location_error(&self) -> Option<&str> {
        self.location_error.as_deref()
    }

    /// True until a location is known, whether real or the fallback.
    pub fn is_loading(&self) -> bool {
        self.location.is_none()
    }
}

/// Errors from loading a venue set through a catalog provider.
#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Pricing(#[from] PricingError),
}
