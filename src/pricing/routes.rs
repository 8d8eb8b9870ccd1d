//! HTTP handlers for venue ranking and stay quotes.
//!
//! Each request runs its own short-lived [`RankingCoordinator`] over the shared,
//! immutable catalog; no ranking state outlives a request.

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Local;

use crate::error::{AppError, Result};
use crate::ranking::RankingCoordinator;
use crate::AppState;

use super::calculators::price_breakdown;
use super::context::{ContextUpdate, DayType};
use super::requests::{QuoteRequest, VenueQuery};
use super::responses::{
    ContextResponse, QuoteResponse, VenueDetailResponse, VenueListResponse, VenueResponse,
};

/// Pricing and ranking routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/venues", get(list_venues))
        .route("/api/venues/:id", get(venue_detail))
        .route("/api/quote", post(quote))
}

/// Weekday or weekend according to the server's local clock
fn today() -> DayType {
    DayType::from_date(Local::now().date_naive())
}

/// Build a ranking session for one request.
fn session(state: &AppState, query: &VenueQuery) -> Result<RankingCoordinator> {
    let location = query.location()?;

    let mut coordinator =
        RankingCoordinator::default().with_fallback(state.config.fallback_origin);
    coordinator.update_context(
        query.context_update(state.config.default_duration_minutes, today()),
    )?;
    coordinator.load(state.catalog.to_vec(), None)?;
    coordinator.resolve_location(location);

    if let Some(sort) = query.sort {
        coordinator.set_sort_key(sort);
    }
    Ok(coordinator)
}

/// Ranked venue list
pub async fn list_venues(
    State(state): State<AppState>,
    Query(query): Query<VenueQuery>,
) -> Result<Json<VenueListResponse>> {
    let coordinator = session(&state, &query)?;
    let ctx = coordinator.context();

    let venues: Vec<VenueResponse> = coordinator
        .ranked()
        .into_iter()
        .map(|v| VenueResponse::from_ranked(v, ctx))
        .collect();

    tracing::debug!(
        "Ranked {} venues by {:?} ({} min, {})",
        venues.len(),
        coordinator.sort_key(),
        ctx.duration_minutes,
        ctx.day_type.as_str()
    );

    Ok(Json(VenueListResponse {
        context: ContextResponse::new(ctx, Some(coordinator.sort_key())),
        location: coordinator.location(),
        location_error: coordinator.location_error().map(str::to_string),
        venues,
    }))
}

/// Single venue with distance and prices
pub async fn venue_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<VenueQuery>,
) -> Result<Json<VenueDetailResponse>> {
    let coordinator = session(&state, &query)?;
    let ctx = coordinator.context();

    let ranked = coordinator
        .venue(&id)
        .ok_or_else(|| AppError::VenueNotFound(id.clone()))?;

    Ok(Json(VenueDetailResponse {
        context: ContextResponse::new(ctx, None),
        location: coordinator.location(),
        location_error: coordinator.location_error().map(str::to_string),
        venue: VenueResponse::from_ranked(ranked, ctx),
    }))
}

/// Price breakdown for a stay at one venue
pub async fn quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>> {
    let update = ContextUpdate {
        duration_minutes: Some(request.duration_minutes),
        day_type: Some(request.day_type.unwrap_or_else(today)),
        discount_tier: request.tier,
        price_type: request.tier.map(|t| t.price_type()),
    };
    let ctx = update.apply_to(&Default::default())?;

    let venue = state
        .catalog
        .iter()
        .find(|v| v.id == request.venue_id)
        .ok_or_else(|| AppError::VenueNotFound(request.venue_id.clone()))?;

    let breakdown = price_breakdown(venue, &ctx)?;

    Ok(Json(QuoteResponse {
        venue_id: venue.id.clone(),
        context: ContextResponse::new(&ctx, None),
        active_price: breakdown.prices.active(ctx.discount_tier),
        breakdown,
    }))
}
