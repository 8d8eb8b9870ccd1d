//! Ordering rules for the venue list.

use serde::{Deserialize, Serialize};

use crate::pricing::PriceType;

use super::RankedVenue;

/// What the venue list is ordered by. Always ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Distance,
    /// Per-interval base price
    BasePrice,
    /// Computed stay price for the selected display price type
    ComputedPrice,
}

/// Produce an ordered view over `venues` without touching the records.
///
/// The sort is stable, so equal keys keep catalog order. Venues with no distance
/// (location not known yet) go last when sorting by distance.
pub fn sort_venues(
    venues: &[RankedVenue],
    key: SortKey,
    price_type: PriceType,
) -> Vec<&RankedVenue> {
    let mut sorted: Vec<&RankedVenue> = venues.iter().collect();
    match key {
        SortKey::Distance => sorted.sort_by_key(|v| v.distance_m.unwrap_or(u32::MAX)),
        SortKey::BasePrice => sorted.sort_by_key(|v| v.venue.base_price),
        SortKey::ComputedPrice => sorted.sort_by_key(|v| v.prices.get(price_type)),
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinate, Venue, Yen};
    use crate::pricing::PriceSet;
    use rust_decimal::Decimal;

    fn ranked(id: &str, base_price: Yen, distance_m: Option<u32>, prices: PriceSet) -> RankedVenue {
        RankedVenue {
            venue: Venue {
                id: id.to_string(),
                name: id.to_string(),
                address: String::new(),
                location: Coordinate::new(0.0, 0.0),
                base_price,
                free_time_price_weekday: None,
                free_time_price_weekend: None,
                student_discount_rate: Decimal::ZERO,
                member_discount_rate: Decimal::ZERO,
                rating: 4.0,
                open_now: true,
            },
            distance_m,
            walking_minutes: distance_m.map(crate::geo::walking_minutes),
            prices,
        }
    }

    fn prices(regular: Yen, student: Yen, member: Yen) -> PriceSet {
        PriceSet {
            regular,
            student,
            member,
        }
    }

    fn ids(view: &[&RankedVenue]) -> Vec<String> {
        view.iter().map(|v| v.venue.id.clone()).collect()
    }

    #[test]
    fn test_sort_by_computed_regular_price() {
        let venues = vec![
            ranked("a", 400, Some(100), prices(800, 640, 720)),
            ranked("b", 400, Some(200), prices(1500, 1200, 1350)),
            ranked("c", 400, Some(300), prices(700, 560, 630)),
        ];
        let view = sort_venues(&venues, SortKey::ComputedPrice, PriceType::Regular);
        assert_eq!(ids(&view), ["c", "a", "b"]);
    }

    #[test]
    fn test_sort_by_computed_price_follows_price_type() {
        let venues = vec![
            ranked("a", 400, None, prices(800, 500, 800)),
            ranked("b", 400, None, prices(700, 600, 700)),
        ];
        assert_eq!(
            ids(&sort_venues(&venues, SortKey::ComputedPrice, PriceType::Regular)),
            ["b", "a"]
        );
        assert_eq!(
            ids(&sort_venues(&venues, SortKey::ComputedPrice, PriceType::Student)),
            ["a", "b"]
        );
    }

    #[test]
    fn test_sort_by_base_price_is_stable() {
        let venues = vec![
            ranked("a", 400, None, prices(0, 0, 0)),
            ranked("b", 300, None, prices(0, 0, 0)),
            ranked("c", 400, None, prices(0, 0, 0)),
            ranked("d", 300, None, prices(0, 0, 0)),
        ];
        let view = sort_venues(&venues, SortKey::BasePrice, PriceType::Regular);
        assert_eq!(ids(&view), ["b", "d", "a", "c"]);
    }

    #[test]
    fn test_sort_by_distance_puts_unknown_last() {
        let venues = vec![
            ranked("a", 400, None, prices(0, 0, 0)),
            ranked("b", 400, Some(500), prices(0, 0, 0)),
            ranked("c", 400, None, prices(0, 0, 0)),
            ranked("d", 400, Some(120), prices(0, 0, 0)),
        ];
        let view = sort_venues(&venues, SortKey::Distance, PriceType::Regular);
        assert_eq!(ids(&view), ["d", "b", "a", "c"]);
    }

    #[test]
    fn test_sort_without_any_distance_keeps_catalog_order() {
        let venues = vec![
            ranked("x", 500, None, prices(0, 0, 0)),
            ranked("y", 300, None, prices(0, 0, 0)),
        ];
        let view = sort_venues(&venues, SortKey::Distance, PriceType::Regular);
        assert_eq!(ids(&view), ["x", "y"]);
    }

    #[test]
    fn test_sort_does_not_mutate_input() {
        let venues = vec![
            ranked("a", 500, Some(10), prices(0, 0, 0)),
            ranked("b", 300, Some(5), prices(0, 0, 0)),
        ];
        let before = venues.clone();
        let _ = sort_venues(&venues, SortKey::BasePrice, PriceType::Regular);
        assert_eq!(venues, before);
    }

    #[test]
    fn test_sort_empty() {
        assert!(sort_venues(&[], SortKey::Distance, PriceType::Regular).is_empty());
    }
}
