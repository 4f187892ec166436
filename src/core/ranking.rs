use crate::domain::model::{HighlightPlan, Neighborhood, RankedNeighborhood, RoomCategory};
use chrono::NaiveDate;

/// How many top-ranked entries display collaborators call out.
pub const HIGHLIGHT_LIMIT: usize = 5;

/// Neighborhoods whose average rent for the selected room category fits
/// under the ceiling, ordered ascending by that rent.
///
/// The sort is stable, so ties keep dataset order. Neighborhoods without a
/// rent entry for the category are treated as not affordable. An empty
/// result is a valid, expected state.
pub fn rank_affordable(
    neighborhoods: &[Neighborhood],
    ceiling: f64,
    room: RoomCategory,
) -> Vec<RankedNeighborhood> {
    let mut ranked: Vec<RankedNeighborhood> = neighborhoods
        .iter()
        .filter_map(|neighborhood| {
            neighborhood
                .rent_for(room)
                .filter(|rent| *rent <= ceiling)
                .map(|rent| RankedNeighborhood {
                    neighborhood: neighborhood.clone(),
                    rent,
                })
        })
        .collect();

    ranked.sort_by(|a, b| a.rent.total_cmp(&b.rent));
    ranked
}

/// Rounded percentage of the dataset that fits the budget; 0 for an empty
/// dataset.
pub fn affordable_share(total: usize, affordable: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((affordable as f64 / total as f64) * 100.0).round() as u32
}

/// Most recent `last_updated` across the dataset, for the "data as of" stamp.
pub fn latest_update(neighborhoods: &[Neighborhood]) -> Option<NaiveDate> {
    neighborhoods
        .iter()
        .filter_map(|neighborhood| neighborhood.last_updated)
        .max()
}

/// Display policy layered on top of the ranking: the top entries are
/// highlighted, and a previous selection is kept only while it still ranks;
/// otherwise the first highlighted entry becomes the selection.
pub fn highlight_plan(
    ranking: &[RankedNeighborhood],
    previous_selection: Option<&str>,
) -> HighlightPlan {
    let highlighted: Vec<String> = ranking
        .iter()
        .take(HIGHLIGHT_LIMIT)
        .map(|entry| entry.neighborhood.id.clone())
        .collect();

    let selected = previous_selection
        .filter(|id| ranking.iter().any(|entry| entry.neighborhood.id == *id))
        .map(str::to_string)
        .or_else(|| highlighted.first().cloned());

    HighlightPlan {
        highlighted,
        selected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::TransportZone;
    use std::collections::BTreeMap;

    fn neighborhood(id: &str, one_room: f64) -> Neighborhood {
        let mut average_rent = BTreeMap::new();
        average_rent.insert(RoomCategory::OneRoom, one_room);
        Neighborhood {
            id: id.to_string(),
            name: id.to_string(),
            average_rent,
            average_utilities_per_sqm: 3.0,
            transport_zone: TransportZone::A,
            grocery_cost_factor: 1.0,
            description: String::new(),
            last_updated: None,
            lat: 0.0,
            lng: 0.0,
        }
    }

    #[test]
    fn test_empty_dataset_yields_empty_ranking() {
        assert!(rank_affordable(&[], 1000.0, RoomCategory::OneRoom).is_empty());
    }

    #[test]
    fn test_filter_and_order() {
        let data = vec![
            neighborhood("a", 400.0),
            neighborhood("b", 600.0),
            neighborhood("c", 500.0),
        ];

        let ranked = rank_affordable(&data, 550.0, RoomCategory::OneRoom);
        let ids: Vec<&str> = ranked.iter().map(|r| r.neighborhood.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(ranked[0].rent, 400.0);
        assert_eq!(ranked[1].rent, 500.0);
    }

    #[test]
    fn test_ties_keep_dataset_order() {
        let data = vec![
            neighborhood("first", 500.0),
            neighborhood("second", 500.0),
            neighborhood("third", 400.0),
        ];

        let ranked = rank_affordable(&data, 600.0, RoomCategory::OneRoom);
        let ids: Vec<&str> = ranked.iter().map(|r| r.neighborhood.id.as_str()).collect();
        assert_eq!(ids, vec!["third", "first", "second"]);
    }

    #[test]
    fn test_missing_room_category_is_not_affordable() {
        let mut partial = neighborhood("partial", 400.0);
        partial.average_rent.clear();
        let data = vec![partial, neighborhood("full", 450.0)];

        let ranked = rank_affordable(&data, 1000.0, RoomCategory::OneRoom);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].neighborhood.id, "full");
    }

    #[test]
    fn test_idempotent() {
        let data = vec![neighborhood("a", 400.0), neighborhood("b", 600.0)];
        let first = rank_affordable(&data, 700.0, RoomCategory::OneRoom);
        let second = rank_affordable(&data, 700.0, RoomCategory::OneRoom);
        let first_ids: Vec<&str> = first.iter().map(|r| r.neighborhood.id.as_str()).collect();
        let second_ids: Vec<&str> = second.iter().map(|r| r.neighborhood.id.as_str()).collect();
        assert_eq!(first_ids, second_ids);
    }

    #[test]
    fn test_affordable_share() {
        assert_eq!(affordable_share(0, 0), 0);
        assert_eq!(affordable_share(12, 12), 100);
        assert_eq!(affordable_share(12, 5), 42);
        assert_eq!(affordable_share(3, 1), 33);
    }

    #[test]
    fn test_latest_update() {
        let mut a = neighborhood("a", 400.0);
        a.last_updated = NaiveDate::from_ymd_opt(2025, 1, 15);
        let mut b = neighborhood("b", 500.0);
        b.last_updated = NaiveDate::from_ymd_opt(2025, 3, 1);
        let c = neighborhood("c", 600.0);

        assert_eq!(
            latest_update(&[a, b, c]),
            NaiveDate::from_ymd_opt(2025, 3, 1)
        );
        assert_eq!(latest_update(&[neighborhood("d", 1.0)]), None);
    }

    #[test]
    fn test_highlight_plan_defaults_to_first_ranked() {
        let data: Vec<Neighborhood> = (1..=7)
            .map(|i| neighborhood(&format!("n{}", i), 100.0 * i as f64))
            .collect();
        let ranked = rank_affordable(&data, 10_000.0, RoomCategory::OneRoom);

        let plan = highlight_plan(&ranked, None);
        assert_eq!(plan.highlighted.len(), HIGHLIGHT_LIMIT);
        assert_eq!(plan.highlighted[0], "n1");
        assert_eq!(plan.selected.as_deref(), Some("n1"));
    }

    #[test]
    fn test_highlight_plan_keeps_previous_selection_while_ranked() {
        let data: Vec<Neighborhood> = (1..=7)
            .map(|i| neighborhood(&format!("n{}", i), 100.0 * i as f64))
            .collect();
        let ranked = rank_affordable(&data, 10_000.0, RoomCategory::OneRoom);

        let plan = highlight_plan(&ranked, Some("n6"));
        assert_eq!(plan.selected.as_deref(), Some("n6"));

        let plan = highlight_plan(&ranked, Some("gone"));
        assert_eq!(plan.selected.as_deref(), Some("n1"));
    }

    #[test]
    fn test_highlight_plan_empty_ranking() {
        let plan = highlight_plan(&[], None);
        assert!(plan.highlighted.is_empty());
        assert!(plan.selected.is_none());
    }
}
