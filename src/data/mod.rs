// Adapters for the static reference datasets: filesystem and HTTP stores
// plus the load-once snapshot builder.

pub mod http;
pub mod local;

pub use http::HttpStore;
pub use local::LocalStore;

use crate::domain::model::{ExpenseCategory, Neighborhood, ReferenceData};
use crate::domain::ports::DataStore;
use crate::utils::error::Result;
use serde::de::DeserializeOwned;

pub const EXPENSES_FILE: &str = "expenses.json";
pub const NEIGHBORHOODS_FILE: &str = "neighborhoods.json";

const CITY_CENTER: (f64, f64) = (52.520, 13.405);

/// Kiez centroids keyed by dataset id. Ids missing here fall back to the
/// city center.
const COORDINATES: &[(&str, f64, f64)] = &[
    ("mitte", 52.520, 13.405),
    ("friedrichshain", 52.515, 13.454),
    ("kreuzberg", 52.498, 13.422),
    ("neukoelln", 52.481, 13.449),
    ("charlottenburg", 52.505, 13.304),
    ("prenzlauer-berg", 52.542, 13.414),
    ("schoeneberg", 52.484, 13.350),
    ("wedding", 52.549, 13.366),
    ("lichtenberg", 52.516, 13.489),
    ("steglitz", 52.456, 13.326),
    ("spandau", 52.535, 13.201),
    ("reinickendorf", 52.585, 13.356),
];

/// Builds the session snapshot from `expenses.json` and `neighborhoods.json`.
///
/// A dataset that fails to load is reported once as a warning and replaced
/// by an empty list; the session stays well-defined (ratio-only
/// affordability, empty ranking). Safe to call repeatedly, but the caller is
/// expected to hold on to the snapshot for the whole session.
pub async fn load_reference_data<S: DataStore>(store: &S) -> ReferenceData {
    let expense_categories = match load_dataset::<ExpenseCategory, S>(store, EXPENSES_FILE).await {
        Ok(categories) => categories,
        Err(e) => {
            tracing::warn!(
                "⚠️ Failed to load {}: {} (continuing with empty expense data)",
                EXPENSES_FILE,
                e
            );
            Vec::new()
        }
    };

    let neighborhoods = match load_dataset::<Neighborhood, S>(store, NEIGHBORHOODS_FILE).await {
        Ok(mut neighborhoods) => {
            attach_coordinates(&mut neighborhoods);
            neighborhoods
        }
        Err(e) => {
            tracing::warn!(
                "⚠️ Failed to load {}: {} (continuing with empty neighborhood data)",
                NEIGHBORHOODS_FILE,
                e
            );
            Vec::new()
        }
    };

    ReferenceData {
        expense_categories,
        neighborhoods,
    }
}

async fn load_dataset<T: DeserializeOwned, S: DataStore>(store: &S, path: &str) -> Result<Vec<T>> {
    let bytes = store.read(path).await?;
    let records: Vec<T> = serde_json::from_slice(&bytes)?;
    Ok(records)
}

fn attach_coordinates(neighborhoods: &mut [Neighborhood]) {
    for neighborhood in neighborhoods {
        let (lat, lng) = COORDINATES
            .iter()
            .find(|(id, _, _)| *id == neighborhood.id)
            .map(|(_, lat, lng)| (*lat, *lng))
            .unwrap_or(CITY_CENTER);
        neighborhood.lat = lat;
        neighborhood.lng = lng;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{RoomCategory, TransportZone};
    use std::collections::BTreeMap;

    fn neighborhood(id: &str) -> Neighborhood {
        let mut average_rent = BTreeMap::new();
        average_rent.insert(RoomCategory::OneRoom, 500.0);
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
    fn test_attach_coordinates_known_id() {
        let mut data = vec![neighborhood("spandau")];
        attach_coordinates(&mut data);
        assert_eq!(data[0].lat, 52.535);
        assert_eq!(data[0].lng, 13.201);
    }

    #[test]
    fn test_attach_coordinates_unknown_id_falls_back_to_center() {
        let mut data = vec![neighborhood("atlantis")];
        attach_coordinates(&mut data);
        assert_eq!((data[0].lat, data[0].lng), CITY_CENTER);
    }
}
