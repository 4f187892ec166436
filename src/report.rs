use crate::domain::model::{Advisory, SessionReport};
use crate::domain::ports::DataStore;
use crate::utils::error::Result;

pub const CSV_EXPORT_FILE: &str = "affordable_kieze.csv";
pub const JSON_EXPORT_FILE: &str = "session_report.json";

/// Terminal rendering of a session report.
pub fn render_text(report: &SessionReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "💶 Affordable rent: €{:.0}\n",
        report.result.ceiling
    ));
    out.push_str(&format!(
        "   {:.0}% of €{:.0} income, {} household, {}\n",
        report.rent_percentage,
        report.monthly_income,
        report.household_mode,
        report.room_category.label()
    ));

    out.push('\n');
    out.push_str(advisory_line(report));
    out.push('\n');

    out.push('\n');
    out.push_str(&format!(
        "📊 Budget usage: {:.0}% of income (expenses incl. rent €{:.0}, remaining €{:.0})\n",
        report.breakdown.usage_percent,
        report.breakdown.total_expenses,
        report.breakdown.remaining
    ));
    for slice in &report.breakdown.slices {
        out.push_str(&format!("   {:<16} €{:>7.2}\n", slice.name, slice.amount));
    }

    out.push('\n');
    if report.affordable.is_empty() {
        out.push_str(&format!(
            "🏙️ No neighborhood matches this budget for {} apartments.\n",
            report.room_category.label()
        ));
        out.push_str("   Try a higher rent share, a smaller apartment, or lower expenses.\n");
    } else {
        out.push_str(&format!(
            "🏙️ Affordable neighborhoods: {} ({}% of the dataset, {}):\n",
            report.affordable.len(),
            report.affordable_share,
            report.room_category.label()
        ));
        for (index, entry) in report.affordable.iter().enumerate() {
            let marker = if report.highlight.highlighted.contains(&entry.neighborhood.id) {
                '★'
            } else {
                ' '
            };
            out.push_str(&format!(
                "   {:>2}. {} {:<16} zone {}  €{:.0}/mo\n",
                index + 1,
                marker,
                entry.neighborhood.name,
                entry.neighborhood.transport_zone,
                entry.rent
            ));
        }
        if let Some(selected) = &report.highlight.selected {
            out.push_str(&format!("   (★ = shortlist, starting with '{}')\n", selected));
        }
    }

    if let Some(date) = report.data_as_of {
        out.push('\n');
        out.push_str(&format!("📅 Data as of: {}\n", date.format("%Y-%m-%d")));
    }

    out
}

fn advisory_line(report: &SessionReport) -> &'static str {
    match report.result.advisory {
        Advisory::OnTrack => "✅ Calculation complete, the rent share rule holds.",
        Advisory::TighterThanRatio => {
            "⚠️ The affordable rent is lower than the rent share rule suggests; required expenses are squeezing the budget."
        }
        Advisory::IncomeTooLow => {
            "❌ The income does not cover the required expenses; please check the budget."
        }
    }
}

/// Writes the CSV and JSON exports through the given store.
pub async fn export<S: DataStore>(report: &SessionReport, store: &S) -> Result<()> {
    store.write(CSV_EXPORT_FILE, &csv_bytes(report)?).await?;
    store
        .write(JSON_EXPORT_FILE, &serde_json::to_vec_pretty(report)?)
        .await?;
    Ok(())
}

fn csv_bytes(report: &SessionReport) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["rank", "id", "name", "zone", "rent_eur"])?;

    for (index, entry) in report.affordable.iter().enumerate() {
        writer.write_record([
            (index + 1).to_string(),
            entry.neighborhood.id.clone(),
            entry.neighborhood.name.clone(),
            entry.neighborhood.transport_zone.to_string(),
            format!("{:.0}", entry.rent),
        ])?;
    }

    let data = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{affordability, ranking};
    use crate::domain::model::{
        ExpenseCategory, ExpenseSet, HouseholdMode, Neighborhood, RoomCategory, TransportZone,
    };
    use std::collections::BTreeMap;

    fn sample_report() -> SessionReport {
        let categories = vec![ExpenseCategory {
            id: "groceries".to_string(),
            name: "Groceries".to_string(),
            icon: String::new(),
            default_amount_single: 250.0,
            default_amount_family: 520.0,
            description: String::new(),
            is_required: true,
        }];
        let overrides = ExpenseSet::new();

        let mut average_rent = BTreeMap::new();
        average_rent.insert(RoomCategory::OneRoom, 520.0);
        let neighborhoods = vec![Neighborhood {
            id: "spandau".to_string(),
            name: "Spandau".to_string(),
            average_rent,
            average_utilities_per_sqm: 2.9,
            transport_zone: TransportZone::B,
            grocery_cost_factor: 0.95,
            description: String::new(),
            last_updated: None,
            lat: 52.535,
            lng: 13.201,
        }];

        let result =
            affordability::evaluate(&categories, HouseholdMode::Single, &overrides, 2500.0, 30.0);
        let breakdown = affordability::breakdown(
            &categories,
            HouseholdMode::Single,
            &overrides,
            2500.0,
            result.ceiling,
        );
        let affordable = ranking::rank_affordable(&neighborhoods, result.ceiling, RoomCategory::OneRoom);
        let highlight = ranking::highlight_plan(&affordable, None);

        SessionReport {
            monthly_income: 2500.0,
            rent_percentage: 30.0,
            household_mode: HouseholdMode::Single,
            room_category: RoomCategory::OneRoom,
            result,
            breakdown,
            affordable,
            affordable_share: 100,
            highlight,
            data_as_of: None,
        }
    }

    #[test]
    fn test_render_text_contains_key_figures() {
        let text = render_text(&sample_report());
        assert!(text.contains("€750"));
        assert!(text.contains("Spandau"));
        assert!(text.contains("zone B"));
        assert!(text.contains("100% of the dataset"));
    }

    #[test]
    fn test_render_text_empty_ranking() {
        let mut report = sample_report();
        report.affordable.clear();
        report.highlight = Default::default();
        report.affordable_share = 0;

        let text = render_text(&report);
        assert!(text.contains("No neighborhood matches"));
    }

    #[test]
    fn test_csv_export_shape() {
        let bytes = csv_bytes(&sample_report()).unwrap();
        let csv = String::from_utf8(bytes).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("rank,id,name,zone,rent_eur"));
        assert_eq!(lines.next(), Some("1,spandau,Spandau,B,520"));
        assert_eq!(lines.next(), None);
    }
}
