use crate::core::{affordability, ranking};
use crate::data::load_reference_data;
use crate::domain::model::SessionReport;
use crate::domain::ports::{DataStore, InputProvider};
use crate::utils::error::Result;

/// Runs one calculator session: load the reference snapshot, evaluate
/// affordability, rank neighborhoods, and assemble the report.
pub struct BudgetEngine<S: DataStore, C: InputProvider> {
    store: S,
    inputs: C,
}

impl<S: DataStore, C: InputProvider> BudgetEngine<S, C> {
    pub fn new(store: S, inputs: C) -> Self {
        Self { store, inputs }
    }

    pub async fn run(&self) -> Result<SessionReport> {
        tracing::info!("Loading reference data...");
        let reference = load_reference_data(&self.store).await;
        if reference.is_empty() {
            tracing::warn!("⚠️ Reference data is empty; results are ratio-only");
        } else {
            tracing::info!(
                "Loaded {} expense categories, {} neighborhoods",
                reference.expense_categories.len(),
                reference.neighborhoods.len()
            );
        }

        let income = self.inputs.monthly_income();
        let percentage = self.inputs.rent_percentage();
        let mode = self.inputs.household_mode();
        let room = self.inputs.room_category();
        let overrides = self.inputs.overrides();

        tracing::info!("Computing affordable rent...");
        let result = affordability::evaluate(
            &reference.expense_categories,
            mode,
            overrides,
            income,
            percentage,
        );
        let breakdown = affordability::breakdown(
            &reference.expense_categories,
            mode,
            overrides,
            income,
            result.ceiling,
        );
        tracing::info!("Affordable rent ceiling: €{:.0}", result.ceiling);

        tracing::info!("Ranking neighborhoods...");
        let affordable = ranking::rank_affordable(&reference.neighborhoods, result.ceiling, room);
        let affordable_share =
            ranking::affordable_share(reference.neighborhoods.len(), affordable.len());
        let highlight = ranking::highlight_plan(&affordable, None);
        let data_as_of = ranking::latest_update(&reference.neighborhoods);
        tracing::info!(
            "{} of {} neighborhoods fit the budget",
            affordable.len(),
            reference.neighborhoods.len()
        );

        Ok(SessionReport {
            monthly_income: income,
            rent_percentage: percentage,
            household_mode: mode,
            room_category: room,
            result,
            breakdown,
            affordable,
            affordable_share,
            highlight,
            data_as_of,
        })
    }
}
