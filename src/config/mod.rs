pub mod scenario;

use crate::domain::model::{ExpenseSet, HouseholdMode, RoomCategory};
use crate::domain::ports::InputProvider;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
use crate::utils::error::{BudgetError, Result as BudgetResult};
#[cfg(feature = "cli")]
use clap::Parser;

/// Defaults match the calculator's initial form state.
pub const DEFAULT_INCOME: f64 = 2500.0;
pub const DEFAULT_RENT_PERCENTAGE: f64 = 30.0;
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Fully resolved inputs for one calculator session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInputs {
    pub monthly_income: f64,
    pub rent_percentage: f64,
    pub household_mode: HouseholdMode,
    pub room_category: RoomCategory,
    pub overrides: ExpenseSet,
}

impl Default for SessionInputs {
    fn default() -> Self {
        Self {
            monthly_income: DEFAULT_INCOME,
            rent_percentage: DEFAULT_RENT_PERCENTAGE,
            household_mode: HouseholdMode::Single,
            room_category: RoomCategory::OneRoom,
            overrides: ExpenseSet::new(),
        }
    }
}

impl InputProvider for SessionInputs {
    fn monthly_income(&self) -> f64 {
        self.monthly_income
    }

    fn rent_percentage(&self) -> f64 {
        self.rent_percentage
    }

    fn household_mode(&self) -> HouseholdMode {
        self.household_mode
    }

    fn room_category(&self) -> RoomCategory {
        self.room_category
    }

    fn overrides(&self) -> &ExpenseSet {
        &self.overrides
    }
}

impl Validate for SessionInputs {
    fn validate(&self) -> crate::utils::error::Result<()> {
        validation::validate_amount("income", self.monthly_income)?;
        validation::validate_range("rent_percentage", self.rent_percentage, 0.0, 100.0)?;
        for (id, amount) in self.overrides.iter() {
            validation::validate_amount(&format!("expense.{}", id), amount)?;
        }
        Ok(())
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "kiez-budget")]
#[command(about = "Berlin rent affordability calculator")]
pub struct CliConfig {
    #[arg(long, help = "Net monthly household income in euros")]
    pub income: Option<f64>,

    #[arg(long, help = "Share of income to spend on rent, in percent")]
    pub rent_percentage: Option<f64>,

    #[arg(long, help = "Apartment size: 1, 2, 3 or 4+")]
    pub rooms: Option<RoomCategory>,

    #[arg(long, help = "Use family default amounts instead of single-household ones")]
    pub family: bool,

    #[arg(
        long = "expense",
        value_name = "ID=AMOUNT",
        help = "Override an expense category (repeatable)"
    )]
    pub expenses: Vec<String>,

    #[arg(long, help = "Directory holding expenses.json and neighborhoods.json")]
    pub data_dir: Option<String>,

    #[arg(long, help = "Load the datasets from an HTTP endpoint instead")]
    pub data_url: Option<String>,

    #[arg(long, help = "Directory for CSV/JSON exports")]
    pub output_dir: Option<String>,

    #[arg(long, help = "Load inputs from a TOML scenario file")]
    pub scenario: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn parse_overrides(&self) -> BudgetResult<ExpenseSet> {
        let mut set = ExpenseSet::new();
        for raw in &self.expenses {
            let (id, amount) =
                raw.split_once('=')
                    .ok_or_else(|| BudgetError::InvalidConfigValueError {
                        field: "expense".to_string(),
                        value: raw.clone(),
                        reason: "Expected ID=AMOUNT".to_string(),
                    })?;

            validation::validate_non_empty_string("expense", id)?;

            let amount: f64 =
                amount
                    .trim()
                    .parse()
                    .map_err(|_| BudgetError::InvalidConfigValueError {
                        field: "expense".to_string(),
                        value: raw.clone(),
                        reason: "Amount is not a number".to_string(),
                    })?;

            set.set(id.trim(), amount);
        }
        Ok(set)
    }

    /// CLI flags win over the scenario file; built-in defaults fill the rest.
    pub fn resolve(
        &self,
        scenario: Option<&scenario::ScenarioConfig>,
    ) -> BudgetResult<SessionInputs> {
        let base = match scenario {
            Some(scenario) => scenario.resolve()?,
            None => SessionInputs::default(),
        };

        let mut overrides = base.overrides;
        for (id, amount) in self.parse_overrides()?.iter() {
            overrides.set(id, amount);
        }

        let household_mode = if self.family {
            HouseholdMode::Family
        } else {
            base.household_mode
        };

        Ok(SessionInputs {
            monthly_income: self.income.unwrap_or(base.monthly_income),
            rent_percentage: self.rent_percentage.unwrap_or(base.rent_percentage),
            household_mode,
            room_category: self.rooms.unwrap_or(base.room_category),
            overrides,
        })
    }

    pub fn data_source_url(&self, scenario: Option<&scenario::ScenarioConfig>) -> Option<String> {
        self.data_url
            .clone()
            .or_else(|| scenario.and_then(|s| s.data_url().map(str::to_string)))
    }

    pub fn data_directory(&self, scenario: Option<&scenario::ScenarioConfig>) -> String {
        self.data_dir
            .clone()
            .or_else(|| scenario.and_then(|s| s.data_directory().map(str::to_string)))
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string())
    }

    pub fn export_directory(&self, scenario: Option<&scenario::ScenarioConfig>) -> Option<String> {
        self.output_dir
            .clone()
            .or_else(|| scenario.and_then(|s| s.output_directory().map(str::to_string)))
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        if let Some(url) = &self.data_url {
            validation::validate_url("data_url", url)?;
        }
        if let Some(dir) = &self.data_dir {
            validation::validate_path("data_dir", dir)?;
        }
        if let Some(dir) = &self.output_dir {
            validation::validate_path("output_dir", dir)?;
        }
        self.parse_overrides().map(|_| ())
    }
}
