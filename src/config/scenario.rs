use crate::config::SessionInputs;
use crate::domain::model::{ExpenseSet, HouseholdMode, RoomCategory};
use crate::utils::error::{BudgetError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// A saved calculator scenario loaded from a TOML file. Fields left out fall
/// back to the CLI values or the built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub scenario: ScenarioInfo,
    pub household: Option<HouseholdConfig>,
    /// Per-category expense overrides, keyed by category id.
    pub expenses: Option<HashMap<String, f64>>,
    pub data: Option<DataConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioInfo {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseholdConfig {
    pub income: Option<f64>,
    /// "single" or "family".
    pub mode: Option<String>,
    pub rent_percentage: Option<f64>,
    /// "1", "2", "3", "4+" or the long forms ("one-room", ...).
    pub rooms: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub directory: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub directory: Option<String>,
}

impl ScenarioConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BudgetError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| BudgetError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` placeholders from the environment; unresolved
    /// placeholders are left intact.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("scenario.name", &self.scenario.name)?;

        if let Some(household) = &self.household {
            if let Some(income) = household.income {
                validation::validate_amount("household.income", income)?;
            }
            if let Some(percentage) = household.rent_percentage {
                validation::validate_range("household.rent_percentage", percentage, 0.0, 100.0)?;
            }
            if let Some(mode) = &household.mode {
                mode.parse::<HouseholdMode>()?;
            }
            if let Some(rooms) = &household.rooms {
                rooms.parse::<RoomCategory>()?;
            }
        }

        if let Some(expenses) = &self.expenses {
            for (id, amount) in expenses {
                validation::validate_amount(&format!("expenses.{}", id), *amount)?;
            }
        }

        if let Some(data) = &self.data {
            if let Some(url) = &data.url {
                validation::validate_url("data.url", url)?;
            }
            if let Some(directory) = &data.directory {
                validation::validate_path("data.directory", directory)?;
            }
        }

        if let Some(output) = &self.output {
            if let Some(directory) = &output.directory {
                validation::validate_path("output.directory", directory)?;
            }
        }

        Ok(())
    }

    pub fn data_directory(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.directory.as_deref())
    }

    pub fn data_url(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.url.as_deref())
    }

    pub fn output_directory(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.directory.as_deref())
    }

    /// Session inputs from the scenario alone, defaults filling the gaps.
    pub fn resolve(&self) -> Result<SessionInputs> {
        let defaults = SessionInputs::default();
        let household = self.household.as_ref();

        let household_mode = match household.and_then(|h| h.mode.as_deref()) {
            Some(mode) => mode.parse()?,
            None => defaults.household_mode,
        };
        let room_category = match household.and_then(|h| h.rooms.as_deref()) {
            Some(rooms) => rooms.parse()?,
            None => defaults.room_category,
        };

        let overrides: ExpenseSet = self
            .expenses
            .clone()
            .unwrap_or_default()
            .into_iter()
            .collect();

        Ok(SessionInputs {
            monthly_income: household
                .and_then(|h| h.income)
                .unwrap_or(defaults.monthly_income),
            rent_percentage: household
                .and_then(|h| h.rent_percentage)
                .unwrap_or(defaults.rent_percentage),
            household_mode,
            room_category,
            overrides,
        })
    }
}

impl Validate for ScenarioConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
