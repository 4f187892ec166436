use crate::utils::error::BudgetError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// The four apartment-size buckets the rent dataset is keyed by.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum RoomCategory {
    OneRoom,
    TwoRoom,
    ThreeRoom,
    FourPlusRoom,
}

impl RoomCategory {
    pub const ALL: [RoomCategory; 4] = [
        RoomCategory::OneRoom,
        RoomCategory::TwoRoom,
        RoomCategory::ThreeRoom,
        RoomCategory::FourPlusRoom,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RoomCategory::OneRoom => "1 room",
            RoomCategory::TwoRoom => "2 rooms",
            RoomCategory::ThreeRoom => "3 rooms",
            RoomCategory::FourPlusRoom => "4+ rooms",
        }
    }
}

impl std::str::FromStr for RoomCategory {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "one-room" | "oneroom" => Ok(RoomCategory::OneRoom),
            "2" | "two-room" | "tworoom" => Ok(RoomCategory::TwoRoom),
            "3" | "three-room" | "threeroom" => Ok(RoomCategory::ThreeRoom),
            "4" | "4+" | "four-plus-room" | "fourplusroom" => Ok(RoomCategory::FourPlusRoom),
            other => Err(BudgetError::InvalidConfigValueError {
                field: "room_category".to_string(),
                value: other.to_string(),
                reason: "Expected one of: 1, 2, 3, 4+ (or one-room .. four-plus-room)"
                    .to_string(),
            }),
        }
    }
}

impl std::fmt::Display for RoomCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RoomCategory::OneRoom => "one-room",
            RoomCategory::TwoRoom => "two-room",
            RoomCategory::ThreeRoom => "three-room",
            RoomCategory::FourPlusRoom => "four-plus-room",
        };
        f.write_str(s)
    }
}

/// Selects which default amount an expense category contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HouseholdMode {
    Single,
    Family,
}

impl std::str::FromStr for HouseholdMode {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" => Ok(HouseholdMode::Single),
            "family" => Ok(HouseholdMode::Family),
            other => Err(BudgetError::InvalidConfigValueError {
                field: "household_mode".to_string(),
                value: other.to_string(),
                reason: "Expected 'single' or 'family'".to_string(),
            }),
        }
    }
}

impl std::fmt::Display for HouseholdMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HouseholdMode::Single => f.write_str("single"),
            HouseholdMode::Family => f.write_str("family"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportZone {
    A,
    B,
    C,
}

impl std::fmt::Display for TransportZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportZone::A => f.write_str("A"),
            TransportZone::B => f.write_str("B"),
            TransportZone::C => f.write_str("C"),
        }
    }
}

/// One line of the expense dataset. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCategory {
    pub id: String,
    pub name: String,
    /// Symbolic icon label consumed by display collaborators.
    #[serde(default)]
    pub icon: String,
    pub default_amount_single: f64,
    pub default_amount_family: f64,
    #[serde(default)]
    pub description: String,
    pub is_required: bool,
}

impl ExpenseCategory {
    pub fn default_amount(&self, mode: HouseholdMode) -> f64 {
        match mode {
            HouseholdMode::Single => self.default_amount_single,
            HouseholdMode::Family => self.default_amount_family,
        }
    }
}

/// User overrides keyed by expense-category id. Absent entries fall back to
/// the category default for the active household mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSet {
    overrides: HashMap<String, f64>,
}

impl ExpenseSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, id: impl Into<String>, amount: f64) {
        self.overrides.insert(id.into(), amount);
    }

    pub fn get(&self, id: &str) -> Option<f64> {
        self.overrides.get(id).copied()
    }

    pub fn effective_amount(&self, category: &ExpenseCategory, mode: HouseholdMode) -> f64 {
        self.get(&category.id)
            .unwrap_or_else(|| category.default_amount(mode))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.overrides.iter().map(|(id, amount)| (id.as_str(), *amount))
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

impl FromIterator<(String, f64)> for ExpenseSet {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            overrides: iter.into_iter().collect(),
        }
    }
}

/// One line of the neighborhood dataset. Immutable reference data.
///
/// Coordinates are not part of the wire format; they are attached at load
/// time from the built-in centroid table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Neighborhood {
    pub id: String,
    pub name: String,
    pub average_rent: BTreeMap<RoomCategory, f64>,
    pub average_utilities_per_sqm: f64,
    pub transport_zone: TransportZone,
    pub grocery_cost_factor: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub last_updated: Option<NaiveDate>,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lng: f64,
}

impl Neighborhood {
    pub fn rent_for(&self, room: RoomCategory) -> Option<f64> {
        self.average_rent.get(&room).copied()
    }
}

/// The session's owned, read-only snapshot of the static datasets.
///
/// Loaded once and passed into the computation core by reference; there is
/// no hidden module-level cache.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceData {
    pub expense_categories: Vec<ExpenseCategory>,
    pub neighborhoods: Vec<Neighborhood>,
}

impl ReferenceData {
    pub fn is_empty(&self) -> bool {
        self.expense_categories.is_empty() && self.neighborhoods.is_empty()
    }
}

/// How the computed ceiling relates to what the household hoped for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Advisory {
    /// The ratio rule holds (or nearly holds).
    OnTrack,
    /// The ceiling is positive but well below the ratio-based figure;
    /// required expenses are squeezing the budget.
    TighterThanRatio,
    /// Required expenses consume the whole income.
    IncomeTooLow,
}

/// Derived, ephemeral output of the affordability computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AffordabilityResult {
    /// Maximum sustainable rent, always >= 0.
    pub ceiling: f64,
    /// The percentage-of-income bound.
    pub by_ratio: f64,
    /// Income minus required expenses (may be negative before clamping).
    pub by_residual: f64,
    pub affordable: bool,
    pub advisory: Advisory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SliceKind {
    Rent,
    Required,
    Optional,
}

/// One labeled amount in the budget breakdown (chart-feed shape).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownSlice {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub kind: SliceKind,
}

/// Income vs. spending summary for the computed ceiling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetBreakdown {
    /// Rent plus every expense category, sorted by descending amount.
    pub slices: Vec<BreakdownSlice>,
    /// All expenses including rent.
    pub total_expenses: f64,
    /// Income minus total expenses (negative when insufficient).
    pub remaining: f64,
    /// Spending as a share of income, capped at 100.
    pub usage_percent: f64,
    pub sufficient: bool,
}

/// A neighborhood that fits the budget, with the rent that ranked it.
#[derive(Debug, Clone, Serialize)]
pub struct RankedNeighborhood {
    pub neighborhood: Neighborhood,
    /// Average rent for the selected room category; the sort key.
    pub rent: f64,
}

/// Display-layer marking derived from a ranking: which entries to call out
/// and which one starts selected. Not part of the ranking contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HighlightPlan {
    pub highlighted: Vec<String>,
    pub selected: Option<String>,
}

/// Everything a render collaborator needs from one calculator run.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub monthly_income: f64,
    pub rent_percentage: f64,
    pub household_mode: HouseholdMode,
    pub room_category: RoomCategory,
    pub result: AffordabilityResult,
    pub breakdown: BudgetBreakdown,
    pub affordable: Vec<RankedNeighborhood>,
    /// Rounded percentage of the dataset that fits the budget.
    pub affordable_share: u32,
    pub highlight: HighlightPlan,
    /// Most recent `last_updated` across the neighborhood dataset.
    pub data_as_of: Option<NaiveDate>,
}
