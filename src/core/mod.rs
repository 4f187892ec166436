pub mod affordability;
pub mod engine;
pub mod ranking;

pub use crate::domain::model::{
    AffordabilityResult, BudgetBreakdown, RankedNeighborhood, ReferenceData, SessionReport,
};
pub use crate::domain::ports::{DataStore, InputProvider};
pub use crate::utils::error::Result;
