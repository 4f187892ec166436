pub mod config;
pub mod core;
pub mod data;
pub mod domain;
pub mod report;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::SessionInputs;

pub use crate::core::engine::BudgetEngine;
pub use data::{HttpStore, LocalStore};
pub use utils::error::{BudgetError, Result};
