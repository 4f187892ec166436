use crate::domain::model::{ExpenseSet, HouseholdMode, RoomCategory};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Where reference datasets come from and where exports go. Implementations
/// cover the local filesystem and hosted HTTP datasets.
#[async_trait]
pub trait DataStore: Send + Sync {
    async fn read(&self, path: &str) -> Result<Vec<u8>>;
    async fn write(&self, path: &str, data: &[u8]) -> Result<()>;
}

/// The user-entered side of a calculator session, already validated.
pub trait InputProvider: Send + Sync {
    fn monthly_income(&self) -> f64;
    fn rent_percentage(&self) -> f64;
    fn household_mode(&self) -> HouseholdMode;
    fn room_category(&self) -> RoomCategory;
    fn overrides(&self) -> &ExpenseSet;
}
