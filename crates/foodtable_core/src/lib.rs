//! Core of the food table: a concurrent in-memory table plus the use-case
//! services that validate input and build paginated views on top of it.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{demo_seed, AppConfig, ConfigError};
pub use logging::{init_logging, logging_status, LogLevel};
pub use model::food::{FoodData, FoodForm, FoodValidationError};
pub use model::record::{Named, Record, RecordId};
pub use repo::record_store::{InMemoryRecordStore, RecordRepository, Table};
pub use service::food_service::{FoodPage, FoodService, FoodServiceError};
pub use service::paging::{clamp_view_index, view_count, ViewPage};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
