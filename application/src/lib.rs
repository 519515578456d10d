//! Application layer for sales-dataverse
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    data_service::{DataServiceError, DataServicePort},
    tool_executor::ToolExecutorPort,
    tool_schema::ToolSchemaPort,
};
pub use use_cases::accounts::AccountsUseCase;
pub use use_cases::deal_summary::DealSummaryUseCase;
pub use use_cases::generate_manifest::{GenerateManifestInput, GenerateManifestUseCase};
pub use use_cases::opportunities::OpportunitiesUseCase;
pub use use_cases::orders::OrdersUseCase;
pub use use_cases::products::ProductsUseCase;
pub use use_cases::records::{RecordsUseCase, UseCaseError};
pub use use_cases::search::{DEFAULT_SEARCH_PATH, SearchUseCase};
pub use use_cases::users::UsersUseCase;
