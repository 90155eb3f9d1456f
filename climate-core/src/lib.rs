//! # Climate Core Library
//!
//! Shared record types, date handling and the dataset store abstraction used by
//! the climate query service.
//!
//! ## Features
//!
//! - **Records**: `Measurement` and `Station` rows with a static schema
//! - **Dates**: strict ISO-8601 parsing, inclusive date ranges, recent-year anchor
//! - **Data store**: read-only `DatasetStore` trait with an in-memory snapshot
//!   implementation loaded from SQLite or CSV
//! - **Errors**: a single error taxonomy with categories for status mapping

pub mod datastore;
pub mod error;
pub mod query;
pub mod records;
pub mod schema;
pub mod time;

// Re-export commonly used types
pub use datastore::{DatasetStore, InMemoryStore};
pub use error::{ClimateError, ClimateResult};
pub use records::{Measurement, Station};
pub use time::{DateRange, RECENT_YEAR_DAYS};

/// Version information for the climate crates
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
