//! Domain model for wagegap
//!
//! This module contains the core domain types and errors:
//! - The cleaned survey table and its typed rows
//! - Closed enumerations for every column and for the two reactive selections
//! - Structured error handling for ingestion, cleaning and selection

pub mod errors;
pub mod fields;
pub mod types;

// Re-export common types for convenience
pub use fields::{Field, FieldKind, GroupField, MissingPolicy, Selection, XField};
pub use types::{CategoryKey, CleanedTable, Respondent};

pub use errors::{CleaningError, DashboardError, IngestError, SelectionError};
