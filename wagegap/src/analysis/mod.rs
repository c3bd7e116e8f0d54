//! Analysis logic for the cleaned survey table
//!
//! This module contains pure computations over [`crate::domain::CleanedTable`],
//! separated from figure construction and the HTTP layer.

pub mod bands;
pub mod counts;
pub mod stats;
pub mod summary;

pub use bands::{band_income_by_prestige, BandedIncome, PrestigeBands, BAND_LABELS};
pub use counts::{count_pairs, CrossTab};
pub use stats::{BoxStats, LinearFit};
pub use summary::{summarize_by_sex, SummaryRow, SummaryTable};
