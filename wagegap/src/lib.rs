//! # wagegap - GSS Gender Wage Gap Dashboard
//!
//! wagegap loads the 2018 General Social Survey extract once, cleans it into a
//! typed in-memory table, and serves a single-page dashboard: five precomputed
//! charts plus one grouped bar chart driven by two dropdowns.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  gss2018.csv (HTTP or local file)               │
//! └───────────────────────┬─────────────────────────────────────────┘
//!                         │ bytes (windows-1252)
//!                         ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Startup (once)                           │
//! │                                                                 │
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐        │
//! │  │    Ingest    │──▶│   Cleaning   │──▶│ CleanedTable │        │
//! │  │(fetch/decode)│   │(whitelist,   │   │  (domain)    │        │
//! │  └──────────────┘   │ rename, NA)  │   └──────┬───────┘        │
//! │                     └──────────────┘          │                 │
//! │                                               ▼                 │
//! │                     ┌──────────────┐   ┌──────────────┐        │
//! │                     │   Analysis   │──▶│   Figures    │        │
//! │                     │(means, bands,│   │ (static set) │        │
//! │                     │ box stats)   │   └──────────────┘        │
//! │                     └──────────────┘                            │
//! └───────────────────────┬─────────────────────────────────────────┘
//!                         │ Arc<AppState>
//!                         ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Server (per request)                        │
//! │  GET /                    page with Plotly.js                   │
//! │  GET /api/figures/{name}  precomputed figure JSON               │
//! │  GET /api/interactive     count_pairs ──▶ grouped bar chart     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - [`ingest`]: fetch the dataset over HTTP or from disk and decode it
//! - [`cleaning`]: column whitelist, renames, missing tokens, age sentinel
//! - [`domain`]: field enumerations, the cleaned table, error types
//! - [`analysis`]: group means, co-occurrence counts, prestige bands, box statistics
//! - [`figures`]: Plotly figure JSON for the static set and the interactive chart
//! - [`server`]: axum router and the dashboard page
//! - [`cli`] / [`config`]: command-line flags and the runtime configuration
//! - [`theme`]: dark background and text colors shared by page and figures
//!
//! ## Typical Usage
//!
//! ```bash
//! # Fetch the GSS extract and serve on http://127.0.0.1:8050
//! wagegap
//!
//! # Serve a local copy, counting unanswered questions as "missing"
//! wagegap --data-url gss2018.csv --missing-as-category
//! ```

// Expose modules for testing
pub mod analysis;
pub mod cleaning;
pub mod cli;
pub mod config;
pub mod domain;
pub mod figures;
pub mod ingest;
pub mod server;
pub mod theme;
