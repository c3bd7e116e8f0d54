//! Figure construction
//!
//! Turns analysis results into Plotly figure JSON. The static set is built
//! once at startup; the interactive chart is rebuilt on every dropdown change.

pub mod interactive;
pub mod model;
pub mod static_set;

pub use interactive::{render, render_interactive};
pub use model::{Figure, Layout, Trace};
pub use static_set::{StaticFigure, StaticFigures};
