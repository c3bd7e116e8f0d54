//! Dashboard color theme
//!
//! Dark background with cyan text, shared by the page and every themed figure.

use crate::figures::model::{Font, Layout};

pub const BACKGROUND: &str = "#111111";
pub const TEXT: &str = "#7FDBFF";

// Facet colors for the income-by-prestige panels
pub const MALE: &str = "green";
pub const FEMALE: &str = "purple";

/// Fixed color for a sex value, if it has one.
#[must_use]
pub fn sex_color(sex: &str) -> Option<&'static str> {
    match sex {
        "male" => Some(MALE),
        "female" => Some(FEMALE),
        _ => None,
    }
}

/// Apply the dark theme to a figure layout.
pub fn apply(layout: &mut Layout) {
    layout.plot_bgcolor = Some(BACKGROUND.to_string());
    layout.paper_bgcolor = Some(BACKGROUND.to_string());
    layout.font = Some(Font { color: TEXT.to_string() });
}
