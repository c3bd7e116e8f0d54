//! Mean job outcomes by sex.

use std::collections::BTreeMap;

use super::stats::{mean, round_to};
use crate::domain::{CleanedTable, Field};

/// Columns averaged by the summary table, with their display names.
pub const SUMMARY_COLUMNS: [(Field, &str); 4] = [
    (Field::Income, "income"),
    (Field::JobPrestige, "job_prestige"),
    (Field::SocioeconomicIndex, "socioeconomic_index"),
    (Field::Education, "years of education"),
];

/// One sex's row of the summary table.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub sex: String,
    /// Rounded means in [`SUMMARY_COLUMNS`] order; `None` when a group has no values.
    pub means: [Option<f64>; 4],
}

impl SummaryRow {
    #[must_use]
    pub fn mean_of(&self, field: Field) -> Option<f64> {
        SUMMARY_COLUMNS.iter().position(|(f, _)| *f == field).and_then(|idx| self.means[idx])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryTable {
    pub headers: Vec<String>,
    /// Sorted by sex.
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    #[must_use]
    pub fn row(&self, sex: &str) -> Option<&SummaryRow> {
        self.rows.iter().find(|r| r.sex == sex)
    }
}

/// Group by sex and average the summary columns, rounded to 2 decimals.
///
/// Rows with a missing sex are left out; missing values are skipped per column.
#[must_use]
pub fn summarize_by_sex(table: &CleanedTable) -> SummaryTable {
    let mut groups: BTreeMap<&str, [Vec<f64>; 4]> = BTreeMap::new();
    for respondent in table {
        let Some(sex) = respondent.sex.as_deref() else {
            continue;
        };
        let columns = groups.entry(sex).or_default();
        for (idx, (field, _)) in SUMMARY_COLUMNS.iter().enumerate() {
            if let Some(v) = respondent.number(*field) {
                columns[idx].push(v);
            }
        }
    }

    let rows = groups
        .into_iter()
        .map(|(sex, columns)| SummaryRow {
            sex: sex.to_string(),
            means: columns.map(|values| mean(values).map(|m| round_to(m, 2))),
        })
        .collect();

    let headers = std::iter::once("sex")
        .chain(SUMMARY_COLUMNS.iter().map(|(_, name)| *name))
        .map(title_case)
        .collect();

    SummaryTable { headers, rows }
}

/// `job_prestige` → `Job Prestige`: underscores become spaces, every word
/// starts upper case and continues lower case.
#[must_use]
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;
    for c in name.chars().map(|c| if c == '_' { ' ' } else { c }) {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
