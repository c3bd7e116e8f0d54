//! Survey cleaning pass.
//!
//! Turns the decoded CSV text into a [`CleanedTable`]:
//!
//! ```text
//! CSV text ──► header check ──► per row: missing tokens → None
//!                                        age sentinel  → "89"
//!                                        numeric cols  → f64
//!                                        rename        → Respondent
//! ```
//!
//! The pass is all-or-nothing: the first schema or coercion problem aborts it.

use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;
use std::collections::HashMap;

use crate::domain::{CleanedTable, CleaningError, Field, FieldKind, Respondent};

/// Survey-specific non-substantive responses plus the null spellings pandas
/// recognises by default.
///
/// Matched exactly against the raw cell, across every column.
pub const MISSING_TOKENS: &[&str] = &[
    "IAP",
    "IAP,DK,NA,uncodeable",
    "IAP, DK, NA, uncodeable",
    "NOT SURE",
    "DK",
    ".a",
    "CAN'T CHOOSE",
    "",
    "NA",
    "N/A",
    "n/a",
    "NaN",
    "nan",
    "null",
    "NULL",
    "-NaN",
    "-nan",
    "#N/A",
    "#N/A N/A",
    "#NA",
    "-1.#IND",
    "-1.#QNAN",
    "1.#IND",
    "1.#QNAN",
    "<NA>",
    "None",
];

/// Top-coded age as it appears in the extract.
pub const AGE_SENTINEL: &str = "89 or older";

/// Numeric floor substituted for [`AGE_SENTINEL`].
pub const AGE_CEILING: &str = "89";

/// Whether a raw cell is a missing-value marker.
#[must_use]
pub fn is_missing(value: &str) -> bool {
    MISSING_TOKENS.contains(&value)
}

/// Clean decoded CSV text.
///
/// # Errors
/// - [`CleaningError::SchemaMismatch`] when whitelisted columns are absent
/// - [`CleaningError::AgeCoercion`] / [`CleaningError::NumericCoercion`] for
///   non-numeric tokens in numeric columns
/// - [`CleaningError::Csv`] for malformed CSV
pub fn clean(text: &str) -> Result<CleanedTable, CleaningError> {
    let mut reader = ReaderBuilder::new().has_headers(true).trim(Trim::None).from_reader(text.as_bytes());

    let positions = column_positions(reader.headers()?)?;

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    while reader.read_record(&mut record)? {
        let line = record.position().map_or(0, csv::Position::line);
        rows.push(clean_record(&record, &positions, line)?);
    }

    debug!("Cleaned {} rows", rows.len());
    Ok(CleanedTable::new(rows))
}

/// Map each whitelisted field to its column index in the raw header.
fn column_positions(headers: &StringRecord) -> Result<HashMap<Field, usize>, CleaningError> {
    let mut by_name: HashMap<&str, usize> = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        // First occurrence wins for duplicated headers
        by_name.entry(name).or_insert(idx);
    }

    let mut positions = HashMap::with_capacity(Field::ALL.len());
    let mut missing = Vec::new();
    for field in Field::ALL {
        match by_name.get(field.source_name()) {
            Some(&idx) => {
                positions.insert(field, idx);
            }
            None => missing.push(field.source_name().to_string()),
        }
    }

    if missing.is_empty() {
        Ok(positions)
    } else {
        Err(CleaningError::SchemaMismatch(missing))
    }
}

fn clean_record(
    record: &StringRecord,
    positions: &HashMap<Field, usize>,
    line: u64,
) -> Result<Respondent, CleaningError> {
    let raw = |field: Field| -> Option<&str> {
        positions.get(&field).and_then(|&idx| record.get(idx)).filter(|v| !is_missing(v))
    };

    let text = |field: Field| -> Option<String> {
        debug_assert_eq!(field.kind(), FieldKind::Categorical);
        raw(field).map(str::to_string)
    };

    let number = |field: Field| -> Result<Option<f64>, CleaningError> {
        debug_assert_eq!(field.kind(), FieldKind::Numeric);
        let Some(value) = raw(field) else {
            return Ok(None);
        };
        if field == Field::Age {
            let value = if value == AGE_SENTINEL { AGE_CEILING } else { value };
            return parse_number(value)
                .map(Some)
                .ok_or_else(|| CleaningError::AgeCoercion { line, value: value.to_string() });
        }
        parse_number(value).map(Some).ok_or_else(|| CleaningError::NumericCoercion {
            column: field.source_name(),
            line,
            value: value.to_string(),
        })
    };

    Ok(Respondent {
        id: number(Field::Id)?,
        weight: number(Field::Weight)?,
        sex: text(Field::Sex),
        education: number(Field::Education)?,
        region: text(Field::Region),
        age: number(Field::Age)?,
        income: number(Field::Income)?,
        job_prestige: number(Field::JobPrestige)?,
        mother_job_prestige: number(Field::MotherJobPrestige)?,
        father_job_prestige: number(Field::FatherJobPrestige)?,
        socioeconomic_index: number(Field::SocioeconomicIndex)?,
        satjob: text(Field::Satjob),
        relationship: text(Field::Relationship),
        male_breadwinner: text(Field::MaleBreadwinner),
        men_bettersuited: text(Field::MenBettersuited),
        child_suffer: text(Field::ChildSuffer),
        men_overwork: text(Field::MenOverwork),
    })
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
