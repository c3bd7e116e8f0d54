//! Cleaned survey rows and category keys
//!
//! [`CleanedTable`] is built once by [`crate::cleaning`] and never mutated
//! afterwards; every chart reads it through a shared reference.

use std::cmp::Ordering;
use std::fmt;

use super::fields::{Field, FieldKind};

/// One survey respondent after cleaning. `None` marks a missing value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Respondent {
    pub id: Option<f64>,
    pub weight: Option<f64>,
    pub sex: Option<String>,
    pub education: Option<f64>,
    pub region: Option<String>,
    pub age: Option<f64>,
    pub income: Option<f64>,
    pub job_prestige: Option<f64>,
    pub mother_job_prestige: Option<f64>,
    pub father_job_prestige: Option<f64>,
    pub socioeconomic_index: Option<f64>,
    pub satjob: Option<String>,
    pub relationship: Option<String>,
    pub male_breadwinner: Option<String>,
    pub men_bettersuited: Option<String>,
    pub child_suffer: Option<String>,
    pub men_overwork: Option<String>,
}

impl Respondent {
    /// Value of a numeric column; `None` for categorical columns.
    #[must_use]
    pub fn number(&self, field: Field) -> Option<f64> {
        match field {
            Field::Id => self.id,
            Field::Weight => self.weight,
            Field::Education => self.education,
            Field::Age => self.age,
            Field::Income => self.income,
            Field::JobPrestige => self.job_prestige,
            Field::MotherJobPrestige => self.mother_job_prestige,
            Field::FatherJobPrestige => self.father_job_prestige,
            Field::SocioeconomicIndex => self.socioeconomic_index,
            _ => None,
        }
    }

    /// Value of a categorical column; `None` for numeric columns.
    #[must_use]
    pub fn text(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::Sex => &self.sex,
            Field::Region => &self.region,
            Field::Satjob => &self.satjob,
            Field::Relationship => &self.relationship,
            Field::MaleBreadwinner => &self.male_breadwinner,
            Field::MenBettersuited => &self.men_bettersuited,
            Field::ChildSuffer => &self.child_suffer,
            Field::MenOverwork => &self.men_overwork,
            _ => return None,
        };
        value.as_deref()
    }

    /// Any column viewed as a discrete category, for grouped counts.
    #[must_use]
    pub fn category(&self, field: Field) -> Option<CategoryKey> {
        match field.kind() {
            FieldKind::Numeric => self.number(field).map(CategoryKey::Number),
            FieldKind::Categorical => self.text(field).map(|s| CategoryKey::Text(s.to_string())),
        }
    }
}

/// A discrete value used as an x-axis category or a color group.
///
/// Ordering: numbers ascending, then text alphabetically, then `Missing`.
#[derive(Debug, Clone)]
pub enum CategoryKey {
    Number(f64),
    Text(String),
    Missing,
}

impl CategoryKey {
    fn rank(&self) -> u8 {
        match self {
            CategoryKey::Number(_) => 0,
            CategoryKey::Text(_) => 1,
            CategoryKey::Missing => 2,
        }
    }

    /// Display label, as used on chart axes and legends.
    #[must_use]
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for CategoryKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CategoryKey {}

impl PartialOrd for CategoryKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CategoryKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CategoryKey::Number(a), CategoryKey::Number(b)) => a.total_cmp(b),
            (CategoryKey::Text(a), CategoryKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Whole numbers (years of education) print without a fraction
            CategoryKey::Number(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{v:.0}"),
            CategoryKey::Number(v) => write!(f, "{v}"),
            CategoryKey::Text(s) => f.write_str(s),
            CategoryKey::Missing => f.write_str("missing"),
        }
    }
}

/// The cleaned survey table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CleanedTable {
    rows: Vec<Respondent>,
}

impl CleanedTable {
    #[must_use]
    pub fn new(rows: Vec<Respondent>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[Respondent] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Respondent> {
        self.rows.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<Respondent> for CleanedTable {
    fn from_iter<I: IntoIterator<Item = Respondent>>(iter: I) -> Self {
        Self { rows: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a CleanedTable {
    type Item = &'a Respondent;
    type IntoIter = std::slice::Iter<'a, Respondent>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
