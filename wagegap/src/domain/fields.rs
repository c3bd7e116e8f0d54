//! Column and selection enumerations
//!
//! Every column the dashboard keeps is a [`Field`]. The reactive chart is
//! driven by a [`Selection`] of one [`XField`] and one [`GroupField`]; both are
//! closed enums, so parsing the raw dropdown strings is the only place an
//! invalid value can appear.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::errors::SelectionError;

/// How a column is parsed during cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Numeric,
    Categorical,
}

/// A column of the cleaned table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Id,
    Weight,
    Sex,
    Education,
    Region,
    Age,
    Income,
    JobPrestige,
    MotherJobPrestige,
    FatherJobPrestige,
    SocioeconomicIndex,
    Satjob,
    Relationship,
    MaleBreadwinner,
    MenBettersuited,
    ChildSuffer,
    MenOverwork,
}

impl Field {
    /// Whitelisted columns in output order.
    pub const ALL: [Field; 17] = [
        Field::Id,
        Field::Weight,
        Field::Sex,
        Field::Education,
        Field::Region,
        Field::Age,
        Field::Income,
        Field::JobPrestige,
        Field::MotherJobPrestige,
        Field::FatherJobPrestige,
        Field::SocioeconomicIndex,
        Field::Satjob,
        Field::Relationship,
        Field::MaleBreadwinner,
        Field::MenBettersuited,
        Field::ChildSuffer,
        Field::MenOverwork,
    ];

    /// Column name in the raw survey extract.
    #[must_use]
    pub fn source_name(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Weight => "wtss",
            Field::Sex => "sex",
            Field::Education => "educ",
            Field::Region => "region",
            Field::Age => "age",
            Field::Income => "coninc",
            Field::JobPrestige => "prestg10",
            Field::MotherJobPrestige => "mapres10",
            Field::FatherJobPrestige => "papres10",
            Field::SocioeconomicIndex => "sei10",
            Field::Satjob => "satjob",
            Field::Relationship => "fechld",
            Field::MaleBreadwinner => "fefam",
            Field::MenBettersuited => "fepol",
            Field::ChildSuffer => "fepresch",
            Field::MenOverwork => "meovrwrk",
        }
    }

    /// Human-readable column name after cleaning.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Weight => "weight",
            Field::Sex => "sex",
            Field::Education => "education",
            Field::Region => "region",
            Field::Age => "age",
            Field::Income => "income",
            Field::JobPrestige => "job_prestige",
            Field::MotherJobPrestige => "mother_job_prestige",
            Field::FatherJobPrestige => "father_job_prestige",
            Field::SocioeconomicIndex => "socioeconomic_index",
            Field::Satjob => "satjob",
            Field::Relationship => "relationship",
            Field::MaleBreadwinner => "male_breadwinner",
            Field::MenBettersuited => "men_bettersuited",
            Field::ChildSuffer => "child_suffer",
            Field::MenOverwork => "men_overwork",
        }
    }

    #[must_use]
    pub fn kind(self) -> FieldKind {
        match self {
            Field::Sex
            | Field::Region
            | Field::Satjob
            | Field::Relationship
            | Field::MaleBreadwinner
            | Field::MenBettersuited
            | Field::ChildSuffer
            | Field::MenOverwork => FieldKind::Categorical,
            _ => FieldKind::Numeric,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Attitude questions offered on the x-axis of the reactive chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum XField {
    Satjob,
    Relationship,
    #[default]
    MaleBreadwinner,
    MenBettersuited,
    ChildSuffer,
    MenOverwork,
}

impl XField {
    pub const ALL: [XField; 6] = [
        XField::Satjob,
        XField::Relationship,
        XField::MaleBreadwinner,
        XField::MenBettersuited,
        XField::ChildSuffer,
        XField::MenOverwork,
    ];

    #[must_use]
    pub fn field(self) -> Field {
        match self {
            XField::Satjob => Field::Satjob,
            XField::Relationship => Field::Relationship,
            XField::MaleBreadwinner => Field::MaleBreadwinner,
            XField::MenBettersuited => Field::MenBettersuited,
            XField::ChildSuffer => Field::ChildSuffer,
            XField::MenOverwork => Field::MenOverwork,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        self.field().name()
    }
}

impl FromStr for XField {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        XField::ALL.into_iter().find(|x| x.name() == s).ok_or_else(|| {
            SelectionError::InvalidField {
                role: "x-axis",
                value: s.to_string(),
                allowed: allowed_names(XField::ALL.map(XField::name)),
            }
        })
    }
}

/// Demographic fields the reactive chart can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupField {
    #[default]
    Sex,
    Region,
    Education,
}

impl GroupField {
    pub const ALL: [GroupField; 3] = [GroupField::Sex, GroupField::Region, GroupField::Education];

    #[must_use]
    pub fn field(self) -> Field {
        match self {
            GroupField::Sex => Field::Sex,
            GroupField::Region => Field::Region,
            GroupField::Education => Field::Education,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        self.field().name()
    }
}

impl FromStr for GroupField {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GroupField::ALL.into_iter().find(|g| g.name() == s).ok_or_else(|| {
            SelectionError::InvalidField {
                role: "grouping",
                value: s.to_string(),
                allowed: allowed_names(GroupField::ALL.map(GroupField::name)),
            }
        })
    }
}

fn allowed_names<const N: usize>(names: [&str; N]) -> String {
    names.join(", ")
}

/// The viewer's current dropdown choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Selection {
    pub x: XField,
    pub group: GroupField,
}

impl Selection {
    #[must_use]
    pub fn new(x: XField, group: GroupField) -> Self {
        Self { x, group }
    }

    /// Parse raw dropdown values. Absent values fall back to the defaults.
    ///
    /// # Errors
    /// Returns [`SelectionError::InvalidField`] for a value outside either enumeration.
    pub fn parse(x: Option<&str>, group: Option<&str>) -> Result<Self, SelectionError> {
        let x = x.map(str::parse).transpose()?.unwrap_or_default();
        let group = group.map(str::parse).transpose()?.unwrap_or_default();
        Ok(Self { x, group })
    }
}

/// What the grouped count does with rows missing either selected field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingPolicy {
    /// Exclude the row from every count.
    #[default]
    Drop,
    /// Count the row under an explicit `missing` category.
    Category,
}
