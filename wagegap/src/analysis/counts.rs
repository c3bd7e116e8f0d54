//! Co-occurrence counts for the reactive chart.
//!
//! This module counts how often each `(x value, group value)` pair occurs in
//! the cleaned table for the viewer's current [`Selection`].
//!
//! # Data Flow
//!
//! ```text
//! Selection ──► count_pairs(&CleanedTable) ──► CrossTab ──► grouped bar chart
//!                      │
//!                      └── MissingPolicy decides whether rows missing
//!                          either field are dropped or counted as "missing"
//! ```
//!
//! # Performance
//!
//! - `count_pairs()`: O(n log k) where k = distinct pairs (`BTreeMap` insert)
//! - Memory: O(k)

use std::collections::BTreeMap;

use crate::domain::{CategoryKey, CleanedTable, MissingPolicy, Selection};

// =============================================================================
// CROSS TABULATION
// =============================================================================

/// Counts for every pair present in the table, keyed group first so each
/// group maps straight onto one bar trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossTab {
    pub selection: Selection,
    groups: BTreeMap<CategoryKey, BTreeMap<CategoryKey, usize>>,
    total: usize,
}

impl CrossTab {
    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Count for one pair, zero when the pair never occurs.
    #[must_use]
    pub fn count(&self, x: &CategoryKey, group: &CategoryKey) -> usize {
        self.groups.get(group).and_then(|xs| xs.get(x)).copied().unwrap_or(0)
    }

    /// Distinct group values, sorted.
    pub fn groups(&self) -> impl Iterator<Item = &CategoryKey> {
        self.groups.keys()
    }

    /// Distinct x values across all groups, sorted.
    #[must_use]
    pub fn x_categories(&self) -> Vec<&CategoryKey> {
        let mut xs: Vec<&CategoryKey> = self.groups.values().flat_map(BTreeMap::keys).collect();
        xs.sort();
        xs.dedup();
        xs
    }

    /// `(x value, count)` pairs of one group, sorted by x.
    pub fn bars_for<'a>(&'a self, group: &CategoryKey) -> impl Iterator<Item = (&'a CategoryKey, usize)> + 'a {
        self.groups.get(group).into_iter().flat_map(|xs| xs.iter().map(|(x, &n)| (x, n)))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Count co-occurrences of the selected x field and grouping field.
///
/// With [`MissingPolicy::Drop`] rows missing either value are skipped; with
/// [`MissingPolicy::Category`] they are counted under [`CategoryKey::Missing`].
#[must_use]
pub fn count_pairs(table: &CleanedTable, selection: Selection, policy: MissingPolicy) -> CrossTab {
    let x_field = selection.x.field();
    let group_field = selection.group.field();

    let mut groups: BTreeMap<CategoryKey, BTreeMap<CategoryKey, usize>> = BTreeMap::new();
    let mut total = 0;

    for respondent in table {
        let (x, group) = match (respondent.category(x_field), respondent.category(group_field)) {
            (Some(x), Some(group)) => (x, group),
            (x, group) => match policy {
                MissingPolicy::Drop => continue,
                MissingPolicy::Category => (
                    x.unwrap_or(CategoryKey::Missing),
                    group.unwrap_or(CategoryKey::Missing),
                ),
            },
        };

        *groups.entry(group).or_default().entry(x).or_insert(0) += 1;
        total += 1;
    }

    CrossTab { selection, groups, total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GroupField, Respondent, XField};

    fn text(s: &str) -> CategoryKey {
        CategoryKey::Text(s.to_string())
    }

    fn respondent(satjob: Option<&str>, sex: Option<&str>) -> Respondent {
        Respondent {
            satjob: satjob.map(str::to_string),
            sex: sex.map(str::to_string),
            ..Respondent::default()
        }
    }

    fn create_test_data() -> CleanedTable {
        CleanedTable::new(vec![
            respondent(Some("very satisfied"), Some("male")),
            respondent(Some("very satisfied"), Some("male")),
            respondent(Some("a little dissatisfied"), Some("female")),
            respondent(None, Some("female")),
            respondent(Some("very satisfied"), None),
        ])
    }

    fn satjob_by_sex() -> Selection {
        Selection::new(XField::Satjob, GroupField::Sex)
    }

    #[test]
    fn test_count_pairs_aggregates_duplicates() {
        let table = CleanedTable::new(create_test_data().rows()[..3].to_vec());
        let tab = count_pairs(&table, satjob_by_sex(), MissingPolicy::Drop);

        assert_eq!(tab.count(&text("very satisfied"), &text("male")), 2);
        assert_eq!(tab.count(&text("a little dissatisfied"), &text("female")), 1);
        assert_eq!(tab.count(&text("very satisfied"), &text("female")), 0);
        assert_eq!(tab.total(), 3);
    }

    #[test]
    fn test_count_pairs_drops_missing() {
        let tab = count_pairs(&create_test_data(), satjob_by_sex(), MissingPolicy::Drop);
        assert_eq!(tab.total(), 3);
        assert!(tab.groups().all(|g| *g != CategoryKey::Missing));
    }

    #[test]
    fn test_count_pairs_missing_as_category() {
        let tab = count_pairs(&create_test_data(), satjob_by_sex(), MissingPolicy::Category);
        assert_eq!(tab.total(), 5);
        assert_eq!(tab.count(&CategoryKey::Missing, &text("female")), 1);
        assert_eq!(tab.count(&text("very satisfied"), &CategoryKey::Missing), 1);
    }

    #[test]
    fn test_bars_for_one_group() {
        let tab = count_pairs(&create_test_data(), satjob_by_sex(), MissingPolicy::Drop);
        let bars: Vec<(String, usize)> = tab.bars_for(&text("male")).map(|(x, n)| (x.label(), n)).collect();
        assert_eq!(bars, vec![("very satisfied".to_string(), 2)]);
        assert_eq!(tab.bars_for(&CategoryKey::Missing).count(), 0);
    }

    #[test]
    fn test_x_categories_are_shared_and_sorted() {
        let tab = count_pairs(&create_test_data(), satjob_by_sex(), MissingPolicy::Drop);
        let xs: Vec<String> = tab.x_categories().into_iter().map(CategoryKey::label).collect();
        assert_eq!(xs, vec!["a little dissatisfied", "very satisfied"]);
    }

    #[test]
    fn test_numeric_group_field() {
        let table = CleanedTable::new(vec![
            Respondent { satjob: Some("very satisfied".into()), education: Some(16.0), ..Respondent::default() },
            Respondent { satjob: Some("very satisfied".into()), education: Some(8.0), ..Respondent::default() },
        ]);
        let tab = count_pairs(&table, Selection::new(XField::Satjob, GroupField::Education), MissingPolicy::Drop);
        let groups: Vec<String> = tab.groups().map(CategoryKey::label).collect();
        assert_eq!(groups, vec!["8", "16"]);
    }

    #[test]
    fn test_empty_table() {
        let tab = count_pairs(&CleanedTable::default(), satjob_by_sex(), MissingPolicy::Drop);
        assert!(tab.is_empty());
        assert!(tab.x_categories().is_empty());
    }
}
