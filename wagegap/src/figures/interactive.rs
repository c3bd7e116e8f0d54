//! Grouped bar chart for the two dropdowns.

use super::model::{Axis, BarTrace, Figure, Layout, Legend, Title, Trace};
use crate::analysis::count_pairs;
use crate::domain::{CategoryKey, CleanedTable, MissingPolicy, Selection, SelectionError};
use crate::theme;

/// Render the chart for raw dropdown values.
///
/// # Errors
/// Returns [`SelectionError`] when either value is not an allowed field name.
pub fn render(
    table: &CleanedTable,
    x: Option<&str>,
    group: Option<&str>,
    policy: MissingPolicy,
) -> Result<Figure, SelectionError> {
    let selection = Selection::parse(x, group)?;
    Ok(render_interactive(table, selection, policy))
}

/// One bar trace per group value; each bar is the number of respondents
/// sharing that `(x value, group value)` pair.
#[must_use]
pub fn render_interactive(table: &CleanedTable, selection: Selection, policy: MissingPolicy) -> Figure {
    let tab = count_pairs(table, selection, policy);
    let categories: Vec<String> = tab.x_categories().into_iter().map(CategoryKey::label).collect();

    let mut layout = Layout {
        barmode: Some("group"),
        legend: Some(Legend { title: Title::new(selection.group.name()) }),
        ..Layout::default()
    };
    layout.set_axis(
        'x',
        1,
        Axis { categoryorder: Some("array"), categoryarray: Some(categories), ..Axis::titled(selection.x.name()) },
    );
    layout.set_axis('y', 1, Axis::titled("Count"));
    theme::apply(&mut layout);

    let mut figure = Figure::new(layout);
    for group in tab.groups() {
        let (x, y): (Vec<String>, Vec<usize>) = tab.bars_for(group).map(|(x, n)| (x.label(), n)).unzip();
        figure.data.push(Trace::Bar(BarTrace { name: group.label(), x, y, marker: None }));
    }

    log::debug!(
        "Rendered {} by {}: {} groups, {} respondents",
        selection.x.name(),
        selection.group.name(),
        figure.data.len(),
        tab.total()
    );
    figure
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GroupField, Respondent, XField};

    fn respondent(breadwinner: Option<&str>, sex: Option<&str>) -> Respondent {
        Respondent {
            male_breadwinner: breadwinner.map(str::to_string),
            sex: sex.map(str::to_string),
            ..Respondent::default()
        }
    }

    fn bars(figure: &Figure) -> Vec<&BarTrace> {
        figure.data.iter().filter_map(|t| if let Trace::Bar(b) = t { Some(b) } else { None }).collect()
    }

    #[test]
    fn test_shared_pair_gives_taller_bar() {
        let table = CleanedTable::new(vec![
            respondent(Some("agree"), Some("male")),
            respondent(Some("agree"), Some("male")),
            respondent(Some("disagree"), Some("female")),
        ]);
        let figure = render_interactive(&table, Selection::default(), MissingPolicy::Drop);
        let bars = bars(&figure);

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].name, "female");
        assert_eq!((bars[0].x.clone(), bars[0].y.clone()), (vec!["disagree".to_string()], vec![1]));
        assert_eq!(bars[1].name, "male");
        assert_eq!((bars[1].x.clone(), bars[1].y.clone()), (vec!["agree".to_string()], vec![2]));
    }

    #[test]
    fn test_layout_labels_follow_selection() {
        let table = CleanedTable::new(vec![respondent(Some("agree"), Some("male"))]);
        let figure = render_interactive(&table, Selection::default(), MissingPolicy::Drop);
        let layout = &figure.layout;

        assert_eq!(layout.barmode, Some("group"));
        assert_eq!(layout.legend.as_ref().map(|l| l.title.text.as_str()), Some("sex"));
        assert_eq!(layout.axes["xaxis"].title, Some(Title::new("male_breadwinner")));
        assert_eq!(layout.axes["xaxis"].categoryarray, Some(vec!["agree".to_string()]));
        assert_eq!(layout.axes["yaxis"].title, Some(Title::new("Count")));
        assert_eq!(layout.plot_bgcolor.as_deref(), Some(theme::BACKGROUND));
    }

    #[test]
    fn test_bar_total_matches_complete_rows() {
        let table = CleanedTable::new(vec![
            respondent(Some("agree"), Some("male")),
            respondent(None, Some("male")),
            respondent(Some("agree"), None),
            respondent(Some("strongly agree"), Some("female")),
        ]);
        let dropped = render_interactive(&table, Selection::default(), MissingPolicy::Drop);
        assert_eq!(dropped.bar_total(), 2);

        let kept = render_interactive(&table, Selection::default(), MissingPolicy::Category);
        assert_eq!(kept.bar_total(), 4);
        assert!(bars(&kept).iter().any(|b| b.name == "missing"));
    }

    #[test]
    fn test_render_parses_dropdown_values() {
        let table = CleanedTable::new(vec![Respondent {
            satjob: Some("very satisfied".into()),
            region: Some("pacific".into()),
            ..Respondent::default()
        }]);
        let figure = render(&table, Some("satjob"), Some("region"), MissingPolicy::Drop).unwrap();
        assert_eq!(figure.bar_total(), 1);
        assert_eq!(bars(&figure)[0].name, "pacific");

        let defaulted = render(&table, None, None, MissingPolicy::Drop).unwrap();
        assert_eq!(defaulted.layout.axes["xaxis"].title, Some(Title::new(XField::default().name())));
        assert_eq!(GroupField::default(), GroupField::Sex);
    }

    #[test]
    fn test_render_rejects_unknown_field() {
        let err = render(&CleanedTable::default(), Some("income"), Some("sex"), MissingPolicy::Drop).unwrap_err();
        assert!(matches!(err, SelectionError::InvalidField { role: "x-axis", .. }));
    }
}
