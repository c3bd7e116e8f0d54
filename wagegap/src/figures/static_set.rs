//! The five figures computed once at startup.
//!
//! None of these take runtime parameters; [`StaticFigures::build`] runs right
//! after cleaning and the results are served as-is for the process lifetime.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::model::{
    axis_ref, Axis, BoxTrace, Figure, Grid, Layout, Legend, LineStyle, Marker, OutlierTrace, ScatterTrace,
    TableCells, TableHeader, TableTrace, Title, Trace,
};
use crate::analysis::{band_income_by_prestige, summarize_by_sex, BoxStats, LinearFit, BAND_LABELS};
use crate::domain::{CleanedTable, Field, Respondent};
use crate::theme;

const PRESTIGE_LABEL: &str = "Occupational Prestige";
const INCOME_LABEL: &str = "Annual Income";

/// Facet panels per row in the income-by-prestige figure.
const FACET_COLUMNS: usize = 2;

/// Names of the precomputed figures, as used in `/api/figures/{name}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StaticFigure {
    Summary,
    Scatter,
    PrestigeBox,
    IncomeBox,
    IncomeByPrestige,
}

impl StaticFigure {
    pub const ALL: [StaticFigure; 5] = [
        StaticFigure::Summary,
        StaticFigure::Scatter,
        StaticFigure::PrestigeBox,
        StaticFigure::IncomeBox,
        StaticFigure::IncomeByPrestige,
    ];

    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            StaticFigure::Summary => "summary",
            StaticFigure::Scatter => "scatter",
            StaticFigure::PrestigeBox => "prestige-box",
            StaticFigure::IncomeBox => "income-box",
            StaticFigure::IncomeByPrestige => "income-by-prestige",
        }
    }
}

impl fmt::Display for StaticFigure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for StaticFigure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StaticFigure::ALL.into_iter().find(|f| f.slug() == s).ok_or_else(|| format!("Unknown figure: {s}"))
    }
}

/// All static figures, computed once.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticFigures {
    pub summary: Figure,
    pub scatter: Figure,
    pub prestige_box: Figure,
    pub income_box: Figure,
    pub income_by_prestige: Figure,
}

impl StaticFigures {
    #[must_use]
    pub fn build(table: &CleanedTable) -> Self {
        Self {
            summary: summary_table(table),
            scatter: income_vs_prestige(table),
            prestige_box: distribution_by_sex(table, Field::JobPrestige, PRESTIGE_LABEL),
            income_box: distribution_by_sex(table, Field::Income, INCOME_LABEL),
            income_by_prestige: income_by_prestige_band(table),
        }
    }

    #[must_use]
    pub fn get(&self, which: StaticFigure) -> &Figure {
        match which {
            StaticFigure::Summary => &self.summary,
            StaticFigure::Scatter => &self.scatter,
            StaticFigure::PrestigeBox => &self.prestige_box,
            StaticFigure::IncomeBox => &self.income_box,
            StaticFigure::IncomeByPrestige => &self.income_by_prestige,
        }
    }
}

// =============================================================================
// SUMMARY TABLE
// =============================================================================

/// Mean income, prestige, socioeconomic index and education by sex.
#[must_use]
pub fn summary_table(table: &CleanedTable) -> Figure {
    let summary = summarize_by_sex(table);

    let mut columns: Vec<Vec<String>> = vec![summary.rows.iter().map(|r| r.sex.clone()).collect()];
    for idx in 0..4 {
        columns.push(
            summary
                .rows
                .iter()
                .map(|r| r.means[idx].map(|m| format!("{m:.2}")).unwrap_or_default())
                .collect(),
        );
    }

    let mut figure = Figure::new(Layout::default());
    figure.data.push(Trace::Table(TableTrace {
        header: TableHeader { values: summary.headers },
        cells: TableCells { values: columns },
    }));
    figure
}

// =============================================================================
// SCATTER WITH TRENDLINES
// =============================================================================

/// Respondents with sex, income and prestige, grouped by sex.
fn complete_by_sex<'a>(table: &'a CleanedTable) -> BTreeMap<&'a str, Vec<&'a Respondent>> {
    let mut groups: BTreeMap<&str, Vec<&Respondent>> = BTreeMap::new();
    for r in table {
        if let (Some(sex), Some(_), Some(_)) = (r.sex.as_deref(), r.income, r.job_prestige) {
            groups.entry(sex).or_default().push(r);
        }
    }
    groups
}

fn hover_detail(r: &Respondent) -> String {
    let show = |v: Option<f64>| v.map_or_else(|| "n/a".to_string(), |v| format!("{v}"));
    format!(
        "education: {}<br>socioeconomic_index: {}",
        show(r.education),
        show(r.socioeconomic_index)
    )
}

/// Income against job prestige, one marker trace and one OLS line per sex.
#[must_use]
pub fn income_vs_prestige(table: &CleanedTable) -> Figure {
    let mut layout = Layout { legend: Some(Legend { title: Title::new("Sex") }), ..Layout::default() };
    layout.set_axis('x', 1, Axis::titled(PRESTIGE_LABEL));
    layout.set_axis('y', 1, Axis::titled(INCOME_LABEL));
    theme::apply(&mut layout);
    let mut figure = Figure::new(layout);

    for (sex, rows) in complete_by_sex(table) {
        let points: Vec<(f64, f64)> =
            rows.iter().filter_map(|r| Some((r.job_prestige?, r.income?))).collect();

        figure.data.push(Trace::Scatter(ScatterTrace {
            name: sex.to_string(),
            x: points.iter().map(|p| p.0).collect(),
            y: points.iter().map(|p| p.1).collect(),
            mode: "markers",
            hovertext: Some(rows.iter().map(|r| hover_detail(r)).collect()),
            marker: None,
            line: None,
            legendgroup: Some(sex.to_string()),
            showlegend: None,
        }));

        let Some(fit) = LinearFit::fit(&points) else {
            continue;
        };
        let (lo, hi) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.0), hi.max(p.0)));
        let summary = format!(
            "OLS trendline<br>income = {:.2} * job_prestige + {:.2}<br>R<sup>2</sup>={:.6}",
            fit.slope, fit.intercept, fit.r_squared
        );
        figure.data.push(Trace::Scatter(ScatterTrace {
            name: format!("{sex} trend"),
            x: vec![lo, hi],
            y: vec![fit.predict(lo), fit.predict(hi)],
            mode: "lines",
            hovertext: Some(vec![summary.clone(), summary]),
            marker: None,
            line: Some(LineStyle { dash: "solid" }),
            legendgroup: Some(sex.to_string()),
            showlegend: Some(false),
        }));
    }

    figure
}

// =============================================================================
// BOX PLOTS
// =============================================================================

fn box_trace(name: &str, stats: &BoxStats) -> BoxTrace {
    BoxTrace {
        name: name.to_string(),
        orientation: "h",
        y: vec![name.to_string()],
        q1: vec![stats.q1],
        median: vec![stats.median],
        q3: vec![stats.q3],
        lowerfence: vec![stats.lower_fence],
        upperfence: vec![stats.upper_fence],
        mean: vec![stats.mean],
        hovertext: Some(format!("n={}", stats.n)),
        marker: None,
        legendgroup: None,
        showlegend: None,
        xaxis: None,
        yaxis: None,
    }
}

/// Markers for the points past the fences, on the same category row as the box.
fn outlier_trace(box_trace: &BoxTrace, stats: &BoxStats) -> Option<OutlierTrace> {
    if stats.outliers.is_empty() {
        return None;
    }
    Some(OutlierTrace {
        name: box_trace.name.clone(),
        x: stats.outliers.clone(),
        y: vec![box_trace.name.clone(); stats.outliers.len()],
        mode: "markers",
        marker: box_trace.marker.clone(),
        legendgroup: box_trace.legendgroup.clone(),
        showlegend: false,
        xaxis: box_trace.xaxis.clone(),
        yaxis: box_trace.yaxis.clone(),
    })
}

/// Push a box and, when it has any, its outlier markers.
fn push_box(figure: &mut Figure, trace: BoxTrace, stats: &BoxStats) {
    let outliers = outlier_trace(&trace, stats);
    figure.data.push(Trace::Box(trace));
    if let Some(outliers) = outliers {
        figure.data.push(Trace::Outliers(outliers));
    }
}

/// Horizontal box plot of one numeric field, one box per sex.
#[must_use]
pub fn distribution_by_sex(table: &CleanedTable, field: Field, label: &str) -> Figure {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for r in table {
        if let (Some(sex), Some(v)) = (r.sex.as_deref(), r.number(field)) {
            groups.entry(sex).or_default().push(v);
        }
    }

    let mut layout = Layout { showlegend: Some(false), ..Layout::default() };
    layout.set_axis('x', 1, Axis::titled(label));
    theme::apply(&mut layout);
    let mut figure = Figure::new(layout);

    for (sex, values) in groups {
        if let Some(stats) = BoxStats::from_values(values) {
            push_box(&mut figure, box_trace(sex, &stats), &stats);
        }
    }
    figure
}

// =============================================================================
// FACETED INCOME BY PRESTIGE BAND
// =============================================================================

/// Income by sex in six job-prestige bands, two panels per row.
#[must_use]
pub fn income_by_prestige_band(table: &CleanedTable) -> Figure {
    let rows = BAND_LABELS.len().div_ceil(FACET_COLUMNS);
    let mut layout = Layout {
        legend: Some(Legend { title: Title::new("Sex") }),
        grid: Some(Grid { rows, columns: FACET_COLUMNS, pattern: "independent", roworder: "top to bottom" }),
        ..Layout::default()
    };
    for (idx, label) in BAND_LABELS.iter().enumerate() {
        layout.set_axis('x', idx + 1, Axis::titled(INCOME_LABEL));
        layout.set_axis('y', idx + 1, Axis::titled(*label));
    }
    theme::apply(&mut layout);
    let mut figure = Figure::new(layout);

    let Some((bands, banded)) = band_income_by_prestige(table) else {
        return figure;
    };
    let intervals: Vec<_> = bands.intervals().collect();

    // band -> sex -> incomes
    let mut panels: BTreeMap<usize, BTreeMap<&str, Vec<f64>>> = BTreeMap::new();
    for obs in &banded {
        panels.entry(obs.band).or_default().entry(obs.sex.as_str()).or_default().push(obs.income);
    }

    let mut legend_shown = Vec::new();
    for (band, by_sex) in panels {
        for (sex, incomes) in by_sex {
            let Some(stats) = BoxStats::from_values(incomes) else {
                continue;
            };
            let first = !legend_shown.contains(&sex);
            if first {
                legend_shown.push(sex);
            }
            let mut trace = box_trace(sex, &stats);
            trace.marker = theme::sex_color(sex).map(|c| Marker { color: c.to_string() });
            trace.legendgroup = Some(sex.to_string());
            trace.showlegend = Some(first);
            trace.xaxis = Some(axis_ref('x', band + 1));
            trace.yaxis = Some(axis_ref('y', band + 1));
            if let Some((label, lo, hi)) = intervals.get(band) {
                trace.hovertext = Some(format!("{label}: job_prestige ({lo:.2}, {hi:.2}]<br>n={}", stats.n));
            }
            push_box(&mut figure, trace, &stats);
        }
    }
    figure
}

#[cfg(test)]
mod tests {
    use super::*;

    fn respondent(sex: &str, income: f64, prestige: f64) -> Respondent {
        Respondent {
            sex: Some(sex.to_string()),
            income: Some(income),
            job_prestige: Some(prestige),
            education: Some(12.0),
            ..Respondent::default()
        }
    }

    fn create_test_data() -> CleanedTable {
        CleanedTable::new(vec![
            respondent("male", 50000.0, 60.0),
            respondent("male", 30000.0, 40.0),
            respondent("female", 40000.0, 50.0),
            respondent("female", 20000.0, 20.0),
        ])
    }

    #[test]
    fn test_static_figure_slugs_round_trip() {
        for figure in StaticFigure::ALL {
            assert_eq!(figure.slug().parse::<StaticFigure>(), Ok(figure));
            assert_eq!(serde_json::to_value(figure).unwrap(), figure.slug());
        }
        assert!("nope".parse::<StaticFigure>().is_err());
    }

    #[test]
    fn test_summary_table_cells() {
        let figure = summary_table(&create_test_data());
        let Trace::Table(table) = &figure.data[0] else {
            panic!("expected a table trace");
        };
        assert_eq!(table.header.values[0], "Sex");
        assert_eq!(table.cells.values[0], vec!["female", "male"]);
        assert_eq!(table.cells.values[1], vec!["30000.00", "40000.00"]);
        assert_eq!(table.cells.values[4], vec!["12.00", "12.00"]);
    }

    #[test]
    fn test_scatter_has_points_and_trend_per_sex() {
        let figure = income_vs_prestige(&create_test_data());
        assert_eq!(figure.data.len(), 4);

        let Trace::Scatter(trend) = &figure.data[1] else {
            panic!("expected a scatter trace");
        };
        assert_eq!(trend.name, "female trend");
        assert_eq!(trend.mode, "lines");
        assert_eq!(trend.x, vec![20.0, 50.0]);
        // Two points fit exactly: income = 20000 / 30 * prestige + ...
        assert!((trend.y[0] - 20000.0).abs() < 1e-6);
        assert!((trend.y[1] - 40000.0).abs() < 1e-6);
    }

    #[test]
    fn test_scatter_hover_mentions_education() {
        let figure = income_vs_prestige(&create_test_data());
        let Trace::Scatter(points) = &figure.data[0] else {
            panic!("expected a scatter trace");
        };
        let hover = points.hovertext.as_ref().unwrap();
        assert_eq!(hover.len(), 2);
        assert!(hover[0].contains("education: 12"));
        assert!(hover[0].contains("socioeconomic_index: n/a"));
    }

    #[test]
    fn test_box_plots_one_box_per_sex() {
        let figure = distribution_by_sex(&create_test_data(), Field::Income, INCOME_LABEL);
        assert_eq!(figure.data.len(), 2);
        assert_eq!(figure.layout.showlegend, Some(false));
        let Trace::Box(male) = &figure.data[1] else {
            panic!("expected a box trace");
        };
        assert_eq!(male.name, "male");
        assert_eq!(male.median, vec![40000.0]);
        assert_eq!(male.orientation, "h");
    }

    #[test]
    fn test_box_plot_keeps_points_past_fences() {
        let table: CleanedTable = [1.0, 2.0, 3.0, 4.0, 5.0, 100.0]
            .into_iter()
            .map(|income| respondent("male", income, 50.0))
            .collect();
        let figure = distribution_by_sex(&table, Field::Income, INCOME_LABEL);
        assert_eq!(figure.data.len(), 2);

        let json = serde_json::to_value(&figure).unwrap();
        assert_eq!(json["data"][0]["upperfence"][0], 5.0);
        assert_eq!(json["data"][1]["type"], "scatter");
        assert_eq!(json["data"][1]["mode"], "markers");
        assert_eq!(json["data"][1]["x"], serde_json::json!([100.0]));
        assert_eq!(json["data"][1]["y"], serde_json::json!(["male"]));
    }

    #[test]
    fn test_facet_outliers_share_panel_axes() {
        let mut rows: Vec<Respondent> =
            [10.0, 11.0, 12.0, 13.0, 14.0, 90.0].into_iter().map(|i| respondent("female", i, 20.0)).collect();
        rows.push(respondent("male", 30.0, 60.0));
        let figure = income_by_prestige_band(&CleanedTable::new(rows));

        let outliers: Vec<&OutlierTrace> = figure
            .data
            .iter()
            .filter_map(|t| if let Trace::Outliers(o) = t { Some(o) } else { None })
            .collect();
        assert_eq!(outliers.len(), 1);
        assert_eq!(outliers[0].x, vec![90.0]);
        assert_eq!(outliers[0].xaxis.as_deref(), Some("x"));
        assert_eq!(outliers[0].marker, Some(Marker { color: "purple".to_string() }));
        assert!(!outliers[0].showlegend);
    }

    #[test]
    fn test_facets_use_band_axes_and_colors() {
        let figure = income_by_prestige_band(&create_test_data());
        assert_eq!(figure.layout.grid.as_ref().map(|g| (g.rows, g.columns)), Some((3, 2)));
        assert_eq!(figure.layout.axes["yaxis"].title, Some(Title::new("lowest")));
        assert_eq!(figure.layout.axes["yaxis6"].title, Some(Title::new("highest")));

        let boxes: Vec<&BoxTrace> = figure
            .data
            .iter()
            .filter_map(|t| if let Trace::Box(b) = t { Some(b) } else { None })
            .collect();
        assert_eq!(boxes.len(), 4);

        // Prestige 20 is the minimum: lowest band, first panel
        let lowest = boxes.iter().find(|b| b.median == vec![20000.0]).unwrap();
        assert_eq!(lowest.xaxis.as_deref(), Some("x"));
        assert!(lowest.hovertext.as_deref().unwrap().starts_with("lowest: job_prestige ("));
        assert_eq!(lowest.marker, Some(Marker { color: "purple".to_string() }));

        // Prestige 60 is the maximum: highest band, sixth panel
        let highest = boxes.iter().find(|b| b.median == vec![50000.0]).unwrap();
        assert_eq!(highest.yaxis.as_deref(), Some("y6"));
        assert_eq!(highest.marker, Some(Marker { color: "green".to_string() }));

        let legend_entries = boxes.iter().filter(|b| b.showlegend == Some(true)).count();
        assert_eq!(legend_entries, 2);
    }

    #[test]
    fn test_empty_table_builds_empty_figures() {
        let figures = StaticFigures::build(&CleanedTable::default());
        assert!(figures.scatter.data.is_empty());
        assert!(figures.income_by_prestige.data.is_empty());
        assert_eq!(figures.get(StaticFigure::Summary).data.len(), 1);
    }
}
