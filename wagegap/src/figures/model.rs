//! Chart descriptions in Plotly figure JSON.
//!
//! Only the subset of the Plotly schema the dashboard draws is modelled:
//! `{"data": [trace, ...], "layout": {...}}` where each trace carries its
//! `type` tag. The browser hands the JSON straight to `Plotly.react`.

use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

/// A complete chart: traces plus layout.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    #[must_use]
    pub fn new(layout: Layout) -> Self {
        Self { data: Vec::new(), layout }
    }

    /// Write the figure as JSON to any writer (response body, file, buffer).
    ///
    /// # Errors
    /// Serialization or I/O failure from `serde_json`.
    pub fn write_json<W: Write>(&self, writer: W, pretty: bool) -> serde_json::Result<()> {
        if pretty {
            serde_json::to_writer_pretty(writer, self)
        } else {
            serde_json::to_writer(writer, self)
        }
    }

    /// Sum of every bar height in the figure.
    #[must_use]
    pub fn bar_total(&self) -> usize {
        self.data
            .iter()
            .filter_map(|trace| match trace {
                Trace::Bar(bar) => Some(bar.y.iter().sum::<usize>()),
                _ => None,
            })
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Bar(BarTrace),
    Scatter(ScatterTrace),
    Box(BoxTrace),
    #[serde(rename = "scatter")]
    Outliers(OutlierTrace),
    Table(TableTrace),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarTrace {
    pub name: String,
    pub x: Vec<String>,
    pub y: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterTrace {
    pub name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// `"markers"` or `"lines"`
    pub mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertext: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legendgroup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
}

/// A box drawn from precomputed statistics, one box per trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxTrace {
    pub name: String,
    pub orientation: &'static str,
    /// Category position of the box on the vertical axis.
    pub y: Vec<String>,
    pub q1: Vec<f64>,
    pub median: Vec<f64>,
    pub q3: Vec<f64>,
    pub lowerfence: Vec<f64>,
    pub upperfence: Vec<f64>,
    pub mean: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertext: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legendgroup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<String>,
}

/// Points beyond the fences of one [`BoxTrace`], drawn on the same category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierTrace {
    pub name: String,
    pub x: Vec<f64>,
    pub y: Vec<String>,
    pub mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legendgroup: Option<String>,
    pub showlegend: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableTrace {
    pub header: TableHeader,
    pub cells: TableCells,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableHeader {
    pub values: Vec<String>,
}

/// Cell values, column-major.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableCells {
    pub values: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub dash: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoryorder: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoryarray: Option<Vec<String>>,
}

impl Axis {
    pub fn titled(text: impl Into<String>) -> Self {
        Self { title: Some(Title::new(text)), ..Self::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: Title,
}

/// Subplot grid for faceted figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    pub rows: usize,
    pub columns: usize,
    pub pattern: &'static str,
    pub roworder: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    /// Keyed by Plotly axis name: `xaxis`, `yaxis`, `xaxis2`, ...
    #[serde(flatten)]
    pub axes: BTreeMap<String, Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barmode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<Grid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

impl Layout {
    /// Set an axis by its subplot index (1 → `xaxis`, 2 → `xaxis2`, ...).
    pub fn set_axis(&mut self, letter: char, index: usize, axis: Axis) {
        self.axes.insert(axis_key(letter, index), axis);
    }
}

/// Layout key of a subplot axis: `xaxis`, `yaxis3`, ...
#[must_use]
pub fn axis_key(letter: char, index: usize) -> String {
    if index <= 1 {
        format!("{letter}axis")
    } else {
        format!("{letter}axis{index}")
    }
}

/// Trace reference to a subplot axis: `x`, `y3`, ...
#[must_use]
pub fn axis_ref(letter: char, index: usize) -> String {
    if index <= 1 {
        letter.to_string()
    } else {
        format!("{letter}{index}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_type_tag() {
        let trace = Trace::Bar(BarTrace { name: "male".into(), x: vec!["agree".into()], y: vec![2], marker: None });
        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["type"], "bar");
        assert_eq!(json["y"][0], 2);
        assert!(json.get("marker").is_none());
    }

    #[test]
    fn test_outlier_trace_is_scatter() {
        let trace = Trace::Outliers(OutlierTrace {
            name: "male".into(),
            x: vec![250_000.0],
            y: vec!["male".into()],
            mode: "markers",
            marker: None,
            legendgroup: None,
            showlegend: false,
            xaxis: Some("x2".into()),
            yaxis: None,
        });
        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["type"], "scatter");
        assert_eq!(json["x"][0], 250_000.0);
        assert_eq!(json["xaxis"], "x2");
        assert!(json.get("yaxis").is_none());
    }

    #[test]
    fn test_layout_flattens_axes() {
        let mut layout = Layout::default();
        layout.set_axis('x', 1, Axis::titled("Annual Income"));
        layout.set_axis('y', 3, Axis::titled("mid-low"));
        let json = serde_json::to_value(&layout).unwrap();
        assert_eq!(json["xaxis"]["title"]["text"], "Annual Income");
        assert_eq!(json["yaxis3"]["title"]["text"], "mid-low");
        assert!(json.get("barmode").is_none());
    }

    #[test]
    fn test_axis_names() {
        assert_eq!(axis_ref('x', 1), "x");
        assert_eq!(axis_ref('y', 6), "y6");
        assert_eq!(axis_key('x', 2), "xaxis2");
    }

    #[test]
    fn test_write_json_to_buffer() {
        let figure = Figure::new(Layout { barmode: Some("group"), ..Layout::default() });
        let mut buffer = Vec::new();
        figure.write_json(&mut buffer, false).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed["layout"]["barmode"], "group");
        assert_eq!(parsed["data"].as_array().map(Vec::len), Some(0));
    }
}
