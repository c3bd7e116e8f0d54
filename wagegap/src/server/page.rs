//! The dashboard page.
//!
//! A single static HTML document, rendered once at startup. Charts are empty
//! containers that the inline script fills from the JSON API with Plotly.js.

use pulldown_cmark::{html, Options, Parser};

use crate::domain::{GroupField, XField};
use crate::figures::StaticFigure;
use crate::theme;

pub const TITLE: &str = "Exploration of the Gender Wage Gap Using the General Social Survey (GSS)";

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

pub const INTRO_MARKDOWN: &str = "\
There is a well-documented gender wage gap in American society, such that men tend to make more money \
than women ([source here](https://en.wikipedia.org/wiki/Gender_pay_gap)). On average, women make \
approximately 79% the amount that men do. After adjusting for work time, type of occupation, education, \
and experience, the wage gap is less stark at 95%. On average, the gender wage gap decreased steadily \
across the 20th century. However, research suggests that the gender wage gap may not fully close until \
2109! This report explores the gender wage gap from various angles by visualizing several factors that \
are important for differences in pay across individuals in general.

The General Social Survey (GSS; [source here](http://www.gss.norc.org/About-The-GSS)) includes \
responses on a variety of items, such as demographics, attitudes, and job outcomes to name a few. The \
survey has been conducted since 1972 and has two primary goals:

- Conduct basic research on the development of American society
- Distribute high-quality data to social scientists and various stakeholders

The GSS has a methodological report which contains over 124 papers, in order to advance survey research \
methodology. For these reasons, the GSS is considered to be one of the best resources for scientifically \
examining the sociological dynamics of the United States of America. Here we use this rich dataset to \
explore the gender wage gap in American society.
";

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{TITLE}}</title>
<script src="{{PLOTLY_CDN}}"></script>
<style>
  body { background: {{BACKGROUND}}; color: {{TEXT}}; font-family: sans-serif; margin: 2em; }
  a { color: {{TEXT}}; }
  .half { width: 50%; float: left; }
  .clear { clear: both; }
  select { font-size: 1em; }
</style>
</head>
<body>
<h1>{{TITLE}}</h1>
<div class="intro">
{{INTRO}}
</div>

<h2>Summary statistics across the sexes</h2>
<div id="summary" class="chart"></div>

<h2>Income and prestige are positively correlated</h2>
<div id="scatter" class="chart"></div>

<h2>Job outcome distributions</h2>
<div class="half"><div id="prestige-box" class="chart"></div></div>
<div class="half"><div id="income-box" class="chart"></div></div>
<div class="clear"></div>

<h2>Income stratified by grouped levels of job prestige</h2>
<div id="income-by-prestige" class="chart" style="height: 900px"></div>

<h3>Pick the variables you would like to view!</h3>
<div id="interactive" class="chart"></div>

<h3>Select the x-axis</h3>
<select id="x-axis">
{{X_OPTIONS}}
</select>

<h3>Select the grouping variable</h3>
<select id="group">
{{GROUP_OPTIONS}}
</select>

<script>
const STATIC_FIGURES = {{STATIC_FIGURES}};

async function draw(target, url) {
  const response = await fetch(url);
  const figure = await response.json();
  if (!response.ok) {
    document.getElementById(target).textContent = figure.error;
    return;
  }
  Plotly.react(target, figure.data, figure.layout);
}

function redrawInteractive() {
  const params = new URLSearchParams({
    x: document.getElementById("x-axis").value,
    group: document.getElementById("group").value,
  });
  draw("interactive", "/api/interactive?" + params);
}

for (const name of STATIC_FIGURES) {
  draw(name, "/api/figures/" + name);
}
document.getElementById("x-axis").addEventListener("change", redrawInteractive);
document.getElementById("group").addEventListener("change", redrawInteractive);
redrawInteractive();
</script>
</body>
</html>
"#;

/// Render the introduction markdown to HTML.
#[must_use]
pub fn render_intro() -> String {
    let mut out = String::new();
    html::push_html(&mut out, Parser::new_ext(INTRO_MARKDOWN, Options::empty()));
    out
}

fn option_tags<'a>(names: impl IntoIterator<Item = &'a str>, selected: &str) -> String {
    names
        .into_iter()
        .map(|name| {
            let marker = if name == selected { " selected" } else { "" };
            format!(r#"<option value="{name}"{marker}>{name}</option>"#)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The full dashboard page.
#[must_use]
pub fn render_page() -> String {
    // Slugs only, cannot fail
    let static_list = serde_json::to_string(&StaticFigure::ALL).unwrap_or_else(|_| "[]".to_string());

    TEMPLATE
        .replace("{{TITLE}}", TITLE)
        .replace("{{PLOTLY_CDN}}", PLOTLY_CDN)
        .replace("{{BACKGROUND}}", theme::BACKGROUND)
        .replace("{{TEXT}}", theme::TEXT)
        .replace("{{INTRO}}", &render_intro())
        .replace("{{X_OPTIONS}}", &option_tags(XField::ALL.map(XField::name), XField::default().name()))
        .replace(
            "{{GROUP_OPTIONS}}",
            &option_tags(GroupField::ALL.map(GroupField::name), GroupField::default().name()),
        )
        .replace("{{STATIC_FIGURES}}", &static_list)
}
