// Server-side HTML for the dashboard page
use crate::domain::dashboard::DashboardView;
use crate::domain::sample::NormalizedSample;
use crate::domain::series::Summary;
use crate::infrastructure::config::DashboardSettings;
use chrono::{DateTime, Utc};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use serde::Serialize;

const CHART_TITLE: &str = "Soil Moisture Historical Data";
const TIME_LABEL: &str = "Time";
const VALUE_LABEL: &str = "Soil Moisture (%)";

/// One page of table rows, 1-based
#[derive(Debug, PartialEq)]
pub struct Page<'a> {
    pub number: usize,
    pub total: usize,
    pub rows: &'a [NormalizedSample],
}

impl<'a> Page<'a> {
    /// Out of range page numbers are clamped to the first or last page
    pub fn of(rows: &'a [NormalizedSample], requested: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let total = rows.len().div_ceil(page_size).max(1);
        let number = requested.clamp(1, total);
        let start = ((number - 1) * page_size).min(rows.len());
        let end = (start + page_size).min(rows.len());
        Self {
            number,
            total,
            rows: &rows[start..end],
        }
    }
}

pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

pub fn summary_lines(summary: &Summary, precision: usize) -> Vec<String> {
    match summary {
        Summary::Absent => vec!["No measurements yet".to_string()],
        Summary::Latest {
            timestamp,
            percentage,
        } => vec![
            format!("Last measurement at {}", format_timestamp(timestamp)),
            format!("Last measurement value: {:.*}%", precision, percentage),
        ],
    }
}

/// Chart labels and values, with labels formatted like the table
#[derive(Serialize)]
struct ChartData {
    labels: Vec<String>,
    values: Vec<f64>,
}

/// Chart data as JSON that is safe to inline in a `<script>` element
fn chart_json(view: &DashboardView) -> String {
    let data = ChartData {
        labels: view
            .chart_series
            .samples()
            .iter()
            .map(|sample| format_timestamp(&sample.timestamp))
            .collect(),
        values: view
            .chart_series
            .samples()
            .iter()
            .map(|sample| sample.percentage)
            .collect(),
    };
    serde_json::to_string(&data)
        .unwrap_or_else(|_| r#"{"labels":[],"values":[]}"#.to_string())
        .replace("</", "<\\/")
}

fn chart_script(view: &DashboardView) -> String {
    format!(
        r#"
const chart = {data};
new Chart(document.getElementById("moisture-chart"), {{
  type: "line",
  data: {{
    labels: chart.labels,
    datasets: [{{ label: "{VALUE_LABEL}", data: chart.values }}]
  }},
  options: {{
    scales: {{
      x: {{ title: {{ display: true, text: "{TIME_LABEL}" }} }},
      y: {{ title: {{ display: true, text: "{VALUE_LABEL}" }} }}
    }}
  }}
}});
"#,
        data = chart_json(view)
    )
}

pub fn render_page(view: &DashboardView, settings: &DashboardSettings, requested_page: usize) -> String {
    let page = Page::of(&view.table_rows, requested_page, settings.page_size);

    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (settings.title) }
                script src="https://cdn.jsdelivr.net/npm/chart.js" {}
            }
            body {
                h1 { (settings.title) }
                section #summary {
                    @for line in summary_lines(&view.summary, settings.precision) {
                        p { (line) }
                    }
                }
                (render_table(&page, settings.precision))
                section #chart {
                    h2 { (CHART_TITLE) }
                    @if view.is_empty() {
                        p { "No readings to plot" }
                    } @else {
                        canvas #moisture-chart {}
                    }
                }
                @if !view.is_empty() {
                    script { (PreEscaped(chart_script(view))) }
                }
            }
        }
    };

    markup.into_string()
}

fn render_table(page: &Page<'_>, precision: usize) -> Markup {
    html! {
        section #table {
            table {
                thead {
                    tr {
                        th { (TIME_LABEL) }
                        th { (VALUE_LABEL) }
                    }
                }
                tbody {
                    @for row in page.rows {
                        tr {
                            td { (format_timestamp(&row.timestamp)) }
                            td { (format!("{:.*}", precision, row.percentage)) }
                        }
                    }
                }
            }
            nav {
                @if page.number > 1 {
                    a href=(format!("?page={}", page.number - 1)) { "Previous" }
                    " "
                }
                "Page " (page.number) " of " (page.total)
                @if page.number < page.total {
                    " "
                    a href=(format!("?page={}", page.number + 1)) { "Next" }
                }
            }
        }
    }
}
