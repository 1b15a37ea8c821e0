//! Skill charts rendered as plain HTML/CSS: a horizontal bar chart and a
//! coverage donut built from a `conic-gradient`.

use crate::models::analysis::GapCounts;

use super::text;

const COVERAGE_COLORS: &[&str] = &["#22c55e", "#ef4444", "#f97316"];
const NO_DATA_COLOR: &str = "#475569";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartDatum {
    pub label: &'static str,
    pub count: usize,
}

pub fn skill_chart_data(counts: GapCounts) -> Vec<ChartDatum> {
    vec![
        ChartDatum {
            label: "Strengths",
            count: counts.strengths,
        },
        ChartDatum {
            label: "Core gaps",
            count: counts.core_gaps,
        },
        ChartDatum {
            label: "Nice-to-have gaps",
            count: counts.nice_gaps,
        },
    ]
}

/// Bar widths as whole percentages of the largest count. All zero when every count is zero.
pub fn bar_widths(data: &[ChartDatum]) -> Vec<u32> {
    let max = data.iter().map(|d| d.count).max().unwrap_or(0);
    data.iter()
        .map(|d| {
            if max == 0 {
                0
            } else {
                (d.count as f64 / max as f64 * 100.0).round() as u32
            }
        })
        .collect()
}

pub fn render_bar_chart(data: &[ChartDatum]) -> String {
    let mut html = String::from(r#"<div class="chart">"#);
    for (datum, width) in data.iter().zip(bar_widths(data)) {
        html.push_str(&format!(
            r#"<div class="chart-row"><span>{}</span><div class="bar-track"><div class="bar-fill" style="width: {width}%"></div></div><span>{}</span></div>"#,
            text(datum.label),
            datum.count,
        ));
    }
    html.push_str("</div>");
    html
}

/// One segment of the coverage donut, as a span of the full circle in percent.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: &'static str,
    pub count: usize,
    pub color: &'static str,
    pub start: f64,
    pub end: f64,
}

impl Slice {
    pub fn percent(&self) -> u32 {
        (self.end - self.start).round() as u32
    }
}

/// Coverage slices; a single full "No data" slice when there is nothing to show.
pub fn coverage_slices(counts: GapCounts) -> Vec<Slice> {
    let total = counts.total();
    if total == 0 {
        return vec![Slice {
            label: "No data",
            count: 0,
            color: NO_DATA_COLOR,
            start: 0.0,
            end: 100.0,
        }];
    }

    let mut cursor = 0.0;
    skill_chart_data(counts)
        .into_iter()
        .zip(COVERAGE_COLORS.iter().copied())
        .map(|(datum, color)| {
            let start = cursor;
            cursor += datum.count as f64 / total as f64 * 100.0;
            Slice {
                label: datum.label,
                count: datum.count,
                color,
                start,
                end: cursor,
            }
        })
        .collect()
}

pub fn render_coverage(counts: GapCounts) -> String {
    let slices = coverage_slices(counts);

    let stops: Vec<String> = slices
        .iter()
        .map(|s| format!("{} {:.2}% {:.2}%", s.color, s.start, s.end))
        .collect();

    let mut legend = String::from("<ul>");
    for slice in &slices {
        legend.push_str(&format!(
            r#"<li><span style="color: {}">●</span> {} ({}, {}%)</li>"#,
            slice.color,
            text(slice.label),
            slice.count,
            slice.percent()
        ));
    }
    legend.push_str("</ul>");

    format!(
        r#"<div class="coverage"><div class="donut" style="background: conic-gradient({})"></div>{legend}</div>"#,
        stops.join(", ")
    )
}
