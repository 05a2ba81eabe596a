//! "Evolução Patrimonial" line chart as standalone SVG.

use chrono::{Datelike, NaiveDate};
use lamina_core::report::AlignedSeries;

use super::escape;

const WIDTH: f64 = 700.0;
const HEIGHT: f64 = 300.0;
const PADDING: f64 = 36.0;
const LEGEND_HEIGHT: f64 = 28.0;

pub const CHART_TITLE: &str = "Evolução Patrimonial";
pub const PORTFOLIO_COLOR: &str = "#1f497d";
pub const BENCHMARK_COLOR: &str = "#a83232";
const GRID_COLOR: &str = "#bbbbbb";

/// File name offered for the chart download.
pub const CHART_FILE_NAME: &str = "grafico_bluemetrix.svg";

struct Line<'a> {
    label: &'a str,
    color: &'static str,
    values: Vec<f64>,
}

fn extent(lines: &[Line<'_>]) -> Option<(f64, f64)> {
    let (min_v, max_v) = lines
        .iter()
        .flat_map(|l| l.values.iter().copied())
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !min_v.is_finite() || !max_v.is_finite() {
        return None;
    }
    if min_v == max_v {
        // widen flat ranges
        let adjust = if min_v == 0.0 { 1.0 } else { min_v.abs() * 0.1 };
        return Some((min_v - adjust, max_v + adjust));
    }
    Some((min_v, max_v))
}

fn plot_bottom() -> f64 {
    HEIGHT - PADDING - LEGEND_HEIGHT
}

fn scale_value(value: f64, min_v: f64, max_v: f64) -> f64 {
    let inner_height = plot_bottom() - PADDING;
    let norm = (value - min_v) / (max_v - min_v);
    PADDING + (1.0 - norm) * inner_height
}

fn x_positions(len: usize) -> Vec<f64> {
    if len == 1 {
        return vec![WIDTH / 2.0];
    }
    let inner_width = WIDTH - 2.0 * PADDING;
    (0..len)
        .map(|i| PADDING + inner_width * (i as f64 / (len.saturating_sub(1) as f64).max(1.0)))
        .collect()
}

fn svg_header() -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}"><style>text{{font-family:Arial,sans-serif;font-size:10px;fill:#666}}</style>"#,
        w = WIDTH,
        h = HEIGHT
    )
}

/// Dashed vertical guide and "%b/%y" label at the first date of each month.
fn month_axis(svg: &mut String, dates: &[NaiveDate], xs: &[f64]) {
    let months: Vec<(usize, NaiveDate)> = dates
        .iter()
        .enumerate()
        .filter(|(i, d)| *i == 0 || dates[i - 1].month() != d.month())
        .map(|(i, d)| (i, *d))
        .collect();
    // Keep roughly a dozen labels on long ranges.
    let step = months.len().div_ceil(12).max(1);

    for (idx, date) in months.iter().step_by(step) {
        let x = xs[*idx];
        svg.push_str(&format!(
            r#"<line x1="{x:.2}" y1="{y1:.2}" x2="{x:.2}" y2="{y2:.2}" stroke="{color}" stroke-opacity="0.4" stroke-width="0.5" stroke-dasharray="4 3" />"#,
            y1 = PADDING,
            y2 = plot_bottom(),
            color = GRID_COLOR
        ));
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle">{label}</text>"#,
            y = plot_bottom() + 14.0,
            label = date.format("%b/%y")
        ));
    }
}

/// Horizontal legend centred below the plot.
fn legend(svg: &mut String, lines: &[Line<'_>]) {
    let entry_width = 120.0;
    let start = WIDTH / 2.0 - entry_width * lines.len() as f64 / 2.0;
    let y = HEIGHT - PADDING / 2.0;
    for (i, line) in lines.iter().enumerate() {
        let x = start + entry_width * i as f64;
        svg.push_str(&format!(
            r#"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="{color}" stroke-width="1.5" />"#,
            x1 = x,
            x2 = x + 20.0,
            y = y - 4.0,
            color = line.color
        ));
        svg.push_str(&format!(
            r##"<text x="{x:.2}" y="{y:.2}" text-anchor="start" fill="#333">{label}</text>"##,
            x = x + 26.0,
            label = escape(line.label)
        ));
    }
}

/// Renders the portfolio and benchmark value series.
///
/// Returns an empty string when there is nothing to draw.
pub fn value_chart_svg(series: &AlignedSeries) -> String {
    let dates: Vec<NaiveDate> = series.portfolio.dates().collect();
    if dates.is_empty() {
        return String::new();
    }

    let lines = [
        Line {
            label: &series.portfolio.label,
            color: PORTFOLIO_COLOR,
            values: series.portfolio.values(),
        },
        Line {
            label: &series.benchmark.label,
            color: BENCHMARK_COLOR,
            values: series.benchmark.values(),
        },
    ];
    let Some((min_v, max_v)) = extent(&lines) else {
        return String::new();
    };
    let xs = x_positions(dates.len());

    let mut svg = svg_header();
    svg.push_str(&format!(
        r##"<text x="{x:.2}" y="{y:.2}" text-anchor="middle" fill="#333" font-size="12">{title}</text>"##,
        x = WIDTH / 2.0,
        y = PADDING / 2.0 + 4.0,
        title = CHART_TITLE
    ));
    month_axis(&mut svg, &dates, &xs);

    for line in &lines {
        let points = line
            .values
            .iter()
            .zip(&xs)
            .filter(|(v, _)| v.is_finite())
            .map(|(v, x)| format!("{:.2},{:.2}", x, scale_value(*v, min_v, max_v)))
            .collect::<Vec<_>>()
            .join(" ");
        svg.push_str(&format!(
            r#"<polyline fill="none" stroke="{color}" stroke-width="1.2" points="{points}" />"#,
            color = line.color
        ));
    }

    legend(&mut svg, &lines);
    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use lamina_core::report::{ValuePoint, ValueSeries};

    fn series(label: &str, values: &[f64]) -> ValueSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 30).unwrap();
        ValueSeries {
            label: label.to_string(),
            points: values
                .iter()
                .enumerate()
                .map(|(i, v)| ValuePoint {
                    date: start + chrono::Duration::days(i as i64),
                    value: *v,
                })
                .collect(),
        }
    }

    #[test]
    fn draws_both_series_with_their_colors() {
        let aligned = AlignedSeries {
            portfolio: series("Carteira", &[100_000.0, 101_000.0, 99_000.0, 102_000.0]),
            benchmark: series("S&P500", &[100_000.0, 100_500.0, 100_200.0, 100_900.0]),
        };
        let svg = value_chart_svg(&aligned);

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(CHART_TITLE));
        assert_eq!(svg.matches("<polyline").count(), 2);
        assert!(svg.contains(PORTFOLIO_COLOR));
        assert!(svg.contains(BENCHMARK_COLOR));
        // Label must be XML-escaped.
        assert!(svg.contains("S&amp;P500"));
        assert!(svg.contains("Jan/24"));
        assert!(svg.contains("Feb/24"));
    }

    #[test]
    fn flat_series_still_renders() {
        let aligned = AlignedSeries {
            portfolio: series("Carteira", &[100_000.0, 100_000.0]),
            benchmark: series("HASH11", &[100_000.0, 100_000.0]),
        };
        let svg = value_chart_svg(&aligned);
        assert!(!svg.contains("NaN"));
        assert_eq!(svg.matches("<polyline").count(), 2);
    }

    #[test]
    fn empty_series_renders_nothing() {
        let aligned = AlignedSeries {
            portfolio: series("Carteira", &[]),
            benchmark: series("HASH11", &[]),
        };
        assert!(value_chart_svg(&aligned).is_empty());
    }
}
