//! The lâmina HTML page.

use chrono::NaiveDate;
use lamina_core::portfolios::PortfolioKind;
use lamina_core::report::{EndDateMode, Report, ReportOptions};

use super::chart::{value_chart_svg, CHART_TITLE};
use super::escape;

const TEMPLATE: &str = include_str!("page_template.html");

pub const PAGE_TITLE: &str = "Lâmina Bluemetrix";

/// Dark table theme applied when styled tables are enabled.
const STYLED_TABLES_CSS: &str = "table.report { background-color: #1e1e1e; color: #f5f5f5; border-color: #444; }\n\
table.report th { background-color: #2c2c2c; color: #f5f5f5; }\n\
table.report td { color: #f5f5f5; }";

/// Values echoed back into the selection form.
pub struct FormState {
    pub portfolio: PortfolioKind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// What the page shows below the form.
pub enum PageContent<'a> {
    Report {
        report: &'a Report,
        /// Link for the chart download, selection included
        chart_href: String,
    },
    Error(String),
}

fn render_form(form: &FormState, options: &ReportOptions) -> String {
    let mut html = String::from(r#"<form method="get" action="/">"#);

    html.push_str(r#"<label>Selecione a carteira:<select name="portfolio">"#);
    for kind in PortfolioKind::ALL {
        let selected = if kind == form.portfolio { " selected" } else { "" };
        html.push_str(&format!(
            r#"<option value="{}"{}>{}</option>"#,
            kind.as_str(),
            selected,
            escape(kind.display_name())
        ));
    }
    html.push_str("</select></label>");

    html.push_str(&format!(
        r#"<label>Data de início:<input type="date" name="startDate" value="{}"></label>"#,
        form.start_date.format("%Y-%m-%d")
    ));
    if options.end_date_mode == EndDateMode::UserSelected {
        html.push_str(&format!(
            r#"<label>Data de fim:<input type="date" name="endDate" value="{}"></label>"#,
            form.end_date.format("%Y-%m-%d")
        ));
    }

    html.push_str(r#"<button type="submit">Gerar lâmina</button></form>"#);
    html
}

fn render_table(headers: &[String], rows: &[(String, Vec<String>)], styled: bool) -> String {
    let mut html = String::new();
    html.push_str(if styled {
        r#"<table class="report"><thead><tr><th></th>"#
    } else {
        "<table><thead><tr><th></th>"
    });
    for header in headers {
        html.push_str(&format!("<th>{}</th>", escape(header)));
    }
    html.push_str("</tr></thead><tbody>");
    for (label, cells) in rows {
        html.push_str(&format!("<tr><td>{}</td>", escape(label)));
        for cell in cells {
            html.push_str(&format!("<td>{}</td>", escape(cell)));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
    html
}

fn render_report(report: &Report, chart_href: &str, styled: bool) -> String {
    let consolidated_rows: Vec<(String, Vec<String>)> = report
        .consolidated
        .rows
        .iter()
        .map(|row| {
            let cells = row.cells().iter().map(|c| format!("{:.2}", c)).collect();
            (row.label.clone(), cells)
        })
        .collect();
    let indicator_headers: Vec<String> = report
        .indicators
        .headers()
        .iter()
        .map(|h| h.to_string())
        .collect();
    let indicator_rows: Vec<(String, Vec<String>)> = report
        .indicators
        .rows
        .iter()
        .map(|row| (row.label.clone(), row.display_cells().to_vec()))
        .collect();

    let mut html = String::new();
    html.push_str(&format!("<h3>📈 {}</h3>", CHART_TITLE));
    html.push_str(&format!(
        r#"<div class="chart">{}</div>"#,
        value_chart_svg(&report.series)
    ));
    html.push_str(&format!(
        r#"<a class="download" href="{}">⬇️ Baixar Gráfico em SVG</a>"#,
        escape(chart_href)
    ));
    html.push_str("<h3>📊 Tabela de Rentabilidade Consolidada</h3>");
    html.push_str(&render_table(
        &report.consolidated.headers(),
        &consolidated_rows,
        styled,
    ));
    html.push_str("<h3>📌 Indicadores Técnicos</h3>");
    html.push_str(&render_table(&indicator_headers, &indicator_rows, styled));
    html
}

/// Renders the full page. An error replaces the chart and both tables.
pub fn render_page(form: &FormState, options: &ReportOptions, content: &PageContent<'_>) -> String {
    let body = match content {
        PageContent::Report { report, chart_href } => {
            render_report(report, chart_href, options.show_styled_tables)
        }
        PageContent::Error(message) => {
            format!(r#"<div class="error">{}</div>"#, escape(message))
        }
    };
    let styles = if options.show_styled_tables {
        STYLED_TABLES_CSS
    } else {
        ""
    };

    TEMPLATE
        .replace("{{title}}", PAGE_TITLE)
        .replace("{{styles}}", styles)
        .replace("{{form}}", &render_form(form, options))
        .replace("{{content}}", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(end_date_mode: EndDateMode, styled: bool) -> ReportOptions {
        ReportOptions {
            show_styled_tables: styled,
            end_date_mode,
            default_start_date: NaiveDate::from_ymd_opt(2022, 5, 1).unwrap(),
        }
    }

    fn form() -> FormState {
        FormState {
            portfolio: PortfolioKind::International,
            start_date: NaiveDate::from_ymd_opt(2022, 5, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 28).unwrap(),
        }
    }

    #[test]
    fn error_page_has_message_and_no_tables() {
        let html = render_page(
            &form(),
            &options(EndDateMode::UserSelected, true),
            &PageContent::Error("Insufficient data <x>".to_string()),
        );
        assert!(html.contains(PAGE_TITLE));
        assert!(html.contains("Insufficient data &lt;x&gt;"));
        assert!(!html.contains("<table"));
        assert!(!html.contains("<svg"));
    }

    #[test]
    fn form_echoes_selection() {
        let html = render_page(
            &form(),
            &options(EndDateMode::UserSelected, false),
            &PageContent::Error(String::new()),
        );
        assert!(html.contains(r#"<option value="international" selected>"#));
        assert!(html.contains(r#"name="startDate" value="2022-05-01""#));
        assert!(html.contains(r#"name="endDate" value="2024-06-28""#));
        assert!(!html.contains("table.report th"));
    }

    #[test]
    fn today_mode_hides_end_date_input() {
        let html = render_page(
            &form(),
            &options(EndDateMode::Today, true),
            &PageContent::Error(String::new()),
        );
        assert!(!html.contains(r#"name="endDate""#));
        assert!(html.contains("table.report th"));
    }

    #[test]
    fn table_renders_headers_and_rows() {
        let html = render_table(
            &["Year".to_string(), "12 Months".to_string()],
            &[("S&P500".to_string(), vec!["1.00".into(), "N/A".into()])],
            true,
        );
        assert!(html.starts_with(r#"<table class="report">"#));
        assert!(html.contains("<th>12 Months</th>"));
        assert!(html.contains("<td>S&amp;P500</td><td>1.00</td><td>N/A</td>"));
    }
}
