use std::sync::Arc;

use crate::{
    config::Config,
    error::ApiResult,
    main_lib::AppState,
    models::{
        BenchmarkResponse, PortfolioResponse, ReportQuery, ReportResponse, SeriesPointResponse,
        TableResponse, TableRowResponse, WeightResponse,
    },
    render::{
        chart::{value_chart_svg, CHART_FILE_NAME},
        page::{render_page, FormState, PageContent},
    },
};
use axum::{
    extract::{Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use chrono::Local;
use lamina_core::portfolios::PortfolioKind;
use lamina_core::report::{Report, ReportSelection};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

#[utoipa::path(get, path = "/api/v1/healthz", responses((status = 200, description = "Health")))]
pub async fn healthz() -> &'static str {
    "ok"
}

#[utoipa::path(get, path = "/api/v1/readyz", responses((status = 200, description = "Ready")))]
pub async fn readyz() -> &'static str {
    "ok"
}

#[utoipa::path(get, path = "/api/v1/portfolios", responses((status = 200, body = [PortfolioResponse])))]
pub async fn list_portfolios(State(state): State<Arc<AppState>>) -> Json<Vec<PortfolioResponse>> {
    Json(
        state
            .report_service
            .portfolios()
            .into_iter()
            .map(PortfolioResponse::from)
            .collect(),
    )
}

async fn generate(state: &AppState, query: &ReportQuery) -> ApiResult<Report> {
    let selection = query.to_selection()?;
    Ok(state.report_service.generate_report(&selection).await?)
}

#[utoipa::path(
    get,
    path = "/api/v1/report",
    params(ReportQuery),
    responses(
        (status = 200, body = ReportResponse),
        (status = 400, description = "Invalid selection"),
        (status = 422, description = "Not enough data for the selected range/portfolio"),
        (status = 502, description = "Price provider failure")
    )
)]
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Json<ReportResponse>> {
    let report = generate(&state, &query).await?;
    Ok(Json(ReportResponse::from(&report)))
}

#[utoipa::path(
    get,
    path = "/api/v1/report/chart.svg",
    params(ReportQuery),
    responses(
        (status = 200, description = "Value chart as an SVG attachment", content_type = "image/svg+xml"),
        (status = 400, description = "Invalid selection"),
        (status = 422, description = "Not enough data for the selected range/portfolio"),
        (status = 502, description = "Price provider failure")
    )
)]
pub async fn get_report_chart(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportQuery>,
) -> ApiResult<impl IntoResponse> {
    let report = generate(&state, &query).await?;
    let svg = value_chart_svg(&report.series);
    Ok((
        [
            (header::CONTENT_TYPE, "image/svg+xml".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", CHART_FILE_NAME),
            ),
        ],
        svg,
    ))
}

/// The lâmina page: selection form, chart and tables, or a single error.
pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportQuery>,
) -> (StatusCode, Html<String>) {
    let options = state.report_service.options().clone();
    let today = Local::now().date_naive();
    let selection = query
        .to_selection()
        .unwrap_or_else(|_| ReportSelection::new(PortfolioKind::Crypto));
    let form = FormState {
        portfolio: selection.portfolio,
        start_date: selection.start_date.unwrap_or(options.default_start_date),
        end_date: selection.end_date.unwrap_or(today),
    };

    let (status, content) = match generate(&state, &query).await {
        Ok(report) => (StatusCode::OK, Ok(report)),
        Err(err) => {
            let (status, message) = err.status_and_message();
            tracing::warn!("Report page failed: {}", message);
            (status, Err(message))
        }
    };
    let page = match &content {
        Ok(report) => render_page(
            &form,
            &options,
            &PageContent::Report {
                report,
                chart_href: chart_href(&query),
            },
        ),
        Err(message) => render_page(&form, &options, &PageContent::Error(message.clone())),
    };
    (status, Html(page))
}

fn chart_href(query: &ReportQuery) -> String {
    let qs = query.to_query_string();
    if qs.is_empty() {
        "/api/v1/report/chart.svg".to_string()
    } else {
        format!("/api/v1/report/chart.svg?{}", qs)
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(healthz, readyz, list_portfolios, get_report, get_report_chart),
    components(schemas(
        PortfolioResponse,
        BenchmarkResponse,
        WeightResponse,
        ReportResponse,
        SeriesPointResponse,
        TableResponse,
        TableRowResponse
    )),
    tags((name = "lamina"))
)]
pub struct ApiDoc;

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(origin) => Some(origin),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                    None
                }
            })
            .collect::<Vec<HeaderValue>>();
        CorsLayer::new().allow_origin(origins)
    };

    let openapi = ApiDoc::openapi();

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/portfolios", get(list_portfolios))
        .route("/report", get(get_report))
        .route("/report/chart.svg", get(get_report_chart))
        .route("/openapi.json", get(move || async move { Json(openapi) }));

    Router::new()
        .route("/", get(index))
        .nest("/api/v1", api)
        .with_state(state)
        .layer(cors)
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
