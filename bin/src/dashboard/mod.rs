//! The web dashboard.
//!
//! Routes:
//! - `GET /` renders the page for the query (`page`, `symbol`, `start`,
//!   `end`, `include_benchmark`, `benchmark`, repeated `item`)
//! - `GET /export/html`, `GET /export/csv` download the custom report
//! - `GET /snapshot/view`, `GET /snapshot/download` serve the tearsheet
//! - `GET /health` answers `{"status":"ok"}`

mod error;
mod request;
mod state;
mod views;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::Local;
use momentum_report::{CustomReport, ReportInput, Tearsheet, export};

pub(crate) use state::AppState;

use error::DashboardError;

use crate::pipeline::{self, LoadError};
use request::{DashboardRequest, Page};
use views::Content;

type Pairs = Query<Vec<(String, String)>>;

/// Assemble the dashboard router.
pub(crate) fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/export/html", get(export_html))
        .route("/export/csv", get(export_csv))
        .route("/snapshot/view", get(snapshot_view))
        .route("/snapshot/download", get(snapshot_download))
        .route("/health", get(health))
        .with_state(state)
}

fn resolve(state: &AppState, pairs: &[(String, String)]) -> DashboardRequest {
    DashboardRequest::from_pairs(pairs, &state.config, Local::now().date_naive())
}

async fn load(state: &AppState, request: &DashboardRequest) -> Result<ReportInput, LoadError> {
    pipeline::load(state.source.as_ref(), &state.cache, &request.selection()?).await
}

fn attachment(file_name: &str, mime: &str, body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, mime.to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{file_name}\"")),
        ],
        body,
    )
        .into_response()
}

async fn index(State(state): State<Arc<AppState>>, Query(pairs): Pairs) -> Html<String> {
    let request = resolve(&state, &pairs);

    let content = match load(&state, &request).await {
        Err(e) => Content::Failed(e.to_string()),
        Ok(input) => match request.page {
            Page::Home => Content::Home,
            Page::Snapshot => match Tearsheet::build(&input) {
                Ok(sheet) => Content::Snapshot(sheet.to_html()),
                Err(e) => Content::Failed(LoadError::from(e).to_string()),
            },
            Page::CustomReport => Content::Report(CustomReport::build(&input, &request.items)),
        },
    };

    Html(views::page(&request, &content))
}

async fn custom_report(state: &AppState, pairs: &[(String, String)]) -> Result<(String, CustomReport), DashboardError> {
    let request = resolve(state, pairs);
    let input = load(state, &request).await?;
    let report = CustomReport::build(&input, &request.items);
    if !report.is_exportable() {
        return Err(DashboardError::NothingToExport);
    }
    Ok((request.symbol, report))
}

async fn export_html(State(state): State<Arc<AppState>>, Query(pairs): Pairs) -> Result<Response, DashboardError> {
    let (symbol, report) = custom_report(&state, &pairs).await?;
    let html = export::html_bundle(&symbol, &report);
    Ok(attachment(export::HTML_FILE_NAME, "text/html; charset=utf-8", html))
}

async fn export_csv(State(state): State<Arc<AppState>>, Query(pairs): Pairs) -> Result<Response, DashboardError> {
    let (_, report) = custom_report(&state, &pairs).await?;
    if report.tables().is_empty() {
        return Err(DashboardError::NothingToExport);
    }
    let csv = export::csv_bundle(&report)?;
    Ok(attachment(export::CSV_FILE_NAME, "text/csv; charset=utf-8", csv))
}

async fn tearsheet(state: &AppState, pairs: &[(String, String)]) -> Result<String, DashboardError> {
    let request = resolve(state, pairs);
    let input = load(state, &request).await?;
    Ok(Tearsheet::build(&input)?.to_html())
}

async fn snapshot_view(State(state): State<Arc<AppState>>, Query(pairs): Pairs) -> Result<Html<String>, DashboardError> {
    Ok(Html(tearsheet(&state, &pairs).await?))
}

async fn snapshot_download(State(state): State<Arc<AppState>>, Query(pairs): Pairs) -> Result<Response, DashboardError> {
    let html = tearsheet(&state, &pairs).await?;
    Ok(attachment(export::SNAPSHOT_FILE_NAME, "text/html; charset=utf-8", html))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::DashboardConfig, pipeline::tests::source};
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use momentum_data::InMemorySource;
    use tower::ServiceExt;

    const RANGE: &str = "start=2023-03-01&end=2023-06-30";

    fn app_with(source: Arc<InMemorySource>) -> Router {
        router(AppState::new(DashboardConfig::default(), source))
    }

    fn app() -> Router {
        app_with(Arc::new(source()))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, disposition, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, _, body) = get(app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_home_page() {
        let (status, _, body) = get(app(), &format!("/?{RANGE}")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Welcome to MarketMomentum!"));
        assert!(!body.contains("class=\"error\""));
    }

    #[tokio::test]
    async fn test_unknown_ticker_message() {
        let (status, _, body) = get(app(), &format!("/?symbol=NOPE&{RANGE}")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Ticker NOPE does not exist."));
    }

    #[tokio::test]
    async fn test_custom_report_page() {
        let uri = format!(
            "/?page=custom-report&{RANGE}&include_benchmark=on&benchmark=SPY&item=metrics-table&item=earnings-graph&item=monthly-heatmap-graph"
        );
        let (status, _, body) = get(app(), &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h1>Custom Report</h1>"));
        assert!(body.contains("<h6><b>Metrics Table</b></h6>"));
        assert!(body.contains("class=\"row full\""));
        assert!(body.contains("Monthly Returns Heatmap for MSFT"));
        assert!(body.contains("Export all to HTML"));
        assert!(body.contains("Export tables to CSV"));
    }

    #[tokio::test]
    async fn test_page_reuses_cached_returns() {
        let source = Arc::new(source());
        let state = AppState::new(DashboardConfig::default(), source.clone());

        for _ in 0..3 {
            let (status, _, _) = get(router(state.clone()), &format!("/?{RANGE}")).await;
            assert_eq!(status, StatusCode::OK);
        }
        assert_eq!(source.download_count(), 1);
    }

    #[tokio::test]
    async fn test_snapshot_page_embeds_tearsheet() {
        let (_, _, body) = get(app(), &format!("/?page=snapshot&{RANGE}")).await;
        assert!(body.contains("<h1>Snapshot</h1>"));
        assert!(body.contains("srcdoc=\""));
        assert!(body.contains("Export Snapshot"));
    }

    #[tokio::test]
    async fn test_export_csv() {
        let uri = format!("/export/csv?{RANGE}&item=yearly-returns-table");
        let (status, disposition, body) = get(app(), &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(disposition.as_deref(), Some("attachment; filename=\"tables.csv\""));
        assert!(body.starts_with("Date,MSFT\n2023,"));
    }

    #[tokio::test]
    async fn test_export_html() {
        let uri = format!("/export/html?{RANGE}&item=earnings-graph");
        let (status, disposition, body) = get(app(), &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            disposition.as_deref(),
            Some("attachment; filename=\"tables_and_graphs.html\"")
        );
        assert!(body.contains("<h1>MSFT Custom Report</h1>"));
    }

    #[tokio::test]
    async fn test_export_without_selection() {
        let (status, _, body) = get(app(), &format!("/export/html?{RANGE}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Nothing to export"));

        let uri = format!("/export/csv?{RANGE}&item=earnings-graph");
        let (status, _, _) = get(app(), &uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_snapshot_download() {
        let uri = format!("/snapshot/download?{RANGE}&include_benchmark=on");
        let (status, disposition, body) = get(app(), &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(disposition.as_deref(), Some("attachment; filename=\"snapshot.html\""));
        assert!(body.contains("Benchmark is SPY | "));
    }

    #[tokio::test]
    async fn test_snapshot_view_error_status() {
        let (status, _, body) = get(app(), "/snapshot/view?symbol=OLD&start=2023-03-01").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("No data for stock OLD in the specified date range."));
    }
}
