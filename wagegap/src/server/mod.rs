//! HTTP presentation layer
//!
//! Serves the dashboard page and its figure JSON. All state is built before
//! the listener accepts its first connection and is only read afterwards.
//!
//! | route                         | response                           |
//! |-------------------------------|------------------------------------|
//! | `GET /`                       | the dashboard page                 |
//! | `GET /api/options`            | dropdown values and defaults       |
//! | `GET /api/figures/{name}`     | one precomputed figure, 404 if unknown |
//! | `GET /api/interactive?x=&group=` | the grouped bar chart, 400 on a bad field |

pub mod page;

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::domain::{CleanedTable, GroupField, MissingPolicy, Selection, SelectionError, XField};
use crate::figures::{render, StaticFigure, StaticFigures};

/// Read-only state shared by every request.
#[derive(Debug)]
pub struct AppState {
    pub table: CleanedTable,
    pub figures: StaticFigures,
    pub page: String,
    pub policy: MissingPolicy,
    /// Pretty-print JSON responses.
    pub pretty: bool,
}

impl AppState {
    /// Compute the static figures and the page for a cleaned table.
    #[must_use]
    pub fn build(table: CleanedTable, policy: MissingPolicy, pretty: bool) -> Self {
        let figures = StaticFigures::build(&table);
        info!("Computed {} static figures from {} respondents", StaticFigure::ALL.len(), table.len());
        Self { table, figures, page: page::render_page(), policy, pretty }
    }
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("Unknown figure: {0}")]
    UnknownFigure(String),

    #[error("Failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Selection(_) => StatusCode::BAD_REQUEST,
            ApiError::UnknownFigure(_) => StatusCode::NOT_FOUND,
            ApiError::Serialize(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

fn json_response<T: Serialize>(value: &T, pretty: bool) -> Result<Response, ApiError> {
    let body = if pretty { serde_json::to_vec_pretty(value)? } else { serde_json::to_vec(value)? };
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

// =============================================================================
// HANDLERS
// =============================================================================

async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.page.clone())
}

#[derive(Serialize)]
struct Options {
    x_fields: [XField; 6],
    group_fields: [GroupField; 3],
    defaults: Selection,
    missing_as_category: bool,
}

async fn options(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let body = Options {
        x_fields: XField::ALL,
        group_fields: GroupField::ALL,
        defaults: Selection::default(),
        missing_as_category: state.policy == MissingPolicy::Category,
    };
    json_response(&body, state.pretty)
}

async fn static_figure(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    let which: StaticFigure = name.parse().map_err(|_| ApiError::UnknownFigure(name))?;
    json_response(state.figures.get(which), state.pretty)
}

#[derive(Debug, Deserialize)]
struct InteractiveQuery {
    x: Option<String>,
    group: Option<String>,
}

async fn interactive(
    State(state): State<Arc<AppState>>,
    Query(query): Query<InteractiveQuery>,
) -> Result<Response, ApiError> {
    let figure = render(&state.table, query.x.as_deref(), query.group.as_deref(), state.policy)
        .inspect_err(|e| warn!("Rejected selection: {e}"))?;
    debug!("Serving interactive figure with {} traces", figure.data.len());
    json_response(&figure, state.pretty)
}

/// Build the dashboard router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/options", get(options))
        .route("/api/figures/:name", get(static_figure))
        .route("/api/interactive", get(interactive))
        .with_state(state)
}

/// Serve until the listener fails or Ctrl+C is received.
///
/// # Errors
/// I/O failure from the underlying listener.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("Listening on http://{addr}");
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Shutting down"),
                Err(e) => {
                    // Without a signal handler, run until killed
                    warn!("Failed to install Ctrl+C handler: {e}");
                    std::future::pending::<()>().await;
                }
            }
        })
        .await
}
