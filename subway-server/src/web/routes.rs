//! HTTP route handlers.

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::{LineId, StationId};
use crate::service::ServiceError;

use super::dto::*;
use super::state::AppState;
use super::templates::{LineTemplate, LineView};

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations", get(list_stations).post(create_station))
        .route("/stations/:id", get(show_station).delete(delete_station))
        .route("/lines", get(list_lines).post(create_line))
        .route(
            "/lines/:id",
            get(show_line).put(update_line).delete(delete_line),
        )
        .route(
            "/lines/:id/sections",
            get(show_sections).post(add_section).delete(remove_station),
        )
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Parse a JSON body manually so the raw body can be logged on failure.
fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(
            error = %e,
            body = %String::from_utf8_lossy(body),
            "rejected JSON body"
        );
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

/// Take the numeric id out of the path, reporting a malformed one as a 400.
fn path_id(path: Result<Path<u64>, PathRejection>) -> Result<u64, AppError> {
    path.map(|Path(id)| id).map_err(|e| AppError::BadRequest {
        message: e.body_text(),
    })
}

/// Take a query string apart, reporting a malformed one as a 400.
fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    query.map(|Query(q)| q).map_err(|e| AppError::BadRequest {
        message: e.body_text(),
    })
}

/// `201 Created` with a `Location` header.
fn created<T: Serialize>(location: String, body: T) -> Response {
    (StatusCode::CREATED, [(header::LOCATION, location)], Json(body)).into_response()
}

/// Register a station.
async fn create_station(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, AppError> {
    let req: StationRequest = parse_json(&body)?;
    let station = state.subway.create_station(&req.name).await?;
    Ok(created(
        format!("/stations/{}", station.id),
        StationResponse::from(&station),
    ))
}

/// List all stations.
async fn list_stations(State(state): State<AppState>) -> Json<Vec<StationResponse>> {
    let stations = state.subway.stations().await;
    Json(stations.iter().map(StationResponse::from).collect())
}

/// Show one station.
async fn show_station(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<StationResponse>, AppError> {
    let station = state.subway.station(StationId(path_id(id)?)).await?;
    Ok(Json(StationResponse::from(&station)))
}

/// Remove a station no line uses.
async fn delete_station(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    state.subway.delete_station(StationId(path_id(id)?)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Create a line over its first section.
async fn create_line(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    let req: LineRequest = parse_json(&body)?;
    let line = state.subway.create_line(req.into()).await?;
    Ok(created(
        format!("/lines/{}", line.id),
        LineResponse::from(&line),
    ))
}

/// List all lines.
async fn list_lines(State(state): State<AppState>) -> Result<Json<Vec<LineResponse>>, AppError> {
    let lines = state.subway.lines().await?;
    Ok(Json(lines.iter().map(LineResponse::from).collect()))
}

/// Show one line, as a page or as JSON depending on the Accept header.
async fn show_line(
    State(state): State<AppState>,
    headers: HeaderMap,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Response, AppError> {
    let line = state.subway.line(LineId(path_id(id)?)).await?;

    if accepts_html(&headers) {
        let template = LineTemplate {
            line: LineView::from_details(&line),
        };
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;
        Ok(Html(html).into_response())
    } else {
        Ok(Json(LineResponse::from(&line)).into_response())
    }
}

/// Rename or recolour a line.
async fn update_line(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
    body: Bytes,
) -> Result<Json<LineResponse>, AppError> {
    let id = LineId(path_id(id)?);
    let req: LineUpdateRequest = parse_json(&body)?;
    let line = state.subway.update_line(id, &req.name, &req.color).await?;
    Ok(Json(LineResponse::from(&line)))
}

/// Delete a line with all its sections.
async fn delete_line(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    state.subway.delete_line(LineId(path_id(id)?)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// The sections of a line in travel order.
async fn show_sections(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<Vec<SectionResponse>>, AppError> {
    let sections = state.subway.line_sections(LineId(path_id(id)?)).await?;
    Ok(Json(sections.iter().map(SectionResponse::from).collect()))
}

/// Add a section to a line.
async fn add_section(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let id = LineId(path_id(id)?);
    let req: SectionRequest = parse_json(&body)?;
    state.subway.add_section(id, req.into()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Take a station off a line.
async fn remove_station(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
    remove: Result<Query<RemoveStationQuery>, QueryRejection>,
) -> Result<StatusCode, AppError> {
    let id = LineId(path_id(id)?);
    let remove = query_params(remove)?;
    state.subway.remove_station(id, remove.station_id).await?;
    Ok(StatusCode::OK)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        let message = e.to_string();
        match e {
            ServiceError::LineNotFound(_) | ServiceError::StationNotFound(_) => {
                AppError::NotFound { message }
            }
            ServiceError::Section(ref inner) if !inner.is_validation() => {
                AppError::Internal { message }
            }
            ServiceError::DuplicateLineName(_)
            | ServiceError::DuplicateStationName(_)
            | ServiceError::StationInUse(_)
            | ServiceError::Section(_) => AppError::BadRequest { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
