// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use ceutro::{FieldErrors, FieldMap};
use ceutro_api::{
    AllocationResponse, ApiError, CatalogCache, CatalogFixture, CreateAllocationRequest, FormKind,
    FormPageResponse, InMemoryBackend, Notice, PageQuery, PageResponse, PageVariant,
    RefreshCatalogResponse, SubmitFormRequest, SubmitFormResponse, UpdateAllocationRequest,
    create_allocation, export_page, get_allocation, render_form, render_page, submit_form,
    update_allocation,
};
use ceutro_domain::RecordId;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Ceutro Server - HTTP host for the Ceutro sales-force dashboard
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Path to a JSON catalog used to seed the in-memory backend. If not
    /// provided, a built-in demo catalog is used.
    #[arg(short, long)]
    catalog: Option<PathBuf>,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// Catalog cache in front of the backend.
    cache: Arc<CatalogCache<InMemoryBackend>>,
}

impl AppState {
    fn new(fixture: CatalogFixture) -> Self {
        Self {
            cache: Arc::new(CatalogCache::new(Arc::new(InMemoryBackend::new(fixture)))),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    /// Always `ok`.
    status: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
    /// How the dashboard should present the error.
    notice: Notice,
    /// Field errors of a rejected form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    errors: Option<FieldErrors>,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The API error.
    error: ApiError,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let errors: Option<FieldErrors> = match &self.error {
            ApiError::ValidationFailed { errors } => Some(errors.clone()),
            _ => None,
        };
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.error.to_string(),
            notice: self.error.notice(),
            errors,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::ValidationFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Network { .. } => {
                warn!(error = %err, "Backend unavailable");
                StatusCode::BAD_GATEWAY
            }
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self { status, error: err }
    }
}

/// Handler for GET `/api/health`.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

/// Handler for GET `/api/pages/{page}`.
///
/// Renders any page variant. Table pages honour search, filter and sort
/// from the query string.
async fn handle_get_page(
    AxumState(app_state): AxumState<AppState>,
    Path(page): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageResponse>, HttpError> {
    info!(page = %page, "Handling get_page request");

    let variant: PageVariant = PageVariant::from_name(&page, query.id)?;
    let response: PageResponse = render_page(&app_state.cache, variant, &query).await?;

    Ok(Json(response))
}

/// Handler for GET `/api/pages/{page}/export`.
async fn handle_export_page(
    AxumState(app_state): AxumState<AppState>,
    Path(page): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Response, HttpError> {
    info!(page = %page, "Handling export_page request");

    let variant: PageVariant = PageVariant::from_name(&page, query.id)?;
    let csv: String = export_page(&app_state.cache, variant, &query).await?;

    Ok((
        [
            (header::CONTENT_TYPE, String::from("text/csv; charset=utf-8")),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{page}.csv\""),
            ),
        ],
        csv,
    )
        .into_response())
}

/// Handler for GET `/api/forms/{form}`.
async fn handle_get_form(
    AxumState(app_state): AxumState<AppState>,
    Path(form): Path<String>,
) -> Result<Json<FormPageResponse>, HttpError> {
    let kind: FormKind = FormKind::parse(&form)?;
    let response: FormPageResponse =
        render_form(&app_state.cache, kind, FieldMap::new()).await?;

    Ok(Json(response))
}

/// Handler for POST `/api/forms/{form}`.
///
/// Validates the submitted values and creates the record.
async fn handle_submit_form(
    AxumState(app_state): AxumState<AppState>,
    Path(form): Path<String>,
    Json(req): Json<SubmitFormRequest>,
) -> Result<(StatusCode, Json<SubmitFormResponse>), HttpError> {
    info!(form = %form, fields = req.values.len(), "Handling submit_form request");

    let kind: FormKind = FormKind::parse(&form)?;
    let response: SubmitFormResponse = submit_form(&app_state.cache, kind, req.values).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/api/allocations/{user_id}`.
async fn handle_get_allocation(
    AxumState(app_state): AxumState<AppState>,
    Path(user_id): Path<RecordId>,
) -> Result<Json<AllocationResponse>, HttpError> {
    let response: AllocationResponse = get_allocation(&app_state.cache, user_id).await?;
    Ok(Json(response))
}

/// Handler for POST `/api/allocations`.
async fn handle_create_allocation(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateAllocationRequest>,
) -> Result<(StatusCode, Json<AllocationResponse>), HttpError> {
    info!(user_id = req.user_id, "Handling create_allocation request");

    let response: AllocationResponse = create_allocation(&app_state.cache, req).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for PATCH `/api/allocations/{user_id}`.
async fn handle_update_allocation(
    AxumState(app_state): AxumState<AppState>,
    Path(user_id): Path<RecordId>,
    Json(req): Json<UpdateAllocationRequest>,
) -> Result<Json<AllocationResponse>, HttpError> {
    info!(user_id, "Handling update_allocation request");

    let response: AllocationResponse = update_allocation(&app_state.cache, user_id, req).await?;

    Ok(Json(response))
}

/// Handler for POST `/api/catalog/refresh`.
async fn handle_refresh_catalog(
    AxumState(app_state): AxumState<AppState>,
) -> Json<RefreshCatalogResponse> {
    app_state.cache.refresh().await;
    info!("Catalog cache refreshed");
    Json(RefreshCatalogResponse {
        message: String::from("Catalog refreshed"),
    })
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handle_health))
        .route("/api/pages/{page}", get(handle_get_page))
        .route("/api/pages/{page}/export", get(handle_export_page))
        .route(
            "/api/forms/{form}",
            get(handle_get_form).post(handle_submit_form),
        )
        .route("/api/allocations", post(handle_create_allocation))
        .route(
            "/api/allocations/{user_id}",
            get(handle_get_allocation).patch(handle_update_allocation),
        )
        .route("/api/catalog/refresh", post(handle_refresh_catalog))
        .with_state(app_state)
}

/// Loads the catalog fixture named on the command line, or the demo catalog.
fn load_fixture(path: Option<&PathBuf>) -> Result<CatalogFixture, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        info!("Using built-in demo catalog");
        return Ok(CatalogFixture::demo());
    };
    info!("Loading catalog from: {}", path.display());
    let json: String = std::fs::read_to_string(path)?;
    Ok(CatalogFixture::from_json(&json)?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Ceutro Server");

    let fixture: CatalogFixture = load_fixture(args.catalog.as_ref())?;
    let app: Router = build_router(AppState::new(fixture));

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
