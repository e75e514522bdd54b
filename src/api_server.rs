// Axum API Server Module
//
// Purpose: HTTP surface over the impact estimator
// Endpoints: POST /impact, POST /impact/batch, GET /impact/categories, GET /health

#[cfg(feature = "api")]
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};

#[cfg(feature = "api")]
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::TraceLayer,
};

#[cfg(feature = "api")]
use std::sync::Arc;

#[cfg(feature = "api")]
use crate::batch::BatchReport;

#[cfg(feature = "api")]
use crate::config::ServerConfig;

#[cfg(feature = "api")]
use crate::error::ImpactError;

#[cfg(feature = "api")]
use crate::estimator::{ImpactEstimator, ImpactReport};

#[cfg(feature = "api")]
use crate::factors::FactorTable;

#[cfg(feature = "api")]
use crate::request::{parse_batch, parse_item, parse_json};

// ============================================================================
// Application State
// ============================================================================

#[cfg(feature = "api")]
#[derive(Clone)]
pub struct AppState {
    pub factor_table: Arc<FactorTable>,
    pub max_batch_items: usize,
}

#[cfg(feature = "api")]
impl AppState {
    pub fn new(config: &ServerConfig) -> anyhow::Result<Self> {
        tracing::info!("Loading reference factor table...");
        let factor_table = config.load_factor_table()?;

        Ok(Self::with_table(factor_table, config.max_batch_items))
    }

    pub fn with_table(factor_table: FactorTable, max_batch_items: usize) -> Self {
        Self {
            factor_table: Arc::new(factor_table),
            max_batch_items,
        }
    }
}

// ============================================================================
// Router
// ============================================================================

#[cfg(feature = "api")]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Impact endpoints
        .route("/impact", post(estimate_impact))
        .route("/impact/batch", post(estimate_impact_batch))
        .route("/impact/categories", get(list_categories))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new()) // gzip compression
        .layer(CorsLayer::permissive()) // Allow all origins (adjust for production)
        .layer(TraceLayer::new_for_http()) // Request logging
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

#[cfg(feature = "api")]
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Reference factors per category
#[cfg(feature = "api")]
async fn list_categories(State(state): State<AppState>) -> Json<FactorTable> {
    Json(state.factor_table.as_ref().clone())
}

/// Single-item estimate
///
/// POST /impact  {"waste_type": "plastic", "weight_kg": 5}
///
/// The body is read as raw bytes so malformed JSON still gets an `{error}` body.
#[cfg(feature = "api")]
async fn estimate_impact(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ImpactReport>, AppError> {
    let value = parse_json(&body)?;
    let item = parse_item(&value)?;

    tracing::debug!("Estimating {} kg of '{}'", item.weight_kg, item.waste_type);

    let report = ImpactEstimator::new(&state.factor_table).estimate(&item.waste_type, item.weight_kg)?;
    Ok(Json(report))
}

/// Batch estimate
///
/// POST /impact/batch  {"items": [{"waste_type": "plastic", "weight_kg": 5}, ...]}
///
/// Per-item failures are reported inside the batch; only a non-sequence body
/// or an oversized batch fails the request.
#[cfg(feature = "api")]
async fn estimate_impact_batch(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<BatchReport>, AppError> {
    let value = parse_json(&body)?;
    let entries = parse_batch(&value)?;

    if entries.len() > state.max_batch_items {
        return Err(AppError::PayloadTooLarge(format!(
            "batch of {} items exceeds the limit of {}",
            entries.len(),
            state.max_batch_items
        )));
    }

    tracing::info!("Estimating batch of {} items", entries.len());

    // CPU-bound work: run in blocking thread pool
    let table = state.factor_table.clone();
    let report = tokio::task::spawn_blocking(move || {
        ImpactEstimator::new(&table).estimate_entries_parallel(&entries)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;

    Ok(Json(report))
}

// ============================================================================
// Error Handling
// ============================================================================

#[cfg(feature = "api")]
#[derive(Debug)]
enum AppError {
    Validation(ImpactError),
    PayloadTooLarge(String),
    Internal(String),
}

#[cfg(feature = "api")]
impl From<ImpactError> for AppError {
    fn from(e: ImpactError) -> Self {
        AppError::Validation(e)
    }
}

#[cfg(feature = "api")]
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            AppError::Validation(e) => {
                let status = match e {
                    ImpactError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
                    ImpactError::InvalidWeight { .. } | ImpactError::UnknownCategory { .. } => {
                        StatusCode::UNPROCESSABLE_ENTITY
                    }
                };
                (status, serde_json::json!({ "error": e.to_string(), "kind": e.kind() }))
            }
            AppError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                serde_json::json!({ "error": msg }),
            ),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, serde_json::json!({ "error": msg }))
            }
        };

        (status, Json(body)).into_response()
    }
}
