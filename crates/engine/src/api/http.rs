//! HTTP routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use stockgate_domain::availability::StockQuery;
use stockgate_domain::{BasketLine, BasketLineId};

use crate::app::App;
use crate::use_cases::basket::BasketError;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route(
            "/api/baskets/{session_key}/items",
            get(list_basket_items).post(add_basket_item),
        )
        .route(
            "/api/baskets/{session_key}/items/{line_id}",
            axum::routing::delete(remove_basket_item),
        )
        .route("/api/stock/{product_number}", get(probe_stock))
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Basket
// =============================================================================

#[derive(Debug, Deserialize)]
struct AddItemRequest {
    product_number: String,
    #[serde(default = "default_quantity")]
    quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

#[derive(Debug, Serialize)]
struct AddItemResponse {
    added: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    line_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    basket_info_message: Option<String>,
}

async fn add_basket_item(
    State(app): State<Arc<App>>,
    Path(session_key): Path<String>,
    Json(request): Json<AddItemRequest>,
) -> Result<Json<AddItemResponse>, ApiError> {
    let outcome = app
        .use_cases
        .basket
        .add
        .execute(&session_key, &request.product_number, request.quantity)
        .await?;

    Ok(Json(AddItemResponse {
        added: outcome.added,
        line_id: outcome.line.as_ref().map(|line| line.id.to_uuid()),
        basket_info_message: outcome.message(),
    }))
}

async fn list_basket_items(
    State(app): State<Arc<App>>,
    Path(session_key): Path<String>,
) -> Result<Json<Vec<BasketLine>>, ApiError> {
    let lines = app.use_cases.basket.ops.list_lines(&session_key).await?;
    Ok(Json(lines))
}

async fn remove_basket_item(
    State(app): State<Arc<App>>,
    Path((session_key, line_id)): Path<(String, Uuid)>,
) -> Result<StatusCode, ApiError> {
    app.use_cases
        .basket
        .ops
        .remove_line(&session_key, BasketLineId::from_uuid(line_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Stock probe
// =============================================================================

#[derive(Debug, Deserialize)]
struct ProbeParams {
    #[serde(default = "default_quantity")]
    quantity: i64,
    #[serde(default)]
    session: String,
}

#[derive(Debug, Serialize)]
struct StockProbeResponse {
    product_number: String,
    allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Runs the availability check without writing anything; the message-only
/// surface for callers that render their own basket.
async fn probe_stock(
    State(app): State<Arc<App>>,
    Path(product_number): Path<String>,
    Query(params): Query<ProbeParams>,
) -> Json<StockProbeResponse> {
    let query = StockQuery::new(product_number.clone(), params.quantity, params.session);
    let decision = app.use_cases.basket.check.execute(&query).await;

    Json(StockProbeResponse {
        product_number,
        allowed: decision.allowed,
        message: decision.message(),
    })
}

// =============================================================================
// Errors
// =============================================================================

pub enum ApiError {
    NotFound,
    BadRequest(String),
    Internal(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::NotFound => {
                (axum::http::StatusCode::NOT_FOUND, "Not found").into_response()
            }
            ApiError::BadRequest(msg) => {
                (axum::http::StatusCode::BAD_REQUEST, msg).into_response()
            }
            ApiError::Internal(_) => (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error",
            )
                .into_response(),
        }
    }
}

impl From<crate::infrastructure::ports::RepoError> for ApiError {
    fn from(e: crate::infrastructure::ports::RepoError) -> Self {
        if e.is_not_found() {
            ApiError::NotFound
        } else {
            ApiError::Internal(e.to_string())
        }
    }
}

impl From<BasketError> for ApiError {
    fn from(e: BasketError) -> Self {
        match e {
            BasketError::Validation(inner) => ApiError::BadRequest(inner.to_string()),
            BasketError::Repo(inner) => inner.into(),
        }
    }
}
