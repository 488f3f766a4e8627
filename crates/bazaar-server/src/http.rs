use crate::services::{orders, products};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use bazaar_api::{
    parse_page_params, parse_product_list_params, status_for, ApiError, ApiErrorCode,
    CreatedResponse, ListResponse,
};
use bazaar_model::{NewOrder, NewProduct};
use bazaar_store::{DocumentGateway, StoreError, StoreErrorCode};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::error;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn DocumentGateway>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route(
            "/products",
            post(create_product_handler).get(list_products_handler),
        )
        .route("/orders", post(create_order_handler))
        .route("/orders/{user_id}", get(list_user_orders_handler))
        .with_state(state)
}

fn api_error_response(err: &ApiError) -> Response {
    let status =
        StatusCode::from_u16(status_for(err)).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({"error": err}))).into_response()
}

fn store_error_to_api(err: StoreError) -> ApiError {
    let code = match err.code {
        StoreErrorCode::Validation => ApiErrorCode::ValidationFailed,
        StoreErrorCode::NotFound => ApiErrorCode::ProductNotFound,
        StoreErrorCode::Conflict => ApiErrorCode::InsufficientInventory,
        StoreErrorCode::Unavailable => ApiErrorCode::StoreUnavailable,
        StoreErrorCode::Internal => ApiErrorCode::Internal,
        _ => ApiErrorCode::Internal,
    };
    if err.code == StoreErrorCode::Internal {
        error!(message = %err.message, "request failed unexpectedly");
    }
    ApiError::new(code, err.message, json!({}))
}

async fn root_handler() -> Response {
    Json(json!({
        "message": "bazaar API is running",
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
    .into_response()
}

async fn health_handler(State(state): State<AppState>) -> Response {
    let payload = match state.gateway.ping().await {
        Ok(()) => json!({"status": "healthy", "database": "connected"}),
        Err(err) if err.code == StoreErrorCode::Unavailable => json!({
            "status": "degraded",
            "database": "disconnected",
            "message": "running without a document store",
        }),
        Err(err) => json!({
            "status": "unhealthy",
            "database": "disconnected",
            "error": err.message,
        }),
    };
    Json(payload).into_response()
}

async fn create_product_handler(
    State(state): State<AppState>,
    Json(input): Json<NewProduct>,
) -> Response {
    if let Err(err) = input.validate() {
        return api_error_response(&ApiError::validation_failed(err.to_string()));
    }
    match products::create_product(state.gateway.as_ref(), &input).await {
        Ok(id) => (StatusCode::CREATED, Json(CreatedResponse { id })).into_response(),
        Err(err) => api_error_response(&store_error_to_api(err)),
    }
}

async fn list_products_handler(
    State(state): State<AppState>,
    Query(query): Query<BTreeMap<String, String>>,
) -> Response {
    let params = match parse_product_list_params(&query) {
        Ok(params) => params,
        Err(err) => return api_error_response(&err),
    };
    let result = products::list_products(
        state.gateway.as_ref(),
        params.name.as_deref(),
        params.size.as_deref(),
        params.page.offset,
        params.page.limit,
    )
    .await;
    match result {
        Ok(window) => Json(ListResponse::for_window(
            window.items,
            params.page.offset,
            params.page.limit,
            window.total,
        ))
        .into_response(),
        Err(err) => api_error_response(&store_error_to_api(err)),
    }
}

async fn create_order_handler(
    State(state): State<AppState>,
    Json(input): Json<NewOrder>,
) -> Response {
    if let Err(err) = input.validate() {
        return api_error_response(&ApiError::validation_failed(err.to_string()));
    }
    match orders::create_order(state.gateway.as_ref(), &input).await {
        Ok(id) => (StatusCode::CREATED, Json(CreatedResponse { id })).into_response(),
        Err(err) => api_error_response(&store_error_to_api(err)),
    }
}

async fn list_user_orders_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<BTreeMap<String, String>>,
) -> Response {
    let page = match parse_page_params(&query) {
        Ok(page) => page,
        Err(err) => return api_error_response(&err),
    };
    let result =
        orders::list_orders_for_user(state.gateway.as_ref(), &user_id, page.offset, page.limit)
            .await;
    match result {
        Ok(window) => {
            Json(ListResponse::for_window(window.items, page.offset, page.limit, window.total))
                .into_response()
        }
        Err(err) => api_error_response(&store_error_to_api(err)),
    }
}
