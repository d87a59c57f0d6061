use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::errors::OrderError;
use crate::models::order::{CreateOrderRequest, OrderResponse, OrdersListResponse, UpdateOrderPatch};
use crate::services::orders::OrderService;
use crate::AppState;

pub async fn list_orders(
    State(state): State<AppState>,
) -> Result<Json<OrdersListResponse>, OrderError> {
    let orders = OrderService::new(state.db).list_orders().await?;
    Ok(Json(orders))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
) -> Result<Json<OrderResponse>, OrderError> {
    let order = OrderService::new(state.db).get_order(order_id).await?;
    Ok(Json(order))
}

pub async fn create_order(
    State(state): State<AppState>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderResponse>), OrderError> {
    let Json(payload) = payload?;
    let order = OrderService::new(state.db).create_order(payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn update_order(
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
    payload: Result<Json<UpdateOrderPatch>, JsonRejection>,
) -> Result<Json<OrderResponse>, OrderError> {
    let Json(patch) = payload?;
    let order = OrderService::new(state.db)
        .update_order(order_id, patch)
        .await?;
    Ok(Json(order))
}

pub async fn delete_order(
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
) -> Result<StatusCode, OrderError> {
    OrderService::new(state.db).delete_order(order_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
