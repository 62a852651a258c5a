//! Order CRUD endpoints.

use std::sync::Arc;

use application::{
    CreateItemRequest, CreateOrder, DeleteOrder, GetOrderById, GetOrders, OrderHandlers,
    OrderView, UpdateOrder,
};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use common::OrderId;
use serde::{Deserialize, Serialize};
use storage::OrderRepository;

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<R: OrderRepository> {
    pub handlers: OrderHandlers<R>,
}

// -- Request types --

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub customer_name: String,
    #[serde(default)]
    pub items: Vec<CreateItemRequest>,
}

#[derive(Deserialize)]
pub struct UpdateOrderRequest {
    pub id: uuid::Uuid,
    pub customer_name: String,
    #[serde(default)]
    pub items: Vec<CreateItemRequest>,
}

#[derive(Deserialize, Debug)]
pub struct ListOrdersParams {
    pub customer_name: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

// -- Response types --

#[derive(Serialize)]
pub struct OrderCreatedResponse {
    pub order_id: OrderId,
}

// -- Handlers --

/// POST /orders — create a new order with its items.
#[tracing::instrument(skip(state, req))]
pub async fn create<R: OrderRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderCreatedResponse>), ApiError> {
    let order_id = state
        .handlers
        .create_order(CreateOrder::new(req.customer_name, req.items))
        .await?;

    Ok((StatusCode::CREATED, Json(OrderCreatedResponse { order_id })))
}

/// GET /orders — list orders with optional filters.
#[tracing::instrument(skip(state))]
pub async fn list<R: OrderRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    Query(params): Query<ListOrdersParams>,
) -> Result<Json<Vec<OrderView>>, ApiError> {
    let views = state
        .handlers
        .get_orders(GetOrders {
            customer_name: params.customer_name,
            start_date: params.start_date,
            end_date: params.end_date,
        })
        .await?;

    Ok(Json(views))
}

/// GET /orders/:id — load a single order by ID.
#[tracing::instrument(skip(state))]
pub async fn get<R: OrderRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<Json<OrderView>, ApiError> {
    let order_id = parse_order_id(&id)?;
    let view = state
        .handlers
        .get_order_by_id(GetOrderById::new(order_id))
        .await?;

    Ok(Json(view))
}

/// PUT /orders/:id — replace an order's customer name and items.
///
/// The path ID must match the body ID.
#[tracing::instrument(skip(state, req))]
pub async fn update<R: OrderRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateOrderRequest>,
) -> Result<StatusCode, ApiError> {
    let order_id = parse_order_id(&id)?;
    if order_id.as_uuid() != req.id {
        return Err(ApiError::BadRequest(
            "Order ID in path does not match body".to_string(),
        ));
    }

    state
        .handlers
        .update_order(UpdateOrder::new(order_id, req.customer_name, req.items))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /orders/:id — delete an order. No content, even when absent.
#[tracing::instrument(skip(state))]
pub async fn delete<R: OrderRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let order_id = parse_order_id(&id)?;
    state
        .handlers
        .delete_order(DeleteOrder::new(order_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

fn parse_order_id(id: &str) -> Result<OrderId, ApiError> {
    let uuid = uuid::Uuid::parse_str(id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid ID format: {e}")))?;
    Ok(OrderId::from_uuid(uuid))
}
