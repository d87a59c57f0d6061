// src/lib.rs

use axum::{
    routing::get,
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

pub mod entities {
    pub mod prelude;
    pub mod orders;
}

pub mod services {
    pub mod export;
    pub mod orders;
}

pub mod config;
pub mod errors;
pub mod models;
pub mod handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(hello_order_tracker))
        .route(
            "/api/orders",
            get(handlers::orders::list_orders).post(handlers::orders::create_order),
        )
        .route(
            "/api/orders/{id}",
            get(handlers::orders::get_order)
                .put(handlers::orders::update_order)
                .delete(handlers::orders::delete_order),
        )
        .route("/api/export/excel", get(handlers::export::export_excel))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn hello_order_tracker() -> &'static str {
    "Order tracker is running"
}
