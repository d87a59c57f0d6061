use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Local;

use crate::errors::OrderError;
use crate::services::export::{export_filename, export_orders, XLSX_CONTENT_TYPE};
use crate::services::orders::OrderService;
use crate::AppState;

pub async fn export_excel(State(state): State<AppState>) -> Result<Response, OrderError> {
    let orders = OrderService::new(state.db).list_orders().await?;
    let bytes = export_orders(&orders)?;
    let filename = export_filename(Local::now().naive_local());

    tracing::info!("Exported {} orders as {}", orders.len(), filename);

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response())
}
