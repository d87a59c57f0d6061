use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::models::order::ErrorResponse;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Order number {0} already exists")]
    DuplicateOrderNumber(String),

    #[error("Order {0} not found")]
    NotFound(i32),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Export failed: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),
}

impl OrderError {
    pub fn missing_field(field: &str) -> Self {
        OrderError::Validation(format!("missing required field '{}'", field))
    }

    /// Map a failed insert/update onto the duplicate-number variant when the
    /// store rejected it for the unique index on `order_number`.
    pub fn from_write(err: DbErr, order_number: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                OrderError::DuplicateOrderNumber(order_number.to_string())
            }
            _ => OrderError::Database(err),
        }
    }

    /// Like [`OrderError::from_write`], but a row that vanished between the
    /// read and the write is reported as not found.
    pub fn from_update(err: DbErr, id: i32, order_number: &str) -> Self {
        match err {
            DbErr::RecordNotUpdated => OrderError::NotFound(id),
            err => OrderError::from_write(err, order_number),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            OrderError::Validation(_) => StatusCode::BAD_REQUEST,
            OrderError::DuplicateOrderNumber(_) => StatusCode::CONFLICT,
            OrderError::NotFound(_) => StatusCode::NOT_FOUND,
            OrderError::Database(_) | OrderError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for OrderError {
    fn from(rejection: JsonRejection) -> Self {
        OrderError::Validation(rejection.body_text())
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid BIND_ADDR '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            OrderError::missing_field("city").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            OrderError::DuplicateOrderNumber("A1".to_string()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(OrderError::NotFound(7).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            OrderError::Database(DbErr::Custom("boom".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_missing_field_names_field() {
        let err = OrderError::missing_field("unit_price");
        assert!(err.to_string().contains("unit_price"));
    }

    #[test]
    fn test_vanished_row_on_update_is_not_found() {
        let err = OrderError::from_update(DbErr::RecordNotUpdated, 5, "A1");
        assert!(matches!(err, OrderError::NotFound(5)));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err = OrderError::from_update(DbErr::Custom("disk full".to_string()), 5, "A1");
        assert!(matches!(err, OrderError::Database(_)));
    }

    #[test]
    fn test_non_unique_db_error_stays_generic() {
        let err = OrderError::from_write(DbErr::Custom("disk full".to_string()), "A1");
        assert!(matches!(err, OrderError::Database(_)));
    }
}
