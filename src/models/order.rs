//! Request/response shapes for the orders API
//!
//! Dates travel as `YYYY-MM-DD` strings in both directions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entities::orders;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Body of `POST /api/orders`.
///
/// Every field is optional on the wire so that a missing required field can
/// be reported by name instead of as a generic deserialization failure.
/// `id` and `total_price` are not accepted; unknown keys are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub order_number: Option<String>,
    pub date: Option<String>,
    pub rim_quantity: Option<i32>,
    pub city: Option<String>,
    pub document_type: Option<String>,
    pub unit_price: Option<Decimal>,
    pub entry_date: Option<String>,
    pub print_deadline: Option<String>,
    pub cek_date: Option<String>,
    pub finish_date: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// Body of `PUT /api/orders/{id}`.
///
/// Plain fields fall back to the stored value when absent. Date fields are
/// only applied when present and non-empty, so an empty string never clears
/// a stored date.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOrderPatch {
    pub order_number: Option<String>,
    pub rim_quantity: Option<i32>,
    pub city: Option<String>,
    pub document_type: Option<String>,
    pub unit_price: Option<Decimal>,
    pub status: Option<String>,
    pub notes: Option<String>,

    pub date: Option<String>,
    pub entry_date: Option<String>,
    pub print_deadline: Option<String>,
    pub cek_date: Option<String>,
    pub finish_date: Option<String>,
}

/// Canonical serialized order, shared by the listing and the export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: i32,
    pub order_number: String,
    pub date: String,
    pub rim_quantity: i32,
    pub city: String,
    pub document_type: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    pub entry_date: Option<String>,
    pub print_deadline: Option<String>,
    pub cek_date: Option<String>,
    pub finish_date: Option<String>,
    pub status: String,
    pub notes: Option<String>,
}

/// Column names of [`OrderResponse`] in serialization order.
pub const ORDER_FIELDS: [&str; 14] = [
    "id",
    "order_number",
    "date",
    "rim_quantity",
    "city",
    "document_type",
    "unit_price",
    "total_price",
    "entry_date",
    "print_deadline",
    "cek_date",
    "finish_date",
    "status",
    "notes",
];

impl From<orders::Model> for OrderResponse {
    fn from(model: orders::Model) -> Self {
        let fmt = |d: chrono::NaiveDate| d.format(DATE_FORMAT).to_string();

        OrderResponse {
            id: model.id,
            order_number: model.order_number,
            date: fmt(model.date),
            rim_quantity: model.rim_quantity,
            city: model.city,
            document_type: model.document_type,
            unit_price: model.unit_price,
            total_price: model.total_price,
            entry_date: model.entry_date.map(fmt),
            print_deadline: model.print_deadline.map(fmt),
            cek_date: model.cek_date.map(fmt),
            finish_date: model.finish_date.map(fmt),
            status: model.status,
            notes: model.notes,
        }
    }
}

pub type OrdersListResponse = Vec<OrderResponse>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Conventional workflow stages of an order
/// Status progresses: masuk → proses → cek → finish
///
/// The stored `status` column stays free text; this enum only recognises
/// the known values and is never used to reject input or enforce the order
/// of transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    /// Received at the counter
    Masuk,
    /// Being printed
    Proses,
    /// Quality check
    Cek,
    /// Done
    Finish,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Masuk => write!(f, "masuk"),
            OrderStatus::Proses => write!(f, "proses"),
            OrderStatus::Cek => write!(f, "cek"),
            OrderStatus::Finish => write!(f, "finish"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "masuk" => Ok(OrderStatus::Masuk),
            "proses" => Ok(OrderStatus::Proses),
            "cek" => Ok(OrderStatus::Cek),
            "finish" => Ok(OrderStatus::Finish),
            _ => Err(format!("Unknown order status: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn sample_model() -> orders::Model {
        orders::Model {
            id: 3,
            order_number: "A1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            rim_quantity: 10,
            city: "Bandung".to_string(),
            document_type: "Invoice".to_string(),
            unit_price: dec!(5.0),
            total_price: dec!(50.0),
            entry_date: None,
            print_deadline: NaiveDate::from_ymd_opt(2024, 3, 12),
            cek_date: None,
            finish_date: None,
            status: "masuk".to_string(),
            notes: Some(String::new()),
        }
    }

    #[test]
    fn test_response_formats_dates() {
        let response = OrderResponse::from(sample_model());
        assert_eq!(response.date, "2024-03-09");
        assert_eq!(response.print_deadline.as_deref(), Some("2024-03-12"));
        assert_eq!(response.entry_date, None);
    }

    #[test]
    fn test_response_json_shape() {
        let json = serde_json::to_value(OrderResponse::from(sample_model())).unwrap();
        let obj = json.as_object().unwrap();

        assert_eq!(obj.len(), ORDER_FIELDS.len());
        for field in ORDER_FIELDS {
            assert!(obj.contains_key(field), "missing {}", field);
        }
        assert_eq!(json["total_price"], serde_json::json!(50.0));
        assert!(json["cek_date"].is_null());
    }

    #[test]
    fn test_create_request_ignores_total_price() {
        let req: CreateOrderRequest = serde_json::from_value(serde_json::json!({
            "order_number": "A1",
            "unit_price": 5.5,
            "total_price": 999
        }))
        .unwrap();
        assert_eq!(req.unit_price, Some(dec!(5.5)));
        assert_eq!(req.rim_quantity, None);
    }

    #[test]
    fn test_status_parse_and_display() {
        assert_eq!("Proses".parse::<OrderStatus>(), Ok(OrderStatus::Proses));
        assert_eq!(OrderStatus::Cek.to_string(), "cek");
        assert!("shipped".parse::<OrderStatus>().is_err());
    }
}
