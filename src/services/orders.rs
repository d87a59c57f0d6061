//! Order record manager
//!
//! Validates raw request fields, derives `total_price`, and reads/writes the
//! `orders` table through an injected database handle.
//!
//! Updates are read-then-write without any version check, so two concurrent
//! updates to the same order race and the last one wins.

use chrono::{Local, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait, Order,
    QueryOrder, Set,
};

use crate::entities::{orders, prelude::*};
use crate::errors::OrderError;
use crate::models::order::{
    CreateOrderRequest, OrderResponse, OrderStatus, UpdateOrderPatch, DATE_FORMAT,
};

#[derive(Clone)]
pub struct OrderService {
    db: DatabaseConnection,
}

impl OrderService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All orders, oldest id first.
    pub async fn list_orders(&self) -> Result<Vec<OrderResponse>, OrderError> {
        let orders = Orders::find()
            .order_by(orders::Column::Id, Order::Asc)
            .all(&self.db)
            .await?;

        Ok(orders.into_iter().map(OrderResponse::from).collect())
    }

    pub async fn get_order(&self, id: i32) -> Result<OrderResponse, OrderError> {
        Ok(self.find_model(id).await?.into())
    }

    pub async fn create_order(
        &self,
        payload: CreateOrderRequest,
    ) -> Result<OrderResponse, OrderError> {
        let order_number = required(payload.order_number, "order_number")?;
        let rim_quantity = required(payload.rim_quantity, "rim_quantity")?;
        let city = required(payload.city, "city")?;
        let document_type = required(payload.document_type, "document_type")?;
        let (unit_price, total_price) =
            derive_prices(required(payload.unit_price, "unit_price")?, rim_quantity)?;

        let date = parse_optional_date("date", payload.date.as_deref())?
            .unwrap_or_else(|| Local::now().date_naive());
        let entry_date = parse_optional_date("entry_date", payload.entry_date.as_deref())?;
        let print_deadline =
            parse_optional_date("print_deadline", payload.print_deadline.as_deref())?;
        let cek_date = parse_optional_date("cek_date", payload.cek_date.as_deref())?;
        let finish_date = parse_optional_date("finish_date", payload.finish_date.as_deref())?;

        let status = payload
            .status
            .unwrap_or_else(|| OrderStatus::Masuk.to_string());
        note_unknown_status(&status);

        let new_order = orders::ActiveModel {
            order_number: Set(order_number.clone()),
            date: Set(date),
            rim_quantity: Set(rim_quantity),
            city: Set(city),
            document_type: Set(document_type),
            unit_price: Set(unit_price),
            total_price: Set(total_price),
            entry_date: Set(entry_date),
            print_deadline: Set(print_deadline),
            cek_date: Set(cek_date),
            finish_date: Set(finish_date),
            status: Set(status),
            notes: Set(Some(payload.notes.unwrap_or_default())),
            ..Default::default()
        };

        let created = new_order
            .insert(&self.db)
            .await
            .map_err(|e| OrderError::from_write(e, &order_number))?;

        tracing::info!("Created order {} (id {})", created.order_number, created.id);
        Ok(created.into())
    }

    pub async fn update_order(
        &self,
        id: i32,
        patch: UpdateOrderPatch,
    ) -> Result<OrderResponse, OrderError> {
        let existing = self.find_model(id).await?;

        // Parse every date up front so a malformed one leaves the row untouched
        let date = parse_optional_date("date", patch.date.as_deref())?;
        let entry_date = parse_optional_date("entry_date", patch.entry_date.as_deref())?;
        let print_deadline =
            parse_optional_date("print_deadline", patch.print_deadline.as_deref())?;
        let cek_date = parse_optional_date("cek_date", patch.cek_date.as_deref())?;
        let finish_date = parse_optional_date("finish_date", patch.finish_date.as_deref())?;

        let rim_quantity = patch.rim_quantity.unwrap_or(existing.rim_quantity);
        let (unit_price, total_price) = derive_prices(
            patch.unit_price.unwrap_or(existing.unit_price),
            rim_quantity,
        )?;
        let order_number = patch
            .order_number
            .unwrap_or_else(|| existing.order_number.clone());

        let mut active_model = existing.into_active_model();
        active_model.order_number = Set(order_number.clone());
        active_model.rim_quantity = Set(rim_quantity);
        active_model.unit_price = Set(unit_price);
        active_model.total_price = Set(total_price);

        if let Some(city) = patch.city {
            active_model.city = Set(city);
        }
        if let Some(document_type) = patch.document_type {
            active_model.document_type = Set(document_type);
        }
        if let Some(status) = patch.status {
            note_unknown_status(&status);
            active_model.status = Set(status);
        }
        if let Some(notes) = patch.notes {
            active_model.notes = Set(Some(notes));
        }

        if let Some(date) = date {
            active_model.date = Set(date);
        }
        if let Some(entry_date) = entry_date {
            active_model.entry_date = Set(Some(entry_date));
        }
        if let Some(print_deadline) = print_deadline {
            active_model.print_deadline = Set(Some(print_deadline));
        }
        if let Some(cek_date) = cek_date {
            active_model.cek_date = Set(Some(cek_date));
        }
        if let Some(finish_date) = finish_date {
            active_model.finish_date = Set(Some(finish_date));
        }

        let updated = active_model
            .update(&self.db)
            .await
            .map_err(|e| OrderError::from_update(e, id, &order_number))?;

        tracing::info!("Updated order {} (id {})", updated.order_number, updated.id);
        Ok(updated.into())
    }

    pub async fn delete_order(&self, id: i32) -> Result<(), OrderError> {
        let existing = self.find_model(id).await?;
        existing.delete(&self.db).await?;

        tracing::info!("Deleted order {}", id);
        Ok(())
    }

    async fn find_model(&self, id: i32) -> Result<orders::Model, OrderError> {
        Orders::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(OrderError::NotFound(id))
    }
}

/// Scale of the `decimal(16,4)` price columns
pub const PRICE_SCALE: u32 = 4;

/// Exclusive upper bound of a `decimal(16,4)` value (12 integer digits)
pub fn price_limit() -> Decimal {
    Decimal::from(1_000_000_000_000_i64)
}

/// Normalise `unit_price` to the column scale and derive `total_price` from it.
///
/// Rounds half away from zero, like Postgres `numeric` on store.
pub fn derive_prices(
    unit_price: Decimal,
    rim_quantity: i32,
) -> Result<(Decimal, Decimal), OrderError> {
    let unit_price =
        unit_price.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    let total_price = unit_price
        .checked_mul(Decimal::from(rim_quantity))
        .filter(|total| total.abs() < price_limit() && unit_price.abs() < price_limit())
        .ok_or_else(|| {
            OrderError::Validation("unit_price * rim_quantity out of range".to_string())
        })?;

    Ok((unit_price, total_price))
}

/// Parse a `YYYY-MM-DD` field. Absent and empty values both mean "not given".
pub fn parse_optional_date(
    field: &str,
    raw: Option<&str>,
) -> Result<Option<NaiveDate>, OrderError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, DATE_FORMAT)
            .map(Some)
            .map_err(|_| {
                OrderError::Validation(format!(
                    "field '{}' must be a YYYY-MM-DD date, got '{}'",
                    field, value
                ))
            }),
    }
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, OrderError> {
    value.ok_or_else(|| OrderError::missing_field(field))
}

fn note_unknown_status(status: &str) {
    if status.parse::<OrderStatus>().is_err() {
        tracing::debug!("Accepting unrecognised order status '{}'", status);
    }
}
