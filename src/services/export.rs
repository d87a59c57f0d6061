//! Spreadsheet export of the order list
//!
//! The table is laid out first (headers, cells, column widths) and then
//! rendered into an in-memory xlsx workbook.

use chrono::NaiveDateTime;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, XlsxError};

use crate::models::order::{OrderResponse, ORDER_FIELDS};

pub const SHEET_NAME: &str = "Orders";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const HEADER_FILL: u32 = 0xD7E4BC;
const COLUMN_PADDING: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum ExportCell {
    Number(f64),
    Text(String),
    Empty,
}

impl ExportCell {
    fn text(value: Option<&str>) -> Self {
        match value {
            Some(v) => ExportCell::Text(v.to_string()),
            None => ExportCell::Empty,
        }
    }

    /// Width of the value as it appears in the sheet, in characters.
    fn display_len(&self) -> usize {
        match self {
            ExportCell::Number(n) => n.to_string().chars().count(),
            ExportCell::Text(s) => s.chars().count(),
            ExportCell::Empty => 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportTable {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<ExportCell>>,
    pub widths: Vec<usize>,
}

impl ExportTable {
    pub fn from_orders(orders: &[OrderResponse]) -> Self {
        let headers = ORDER_FIELDS.to_vec();
        let rows: Vec<Vec<ExportCell>> = orders.iter().map(order_row).collect();

        let widths = headers
            .iter()
            .enumerate()
            .map(|(col, header)| {
                let widest_value = rows
                    .iter()
                    .map(|row| row[col].display_len())
                    .max()
                    .unwrap_or(0);
                widest_value.max(header.len()) + COLUMN_PADDING
            })
            .collect();

        Self {
            headers,
            rows,
            widths,
        }
    }

    /// Header plus data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len() + 1
    }
}

// Cell order must match ORDER_FIELDS
fn order_row(order: &OrderResponse) -> Vec<ExportCell> {
    vec![
        ExportCell::Number(order.id as f64),
        ExportCell::Text(order.order_number.clone()),
        ExportCell::Text(order.date.clone()),
        ExportCell::Number(order.rim_quantity as f64),
        ExportCell::Text(order.city.clone()),
        ExportCell::Text(order.document_type.clone()),
        ExportCell::Number(order.unit_price.to_f64().unwrap_or(0.0)),
        ExportCell::Number(order.total_price.to_f64().unwrap_or(0.0)),
        ExportCell::text(order.entry_date.as_deref()),
        ExportCell::text(order.print_deadline.as_deref()),
        ExportCell::text(order.cek_date.as_deref()),
        ExportCell::text(order.finish_date.as_deref()),
        ExportCell::Text(order.status.clone()),
        ExportCell::text(order.notes.as_deref()),
    ]
}

/// Render the table into a complete xlsx document held in memory.
pub fn render_xlsx(table: &ExportTable) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let header_format = Format::new()
        .set_bold()
        .set_text_wrap()
        .set_align(FormatAlign::Top)
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_border(FormatBorder::Thin);

    for (col, header) in table.headers.iter().enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, *header, &header_format)?;
        worksheet.set_column_width(col, table.widths[col as usize] as f64)?;
    }

    for (i, row) in table.rows.iter().enumerate() {
        let row_num = (i + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                ExportCell::Number(n) => {
                    worksheet.write_number(row_num, col, *n)?;
                }
                ExportCell::Text(s) => {
                    worksheet.write_string(row_num, col, s)?;
                }
                ExportCell::Empty => {}
            }
        }
    }

    workbook.save_to_buffer()
}

pub fn export_orders(orders: &[OrderResponse]) -> Result<Vec<u8>, XlsxError> {
    let table = ExportTable::from_orders(orders);
    tracing::debug!("Exporting {} orders to xlsx ({} rows)", orders.len(), table.row_count());
    render_xlsx(&table)
}

/// `orders_export_<YYYYMMDD>_<HHMMSS>.xlsx`
pub fn export_filename(now: NaiveDateTime) -> String {
    format!("orders_export_{}.xlsx", now.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn order(id: i32, order_number: &str, notes: Option<&str>) -> OrderResponse {
        OrderResponse {
            id,
            order_number: order_number.to_string(),
            date: "2024-05-01".to_string(),
            rim_quantity: 12,
            city: "Surabaya".to_string(),
            document_type: "Surat Jalan".to_string(),
            unit_price: dec!(1500),
            total_price: dec!(18000),
            entry_date: Some("2024-05-02".to_string()),
            print_deadline: None,
            cek_date: None,
            finish_date: None,
            status: "proses".to_string(),
            notes: notes.map(str::to_string),
        }
    }

    #[test]
    fn test_table_has_header_plus_one_row_per_order() {
        let orders = vec![order(1, "A1", None), order(2, "A2", Some("rush"))];
        let table = ExportTable::from_orders(&orders);

        assert_eq!(table.row_count(), 3);
        assert_eq!(table.headers, ORDER_FIELDS.to_vec());
        assert!(table.rows.iter().all(|r| r.len() == ORDER_FIELDS.len()));
        assert_eq!(table.rows[1][1], ExportCell::Text("A2".to_string()));
        assert_eq!(table.rows[0][9], ExportCell::Empty);
    }

    #[test]
    fn test_column_widths() {
        let orders = vec![order(1, "A-LONG-ORDER-NUMBER-01", Some("x"))];
        let table = ExportTable::from_orders(&orders);

        // order_number: value wider than header
        assert_eq!(table.widths[1], "A-LONG-ORDER-NUMBER-01".len() + 2);
        // id: header wider than value
        assert_eq!(table.widths[0], "id".len() + 2);
        // print_deadline: only header, all values empty
        assert_eq!(table.widths[9], "print_deadline".len() + 2);
        // document_type: header wider than "Surat Jalan"
        assert_eq!(table.widths[5], "document_type".len() + 2);
    }

    #[test]
    fn test_empty_export_has_header_only() {
        let table = ExportTable::from_orders(&[]);
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.widths[6], "unit_price".len() + 2);
    }

    #[test]
    fn test_render_produces_zip_container() {
        let bytes = export_orders(&[order(1, "A1", None)]).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_export_filename() {
        let now = NaiveDate::from_ymd_opt(2024, 7, 3)
            .unwrap()
            .and_hms_opt(9, 5, 1)
            .unwrap();
        assert_eq!(export_filename(now), "orders_export_20240703_090501.xlsx");
    }
}
