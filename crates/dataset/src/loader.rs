use crate::error::DatasetError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use core_types::{Transaction, TransactionTable, UNKNOWN_CUSTOMER};
use csv::StringRecord;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Timestamp formats accepted for `InvoiceDate`, tried in order. Covers the
/// ISO forms written by our own converter alongside the `m/d/Y H:M` style
/// found in spreadsheet exports of the raw data.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Header names of the columns a usable dataset must carry.
const REQUIRED_COLUMNS: &[&str] = &[
    "InvoiceNo",
    "InvoiceDate",
    "Quantity",
    "UnitPrice",
    "CustomerID",
];

/// Loads and normalizes the transaction table from a CSV file.
///
/// A missing or unreadable file is `DataUnavailable`; a header without the
/// required columns is `SchemaError`. Both are fatal — the caller decides
/// whether to exit, but never receives a quietly empty table.
pub fn load_table(path: impl AsRef<Path>) -> Result<TransactionTable, DatasetError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DatasetError::DataUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "loading transaction dataset");
    read_table(file)
}

/// Builds a normalized `TransactionTable` from CSV data.
///
/// Normalization rules, applied per row:
/// - `InvoiceDate` must parse against one of the accepted formats; rows that
///   fail are dropped and the total dropped count is logged at WARN.
/// - `Quantity` and `UnitPrice` coerce to `0` / `0.0` when missing or
///   malformed (spreadsheet exports write integers as `6.0`; those parse).
/// - A blank `CustomerID` becomes the `UNKNOWN_CUSTOMER` sentinel so
///   distinct-customer counts stay honest.
pub fn read_table<R: Read>(reader: R) -> Result<TransactionTable, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let header = csv_reader.headers()?.clone();
    let columns = Columns::resolve(&header)?;

    let mut rows = Vec::new();
    let mut dropped = 0usize;
    for record in csv_reader.records() {
        let record = record?;
        match columns.parse_row(&record) {
            Some(tx) => rows.push(tx),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        tracing::warn!(dropped, "dropped rows with unparseable invoice dates");
    }
    tracing::debug!(rows = rows.len(), "dataset normalized");

    Ok(TransactionTable::from_rows(rows))
}

/// Resolved header positions for one CSV source. Optional columns default to
/// empty strings when the source omits them entirely.
struct Columns {
    invoice_no: usize,
    stock_code: Option<usize>,
    description: Option<usize>,
    quantity: usize,
    unit_price: usize,
    invoice_date: usize,
    customer_id: usize,
    country: Option<usize>,
}

impl Columns {
    fn resolve(header: &StringRecord) -> Result<Self, DatasetError> {
        let find = |name: &str| header.iter().position(|h| h.trim() == name);
        let require = |name: &'static str| {
            find(name).ok_or_else(|| DatasetError::SchemaError(name.to_string()))
        };

        // Report the first missing required column by declaration order.
        for &name in REQUIRED_COLUMNS {
            require(name)?;
        }

        Ok(Self {
            invoice_no: require("InvoiceNo")?,
            stock_code: find("StockCode"),
            description: find("Description"),
            quantity: require("Quantity")?,
            unit_price: require("UnitPrice")?,
            invoice_date: require("InvoiceDate")?,
            customer_id: require("CustomerID")?,
            country: find("Country"),
        })
    }

    /// `None` when the row has no usable invoice date.
    fn parse_row(&self, record: &StringRecord) -> Option<Transaction> {
        let field = |index: usize| record.get(index).unwrap_or("").trim();
        let optional = |index: Option<usize>| index.map(field).unwrap_or("");

        let invoice_date = parse_date(field(self.invoice_date))?;

        Some(Transaction::new(
            field(self.invoice_no).to_string(),
            optional(self.stock_code).to_string(),
            optional(self.description).to_string(),
            parse_quantity(field(self.quantity)),
            parse_price(field(self.unit_price)),
            invoice_date,
            normalize_customer_id(field(self.customer_id)),
            optional(self.country).to_string(),
        ))
    }
}

fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    if raw.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(date);
        }
    }
    // Timezone-tagged exports ("2010-12-01T08:26:00Z") bucket by their UTC time.
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.naive_utc());
    }
    // A bare date bucket is still usable; midnight keeps it in its month.
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn parse_quantity(raw: &str) -> i64 {
    if let Ok(quantity) = raw.parse::<i64>() {
        return quantity;
    }
    // Spreadsheet exports write whole numbers as e.g. "6.0".
    raw.parse::<f64>().map(|q| q.trunc() as i64).unwrap_or(0)
}

fn parse_price(raw: &str) -> Decimal {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .unwrap_or(Decimal::ZERO)
}

fn normalize_customer_id(raw: &str) -> String {
    // Spreadsheet exports render customer ids as floats ("17850.0").
    let id = raw.strip_suffix(".0").unwrap_or(raw);
    if id.is_empty() || id.eq_ignore_ascii_case("nan") {
        UNKNOWN_CUSTOMER.to_string()
    } else {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str =
        "InvoiceNo,StockCode,Description,Quantity,InvoiceDate,UnitPrice,CustomerID,Country";

    fn create_test_csv(rows: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        file
    }

    #[test]
    fn loads_and_normalizes_rows() {
        let file = create_test_csv(&[
            "536365,85123A,WHITE HANGING HEART T-LIGHT HOLDER,6,2010-12-01T08:26:00,2.55,17850,United Kingdom",
            "536365,71053,WHITE METAL LANTERN,6,2010-12-01T08:26:00,3.39,17850,United Kingdom",
            "536367,84406B,CREAM CUPID HEARTS COAT HANGER,8,2010-12-01T08:34:00,2.75,13047,United Kingdom",
        ]);

        let table = load_table(file.path()).unwrap();
        assert_eq!(table.len(), 3);

        let first = &table.rows()[0];
        assert_eq!(first.invoice_no, "536365");
        assert_eq!(first.quantity, 6);
        assert_eq!(first.unit_price, dec!(2.55));
        assert_eq!(first.revenue, dec!(15.30));
        assert_eq!(first.customer_id, "17850");
        assert_eq!(first.month_key().to_string(), "2010-12");
    }

    #[test]
    fn missing_file_is_data_unavailable() {
        let err = load_table("/nonexistent/transactions.csv").unwrap_err();
        assert!(matches!(err, DatasetError::DataUnavailable { .. }));
    }

    #[test]
    fn missing_required_column_is_schema_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "InvoiceNo,StockCode,Description,InvoiceDate,UnitPrice,CustomerID").unwrap();
        writeln!(file, "536365,85123A,WIDGET,2010-12-01T08:26:00,2.55,17850").unwrap();

        let err = load_table(file.path()).unwrap_err();
        match err {
            DatasetError::SchemaError(column) => assert_eq!(column, "Quantity"),
            other => panic!("expected SchemaError, got {other:?}"),
        }
    }

    #[test]
    fn rows_with_unparseable_dates_are_dropped() {
        let file = create_test_csv(&[
            "536365,85123A,WIDGET,6,2010-12-01T08:26:00,2.55,17850,United Kingdom",
            "536366,85123A,WIDGET,6,not-a-date,2.55,17850,United Kingdom",
            "536367,85123A,WIDGET,6,,2.55,17850,United Kingdom",
        ]);

        let table = load_table(file.path()).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn accepts_spreadsheet_and_bare_date_formats() {
        let file = create_test_csv(&[
            "536365,85123A,WIDGET,6,12/1/2010 8:26,2.55,17850,United Kingdom",
            "536366,85123A,WIDGET,6,2010-12-02 09:00:00,2.55,17850,United Kingdom",
            "536367,85123A,WIDGET,6,2010-12-03,2.55,17850,United Kingdom",
            "536368,85123A,WIDGET,6,2010-12-04T10:00:00Z,2.55,17850,United Kingdom",
        ]);

        let table = load_table(file.path()).unwrap();
        assert_eq!(table.len(), 4);
        assert!(table.rows().iter().all(|tx| tx.month_key().to_string() == "2010-12"));
    }

    #[test]
    fn numeric_fields_coerce_to_zero() {
        let file = create_test_csv(&[
            "536365,85123A,WIDGET,oops,2010-12-01T08:26:00,bad,17850,United Kingdom",
            "536366,85123A,WIDGET,6.0,2010-12-01T08:26:00,2.55,17850,United Kingdom",
        ]);

        let table = load_table(file.path()).unwrap();
        assert_eq!(table.rows()[0].quantity, 0);
        assert_eq!(table.rows()[0].unit_price, Decimal::ZERO);
        assert_eq!(table.rows()[0].revenue, Decimal::ZERO);
        assert_eq!(table.rows()[1].quantity, 6);
    }

    #[test]
    fn blank_customer_id_becomes_sentinel() {
        let file = create_test_csv(&[
            "536365,85123A,WIDGET,6,2010-12-01T08:26:00,2.55,,United Kingdom",
            "536366,85123A,WIDGET,6,2010-12-01T08:26:00,2.55,17850.0,United Kingdom",
        ]);

        let table = load_table(file.path()).unwrap();
        assert_eq!(table.rows()[0].customer_id, UNKNOWN_CUSTOMER);
        assert_eq!(table.rows()[1].customer_id, "17850");
    }
}
