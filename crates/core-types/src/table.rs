use crate::month::MonthKey;
use chrono::{Datelike, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sentinel customer id assigned by the loader to rows with no customer.
///
/// Keeping missing customers as a single reserved id means distinct-customer
/// counts see them as exactly one customer instead of silently skipping or
/// multiplying them.
pub const UNKNOWN_CUSTOMER: &str = "-1";

/// A single invoice line item.
///
/// One invoice spans several rows (one per product), so `invoice_no` is not
/// unique. `revenue` is derived once at construction and carried with the
/// row; it is always `quantity * unit_price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub invoice_no: String,
    pub stock_code: String,
    pub description: String,
    /// Units sold on this line; negative for returns.
    pub quantity: i64,
    pub unit_price: Decimal,
    pub invoice_date: NaiveDateTime,
    pub customer_id: String,
    pub country: String,
    pub revenue: Decimal,
}

impl Transaction {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        invoice_no: String,
        stock_code: String,
        description: String,
        quantity: i64,
        unit_price: Decimal,
        invoice_date: NaiveDateTime,
        customer_id: String,
        country: String,
    ) -> Self {
        let revenue = Decimal::from(quantity) * unit_price;
        Self {
            invoice_no,
            stock_code,
            description,
            quantity,
            unit_price,
            invoice_date,
            customer_id,
            country,
            revenue,
        }
    }

    pub fn year(&self) -> i32 {
        self.invoice_date.year()
    }

    pub fn month(&self) -> u32 {
        self.invoice_date.month()
    }

    /// The calendar-month bucket this row falls into.
    pub fn month_key(&self) -> MonthKey {
        MonthKey::from_date(&self.invoice_date)
    }
}

/// The normalized, in-memory transaction dataset.
///
/// Built once by the loader and immutable afterwards: there is no way to
/// push rows through the public API, so a shared reference can be handed to
/// any number of concurrent readers without locking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionTable {
    rows: Vec<Transaction>,
}

impl TransactionTable {
    pub fn from_rows(rows: Vec<Transaction>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct calendar years present in the table, ascending.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.rows.iter().map(Transaction::year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// Distinct calendar months (1-12) present in the table, ascending.
    pub fn months(&self) -> Vec<u32> {
        let mut months: Vec<u32> = self.rows.iter().map(Transaction::month).collect();
        months.sort_unstable();
        months.dedup();
        months
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn tx(invoice: &str, year: i32, month: u32, qty: i64, price: Decimal) -> Transaction {
        Transaction::new(
            invoice.to_string(),
            "SKU-1".to_string(),
            "Widget".to_string(),
            qty,
            price,
            NaiveDate::from_ymd_opt(year, month, 15)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            "1001".to_string(),
            "United Kingdom".to_string(),
        )
    }

    #[test]
    fn revenue_is_quantity_times_unit_price() {
        assert_eq!(tx("I1", 2011, 1, 3, dec!(2.50)).revenue, dec!(7.50));
        // Returns carry negative revenue.
        assert_eq!(tx("I2", 2011, 1, -2, dec!(5)).revenue, dec!(-10));
    }

    #[test]
    fn distinct_years_and_months_are_sorted() {
        let table = TransactionTable::from_rows(vec![
            tx("I1", 2011, 12, 1, dec!(1)),
            tx("I2", 2010, 3, 1, dec!(1)),
            tx("I3", 2011, 3, 1, dec!(1)),
        ]);
        assert_eq!(table.years(), vec![2010, 2011]);
        assert_eq!(table.months(), vec![3, 12]);
    }
}
