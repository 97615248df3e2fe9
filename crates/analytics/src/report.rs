use core_types::MonthKey;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The headline metrics for a (possibly filtered) view of the table.
///
/// This struct is the primary output of the `AnalyticsEngine` and serves as
/// the data transfer object for KPI results throughout the system — the API
/// serializes it to JSON as-is and the CLI report renders it as a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiReport {
    /// Sum of line-item revenue over the selected rows.
    pub revenue: Decimal,
    /// Count of distinct invoice numbers.
    pub orders: usize,
    /// Count of distinct customer ids (the unknown-customer sentinel counts
    /// as a single customer).
    pub customers: usize,
    /// The product description with the highest summed quantity. `None` when
    /// the selection is empty; consumers render this as "N/A".
    pub top_product: Option<String>,
    /// Average order value: `revenue / orders`, zero when there are no orders.
    pub aov: Decimal,
    /// Average orders per customer: `orders / customers`, zero when there are
    /// no customers.
    pub purchase_frequency: Decimal,
    /// Customer lifetime value, as the simplified `aov * purchase_frequency`
    /// proxy. This is not a cohort-discounted lifetime value; it weighs every
    /// order equally regardless of when it happened.
    pub clv: Decimal,
}

impl KpiReport {
    /// Creates a new, zeroed-out report — the defined result for an empty
    /// row selection.
    pub fn new() -> Self {
        Self {
            revenue: Decimal::ZERO,
            orders: 0,
            customers: 0,
            top_product: None,
            aov: Decimal::ZERO,
            purchase_frequency: Decimal::ZERO,
            clv: Decimal::ZERO,
        }
    }
}

impl Default for KpiReport {
    fn default() -> Self {
        Self::new()
    }
}

/// One bar of the monthly revenue trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub month: MonthKey,
    pub revenue: Decimal,
}

/// One point of the month-over-month retention series.
///
/// Labeled with the *current* month of the pair being compared: the rate is
/// the fraction of the previous month's active customers who are also active
/// in `month`. `churn_rate` is always `1 - retention_rate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetentionPoint {
    pub month: MonthKey,
    pub retention_rate: Decimal,
    pub churn_rate: Decimal,
}
