use crate::report::{KpiReport, RetentionPoint, TrendPoint};
use core_types::{MonthKey, Transaction, TransactionTable};
use rust_decimal::Decimal;
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Precision for the retention/churn ratios. Counts divide exactly into
/// repeating decimals (1/3 retained etc.), so the rates are rounded to a
/// fixed scale before they leave the engine.
const RATE_DP: u32 = 4;

/// An optional year/month row selection.
///
/// Absent fields match everything, so the default filter is the identity and
/// selects the full table. Filtering happens row by row against the invoice
/// date; it is applied before every aggregation and never memoized here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableFilter {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl TableFilter {
    pub fn new(year: Option<i32>, month: Option<u32>) -> Self {
        Self { year, month }
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        self.year.is_none_or(|y| tx.year() == y) && self.month.is_none_or(|m| tx.month() == m)
    }
}

/// A stateless calculator for deriving business metrics from a transaction
/// table.
///
/// Every method takes the table by reference and returns a freshly computed
/// value; nothing is cached and the table is never mutated, so a single
/// engine value can serve any number of concurrent callers.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the KPI set over the rows selected by `filter`.
    ///
    /// An empty selection yields the zeroed report: revenue 0, no top
    /// product, and both ratio metrics 0 instead of a division by zero.
    pub fn compute_kpis(&self, table: &TransactionTable, filter: &TableFilter) -> KpiReport {
        let mut report = KpiReport::new();
        let mut invoices: HashSet<&str> = HashSet::new();
        let mut customers: HashSet<&str> = HashSet::new();
        // Quantities grouped in first-encountered order, so the argmax below
        // is stable across runs and independent of hash iteration order.
        let mut product_totals: Vec<(&str, i64)> = Vec::new();
        let mut product_index: HashMap<&str, usize> = HashMap::new();

        for tx in self.filtered(table, filter) {
            report.revenue += tx.revenue;
            invoices.insert(tx.invoice_no.as_str());
            customers.insert(tx.customer_id.as_str());
            match product_index.entry(tx.description.as_str()) {
                Entry::Occupied(slot) => product_totals[*slot.get()].1 += tx.quantity,
                Entry::Vacant(slot) => {
                    slot.insert(product_totals.len());
                    product_totals.push((tx.description.as_str(), tx.quantity));
                }
            }
        }

        report.orders = invoices.len();
        report.customers = customers.len();
        report.top_product = top_product(&product_totals);

        if report.orders > 0 {
            report.aov = report.revenue / Decimal::from(report.orders);
        }
        if report.customers > 0 {
            report.purchase_frequency =
                (Decimal::from(report.orders) / Decimal::from(report.customers)).round_dp(RATE_DP);
        }
        report.clv = report.aov * report.purchase_frequency;

        report
    }

    /// Sums revenue per calendar month over the rows selected by `filter`.
    ///
    /// Points come out in ascending month order. Months without transactions
    /// are absent rather than zero-filled, and the point revenues always sum
    /// to the `compute_kpis` revenue for the same filter.
    pub fn revenue_trend(&self, table: &TransactionTable, filter: &TableFilter) -> Vec<TrendPoint> {
        let mut by_month: BTreeMap<MonthKey, Decimal> = BTreeMap::new();
        for tx in self.filtered(table, filter) {
            *by_month.entry(tx.month_key()).or_insert(Decimal::ZERO) += tx.revenue;
        }
        by_month
            .into_iter()
            .map(|(month, revenue)| TrendPoint { month, revenue })
            .collect()
    }

    /// Computes the month-over-month retention/churn series over the whole
    /// table.
    ///
    /// Deliberately not filterable: the cohorts compare adjacent months
    /// across the full time span, and restricting them to a single filtered
    /// month would leave nothing to compare. For each adjacent pair of
    /// months present in the data, the point is labeled with the later month
    /// and carries the fraction of the earlier month's customers still
    /// active in it. The first month has no prior month and produces no
    /// point, so a table spanning fewer than two months yields an empty
    /// series.
    pub fn retention(&self, table: &TransactionTable) -> Vec<RetentionPoint> {
        let mut active: BTreeMap<MonthKey, HashSet<&str>> = BTreeMap::new();
        for tx in table.rows() {
            active
                .entry(tx.month_key())
                .or_default()
                .insert(tx.customer_id.as_str());
        }

        let months: Vec<(&MonthKey, &HashSet<&str>)> = active.iter().collect();
        months
            .windows(2)
            .map(|pair| {
                let (_, prev) = pair[0];
                let (month, curr) = pair[1];
                let retained = curr.iter().filter(|c| prev.contains(*c)).count();
                let retention_rate = if prev.is_empty() {
                    Decimal::ZERO
                } else {
                    (Decimal::from(retained) / Decimal::from(prev.len())).round_dp(RATE_DP)
                };
                RetentionPoint {
                    month: *month,
                    retention_rate,
                    churn_rate: Decimal::ONE - retention_rate,
                }
            })
            .collect()
    }

    fn filtered<'a>(
        &self,
        table: &'a TransactionTable,
        filter: &'a TableFilter,
    ) -> impl Iterator<Item = &'a Transaction> {
        table.rows().iter().filter(|tx| filter.matches(tx))
    }
}

/// The description with the highest summed quantity. `product_totals` is in
/// first-encountered row order and only a strictly greater total displaces
/// the current best, so ties resolve to the description seen first — the
/// documented, deterministic tie-break.
fn top_product(product_totals: &[(&str, i64)]) -> Option<String> {
    let mut best: Option<(&str, i64)> = None;
    for &(description, quantity) in product_totals {
        match best {
            Some((_, best_quantity)) if quantity <= best_quantity => {}
            _ => best = Some((description, quantity)),
        }
    }
    best.map(|(description, _)| description.to_string())
}
