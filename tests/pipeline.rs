//! End-to-end pipeline tests: raw CSV -> loader -> analytics engine.

use analytics::{AnalyticsEngine, TableFilter};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::io::Write;
use tempfile::NamedTempFile;

/// Create a test CSV file with sample data spanning two months.
fn create_test_csv() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "InvoiceNo,StockCode,Description,Quantity,InvoiceDate,UnitPrice,CustomerID,Country"
    )
    .unwrap();

    // Customer 17850 - active in both months
    writeln!(file, "536365,85123A,WHITE HANGING HEART T-LIGHT HOLDER,6,2010-12-01T08:26:00,2.55,17850,United Kingdom").unwrap();
    writeln!(
        file,
        "536365,71053,WHITE METAL LANTERN,6,2010-12-01T08:26:00,3.39,17850,United Kingdom"
    )
    .unwrap();
    writeln!(
        file,
        "537001,22633,HAND WARMER UNION JACK,6,2011-01-05T08:28:00,1.85,17850,United Kingdom"
    )
    .unwrap();

    // Customer 13047 - December only
    writeln!(file, "536367,84406B,CREAM CUPID HEARTS COAT HANGER,8,2010-12-01T08:34:00,2.75,13047,United Kingdom").unwrap();

    // Anonymous row - December, unknown customer
    writeln!(
        file,
        "536368,21730,GLASS STAR FROSTED T-LIGHT HOLDER,12,2010-12-05T10:15:00,1.25,,United Kingdom"
    )
    .unwrap();

    file
}

#[test]
fn end_to_end_kpis_trend_and_retention() {
    let file = create_test_csv();
    let table = dataset::load_table(file.path()).unwrap();
    assert_eq!(table.len(), 5);

    let engine = AnalyticsEngine::new();
    let report = engine.compute_kpis(&table, &TableFilter::default());

    // 6*2.55 + 6*3.39 + 6*1.85 + 8*2.75 + 12*1.25 = 83.74
    assert_eq!(report.revenue, dec!(83.74));
    assert_eq!(report.orders, 4);
    // 17850, 13047, and the unknown-customer sentinel.
    assert_eq!(report.customers, 3);
    assert_eq!(report.aov, dec!(20.935));

    let trend = engine.revenue_trend(&table, &TableFilter::default());
    assert_eq!(trend.len(), 2);
    assert_eq!(trend[0].month.to_string(), "2010-12");
    assert_eq!(trend[1].month.to_string(), "2011-01");
    let total: Decimal = trend.iter().map(|p| p.revenue).sum();
    assert_eq!(total, report.revenue);

    // Of December's three customers, only 17850 returned in January.
    let retention = engine.retention(&table);
    assert_eq!(retention.len(), 1);
    assert_eq!(retention[0].month.to_string(), "2011-01");
    assert_eq!(retention[0].retention_rate, dec!(0.3333));
    assert_eq!(retention[0].churn_rate, dec!(0.6667));
}

#[test]
fn filtering_matches_single_month_view() {
    let file = create_test_csv();
    let table = dataset::load_table(file.path()).unwrap();
    let engine = AnalyticsEngine::new();

    let december = engine.compute_kpis(&table, &TableFilter::new(Some(2010), Some(12)));
    assert_eq!(december.orders, 3);
    assert_eq!(december.customers, 3);
    assert_eq!(december.revenue, dec!(72.64));

    // A filter outside the data's range is a zero report, not an error.
    let empty = engine.compute_kpis(&table, &TableFilter::new(Some(2009), None));
    assert_eq!(empty.orders, 0);
    assert_eq!(empty.revenue, Decimal::ZERO);
    assert_eq!(empty.top_product, None);
}

#[test]
fn convert_round_trip_preserves_metrics() {
    let file = create_test_csv();
    let table = dataset::load_table(file.path()).unwrap();

    let mut normalized = Vec::new();
    dataset::write_csv(&table, &mut normalized).unwrap();
    let reloaded = dataset::read_table(normalized.as_slice()).unwrap();

    let engine = AnalyticsEngine::new();
    assert_eq!(
        engine.compute_kpis(&reloaded, &TableFilter::default()),
        engine.compute_kpis(&table, &TableFilter::default())
    );
    assert_eq!(engine.retention(&reloaded), engine.retention(&table));
}
