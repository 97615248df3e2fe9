use std::fs::File;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use analytics::{AnalyticsEngine, TableFilter};
use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::Settings;
use core_types::TransactionTable;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

/// The main entry point for the Vantage analytics application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if present.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => handle_serve(args).await,
        Commands::Report(args) => handle_report(args),
        Commands::Convert(args) => handle_convert(args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Retail analytics over a transactional sales dataset.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the JSON API and the dashboard.
    Serve(ServeArgs),
    /// Print the KPI report to the terminal.
    Report(ReportArgs),
    /// Normalize a raw CSV export into the clean dataset form.
    Convert(ConvertArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Listen address, overriding the configured host/port (e.g. "0.0.0.0:8080").
    #[arg(long)]
    addr: Option<SocketAddr>,

    /// Dataset path, overriding the configured one.
    #[arg(long)]
    data: Option<PathBuf>,
}

#[derive(Parser)]
struct ReportArgs {
    /// Restrict the report to one calendar year.
    #[arg(long)]
    year: Option<i32>,

    /// Restrict the report to one calendar month (1-12).
    #[arg(long)]
    month: Option<u32>,

    /// Dataset path, overriding the configured one.
    #[arg(long)]
    data: Option<PathBuf>,
}

#[derive(Parser)]
struct ConvertArgs {
    /// The raw CSV export to normalize.
    #[arg(long)]
    input: PathBuf,

    /// Where to write the normalized CSV.
    #[arg(long)]
    output: PathBuf,
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Loads the table once and hands it to the web server. The server only ever
/// sees the shared reference, so the "load once per process" property holds
/// by construction.
async fn handle_serve(args: ServeArgs) -> anyhow::Result<()> {
    let settings = configuration::load_settings()?;
    let table = load_dataset(&settings, args.data)?;

    let addr = match args.addr {
        Some(addr) => addr,
        None => settings.server.socket_addr()?,
    };

    web_server::run_server(addr, Arc::new(table)).await
}

fn handle_report(args: ReportArgs) -> anyhow::Result<()> {
    let settings = configuration::load_settings()?;
    let table = load_dataset(&settings, args.data)?;
    let engine = AnalyticsEngine::new();
    let filter = TableFilter::new(args.year, args.month);

    let kpis = engine.compute_kpis(&table, &filter);
    let mut kpi_table = Table::new();
    kpi_table.set_header(["Metric", "Value"]);
    kpi_table.add_row(["Total Revenue".to_string(), format_money(kpis.revenue)]);
    kpi_table.add_row(["Total Orders".to_string(), kpis.orders.to_string()]);
    kpi_table.add_row(["Total Customers".to_string(), kpis.customers.to_string()]);
    kpi_table.add_row([
        "Top Product".to_string(),
        kpis.top_product.clone().unwrap_or_else(|| "N/A".to_string()),
    ]);
    kpi_table.add_row(["Average Order Value".to_string(), format_money(kpis.aov)]);
    kpi_table.add_row(["Customer Lifetime Value".to_string(), format_money(kpis.clv)]);
    println!("{kpi_table}");

    let trend = engine.revenue_trend(&table, &filter);
    if !trend.is_empty() {
        let mut trend_table = Table::new();
        trend_table.set_header(["Month", "Revenue"]);
        for point in &trend {
            trend_table.add_row([point.month.to_string(), format_money(point.revenue)]);
        }
        println!("\nMonthly Revenue\n{trend_table}");
    }

    let retention = engine.retention(&table);
    if retention.is_empty() {
        println!("\nRetention: not computable (fewer than two months of data).");
    } else {
        let mut retention_table = Table::new();
        retention_table.set_header(["Month", "Retention", "Churn"]);
        for point in &retention {
            retention_table.add_row([
                point.month.to_string(),
                format_rate(point.retention_rate),
                format_rate(point.churn_rate),
            ]);
        }
        println!("\nRetention & Churn (full time span)\n{retention_table}");
    }

    Ok(())
}

fn handle_convert(args: ConvertArgs) -> anyhow::Result<()> {
    let started = Instant::now();
    let table = dataset::load_table(&args.input)?;

    let output = File::create(&args.output)?;
    dataset::write_csv(&table, output)?;

    tracing::info!(
        rows = table.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        output = %args.output.display(),
        "normalized dataset written"
    );
    Ok(())
}

fn load_dataset(settings: &Settings, override_path: Option<PathBuf>) -> anyhow::Result<TransactionTable> {
    let path = override_path.unwrap_or_else(|| settings.data.path.clone());
    let started = Instant::now();
    let table = dataset::load_table(&path)?;
    tracing::info!(
        rows = table.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        path = %path.display(),
        "transaction dataset loaded"
    );
    Ok(table)
}

fn format_money(value: Decimal) -> String {
    format!("${:.2}", value.round_dp(2))
}

fn format_rate(value: Decimal) -> String {
    format!("{:.1}%", value * Decimal::from(100))
}
