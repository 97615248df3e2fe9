//! # Vantage Analytics Engine
//!
//! This crate derives the business metrics of the system — KPIs, the monthly
//! revenue trend, and the month-over-month retention/churn series — from a
//! `TransactionTable`.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   HTTP, files, or rendering. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `AnalyticsEngine` is a stateless
//!   calculator. It takes a table and a filter as input and produces plain
//!   values as output, which makes it highly reliable and easy to test.
//! - **Total Functions:** Every operation is defined on every input. Empty
//!   tables, out-of-range filters, and zero denominators all produce the
//!   documented zero or `None` fallbacks rather than errors.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: the main struct that contains the calculation logic.
//! - `TableFilter`: the optional year/month row selection.
//! - `KpiReport`, `TrendPoint`, `RetentionPoint`: the standardized outputs.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{AnalyticsEngine, TableFilter};
pub use report::{KpiReport, RetentionPoint, TrendPoint};
