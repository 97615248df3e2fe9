//! # Vantage Core Types
//!
//! This crate defines the shared vocabulary of the system: the transaction
//! row, the immutable transaction table, and the calendar-month bucket key.
//!
//! ## Architectural Principles
//!
//! - **Layer 0:** This crate sits at the bottom of the dependency graph. It
//!   knows nothing about loading, aggregation, or serving; every other crate
//!   speaks in its types.
//! - **Immutability:** A `TransactionTable` is built once by the loader and
//!   never mutated afterwards. Consumers only ever read from it, which makes
//!   sharing it across threads trivially safe.
//!
//! ## Public API
//!
//! - `Transaction`: a single invoice line item with its derived revenue.
//! - `TransactionTable`: the ordered, immutable collection of rows.
//! - `MonthKey`: the calendar-month bucket used by both the revenue trend
//!   and the retention series.
//! - `UNKNOWN_CUSTOMER`: the sentinel customer id for rows with no customer.
//! - `CoreError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod month;
pub mod table;

// Re-export the core types to provide a clean public API.
pub use error::CoreError;
pub use month::MonthKey;
pub use table::{Transaction, TransactionTable, UNKNOWN_CUSTOMER};
