//! # Vantage Dataset
//!
//! This crate turns the raw CSV export of the sales data into the normalized
//! `TransactionTable` the rest of the system runs on, and writes that
//! normalized form back out for the one-time conversion path.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Adapter:** This crate is the only place that knows the data
//!   lives in a file. It hands the engine a fully-typed table and keeps all
//!   parsing and coercion rules out of the query path.
//! - **Fail Loudly at the Edges:** A missing file or a missing required
//!   column is a fatal, typed error — never a silently empty table. Per-row
//!   problems are coerced or dropped by documented rules and the drops are
//!   logged.
//!
//! ## Public API
//!
//! - `load_table` / `read_table`: build a `TransactionTable` from a path or
//!   any reader.
//! - `write_csv`: emit the normalized table as CSV.
//! - `DatasetError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod loader;
pub mod writer;

// Re-export the key components to create a clean, public-facing API.
pub use error::DatasetError;
pub use loader::{load_table, read_table};
pub use writer::write_csv;
