//! # Vantage Configuration
//!
//! This crate owns the runtime settings of the application: where the
//! normalized dataset lives and where the web server listens.
//!
//! ## Architectural Principles
//!
//! - **Typed Settings:** Configuration is deserialized into the strongly
//!   typed `Settings` struct up front; the rest of the system never touches
//!   raw strings or environment lookups.
//! - **Layered Sources:** An optional `vantage.toml` file is merged with
//!   `VANTAGE__`-prefixed environment variables, and every field carries a
//!   default, so a bare checkout runs with zero configuration.

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{DataSettings, ServerSettings, Settings};

/// Loads the application settings.
///
/// Sources, later entries overriding earlier ones: built-in defaults, a
/// `vantage.toml` file in the working directory (optional), then environment
/// variables such as `VANTAGE__SERVER__PORT=8080`.
pub fn load_settings() -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("vantage").required(false))
        .add_source(
            config::Environment::with_prefix("VANTAGE")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;

    Ok(settings)
}
