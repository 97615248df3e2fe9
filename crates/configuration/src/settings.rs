use crate::error::ConfigError;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

/// Where the normalized dataset lives on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    /// Path to the normalized CSV produced by `vantage convert`.
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

/// Where the web server listens.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Listen IP address.
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(format!("{}:{}", self.host, self.port)))
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data/transactions.csv")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let settings = Settings::default();
        assert_eq!(settings.data.path, PathBuf::from("data/transactions.csv"));
        assert_eq!(
            settings.server.socket_addr().unwrap().to_string(),
            "127.0.0.1:3000"
        );
    }

    #[test]
    fn rejects_non_ip_host() {
        let server = ServerSettings {
            host: "not an address".to_string(),
            port: 3000,
        };
        assert!(matches!(
            server.socket_addr(),
            Err(ConfigError::InvalidAddress(_))
        ));
    }
}
