use std::path::PathBuf;

use crate::error::{RentalError, Result};

/// Default location of the offline host snapshot.
pub const DEFAULT_DATA_FILE: &str = "host.json";

/// Configuration for reaching host data.
#[derive(Debug, Clone)]
pub struct RentalConfig {
    /// Base URL of the marketplace API (e.g. `https://host.example.com/api`).
    /// When set, the HTTP store is used instead of the local snapshot.
    pub api_url: Option<String>,
    /// Path of the JSON snapshot used when no API URL is configured.
    pub data_file: PathBuf,
}

impl Default for RentalConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

impl RentalConfig {
    /// Build a config from `RENTAL_API_URL` and `RENTAL_DATA_FILE`.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self> {
        let api_url = match std::env::var("RENTAL_API_URL") {
            Ok(url) if url.trim().is_empty() => None,
            Ok(url) => Some(url),
            Err(std::env::VarError::NotPresent) => None,
            Err(e) => return Err(RentalError::Config(format!("RENTAL_API_URL: {e}"))),
        };
        let data_file = std::env::var("RENTAL_DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_FILE));

        if let Some(url) = &api_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(RentalError::Config(format!(
                    "RENTAL_API_URL must be an http(s) URL, got {url}"
                )));
            }
        }

        Ok(Self { api_url, data_file })
    }

    /// Apply CLI overrides on top of the environment.
    pub fn with_overrides(mut self, api_url: Option<String>, data_file: Option<PathBuf>) -> Self {
        if api_url.is_some() {
            self.api_url = api_url;
        }
        if let Some(path) = data_file {
            self.data_file = path;
        }
        self
    }
}
