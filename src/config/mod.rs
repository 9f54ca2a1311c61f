//! Configuration loading and management

use crate::core::error::ConfigError;
use crate::core::pipeline::INVOICES_PATH;
use crate::core::validation::SchemaMessages;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use validator::{Validate, ValidationError};

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind, e.g. `127.0.0.1:3000`
    #[validate(length(min = 1))]
    pub bind: String,

    /// Name reported by the health endpoint
    #[validate(length(min = 1))]
    pub service_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            service_name: "acme-dashboard".to_string(),
        }
    }
}

/// Invoice database settings
///
/// Without a `url` the server falls back to the in-memory store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DatabaseConfig {
    #[validate(length(min = 1))]
    pub url: Option<String>,

    #[validate(range(min = 1, max = 100))]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
        }
    }
}

/// Cached view settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ViewsConfig {
    /// Path of the invoice list; invalidated and redirected to after mutations
    #[validate(custom(function = "validate_view_path"))]
    pub invoices_path: String,

    /// Capacity of the view event channel
    #[validate(range(min = 1))]
    pub event_capacity: usize,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            invoices_path: INVOICES_PATH.to_string(),
            event_capacity: 1024,
        }
    }
}

/// Complete configuration for the dashboard server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DashboardConfig {
    #[validate(nested)]
    pub server: ServerConfig,

    #[validate(nested)]
    pub database: DatabaseConfig,

    #[validate(nested)]
    pub views: ViewsConfig,

    /// Messages reported by the invoice form schema
    pub schema: SchemaMessages,
}

impl DashboardConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Self::from_yaml_str(&content).map_err(|err| match err {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                file: Some(path.display().to_string()),
                message,
            },
            other => other,
        })
    }

    /// Load configuration from a YAML string
    ///
    /// Missing sections and keys take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Run field validation and the cross-field checks
    pub fn check(&self) -> Result<(), ConfigError> {
        self.validate()?;

        let messages = [
            &self.schema.customer_required,
            &self.schema.customer_too_long,
            &self.schema.amount_invalid,
            &self.schema.amount_not_positive,
            &self.schema.status_invalid,
        ];
        if messages.iter().any(|m| m.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                message: "schema messages must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Create a default configuration for testing
    pub fn default_config() -> Self {
        Self::default()
    }
}

fn view_path_regex() -> &'static Regex {
    static VIEW_PATH: OnceLock<Regex> = OnceLock::new();
    VIEW_PATH.get_or_init(|| Regex::new(r"^(/[A-Za-z0-9._~-]+)+$").unwrap())
}

fn validate_view_path(path: &str) -> Result<(), ValidationError> {
    if view_path_regex().is_match(path) {
        Ok(())
    } else {
        Err(ValidationError::new("view_path")
            .with_message("must be an absolute URL path such as /dashboard/invoices".into()))
    }
}
