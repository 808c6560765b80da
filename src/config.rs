use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use observability::LoggingConfig;
use scripting::{DomainErrorConverter, ExceptionThrower, ERROR_CLASS, TYPE_ERROR_CLASS};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ErrorsSection {
    /// Constructor used by `throw` and `throw_literal`.
    pub error_class: String,
    pub type_error_class: String,
    /// Native error domain -> constructor name. Unlisted domains use
    /// `error_class`.
    pub domains: BTreeMap<String, String>,
}

impl Default for ErrorsSection {
    fn default() -> Self {
        Self {
            error_class: ERROR_CLASS.to_string(),
            type_error_class: TYPE_ERROR_CLASS.to_string(),
            domains: BTreeMap::new(),
        }
    }
}

/// Top-level error bridge configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub logging: LoggingConfig,
    pub errors: ErrorsSection,
}

impl BridgeConfig {
    /// Load configuration from an optional TOML file path.
    pub fn load(config_path: Option<&str>) -> Result<Self, Box<dyn std::error::Error>> {
        let config = match config_path {
            Some(path) if Path::new(path).exists() => {
                let content = std::fs::read_to_string(path)?;
                let config = Self::from_toml_str(&content)?;
                info!(path, "Loaded bridge config");
                config
            }
            Some(path) => {
                info!(path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_thrower(&self) -> ExceptionThrower {
        ExceptionThrower {
            error_class: self.errors.error_class.clone(),
            type_error_class: self.errors.type_error_class.clone(),
        }
    }

    pub fn to_converter(&self) -> DomainErrorConverter {
        let mut converter = DomainErrorConverter::new(self.errors.error_class.clone());
        for (domain, class) in &self.errors.domains {
            converter.register_domain(domain.clone(), class.clone());
        }
        converter
    }
}
