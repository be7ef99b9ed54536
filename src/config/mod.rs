#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::lead::{LeadSource, Priority};
use crate::domain::model::{SortOrder, DEFAULT_LIMIT, DEFAULT_SORT_BY};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_number, validate_range, validate_url, Validate};
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_API_BASE: &str = "https://pixisphere-backend-t2l9.onrender.com/api/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const API_BASE_ENV: &str = "PIXISPHERE_API_BASE";

/// Resolved client settings. Precedence, lowest first: built-in defaults,
/// TOML file, `PIXISPHERE_API_BASE`, command-line flags.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub api_base: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub default_limit: u32,
    pub sort_by: String,
    pub sort_order: SortOrder,
    pub currency: String,
    pub priority: Priority,
    pub source: LeadSource,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: concat!("pixisphere-client/", env!("CARGO_PKG_VERSION")).to_string(),
            default_limit: DEFAULT_LIMIT,
            sort_by: DEFAULT_SORT_BY.to_string(),
            sort_order: SortOrder::Desc,
            currency: crate::core::lead::DEFAULT_CURRENCY.to_string(),
            priority: Priority::default(),
            source: LeadSource::default(),
        }
    }
}

impl ClientSettings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        let mut settings = Self {
            api_base: config.api.base_url.clone(),
            ..Self::default()
        };
        if let Some(timeout) = config.api.timeout_seconds {
            settings.timeout_secs = timeout;
        }
        if let Some(user_agent) = &config.api.user_agent {
            settings.user_agent = user_agent.clone();
        }
        if let Some(search) = &config.search {
            if let Some(limit) = search.default_limit {
                settings.default_limit = limit;
            }
            if let Some(sort_by) = &search.sort_by {
                settings.sort_by = sort_by.clone();
            }
            if let Some(order) = search.sort_order {
                settings.sort_order = order;
            }
        }
        if let Some(lead) = &config.lead {
            if let Some(currency) = &lead.currency {
                settings.currency = currency.clone();
            }
            if let Some(priority) = lead.priority {
                settings.priority = priority;
            }
            if let Some(source) = lead.source {
                settings.source = source;
            }
        }
        settings
    }

    /// Loads and validates a TOML file.
    pub fn from_file(path: &str) -> Result<Self> {
        let config = TomlConfig::from_file(path)?;
        config.validate()?;
        tracing::debug!("Loaded configuration from {}", path);
        Ok(Self::from_toml(&config))
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(base) = std::env::var(API_BASE_ENV) {
            if !base.trim().is_empty() {
                tracing::debug!("{} overrides API base", API_BASE_ENV);
                self.api_base = base.trim().to_string();
            }
        }
        self
    }
}

impl Validate for ClientSettings {
    fn validate(&self) -> Result<()> {
        validate_url("api_base", &self.api_base)?;
        validate_positive_number("timeout_secs", self.timeout_secs, 1)?;
        validate_range("default_limit", self.default_limit, 1, 100)?;
        Ok(())
    }
}

impl ConfigProvider for ClientSettings {
    fn api_base(&self) -> &str {
        &self.api_base
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn default_limit(&self) -> u32 {
        self.default_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = ClientSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.timeout(), Duration::from_secs(30));
        assert_eq!(settings.api_base(), DEFAULT_API_BASE);
    }

    #[test]
    fn test_toml_values_override_defaults() {
        let config = TomlConfig::from_toml_str(
            r#"
[api]
base_url = "http://localhost:4000/api/v1"
timeout_seconds = 5

[search]
default_limit = 12
sort_order = "asc"
"#,
        )
        .unwrap();
        let settings = ClientSettings::from_toml(&config);
        assert_eq!(settings.api_base, "http://localhost:4000/api/v1");
        assert_eq!(settings.timeout_secs, 5);
        assert_eq!(settings.default_limit, 12);
        assert_eq!(settings.sort_order, SortOrder::Asc);
        assert_eq!(settings.sort_by, DEFAULT_SORT_BY);
        assert_eq!(settings.currency, "INR");
    }
}
