// src/config/validation.rs

use super::Config;
use crate::errors::ConfigError;
use url::Url;

/// Validates settings that clap cannot express.
pub(super) fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.url.trim().is_empty() {
        return Err(ConfigError::Missing("GITHUB_PATH".to_string()));
    }

    if config.concurrency == Some(0) {
        return Err(ConfigError::InvalidValue {
            option: "--concurrency".to_string(),
            reason: "must be greater than 0".to_string(),
        });
    }

    match Url::parse(&config.api_base) {
        Ok(api) if matches!(api.scheme(), "http" | "https") => {}
        Ok(api) => {
            return Err(ConfigError::InvalidValue {
                option: "--api-url".to_string(),
                reason: format!("unsupported scheme '{}'", api.scheme()),
            })
        }
        Err(e) => {
            return Err(ConfigError::InvalidValue {
                option: "--api-url".to_string(),
                reason: e.to_string(),
            })
        }
    }

    if config.token_env_var.is_empty() {
        return Err(ConfigError::InvalidValue {
            option: "token variable".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    Ok(())
}
