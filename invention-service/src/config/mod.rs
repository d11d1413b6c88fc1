use secrecy::{ExposeSecret, Secret};
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Gemini REST endpoint root.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model asked for invention dates unless `GEMINI_MODEL` says otherwise.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-pro";

#[derive(Debug, Clone)]
pub struct InventionConfig {
    pub common: core_config::Config,
    pub google: GoogleConfig,
    pub models: ModelConfig,
    pub web: WebConfig,
    /// OTLP collector for span export; local JSON logs only when unset.
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub api_key: Secret<String>,
    pub api_base: String,
}

impl GoogleConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.expose_secret().trim().is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Model used for the invention-date prompt (e.g., gemini-pro)
    pub text_model: String,
}

#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Directory served under `/static`.
    pub static_dir: String,
}

impl InventionConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        Self::from_lookup(common_config, |key| env::var(key).ok())
    }

    /// Assemble the service settings from `lookup`, which resolves a variable
    /// name to its value.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_prod = lookup("ENVIRONMENT").unwrap_or_else(|| "dev".to_string()) == "prod";
        let vars = EnvSource { lookup, is_prod };

        let api_key = match vars.lookup_any(&["GOOGLE_API_KEY", "GEMINI_API_KEY"]) {
            Some(key) => key,
            None => vars.get("GOOGLE_API_KEY", None)?,
        };

        Ok(InventionConfig {
            common,
            google: GoogleConfig {
                api_key: Secret::new(api_key),
                api_base: vars.get("GEMINI_API_BASE", Some(DEFAULT_GEMINI_API_BASE))?,
            },
            models: ModelConfig {
                text_model: vars.get("GEMINI_MODEL", Some(DEFAULT_TEXT_MODEL))?,
            },
            web: WebConfig {
                static_dir: vars.get(
                    "STATIC_DIR",
                    Some(concat!(env!("CARGO_MANIFEST_DIR"), "/static")),
                )?,
            },
            otlp_endpoint: (vars.lookup)("OTLP_ENDPOINT").filter(|v| !v.is_empty()),
        })
    }
}

struct EnvSource<F> {
    lookup: F,
    is_prod: bool,
}

impl<F> EnvSource<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn lookup_any(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| (self.lookup)(key))
    }

    fn get(&self, key: &str, default: Option<&str>) -> Result<String, AppError> {
        match (self.lookup)(key) {
            Some(val) => Ok(val),
            None => {
                if self.is_prod {
                    Err(AppError::ConfigError(anyhow::anyhow!(
                        "{} is required in production but not set",
                        key
                    )))
                } else if let Some(def) = default {
                    Ok(def.to_string())
                } else {
                    Err(AppError::ConfigError(anyhow::anyhow!(
                        "{} is required but not set",
                        key
                    )))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn common() -> core_config::Config {
        core_config::Config {
            port: 0,
            log_level: "info".to_string(),
        }
    }

    fn load(vars: &[(&str, &str)]) -> Result<InventionConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        InventionConfig::from_lookup(common(), |key| vars.get(key).cloned())
    }

    #[test]
    fn dev_defaults_fill_everything_but_the_key() {
        let config = load(&[("GOOGLE_API_KEY", "k")]).unwrap();

        assert_eq!(config.google.api_key.expose_secret(), "k");
        assert_eq!(config.google.api_base, DEFAULT_GEMINI_API_BASE);
        assert_eq!(config.models.text_model, DEFAULT_TEXT_MODEL);
        assert!(config.web.static_dir.ends_with("/static"));
        assert!(config.otlp_endpoint.is_none());
    }

    #[test]
    fn gemini_api_key_is_accepted_as_fallback() {
        let config = load(&[("GEMINI_API_KEY", "legacy")]).unwrap();
        assert_eq!(config.google.api_key.expose_secret(), "legacy");
    }

    #[test]
    fn missing_api_key_is_a_config_error() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
        assert!(err.to_string().contains("GOOGLE_API_KEY"));
    }

    #[test]
    fn prod_requires_every_variable() {
        let err = load(&[("ENVIRONMENT", "prod"), ("GOOGLE_API_KEY", "k")]).unwrap_err();
        assert!(err.to_string().contains("required in production"));
    }

    #[test]
    fn empty_key_loads_but_is_not_configured() {
        let config = load(&[("GOOGLE_API_KEY", "  ")]).unwrap();
        assert!(!config.google.is_configured());
    }
}
