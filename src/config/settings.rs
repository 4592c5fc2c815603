use std::fmt;

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;

/// Path used for the YAML settings file when `CONFIG_PATH` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "./config.yaml";

/// Environment keys read verbatim into [`Settings`].
const ENV_KEYS: &[&str] = &[
    "service_url",
    "service_secret_key",
    "environment",
    "debug_mode",
    "bind_address",
    "request_timeout_ms",
];

/// Immutable process settings, loaded once at startup and shared behind an `Arc`.
///
/// Unknown keys in any source are ignored.
#[derive(Deserialize, Serialize, Clone, JsonSchema)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the identity service, e.g. `https://xyz.supabase.co`.
    pub service_url: String,
    /// Service-role key used as `apikey` and for administrative calls.
    pub service_secret_key: String,
    pub environment: String,
    pub debug_mode: bool,
    pub bind_address: String,
    /// Upper bound for every outbound identity-service request.
    pub request_timeout_ms: u64,
    pub logging: LoggingConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service_url: String::new(),
            service_secret_key: String::new(),
            environment: "development".to_string(),
            debug_mode: false,
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_ms: 5000,
            logging: LoggingConfig::default(),
        }
    }
}

// The secret key must never end up in logs.
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("service_url", &self.service_url)
            .field("service_secret_key", &"<redacted>")
            .field("environment", &self.environment)
            .field("debug_mode", &self.debug_mode)
            .field("bind_address", &self.bind_address)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .field("logging", &self.logging)
            .finish()
    }
}

impl Settings {
    /// Builds the layered figment: defaults, then the YAML file, then the
    /// `SUPABASE_*` aliases, then plain environment variables.
    pub fn figment(config_path: &str) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Yaml::file(config_path))
            .merge(
                Env::prefixed("SUPABASE_")
                    .only(&["url", "secret_key"])
                    .map(|key| format!("service_{}", key.as_str()).into()),
            )
            .merge(Env::raw().only(ENV_KEYS))
    }

    /// True once both the service URL and the secret key are present.
    pub fn has_identity_service(&self) -> bool {
        !self.service_url.trim().is_empty() && !self.service_secret_key.is_empty()
    }
}

/// Loads settings from `$CONFIG_PATH` (or [`DEFAULT_CONFIG_PATH`]) and the environment.
pub fn load_settings() -> Result<Settings, figment::Error> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    Settings::figment(&path).extract()
}

/// Render the JSON schema for the settings file.
pub fn settings_schema() -> Result<String, serde_json::Error> {
    let schema = schema_for!(Settings);
    serde_json::to_string_pretty(&schema)
}
