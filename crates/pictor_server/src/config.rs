//! Server configuration.

use derive_getters::Getters;
use pictor_backend::{BackendConfig, DEFAULT_BASE_URL};
use pictor_error::{ConfigError, PictorResult};
use pictor_pipeline::BotKind;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

/// Address the server listens on by default.
pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

/// Bot served when none is configured.
pub const DEFAULT_BOT: &str = "cartoon-avatar";

/// Prefix of environment variables read by [`ServerConfig::load`].
pub const ENV_PREFIX: &str = "PICTOR";

/// Settings given on the command line; `None` leaves the loaded value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Listen address
    pub bind: Option<String>,
    /// Catalog name of the bot to serve
    pub bot: Option<String>,
    /// Access key
    pub access_key: Option<String>,
    /// Backend base URL
    pub backend_url: Option<String>,
    /// JSON logs
    pub json_logs: Option<bool>,
}

/// Configuration for one bot server.
///
/// The access key authorizes inbound calls and is also the credential for
/// outbound backend calls.
#[derive(Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    bind: String,
    /// Catalog name of the bot to serve
    bot: String,
    /// Access key, resolved after loading
    #[serde(default)]
    access_key: Option<String>,
    /// Backend base URL
    backend_url: String,
    /// Emit logs as JSON
    json_logs: bool,
}

impl ServerConfig {
    /// Load configuration.
    ///
    /// Sources in order of precedence (later sources override earlier):
    /// 1. Built-in defaults
    /// 2. The TOML file at `file`, if given
    /// 3. `PICTOR_*` environment variables (`PICTOR_ACCESS_KEY`, `PICTOR_BOT`, ...)
    /// 4. `overrides` from the command line
    ///
    /// When no access key is set the bot's legacy variable (for example
    /// `AVATAR_BOT_KEY`) is consulted.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a source cannot be read, the bot is not
    /// in the catalog, or no access key can be found.
    pub fn load(file: Option<&Path>, overrides: &ConfigOverrides) -> PictorResult<Self> {
        Self::load_with_env(file, overrides, None)
    }

    /// Load with an explicit environment instead of the process environment.
    #[instrument(skip_all, fields(file = ?file))]
    pub fn load_with_env(
        file: Option<&Path>,
        overrides: &ConfigOverrides,
        env: Option<config::Map<String, String>>,
    ) -> PictorResult<Self> {
        debug!("Loading server configuration");

        let mut builder = config::Config::builder()
            .set_default("bind", DEFAULT_BIND)
            .and_then(|b| b.set_default("bot", DEFAULT_BOT))
            .and_then(|b| b.set_default("backend_url", DEFAULT_BASE_URL))
            .and_then(|b| b.set_default("json_logs", false))
            .map_err(|e| ConfigError::new(format!("Invalid defaults: {}", e)))?;

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path));
        }

        let environment = config::Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .source(env.clone());

        let mut config: Self = builder
            .add_source(environment)
            .set_override_option("bind", overrides.bind.clone())
            .and_then(|b| b.set_override_option("bot", overrides.bot.clone()))
            .and_then(|b| b.set_override_option("access_key", overrides.access_key.clone()))
            .and_then(|b| b.set_override_option("backend_url", overrides.backend_url.clone()))
            .and_then(|b| b.set_override_option("json_logs", overrides.json_logs))
            .map_err(|e| ConfigError::new(format!("Invalid override: {}", e)))?
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        let kind = config.bot_kind()?;
        if config.access_key.as_deref().is_none_or(str::is_empty) {
            let legacy = kind.legacy_key_env();
            let key = match &env {
                Some(env) => env.get(legacy).cloned(),
                None => std::env::var(legacy).ok(),
            };
            match key.filter(|key| !key.is_empty()) {
                Some(key) => {
                    debug!(variable = legacy, "Using legacy access key variable");
                    config.access_key = Some(key);
                }
                None => {
                    return Err(ConfigError::for_key(
                        "access_key",
                        format!(
                            "not set for {}; set {}_ACCESS_KEY or {}",
                            config.bot, ENV_PREFIX, legacy
                        ),
                    )
                    .into());
                }
            }
        }

        debug!(bot = %config.bot, bind = %config.bind, "Configuration loaded");
        Ok(config)
    }

    /// The catalog entry for the configured bot.
    pub fn bot_kind(&self) -> PictorResult<BotKind> {
        BotKind::lookup(&self.bot)
            .map_err(|_| ConfigError::for_key("bot", format!("unknown bot {}", self.bot)).into())
    }

    /// The access key, empty when unresolved.
    pub fn key(&self) -> &str {
        self.access_key.as_deref().unwrap_or_default()
    }

    /// Backend settings for outbound calls.
    pub fn backend_config(&self) -> BackendConfig {
        BackendConfig::new(self.key()).with_base_url(self.backend_url.clone())
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind", &self.bind)
            .field("bot", &self.bot)
            .field("access_key", &self.access_key.as_ref().map(|_| "<redacted>"))
            .field("backend_url", &self.backend_url)
            .field("json_logs", &self.json_logs)
            .finish()
    }
}
