//! # cfcr-config
//!
//! Layered configuration loading for cfcr using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CFCR_*` prefix, `__` as separator)
//! 2. Project-level `.cfcr/config.toml`
//! 3. User-level `~/.config/cfcr/config.toml`
//! 4. Legacy `~/.cfcr.toml` with top-level `username` / `password`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CFCR_CREDENTIALS__USERNAME` -> `credentials.username`,
//! `CFCR_MINDBODY__SITE_URL` -> `mindbody.site_url`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use cfcr_config::CfcrConfig;
//!
//! let config = CfcrConfig::load_with_dotenv().expect("config");
//! if !config.credentials.is_configured() {
//!     eprintln!("set CFCR_CREDENTIALS__USERNAME and CFCR_CREDENTIALS__PASSWORD");
//! }
//! ```

mod credentials;
mod error;
mod http;
mod mindbody;

pub use credentials::CredentialsConfig;
pub use error::ConfigError;
pub use http::HttpConfig;
pub use mindbody::MindbodyConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CfcrConfig {
    #[serde(default)]
    pub credentials: CredentialsConfig,
    #[serde(default)]
    pub mindbody: MindbodyConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// File locations consulted while building the figment.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// `~/.cfcr.toml`, holding bare `username` / `password` keys.
    pub legacy_credentials: Option<PathBuf>,
    /// `~/.config/cfcr/config.toml`.
    pub global: Option<PathBuf>,
    /// `.cfcr/config.toml` relative to the working directory.
    pub local: PathBuf,
}

impl ConfigPaths {
    /// Standard locations for the current user and working directory.
    pub fn discover() -> Self {
        Self {
            legacy_credentials: dirs::home_dir().map(|home| home.join(".cfcr.toml")),
            global: dirs::config_dir().map(|p| p.join("cfcr").join("config.toml")),
            local: PathBuf::from(".cfcr/config.toml"),
        }
    }
}

impl CfcrConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does not read `.env`; see [`Self::load_with_dotenv`] for `.env` loading.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&ConfigPaths::discover())
    }

    /// Load `.env` (searched from the working directory upwards), then
    /// configuration from all sources.
    ///
    /// A missing `.env` is fine; an unparseable one is an error.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Err(error) if !error.not_found() => return Err(error.into()),
            _ => {}
        }
        Self::load()
    }

    /// Load configuration from explicit file locations plus the environment.
    pub fn load_from(paths: &ConfigPaths) -> Result<Self, ConfigError> {
        Self::figment_from(paths)?
            .extract()
            .map_err(ConfigError::from)
    }

    /// Build the figment provider chain for the given file locations.
    ///
    /// Fails only when the legacy credentials file exists but cannot be read.
    pub fn figment_from(paths: &ConfigPaths) -> Result<Figment, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: legacy credentials file (top-level keys, no section header)
        if let Some(legacy_path) = paths.legacy_credentials.as_ref().filter(|p| p.exists()) {
            let legacy: CredentialsConfig = Figment::from(Toml::file(legacy_path)).extract()?;
            figment = figment.merge(Serialized::default("credentials", legacy));
        }

        // Layer 2: User-global config
        if let Some(global_path) = paths.global.as_ref().filter(|p| p.exists()) {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 3: Project-local config
        if paths.local.exists() {
            figment = figment.merge(Toml::file(&paths.local));
        }

        // Layer 4: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("CFCR_").split("__"));

        Ok(figment)
    }

    /// Check the fields the booking run cannot do without: credentials, and
    /// site/widget URLs that parse with an http(s) scheme.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.credentials.is_configured() {
            return Err(ConfigError::MissingCredentials);
        }
        check_url("mindbody.site_url", &self.mindbody.site_url)?;
        check_url("mindbody.widget_url", &self.mindbody.widget_url)
    }
}

fn check_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let url = url::Url::parse(value).map_err(|source| ConfigError::InvalidUrl {
        field,
        value: value.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::UnsupportedScheme {
            field,
            scheme: other.to_string(),
        }),
    }
}
