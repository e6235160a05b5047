use thiserror::Error;

/// Where booking credentials can be supplied, for error messages.
const CREDENTIAL_SOURCES: &str = "~/.cfcr.toml (username/password), \
     a [credentials] section in .cfcr/config.toml or ~/.config/cfcr/config.toml, \
     or CFCR_CREDENTIALS__USERNAME / CFCR_CREDENTIALS__PASSWORD";

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file could not be read or a value has the wrong type.
    #[error("failed to read cfcr settings: {0}")]
    Figment(#[from] figment::Error),

    /// A `.env` file exists but could not be parsed.
    #[error("failed to load .env: {0}")]
    Dotenv(#[from] dotenvy::Error),

    #[error("booking credentials are missing; set them in {CREDENTIAL_SOURCES}")]
    MissingCredentials,

    #[error("{field} = '{value}' is not a valid URL: {source}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },

    /// The URL parsed but the site cannot be reached over it.
    #[error("{field} must use http or https, got '{scheme}'")]
    UnsupportedScheme { field: &'static str, scheme: String },
}
