use anyhow::Context;
use cfcr_config::CfcrConfig;

/// Load `.env` from the working directory, then the layered config.
pub fn load_config() -> anyhow::Result<CfcrConfig> {
    CfcrConfig::load_with_dotenv().context("failed to load cfcr configuration")
}

/// Commands that log in need credentials and well-formed site URLs.
pub fn require_account(config: &CfcrConfig) -> anyhow::Result<()> {
    config
        .validate()
        .context("booking account not configured")
}
