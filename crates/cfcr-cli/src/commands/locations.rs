use anyhow::Context;
use cfcr_config::CfcrConfig;

use crate::cli::GlobalFlags;
use crate::output::{output, views::Locations};

/// Locations only need the public widget, so no login happens here.
pub async fn handle(config: &CfcrConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let reconciler = cfcr_client::fetch_schedule(config)
        .await
        .context("failed to fetch the class schedule")?;
    output(&Locations(reconciler.locations()), flags.format)
}
