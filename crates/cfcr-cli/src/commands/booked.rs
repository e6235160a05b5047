use anyhow::Context;
use cfcr_client::{Connected, connect};
use cfcr_config::CfcrConfig;

use crate::bootstrap::require_account;
use crate::cli::GlobalFlags;
use crate::output::output;

pub async fn handle(config: &CfcrConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    require_account(config)?;
    let Connected {
        reconciler,
        mut account,
    } = connect(config).await.context("failed to connect")?;

    let booked = account.booked_ids().await?;
    output(reconciler.booked_sessions(&booked).as_slice(), flags.format)
}
