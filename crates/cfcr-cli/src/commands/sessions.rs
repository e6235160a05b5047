use anyhow::Context;
use cfcr_client::{Connected, connect};
use cfcr_config::CfcrConfig;
use cfcr_core::{BookedIdSet, LocationFilter};

use crate::bootstrap::require_account;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::SessionsArgs;
use crate::output::output;

/// Where the booked flags on listed sessions come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScheduleSource {
    /// Log in and reconcile against the account's booked classes.
    Account,
    /// No credentials: list the public schedule with nothing marked booked.
    ScheduleOnly,
}

fn source_for(config: &CfcrConfig) -> anyhow::Result<ScheduleSource> {
    if !config.credentials.is_configured() {
        return Ok(ScheduleSource::ScheduleOnly);
    }
    require_account(config)?;
    Ok(ScheduleSource::Account)
}

pub async fn handle(
    args: &SessionsArgs,
    config: &CfcrConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let (reconciler, booked) = match source_for(config)? {
        ScheduleSource::Account => {
            let Connected {
                reconciler,
                mut account,
            } = connect(config).await.context("failed to connect")?;
            let booked = account.booked_ids().await?;
            (reconciler, booked)
        }
        ScheduleSource::ScheduleOnly => {
            tracing::warn!("no booking credentials configured, booked classes are not shown");
            let reconciler = cfcr_client::fetch_schedule(config)
                .await
                .context("failed to fetch the class schedule")?;
            (reconciler, BookedIdSet::default())
        }
    };

    let known = reconciler.locations();
    for name in args.locations.iter().filter(|name| !known.contains(name)) {
        tracing::warn!(location = %name, known = ?known, "location not on the schedule");
    }

    let filter = LocationFilter::from_names(args.locations.iter().cloned());
    let mut sessions = reconciler.sessions(&booked, &filter);
    if args.unbooked {
        sessions.retain(|session| !session.booked());
    }

    output(sessions.as_slice(), flags.format)
}
