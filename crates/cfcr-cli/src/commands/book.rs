use std::collections::BTreeSet;

use anyhow::Context;
use cfcr_booking::{BookingReport, BookingWorkflow};
use cfcr_client::{Connected, connect};
use cfcr_config::CfcrConfig;
use cfcr_core::Session;

use crate::bootstrap::require_account;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::BookArgs;
use crate::output::{output, views::BookOutcome};

const CART_INDETERMINATE: &str = "checkout failed after sessions were added; the remote cart may still hold them, \
     check it on the booking site before booking again";
const REREAD_FAILED: &str = "booking finished but the booked classes could not be re-read";

pub async fn handle(args: &BookArgs, config: &CfcrConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    require_account(config)?;
    let Connected {
        reconciler,
        mut account,
    } = connect(config).await.context("failed to connect")?;

    let booked = account.booked_ids().await?;
    let targets: BTreeSet<String> = args.ids.iter().cloned().collect();
    let plan = reconciler.plan(&booked, &targets);

    if args.dry_run {
        return output(&plan, flags.format);
    }

    if !flags.quiet && !plan.is_empty() {
        eprintln!("Booking {} session(s)...", plan.to_add.len());
    }
    let report = BookingWorkflow::new(&mut account).run(&plan).await;

    let refreshed = account
        .booked_ids()
        .await
        .map(|ids| reconciler.booked_sessions(&ids))
        .map_err(anyhow::Error::from);
    let (outcome, result) = conclude(report, refreshed);
    output(&outcome, flags.format)?;
    result
}

/// Pair the run report with the re-read booked list.
///
/// The report is always kept for printing. A failed re-read is reported
/// after it, and an indeterminate cart outranks it as the headline error.
fn conclude(
    report: BookingReport,
    refreshed: anyhow::Result<Vec<Session>>,
) -> (BookOutcome, anyhow::Result<()>) {
    let indeterminate = report.cart_state_indeterminate();
    let (booked, reread) = match refreshed {
        Ok(sessions) => (Some(sessions), Ok(())),
        Err(error) => (None, Err(error)),
    };
    let result = match (indeterminate, reread) {
        (true, Err(error)) => Err(error.context(REREAD_FAILED).context(CART_INDETERMINATE)),
        (true, Ok(())) => Err(anyhow::anyhow!(CART_INDETERMINATE)),
        (false, reread) => reread.context(REREAD_FAILED),
    };
    (BookOutcome { report, booked }, result)
}
