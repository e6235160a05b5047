//! # cfcr-client
//!
//! HTTP side of cfcr:
//! - [`WidgetClient`] fetches the public schedule widget.
//! - [`BookingAccount`] logs into the booking site, reads booked classes and
//!   drives the cart. It implements [`cfcr_booking::CartBackend`].
//!
//! [`connect`] runs the widget fetch and the login concurrently and joins
//! them into a [`Connected`] pair ready for reconciliation.

mod account;
mod error;
mod http;
mod widget;

pub use account::BookingAccount;
pub use error::ClientError;
pub use http::{build_client, check_response};
pub use widget::{WidgetClient, WidgetDocument};

use cfcr_booking::Reconciler;
use cfcr_config::CfcrConfig;

/// Schedule listings plus the account they are reconciled against.
#[derive(Debug)]
pub struct Connected {
    pub reconciler: Reconciler,
    pub account: BookingAccount,
}

/// Fetch the widget and log in concurrently.
///
/// # Errors
///
/// Fails if either side fails. Authentication errors take precedence since
/// nothing can be reconciled without the booked-id baseline.
pub async fn connect(config: &CfcrConfig) -> Result<Connected, ClientError> {
    let http = build_client(&config.http)?;
    let widget = WidgetClient::new(http.clone(), &config.mindbody.widget_url)?;

    tracing::info!("fetching schedule and logging in");
    let (document, account) = tokio::join!(
        widget.fetch(),
        BookingAccount::login(http, &config.mindbody, &config.credentials),
    );
    let account = account?;
    let document = document?;

    Ok(Connected {
        reconciler: Reconciler::new(document.listings()),
        account,
    })
}

/// Fetch only the public widget; needs no credentials.
///
/// # Errors
///
/// Returns [`ClientError`] if the widget cannot be fetched or decoded.
pub async fn fetch_schedule(config: &CfcrConfig) -> Result<Reconciler, ClientError> {
    let http = build_client(&config.http)?;
    let document = WidgetClient::new(http, &config.mindbody.widget_url)?
        .fetch()
        .await?;
    Ok(Reconciler::new(document.listings()))
}
