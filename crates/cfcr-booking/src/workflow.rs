use serde::Serialize;

use crate::CartBackend;
use crate::plan::BookingPlan;

/// A session whose add-to-cart action failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartFailure {
    pub id: String,
    pub reason: String,
}

/// How the single checkout step ended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckoutOutcome {
    /// Nothing was added, so the cart was left alone.
    #[default]
    NotAttempted,
    Committed,
    Failed { reason: String },
}

/// Per-session result of one booking run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookingReport {
    pub added: Vec<String>,
    pub skipped_without_signup: Vec<String>,
    pub failed: Vec<CartFailure>,
    pub already_booked: Vec<String>,
    pub unknown: Vec<String>,
    pub checkout: CheckoutOutcome,
}

impl BookingReport {
    /// Sessions were added but checkout did not commit them; the remote cart
    /// may still hold them.
    #[must_use]
    pub fn cart_state_indeterminate(&self) -> bool {
        !self.added.is_empty() && matches!(self.checkout, CheckoutOutcome::Failed { .. })
    }

    /// Every requested id is now booked.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped_without_signup.is_empty()
            && self.failed.is_empty()
            && self.unknown.is_empty()
            && !self.cart_state_indeterminate()
    }
}

/// Drives a [`CartBackend`] through one add-then-checkout batch.
pub struct BookingWorkflow<'a, B> {
    backend: &'a mut B,
}

impl<'a, B: CartBackend> BookingWorkflow<'a, B> {
    pub const fn new(backend: &'a mut B) -> Self {
        Self { backend }
    }

    /// Add every planned session to the cart, then check out at most once.
    ///
    /// A failed add is recorded and the batch continues. Sessions already
    /// booked never reach the backend.
    ///
    /// Checkout is skipped entirely when no add succeeded, whether the plan
    /// was empty or every add failed. The report then carries
    /// [`CheckoutOutcome::NotAttempted`] and the backend sees no checkout call.
    pub async fn run(&mut self, plan: &BookingPlan) -> BookingReport {
        let mut report = BookingReport {
            already_booked: plan.already_booked.clone(),
            unknown: plan.unknown.clone(),
            ..BookingReport::default()
        };

        for session in &plan.to_add {
            let id = session.id();
            let Some(signup) = session.signup() else {
                tracing::warn!(id, "session has no signup action, skipping");
                report.skipped_without_signup.push(id.to_string());
                continue;
            };

            match self.backend.add_to_cart(signup).await {
                Ok(()) => {
                    tracing::info!(id, "added to cart");
                    report.added.push(id.to_string());
                }
                Err(error) => {
                    tracing::warn!(id, %error, "add to cart failed, continuing");
                    report.failed.push(CartFailure {
                        id: id.to_string(),
                        reason: error.to_string(),
                    });
                }
            }
        }

        if report.added.is_empty() {
            tracing::debug!("nothing added, skipping checkout");
            return report;
        }

        report.checkout = match self.backend.checkout().await {
            Ok(()) => {
                tracing::info!(count = report.added.len(), "checkout committed");
                CheckoutOutcome::Committed
            }
            Err(error) => {
                tracing::error!(%error, "checkout failed, cart contents unknown");
                CheckoutOutcome::Failed {
                    reason: error.to_string(),
                }
            }
        };
        report
    }
}
