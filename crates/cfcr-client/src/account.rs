//! Authenticated booking account: login, booked classes, cart and checkout.
//!
//! The site keeps both the login session and the cart server-side, keyed by
//! cookie, so every request goes through the same cookie-storing client.

use std::collections::BTreeSet;

use async_trait::async_trait;
use cfcr_booking::CartBackend;
use cfcr_config::{CredentialsConfig, MindbodyConfig};
use cfcr_core::BookedIdSet;
use cfcr_parser::account_pages::{booked_ids_from_page, find_checkout_action, find_login_form};
use reqwest::Url;

use crate::error::ClientError;
use crate::http::{Page, base_url, check_response};

/// Client schedule page, relative to the site URL. Lists booked classes.
const CLIENT_SCHEDULES: &str = "client/schedules";

/// Booked ids plus a generation counter bumped on every invalidation.
#[derive(Debug, Default)]
struct BookedCache {
    generation: u64,
    ids: Option<BookedIdSet>,
}

impl BookedCache {
    const fn get(&self) -> Option<&BookedIdSet> {
        self.ids.as_ref()
    }

    fn store(&mut self, ids: BTreeSet<String>) -> &BookedIdSet {
        self.ids.insert(BookedIdSet::new(ids, self.generation))
    }

    fn invalidate(&mut self) {
        self.ids = None;
        self.generation += 1;
    }
}

/// A logged-in session against the booking site.
#[derive(Debug)]
pub struct BookingAccount {
    http: reqwest::Client,
    site: Url,
    cache: BookedCache,
}

impl BookingAccount {
    /// Log in through the site's session form.
    ///
    /// The login redirects to the client schedule page, which is used to
    /// prime the booked-id cache.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Authentication`] when the login form is missing
    /// or the credentials are rejected, and other [`ClientError`]s for
    /// transport failures.
    pub async fn login(
        http: reqwest::Client,
        mindbody: &MindbodyConfig,
        credentials: &CredentialsConfig,
    ) -> Result<Self, ClientError> {
        let site = base_url(&mindbody.site_url)?;
        let login_url = login_url(&site)?;
        tracing::debug!(url = %login_url, "loading login page");

        let login_page = Page::read(http.get(login_url).send().await?).await?;
        let mut form = find_login_form(&login_page.document)
            .ok_or_else(|| ClientError::Authentication("login form not found".into()))?;
        form.set(&mindbody.username_field, &credentials.username);
        form.set(&mindbody.password_field, &credentials.password);
        let action = login_page.resolve(&form.action)?;

        let resp = http.post(action).form(&form.fields).send().await?;
        let landing = Page::read(resp).await.map_err(|error| match error {
            ClientError::Api { status, .. } => {
                ClientError::Authentication(format!("login rejected with HTTP {status}"))
            }
            other => other,
        })?;
        if !is_client_schedules(&landing.url) {
            return Err(ClientError::Authentication(
                "credentials rejected, login did not reach the client schedule".into(),
            ));
        }
        tracing::info!(user = %credentials.username, "logged in");

        let mut account = Self {
            http,
            site,
            cache: BookedCache::default(),
        };
        let booked = account.cache.store(booked_ids_from_page(&landing.document));
        tracing::debug!(count = booked.len(), "booked ids primed from login");
        Ok(account)
    }

    /// Ids of the classes this account is booked into.
    ///
    /// Served from cache until the next [`Self::checkout`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Authentication`] if the site sent us back to the
    /// login page, and other [`ClientError`]s for transport failures.
    pub async fn booked_ids(&mut self) -> Result<BookedIdSet, ClientError> {
        if let Some(ids) = self.cache.get() {
            return Ok(ids.clone());
        }

        let url = self.site_url(CLIENT_SCHEDULES)?;
        let page = Page::read(self.http.get(url).send().await?).await?;
        if !is_client_schedules(&page.url) {
            return Err(ClientError::Authentication(
                "login session expired while reading booked classes".into(),
            ));
        }
        let ids = self.cache.store(booked_ids_from_page(&page.document));
        tracing::debug!(count = ids.len(), generation = ids.generation(), "booked ids fetched");
        Ok(ids.clone())
    }

    /// Follow a session's signup link, putting it into the remote cart.
    ///
    /// Relative links are resolved against the site URL. A single attempt.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::CartAction`] on any failure.
    pub async fn add_to_cart(&mut self, signup: &str) -> Result<(), ClientError> {
        let cart_action = |reason: String| ClientError::CartAction {
            signup: signup.to_string(),
            reason,
        };

        let url = self.site.join(signup).map_err(|e| cart_action(e.to_string()))?;
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| cart_action(e.to_string()))?;
        check_response(resp)
            .await
            .map_err(|e| cart_action(e.to_string()))?;
        Ok(())
    }

    /// Commit the remote cart by following its next/proceed link.
    ///
    /// The booked-id cache is invalidated before anything is sent, so a
    /// failed checkout still forces a refetch.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Checkout`] when the cart page has no
    /// next/proceed link or following it fails.
    pub async fn checkout(&mut self) -> Result<(), ClientError> {
        self.cache.invalidate();

        let cart_url = self.site_url("cart")?;
        let cart = Page::read(self.http.get(cart_url).send().await?).await?;
        let href = find_checkout_action(&cart.document)
            .ok_or_else(|| ClientError::Checkout("no next/proceed action on the cart page".into()))?;
        let next = cart.resolve(&href)?;

        let resp = self
            .http
            .get(next)
            .send()
            .await
            .map_err(|e| ClientError::Checkout(e.to_string()))?;
        check_response(resp)
            .await
            .map_err(|e| ClientError::Checkout(e.to_string()))?;
        Ok(())
    }

    /// Generation of the booked-id cache; bumped by every checkout.
    #[must_use]
    pub const fn cache_generation(&self) -> u64 {
        self.cache.generation
    }

    fn site_url(&self, path: &str) -> Result<Url, ClientError> {
        self.site
            .join(path)
            .map_err(|e| ClientError::invalid_url(path, e))
    }
}

#[async_trait]
impl CartBackend for BookingAccount {
    type Error = ClientError;

    async fn add_to_cart(&mut self, signup: &str) -> Result<(), ClientError> {
        Self::add_to_cart(self, signup).await
    }

    async fn checkout(&mut self) -> Result<(), ClientError> {
        Self::checkout(self).await
    }
}

/// `<site>/session/new?redirect=<site path>/client/schedules`
fn login_url(site: &Url) -> Result<Url, ClientError> {
    let redirect = format!("{}{CLIENT_SCHEDULES}", site.path());
    let relative = format!("session/new?redirect={}", urlencoding::encode(&redirect));
    site.join(&relative)
        .map_err(|e| ClientError::invalid_url(&relative, e))
}

fn is_client_schedules(url: &Url) -> bool {
    url.path()
        .trim_end_matches('/')
        .ends_with(&format!("/{CLIENT_SCHEDULES}"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn login_url_redirects_to_client_schedules() {
        let site = base_url("https://widgets.healcode.com/sites/12715").unwrap();
        assert_eq!(
            login_url(&site).unwrap().as_str(),
            "https://widgets.healcode.com/sites/12715/session/new?redirect=%2Fsites%2F12715%2Fclient%2Fschedules"
        );
    }

    #[test]
    fn client_schedules_detection() {
        let yes = Url::parse("https://example.com/sites/1/client/schedules/").unwrap();
        let no = Url::parse("https://example.com/sites/1/session/new").unwrap();
        assert!(is_client_schedules(&yes));
        assert!(!is_client_schedules(&no));
    }

    #[test]
    fn cache_records_generation_and_invalidates() {
        let mut cache = BookedCache::default();
        let first = cache.store(["1".to_string()].into_iter().collect()).clone();
        assert_eq!(first.generation(), 0);
        assert!(cache.get().is_some());

        cache.invalidate();
        assert!(cache.get().is_none());

        let second = cache.store(BTreeSet::new()).clone();
        assert_eq!(second.generation(), 1);
        assert!(second.is_empty());
    }
}
