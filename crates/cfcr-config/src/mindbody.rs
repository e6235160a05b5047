//! Booking backend and schedule widget endpoints.

use serde::{Deserialize, Serialize};

fn default_site_url() -> String {
    "https://widgets.healcode.com/sites/12715".to_string()
}

fn default_widget_url() -> String {
    "https://widgets.healcode.com/widgets/schedules/bd269397265.json".to_string()
}

fn default_username_field() -> String {
    "mb_client_session[username]".to_string()
}

fn default_password_field() -> String {
    "mb_client_session[password]".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MindbodyConfig {
    /// Base URL of the site's client area (login, schedules, cart).
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// Public schedule widget endpoint returning the JSON envelope.
    #[serde(default = "default_widget_url")]
    pub widget_url: String,

    /// Login form field that receives the username.
    #[serde(default = "default_username_field")]
    pub username_field: String,

    /// Login form field that receives the password.
    #[serde(default = "default_password_field")]
    pub password_field: String,
}

impl Default for MindbodyConfig {
    fn default() -> Self {
        Self {
            site_url: default_site_url(),
            widget_url: default_widget_url(),
            username_field: default_username_field(),
            password_field: default_password_field(),
        }
    }
}
