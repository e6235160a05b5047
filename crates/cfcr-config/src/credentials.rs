//! Booking account credentials.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Default, Deserialize, Serialize)]
pub struct CredentialsConfig {
    /// Account username (usually the e-mail address).
    #[serde(default)]
    pub username: String,

    /// Account password.
    #[serde(default)]
    pub password: String,
}

impl CredentialsConfig {
    /// Both username and password are present.
    pub fn is_configured(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("username", &self.username)
            .field("password", &if self.password.is_empty() { "" } else { "<redacted>" })
            .finish()
    }
}
