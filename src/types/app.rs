//! Application identity.

use super::AccessToken;

/// Facebook application credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct App {
    id: String,
    secret: String,
}

impl App {
    pub fn new(id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            secret: secret.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// App access token (`{id}|{secret}`), usable where no user token exists.
    pub fn access_token(&self) -> AccessToken {
        AccessToken::new(format!("{}|{}", self.id, self.secret))
    }
}
