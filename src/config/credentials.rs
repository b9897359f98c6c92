//! Credential resolution from configuration.
//!
//! The token is resolved on demand and never cached, so a changed
//! environment variable is picked up by the next client built.

use super::types::ApiConfig;

/// Wrapper for sensitive strings that prevents accidental logging.
///
/// The inner value is never exposed via Debug or Display traits.
/// Use `expose()` to access the actual value when needed for API calls.
#[derive(Clone)]
pub struct SecureString(String);

impl SecureString {
    /// Create a new secure string.
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Expose the inner value.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

/// Outcome of resolving the API token.
#[derive(Debug, Clone)]
pub enum CredentialStatus {
    /// Token resolved successfully.
    Configured(SecureString),
    /// No token available; requests go out unauthenticated.
    Anonymous,
}

impl ApiConfig {
    /// Resolve the bearer token from the inline value or the environment.
    pub fn resolve_credential(&self) -> CredentialStatus {
        if let Some(token) = self.auth_token.as_deref().filter(|t| !t.trim().is_empty()) {
            return CredentialStatus::Configured(SecureString::new(token.to_string()));
        }

        if self.auth_env_var.is_empty() {
            return CredentialStatus::Anonymous;
        }

        match std::env::var(&self.auth_env_var) {
            Ok(token) if !token.trim().is_empty() => {
                CredentialStatus::Configured(SecureString::new(token))
            }
            _ => CredentialStatus::Anonymous,
        }
    }
}
