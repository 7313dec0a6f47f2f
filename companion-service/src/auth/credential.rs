//! The authenticated identity and the single-slot store that holds it.

use super::error::AuthError;
use super::scopes::ScopeSet;
use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, Secret};
use std::sync::{Arc, RwLock};

/// Tokens are treated as expired this long before Google says they are,
/// so a request never leaves with a token that dies in flight.
const EXPIRY_SKEW_SECONDS: i64 = 60;

/// Credential obtained from a successful code exchange.
#[derive(Debug, Clone)]
pub struct Identity {
    access_token: Secret<String>,
    refresh_token: Option<Secret<String>>,
    expires_at: Option<DateTime<Utc>>,
    scopes: ScopeSet,
    issued_at: DateTime<Utc>,
}

impl Identity {
    pub fn new(access_token: impl Into<String>, scopes: ScopeSet) -> Self {
        Self {
            access_token: Secret::new(access_token.into()),
            refresh_token: None,
            expires_at: None,
            scopes,
            issued_at: Utc::now(),
        }
    }

    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(Secret::new(refresh_token.into()));
        self
    }

    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Value for the `Authorization: Bearer` header.
    pub fn bearer_token(&self) -> &str {
        self.access_token.expose_secret()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_ref().map(|t| t.expose_secret().as_str())
    }

    pub fn scopes(&self) -> &ScopeSet {
        &self.scopes
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// An identity without a known expiry never expires locally.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(at) => Utc::now() + Duration::seconds(EXPIRY_SKEW_SECONDS) >= at,
            None => false,
        }
    }
}

/// Process-wide holder of at most one [`Identity`].
///
/// Cloning the store shares the slot. Each write replaces the whole value,
/// so readers only ever observe "absent" or a complete identity.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    slot: Arc<RwLock<Option<Arc<Identity>>>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is cached.
    pub fn cache(&self, identity: Identity) {
        let mut guard = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(Arc::new(identity));
    }

    pub fn current(&self) -> Result<Arc<Identity>, AuthError> {
        let guard = self.slot.read().unwrap_or_else(|e| e.into_inner());
        guard.clone().ok_or(AuthError::Unauthenticated)
    }

    /// Swap in `replacement` only while the slot still holds `expected`.
    /// Returns false, leaving the slot alone, when something else was
    /// cached or the slot was cleared in the meantime.
    pub fn replace_if_current(&self, expected: &Arc<Identity>, replacement: Identity) -> bool {
        let mut guard = self.slot.write().unwrap_or_else(|e| e.into_inner());
        match guard.as_ref() {
            Some(current) if Arc::ptr_eq(current, expected) => {
                *guard = Some(Arc::new(replacement));
                true
            }
            _ => false,
        }
    }

    pub fn clear(&self) {
        let mut guard = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }
}
