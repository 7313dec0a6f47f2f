use super::credential::{CredentialStore, Identity};
use super::error::AuthError;
use super::scopes::ScopeSet;
use metrics::counter;
use std::sync::Arc;

/// Checks the cached identity's grant before a sensitive call goes out.
///
/// Purely local: the authorization server is never consulted.
#[derive(Debug, Clone)]
pub struct ScopeGate {
    credentials: CredentialStore,
}

impl ScopeGate {
    pub fn new(credentials: CredentialStore) -> Self {
        Self { credentials }
    }

    /// Check the cached identity and hand back exactly the one that passed,
    /// so the caller never acts on an identity the gate did not see.
    pub fn require_scopes(&self, required: &ScopeSet) -> Result<Arc<Identity>, AuthError> {
        let identity = self.credentials.current()?;
        Self::check(&identity, required)?;
        Ok(identity)
    }

    pub fn check(identity: &Identity, required: &ScopeSet) -> Result<(), AuthError> {
        let missing = required.missing_from(identity.scopes());

        if missing.is_empty() {
            return Ok(());
        }

        tracing::warn!(
            required = %required,
            granted = %identity.scopes(),
            missing = %missing,
            "Insufficient scopes"
        );
        counter!("scope_gate_denials_total").increment(1);

        Err(AuthError::InsufficientScope { missing })
    }
}
