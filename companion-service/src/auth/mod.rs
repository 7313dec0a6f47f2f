//! OAuth credential lifecycle and scope gating for YouTube calls.
//!
//! Every write route follows the same order: read the cached
//! [`Identity`] from the [`CredentialStore`], confirm the grant with the
//! [`ScopeGate`], then hand the identity to the video platform facade.

pub mod credential;
pub mod error;
pub mod flow;
pub mod gate;
pub mod scopes;

pub use credential::{CredentialStore, Identity};
pub use error::{AuthError, LOGIN_PATH};
pub use flow::{AuthorizationFlow, AuthorizationRequest};
pub use gate::ScopeGate;
pub use scopes::ScopeSet;
