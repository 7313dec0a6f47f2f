//! Permission strings and the set type they are compared in.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Manage the channel's account (read access and base API use).
pub const YOUTUBE: &str = "https://www.googleapis.com/auth/youtube";

/// Manage content over SSL; required for every write against videos and comments.
pub const YOUTUBE_FORCE_SSL: &str = "https://www.googleapis.com/auth/youtube.force-ssl";

/// A set of granted or required OAuth scopes.
///
/// Membership is exact string equality. No scope implies another.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeSet(BTreeSet<String>);

impl ScopeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the space-delimited `scope` value returned by a token endpoint.
    pub fn parse(grant: &str) -> Self {
        grant.split_whitespace().collect()
    }

    /// The fixed set requested at login.
    pub fn requested() -> Self {
        [YOUTUBE, YOUTUBE_FORCE_SSL].into_iter().collect()
    }

    /// What a comment or video write needs.
    pub fn content_management() -> Self {
        [YOUTUBE_FORCE_SSL].into_iter().collect()
    }

    pub fn contains(&self, scope: &str) -> bool {
        self.0.contains(scope)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Scopes in `self` that `granted` does not cover.
    pub fn missing_from(&self, granted: &ScopeSet) -> ScopeSet {
        ScopeSet(self.0.difference(&granted.0).cloned().collect())
    }

    pub fn is_subset(&self, other: &ScopeSet) -> bool {
        self.0.is_subset(&other.0)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for ScopeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        ScopeSet(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for ScopeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.iter().collect::<Vec<_>>().join(" ");
        f.write_str(&joined)
    }
}
