use std::collections::BTreeMap;
use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::PrincipalError;

/// Identity being authenticated (the registry username).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Principal(String);

impl Principal {
    /// Create a new validated principal.
    ///
    /// # Arguments
    /// * `principal` - Raw username string
    ///
    /// # Errors
    /// * `Empty` - Principal is empty
    /// * `InvalidCharacters` - Principal contains control characters
    pub fn new(principal: String) -> Result<Self, PrincipalError> {
        if principal.is_empty() {
            Err(PrincipalError::Empty)
        } else if principal.chars().any(char::is_control) {
            Err(PrincipalError::InvalidCharacters)
        } else {
            Ok(Self(principal))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Authorization labels attached to an authenticated principal.
///
/// Maps a label name to an ordered list of values, e.g. `"group" -> ["teamA", "teamB"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Labels(BTreeMap<String, Vec<String>>);

impl Labels {
    /// Label holding remote organization memberships.
    pub const GROUP: &'static str = "group";

    pub fn new() -> Self {
        Self::default()
    }

    /// Build labels from remote group memberships.
    ///
    /// The `group` label is always present, even when `groups` is empty.
    pub fn from_groups(groups: Vec<String>) -> Self {
        let mut labels = Self::new();
        labels.insert(Self::GROUP, groups);
        labels
    }

    pub fn insert(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.0.insert(name.into(), values);
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }

    /// Values of the `group` label.
    pub fn groups(&self) -> &[String] {
        self.get(Self::GROUP).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

impl From<BTreeMap<String, Vec<String>>> for Labels {
    fn from(labels: BTreeMap<String, Vec<String>>) -> Self {
        Self(labels)
    }
}

/// Proof of a previously successful remote authentication.
///
/// At most one record exists per principal; the last write wins.
#[derive(Clone, PartialEq, Eq)]
pub struct CachedCredential {
    pub principal: Principal,
    /// One-way proof of `(principal, credential)`; never the raw credential.
    pub proof_hash: String,
    pub valid_until: DateTime<Utc>,
    pub labels: Labels,
}

impl CachedCredential {
    /// Whether the record may still be used as a positive result at `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now <= self.valid_until
    }
}

impl fmt::Debug for CachedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedCredential")
            .field("principal", &self.principal)
            .field("proof_hash", &"[REDACTED]")
            .field("valid_until", &self.valid_until)
            .field("labels", &self.labels)
            .finish()
    }
}
