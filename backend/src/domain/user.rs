//! User data model.
//!
//! A user is an identifier assigned by storage plus an open set of JSON
//! attributes supplied by clients. Attributes are opaque to the domain and are
//! flattened next to `id` on the wire:
//!
//! ```json
//! {"id": 1, "name": "Alice", "email": "alice@example.com"}
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Client-supplied user attributes keyed by field name.
pub type UserAttributes = Map<String, Value>;

/// Key reserved for the storage-assigned identifier.
const ID_KEY: &str = "id";

/// Validation errors returned when parsing a [`UserId`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserIdParseError {
    /// The identifier was missing or blank.
    #[error("user id must not be empty")]
    Empty,
    /// The identifier is not a 64-bit signed integer.
    #[error("user id must be an integer, got `{value}`")]
    NotAnInteger { value: String },
}

/// Storage-assigned user identifier.
///
/// Identifiers are allocated from a per-store counter starting at
/// [`UserId::FIRST`] and are never reused within a process lifetime. Zero and
/// negative values are well-formed but never assigned, so lookups for them
/// report not found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// First identifier handed out by a fresh store.
    pub const FIRST: Self = Self(1);

    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Access the raw integer value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// The identifier following this one, or `None` once the space is spent.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = UserIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(UserIdParseError::Empty);
        }
        s.parse::<i64>()
            .map(Self)
            .map_err(|_| UserIdParseError::NotAnInteger {
                value: s.to_owned(),
            })
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Attributes of a user that has not been assigned an identifier yet.
///
/// Used as the input to inserts and updates. Any `id` present in an inbound
/// payload must be an integer of any sign (or null) and is discarded: storage owns
/// identifier allocation and the route parameter owns identity on update.
///
/// # Examples
/// ```
/// use userbase::domain::NewUser;
/// use serde_json::json;
///
/// let draft: NewUser = serde_json::from_value(json!({"id": 9, "name": "Alice"}))
///     .expect("valid payload");
/// assert!(draft.attributes().get("id").is_none());
/// assert_eq!(draft.attributes().get("name"), Some(&json!("Alice")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "NewUserPayload")]
pub struct NewUser {
    attributes: UserAttributes,
}

#[derive(Deserialize)]
struct NewUserPayload {
    #[serde(default, rename = "id")]
    _id: Option<i64>,
    #[serde(flatten)]
    attributes: UserAttributes,
}

impl From<NewUserPayload> for NewUser {
    fn from(payload: NewUserPayload) -> Self {
        Self::new(payload.attributes)
    }
}

impl NewUser {
    /// Build a draft from raw attributes, dropping any reserved `id` key.
    #[must_use]
    pub fn new(mut attributes: UserAttributes) -> Self {
        attributes.remove(ID_KEY);
        Self { attributes }
    }

    /// Builder-style helper for setting a single attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if key != ID_KEY {
            self.attributes.insert(key, value.into());
        }
        self
    }

    /// Borrow the attribute map.
    #[must_use]
    pub const fn attributes(&self) -> &UserAttributes {
        &self.attributes
    }
}

/// A stored user record.
///
/// ## Invariants
/// - `id` is assigned by storage and never changes.
/// - `attributes` never contains an `id` key, so the serialised object has a
///   single authoritative identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    #[serde(flatten)]
    attributes: UserAttributes,
}

impl User {
    /// Combine an assigned identifier with a draft's attributes.
    #[must_use]
    pub fn new(id: UserId, draft: NewUser) -> Self {
        Self {
            id,
            attributes: draft.attributes,
        }
    }

    /// Storage-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Borrow the attribute map.
    #[must_use]
    pub const fn attributes(&self) -> &UserAttributes {
        &self.attributes
    }

    /// Look up a single attribute by name.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Strip the identifier, yielding the attributes as a draft.
    #[must_use]
    pub fn into_draft(self) -> NewUser {
        NewUser {
            attributes: self.attributes,
        }
    }
}

#[cfg(test)]
mod tests;
