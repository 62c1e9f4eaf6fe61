//! Session model and its persisted record form.
//!
//! A [`Session`] is the single authenticated identity held by the client.
//! It is stored as one JSON object `{id, name, email}` under
//! [`SESSION_STORAGE_KEY`]; anything that fails to parse is treated as
//! "no session".

use serde::{Deserialize, Deserializer, Serialize};

/// The storage key under which the session record lives.
pub const SESSION_STORAGE_KEY: &str = "splitpay.session";

/// The authenticated identity currently held by the running client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Server-assigned user id. Some backends send this as a number.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: String,
}

impl Session {
    /// Create a new session.
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }

    /// A session without an id cannot be bound to outbound requests.
    pub fn is_valid(&self) -> bool {
        !self.id.trim().is_empty()
    }

    /// Serialize into the persisted record form.
    pub fn to_record(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a persisted record.
    ///
    /// Returns `None` for malformed data; callers treat that as absence.
    pub fn from_record(raw: &str) -> Option<Self> {
        match serde_json::from_str(raw) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!("Ignoring unparsable session record: {}", e);
                None
            }
        }
    }
}

/// Accept ids sent either as JSON strings or numbers.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}
