//! Session store trait abstraction.
//!
//! Provides a trait-based abstraction over the secure key-value storage that
//! holds the single persisted session record, enabling dependency injection
//! and mocking in tests.

use async_trait::async_trait;

use crate::auth::Session;

/// Session storage errors.
#[derive(Debug, Clone)]
pub enum StoreError {
    /// Failed to write the session record
    WriteFailed(String),
    /// Failed to clear the session record
    ClearFailed(String),
    /// Serialization error
    Serialization(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::WriteFailed(msg) => write!(f, "Failed to write session: {}", msg),
            StoreError::ClearFailed(msg) => write!(f, "Failed to clear session: {}", msg),
            StoreError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Trait for persisting the session record.
///
/// `read` never fails: a missing key and a malformed record both yield
/// `None`. `write` and `clear` report failures as values and must not panic.
///
/// # Example
///
/// ```ignore
/// use splitpay::traits::SessionStore;
/// use splitpay::auth::Session;
///
/// async fn remember<S: SessionStore>(store: &S, session: &Session) -> bool {
///     store.write(session).await.is_ok()
/// }
/// ```
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the stored session.
    ///
    /// # Returns
    /// - `Some(session)` if a well-formed record exists
    /// - `None` if the key is absent or the record is unparsable
    async fn read(&self) -> Option<Session>;

    /// Persist the session, replacing any existing record as a whole.
    async fn write(&self, session: &Session) -> Result<(), StoreError>;

    /// Remove the stored record. Clearing an absent record succeeds.
    async fn clear(&self) -> Result<(), StoreError>;
}
