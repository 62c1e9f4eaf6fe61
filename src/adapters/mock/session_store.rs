//! In-memory session store for testing.
//!
//! Keeps the raw record string in memory so tests can inject malformed data
//! and switch individual operations into failure mode.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::auth::Session;
use crate::traits::{SessionStore, StoreError};

/// In-memory session store for testing.
///
/// # Example
///
/// ```ignore
/// use splitpay::adapters::mock::InMemorySessionStore;
/// use splitpay::traits::SessionStore;
///
/// let store = InMemorySessionStore::new();
/// store.write(&Session::new("1", "A", "a@x.com")).await?;
/// assert_eq!(store.raw().as_deref(), Some(r#"{"id":"1","name":"A","email":"a@x.com"}"#));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    /// Raw stored record
    record: Arc<Mutex<Option<String>>>,
    /// Whether write should fail
    write_should_fail: Arc<Mutex<bool>>,
    /// Whether clear should fail
    clear_should_fail: Arc<Mutex<bool>>,
    /// Number of successful writes
    writes: Arc<Mutex<usize>>,
}

impl InMemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `session`.
    pub fn with_session(session: &Session) -> Self {
        let store = Self::new();
        store.set_raw(session.to_record().ok());
        store
    }

    /// Configure whether write should fail.
    pub fn set_write_should_fail(&self, should_fail: bool) {
        *self.write_should_fail.lock().unwrap() = should_fail;
    }

    /// Configure whether clear should fail.
    pub fn set_clear_should_fail(&self, should_fail: bool) {
        *self.clear_should_fail.lock().unwrap() = should_fail;
    }

    /// The raw stored record, exactly as persisted.
    pub fn raw(&self) -> Option<String> {
        self.record.lock().unwrap().clone()
    }

    /// Replace the raw record (e.g. with corrupt data).
    pub fn set_raw(&self, raw: Option<String>) {
        *self.record.lock().unwrap() = raw;
    }

    /// The stored session, parsed.
    pub fn session(&self) -> Option<Session> {
        self.raw().and_then(|raw| Session::from_record(&raw))
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn read(&self) -> Option<Session> {
        self.session()
    }

    async fn write(&self, session: &Session) -> Result<(), StoreError> {
        if *self.write_should_fail.lock().unwrap() {
            return Err(StoreError::WriteFailed("Mock write failure".to_string()));
        }

        let record = session
            .to_record()
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        *self.record.lock().unwrap() = Some(record);
        *self.writes.lock().unwrap() += 1;
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        if *self.clear_should_fail.lock().unwrap() {
            return Err(StoreError::ClearFailed("Mock clear failure".to_string()));
        }

        *self.record.lock().unwrap() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_and_read() {
        let store = InMemorySessionStore::new();
        let session = Session::new("1", "A", "a@x.com");

        store.write(&session).await.unwrap();

        assert_eq!(store.read().await, Some(session));
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_record_reads_as_none() {
        let store = InMemorySessionStore::new();
        store.set_raw(Some("{{{".to_string()));
        assert!(store.read().await.is_none());
    }

    #[tokio::test]
    async fn test_write_failure_keeps_record() {
        let session = Session::new("1", "A", "a@x.com");
        let store = InMemorySessionStore::with_session(&session);
        store.set_write_should_fail(true);

        let result = store.write(&Session::new("2", "B", "b@x.com")).await;

        assert!(matches!(result, Err(StoreError::WriteFailed(_))));
        assert_eq!(store.session(), Some(session));
    }

    #[tokio::test]
    async fn test_clear_failure() {
        let store = InMemorySessionStore::with_session(&Session::new("1", "A", "a@x.com"));
        store.set_clear_should_fail(true);

        assert!(matches!(store.clear().await, Err(StoreError::ClearFailed(_))));
        assert!(store.raw().is_some());
    }

    #[test]
    fn test_clones_share_state() {
        let store = InMemorySessionStore::new();
        let cloned = store.clone();
        store.set_raw(Some("x".to_string()));
        assert_eq!(cloned.raw(), Some("x".to_string()));
    }
}
