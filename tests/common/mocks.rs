//! Extra test doubles for integration tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use splitpay::adapters::mock::InMemorySessionStore;
use splitpay::auth::Session;
use splitpay::traits::{SessionStore, StoreError};

/// Session store whose writes block until released.
///
/// Wraps an [`InMemorySessionStore`]; reads and clears pass straight through.
#[derive(Debug, Clone)]
pub struct GatedSessionStore {
    pub inner: InMemorySessionStore,
    gate: Arc<Notify>,
    writes_started: Arc<Mutex<usize>>,
}

impl GatedSessionStore {
    pub fn new(inner: InMemorySessionStore) -> Self {
        Self {
            inner,
            gate: Arc::new(Notify::new()),
            writes_started: Arc::new(Mutex::new(0)),
        }
    }

    /// Let one blocked write proceed.
    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn writes_started(&self) -> usize {
        *self.writes_started.lock().unwrap()
    }
}

#[async_trait]
impl SessionStore for GatedSessionStore {
    async fn read(&self) -> Option<Session> {
        self.inner.read().await
    }

    async fn write(&self, session: &Session) -> Result<(), StoreError> {
        *self.writes_started.lock().unwrap() += 1;
        self.gate.notified().await;
        self.inner.write(session).await
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.inner.clear().await
    }
}
