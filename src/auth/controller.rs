//! Session controller.
//!
//! The single owner of "who is signed in". It sequences the identity
//! providers, the session store and the identity binder so that storage,
//! binder and in-memory state always agree, and publishes one
//! [`SessionTransition`] per state change.
//!
//! ## State machine
//!
//! ```text
//! Bootstrapping ──► Anonymous ◄──────────┐
//!       │              │ establish       │ sign_out
//!       └────────────► Authenticated ────┘
//!                      │    ▲
//!                      └────┘ switch
//! ```
//!
//! ## Concurrency
//!
//! - `sign_in`, `sign_in_with_google` and `sign_up` share a single-flight
//!   guard; a second concurrent call fails fast with "Sign in already in
//!   progress".
//! - `sign_out` and `forgot_password` bypass the guard.
//! - Each sign-out bumps an epoch. An establish commits only if the epoch it
//!   saw when it started is unchanged, so a sign-out always wins over a
//!   pending sign-in.
//! - Restore, commit and sign-out run on their own tokio task. Dropping the
//!   caller's future never leaves storage, binder and state half-updated;
//!   the transition still runs to completion or failure.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{watch, Mutex, OnceCell};

use super::api::ApiClient;
use super::binder::IdentityBinder;
use super::events::{
    create_transition_channel, SessionTransition, SignInMethod, TransitionKind,
    TransitionReceiver, TransitionSender,
};
use super::providers::{
    GoogleProvider, PasswordProvider, PasswordResetProvider, SignUpProfile, SignUpProvider,
};
use super::result::AuthResult;
use super::session::Session;
use crate::error::{AuthFailure, ConfigError};
use crate::traits::{GoogleSignInSdk, SessionStore};

/// Default capacity of the transition broadcast channel.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Where the controller is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Bootstrapping,
    Anonymous,
    Authenticated(Session),
}

impl SessionState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }
}

/// What the UI observes: the current user and whether restore is running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthSnapshot {
    pub user: Option<Session>,
    pub is_loading: bool,
}

impl AuthSnapshot {
    fn of(state: &SessionState) -> Self {
        Self {
            user: state.session().cloned(),
            is_loading: matches!(state, SessionState::Bootstrapping),
        }
    }
}

/// Builder for [`SessionController`].
///
/// Every collaborator is required; [`build`](Self::build) names the first
/// missing one.
#[derive(Default)]
pub struct SessionControllerBuilder {
    store: Option<Arc<dyn SessionStore>>,
    api: Option<ApiClient>,
    google: Option<Arc<dyn GoogleSignInSdk>>,
    event_capacity: Option<usize>,
}

impl SessionControllerBuilder {
    pub fn store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// The API client. Its binder becomes the one the controller rebinds.
    pub fn api(mut self, api: ApiClient) -> Self {
        self.api = Some(api);
        self
    }

    pub fn google(mut self, google: Arc<dyn GoogleSignInSdk>) -> Self {
        self.google = Some(google);
        self
    }

    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = Some(capacity.max(1));
        self
    }

    pub fn build(self) -> Result<SessionController, ConfigError> {
        let store = self
            .store
            .ok_or(ConfigError::MissingDependency("session store"))?;
        let api = self.api.ok_or(ConfigError::MissingDependency("api client"))?;
        let google = self
            .google
            .ok_or(ConfigError::MissingDependency("google sign-in sdk"))?;

        let (transitions, _) =
            create_transition_channel(self.event_capacity.unwrap_or(DEFAULT_EVENT_CAPACITY));
        let (snapshot_tx, _) = watch::channel(AuthSnapshot::of(&SessionState::Bootstrapping));

        let core = SessionCore {
            store,
            binder: api.binder().clone(),
            state: Mutex::new(SessionState::Bootstrapping),
            sign_out_epoch: AtomicU64::new(0),
            snapshot_tx,
            transitions,
            sequence: AtomicU64::new(0),
        };

        Ok(SessionController {
            core: Arc::new(core),
            password: PasswordProvider::new(api.clone()),
            google: GoogleProvider::new(google, api.clone()),
            sign_up: SignUpProvider::new(api.clone()),
            password_reset: PasswordResetProvider::new(api),
            establish_guard: Mutex::new(()),
            bootstrapped: OnceCell::new(),
        })
    }
}

/// Storage, binder and state, changed together.
///
/// Shared with the tasks that run each transition.
struct SessionCore {
    store: Arc<dyn SessionStore>,
    binder: IdentityBinder,
    state: Mutex<SessionState>,
    sign_out_epoch: AtomicU64,
    snapshot_tx: watch::Sender<AuthSnapshot>,
    transitions: TransitionSender,
    sequence: AtomicU64,
}

impl SessionCore {
    async fn restore(&self) {
        let stored = self.store.read().await;
        let mut state = self.state.lock().await;

        let session = match stored {
            Some(session) if session.is_valid() => {
                self.binder.bind(Some(&session.id));
                tracing::info!(user_id = %session.id, "Restored stored session");
                Some(session)
            }
            Some(_) => {
                tracing::warn!("Stored session has no user id; discarding it");
                if let Err(e) = self.store.clear().await {
                    tracing::warn!("Failed to clear invalid session record: {}", e);
                }
                None
            }
            None => {
                tracing::debug!("No stored session");
                None
            }
        };

        *state = match &session {
            Some(session) => SessionState::Authenticated(session.clone()),
            None => SessionState::Anonymous,
        };
        self.publish_snapshot(&state);
        self.publish(TransitionKind::Bootstrapped { session });
    }

    /// Apply a validated identity: storage, binder and state as one unit.
    async fn commit(
        &self,
        session: Session,
        method: SignInMethod,
        epoch: u64,
    ) -> Result<(), AuthFailure> {
        let mut state = self.state.lock().await;

        if self.sign_out_epoch.load(Ordering::SeqCst) != epoch {
            tracing::info!(%method, user_id = %session.id, "Sign in superseded by sign out");
            return Err(AuthFailure::interrupted());
        }

        let previous = state.session().cloned();
        let switching = previous.as_ref().is_some_and(|p| p.id != session.id);

        // Drop the old identity before the new record replaces it.
        if switching {
            self.binder.bind(None);
        }

        if let Err(e) = self.store.write(&session).await {
            let failure = AuthFailure::persistence();
            tracing::warn!(code = failure.error_code(), "Failed to persist session: {}", e);
            if switching {
                self.binder.bind(previous.as_ref().map(|p| p.id.as_str()));
            }
            return Err(failure);
        }

        self.binder.bind(Some(&session.id));
        *state = SessionState::Authenticated(session.clone());
        self.publish_snapshot(&state);

        let kind = match previous {
            Some(previous) if switching => {
                tracing::info!(
                    %method,
                    from = %previous.id,
                    to = %session.id,
                    "Switched account"
                );
                TransitionKind::Switched {
                    previous,
                    session,
                    method,
                }
            }
            _ => {
                tracing::info!(%method, user_id = %session.id, "Signed in");
                TransitionKind::Established { session, method }
            }
        };
        self.publish(kind);
        Ok(())
    }

    async fn sign_out(&self) {
        let mut state = self.state.lock().await;
        let previous = state.session().cloned();

        self.binder.bind(None);
        if let Err(e) = self.store.clear().await {
            tracing::warn!("Failed to clear stored session: {}", e);
        }
        *state = SessionState::Anonymous;
        self.publish_snapshot(&state);

        match previous {
            Some(previous) => {
                tracing::info!(user_id = %previous.id, "Signed out");
                self.publish(TransitionKind::SignedOut { previous });
            }
            None => tracing::debug!("Sign out with no active session"),
        }
    }

    fn publish_snapshot(&self, state: &SessionState) {
        self.snapshot_tx.send_replace(AuthSnapshot::of(state));
    }

    /// Callers hold the state lock, so sequence order is commit order.
    fn publish(&self, kind: TransitionKind) {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        if self.transitions.send(SessionTransition::new(sequence, kind)).is_err() {
            tracing::debug!(sequence, "No transition subscribers");
        }
    }
}

/// Orchestrates sign-in, sign-up, sign-out and session restore.
pub struct SessionController {
    core: Arc<SessionCore>,
    password: PasswordProvider,
    google: GoogleProvider,
    sign_up: SignUpProvider,
    password_reset: PasswordResetProvider,
    establish_guard: Mutex<()>,
    bootstrapped: OnceCell<()>,
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("snapshot", &*self.core.snapshot_tx.borrow())
            .finish()
    }
}

impl SessionController {
    pub fn builder() -> SessionControllerBuilder {
        SessionControllerBuilder::default()
    }

    // ---------------------------------------------------------------------
    // Observation
    // ---------------------------------------------------------------------

    /// The signed-in user, or `None` while anonymous or bootstrapping.
    pub fn user(&self) -> Option<Session> {
        self.core.snapshot_tx.borrow().user.clone()
    }

    /// True only until the one-time restore has finished.
    pub fn is_loading(&self) -> bool {
        self.core.snapshot_tx.borrow().is_loading
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        self.core.snapshot_tx.borrow().clone()
    }

    /// Watch snapshot changes.
    pub fn watch(&self) -> watch::Receiver<AuthSnapshot> {
        self.core.snapshot_tx.subscribe()
    }

    /// Subscribe to transitions. Only transitions published after this call
    /// are delivered.
    pub fn subscribe(&self) -> TransitionReceiver {
        self.core.transitions.subscribe()
    }

    pub async fn state(&self) -> SessionState {
        self.core.state.lock().await.clone()
    }

    pub fn binder(&self) -> &IdentityBinder {
        &self.core.binder
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// Restore a stored session. Runs once; later calls return immediately
    /// after the first has finished. Every public operation calls this first.
    pub async fn bootstrap(&self) {
        self.bootstrapped
            .get_or_init(|| async {
                let core = self.core.clone();
                if let Err(e) = tokio::spawn(async move { core.restore().await }).await {
                    tracing::error!("Session restore task failed: {}", e);
                }
            })
            .await;
    }

    // ---------------------------------------------------------------------
    // Public operations
    // ---------------------------------------------------------------------

    /// Sign in with email and password.
    pub async fn sign_in(&self, email: &str, password: &str) -> AuthResult {
        self.establish(
            SignInMethod::Password,
            self.password.authenticate(email, password),
        )
        .await
    }

    /// Sign in through the Google account picker.
    pub async fn sign_in_with_google(&self) -> AuthResult {
        self.establish(SignInMethod::Google, self.google.authenticate())
            .await
    }

    /// Register a new account and sign in as it.
    pub async fn sign_up(&self, profile: &SignUpProfile) -> AuthResult {
        self.establish(SignInMethod::SignUp, self.sign_up.register(profile))
            .await
    }

    /// Request a password reset email. Never changes session state.
    pub async fn forgot_password(&self, email: &str) -> AuthResult {
        self.bootstrap().await;
        self.password_reset.request_reset(email).await
    }

    /// Sign out. Always succeeds for the caller; a failed storage clear is
    /// logged.
    pub async fn sign_out(&self) {
        self.bootstrap().await;
        self.core.sign_out_epoch.fetch_add(1, Ordering::SeqCst);

        let core = self.core.clone();
        if let Err(e) = tokio::spawn(async move { core.sign_out().await }).await {
            tracing::error!("Sign out task failed: {}", e);
        }

        self.google.sign_out().await;
    }

    // ---------------------------------------------------------------------
    // Transitions
    // ---------------------------------------------------------------------

    async fn establish<F>(&self, method: SignInMethod, attempt: F) -> AuthResult
    where
        F: Future<Output = Result<Session, AuthFailure>>,
    {
        self.bootstrap().await;

        let Ok(_guard) = self.establish_guard.try_lock() else {
            tracing::debug!(%method, "Rejected concurrent sign in");
            return AuthFailure::in_progress().into();
        };
        let epoch = self.core.sign_out_epoch.load(Ordering::SeqCst);

        let session = match attempt.await {
            Ok(session) => session,
            Err(failure) => {
                tracing::info!(
                    %method,
                    code = failure.error_code(),
                    "Sign in failed: {}",
                    failure
                );
                return failure.into();
            }
        };

        // The commit outlives this future if the caller stops awaiting it.
        let core = self.core.clone();
        let commit = tokio::spawn(async move { core.commit(session, method, epoch).await });
        match commit.await {
            Ok(result) => result.into(),
            Err(e) => {
                tracing::error!(%method, "Session commit task failed: {}", e);
                AuthFailure::persistence().into()
            }
        }
    }
}
