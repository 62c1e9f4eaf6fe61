//! Session transition events.
//!
//! The controller publishes exactly one [`SessionTransition`] per state
//! change on a tokio broadcast channel. Subscribers (push registration,
//! diagnostics) receive them in commit order.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

use super::session::Session;

/// Type alias for the transition sender.
pub type TransitionSender = broadcast::Sender<SessionTransition>;

/// Type alias for a transition subscription.
pub type TransitionReceiver = broadcast::Receiver<SessionTransition>;

/// Create a transition channel with the given capacity.
pub fn create_transition_channel(capacity: usize) -> (TransitionSender, TransitionReceiver) {
    broadcast::channel(capacity)
}

/// How an identity was established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignInMethod {
    Password,
    Google,
    SignUp,
}

impl std::fmt::Display for SignInMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SignInMethod::Password => "password",
            SignInMethod::Google => "google",
            SignInMethod::SignUp => "sign_up",
        };
        f.write_str(name)
    }
}

/// What changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransitionKind {
    /// The one-time restore finished; `session` is the rehydrated identity.
    Bootstrapped { session: Option<Session> },
    /// Anonymous (or the same account) became Authenticated.
    Established {
        session: Session,
        method: SignInMethod,
    },
    /// One account replaced another.
    Switched {
        previous: Session,
        session: Session,
        method: SignInMethod,
    },
    /// The user signed out.
    SignedOut { previous: Session },
}

/// A state change published by the session controller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionTransition {
    /// Position in the controller's transition order, starting at 1.
    pub sequence: u64,
    /// When the transition committed.
    pub at: DateTime<Utc>,
    pub kind: TransitionKind,
}

impl SessionTransition {
    pub fn new(sequence: u64, kind: TransitionKind) -> Self {
        Self {
            sequence,
            at: Utc::now(),
            kind,
        }
    }

    /// The session that is active after this transition.
    pub fn session(&self) -> Option<&Session> {
        match &self.kind {
            TransitionKind::Bootstrapped { session } => session.as_ref(),
            TransitionKind::Established { session, .. }
            | TransitionKind::Switched { session, .. } => Some(session),
            TransitionKind::SignedOut { .. } => None,
        }
    }

    /// Whether a user actively signed in (as opposed to a restore).
    pub fn is_sign_in(&self) -> bool {
        matches!(
            self.kind,
            TransitionKind::Established { .. } | TransitionKind::Switched { .. }
        )
    }

    /// Whether this transition restored a stored session at startup.
    pub fn is_restore(&self) -> bool {
        matches!(self.kind, TransitionKind::Bootstrapped { session: Some(_) })
    }
}
