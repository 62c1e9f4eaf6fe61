//! Identity binding for outbound requests.

use std::sync::{Arc, PoisonError, RwLock};

/// Holds the user id stamped onto every outbound API request.
///
/// Clones share the same binding. Only the session controller rebinds it,
/// inside a transition; everything else reads.
#[derive(Debug, Clone, Default)]
pub struct IdentityBinder {
    bound: Arc<RwLock<Option<String>>>,
}

impl IdentityBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `id`, or unbind with `None`.
    pub fn bind(&self, id: Option<&str>) {
        let mut bound = self.bound.write().unwrap_or_else(PoisonError::into_inner);
        *bound = id.map(str::to_string);
    }

    /// The currently bound id.
    pub fn bound_id(&self) -> Option<String> {
        self.bound
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether the binding is exactly `id`.
    pub fn is_bound_to(&self, id: &str) -> bool {
        self.bound
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_deref()
            == Some(id)
    }
}
