//! Session contract consumed by the browsing controller.
//!
//! Session management itself (login, registration, cookie verification,
//! password reset) is owned by an external collaborator. The controller
//! only reads the current value through [`SessionProvider`] and reacts to
//! it — expiry simply makes the next snapshot unauthenticated.

use std::sync::{Arc, RwLock};

/// Point-in-time view of the external session state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub logged_in: bool,
    pub user_id: Option<String>,
    pub username: Option<String>,
}

impl SessionSnapshot {
    /// User ID when the session is authenticated, `None` otherwise.
    pub fn authenticated_user(&self) -> Option<&str> {
        if self.logged_in {
            self.user_id.as_deref()
        } else {
            None
        }
    }
}

/// Read-only capability handed to the controller by the session owner.
pub trait SessionProvider: Send + Sync {
    fn snapshot(&self) -> SessionSnapshot;
}

/// Shared in-process session, used by the binary and by tests.
#[derive(Debug, Default)]
pub struct SharedSession {
    inner: RwLock<SessionSnapshot>,
}

impl SharedSession {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Convenience constructor for an already-authenticated session.
    pub fn logged_in(user_id: &str, username: &str) -> Arc<Self> {
        let session = Self::new();
        session.login(user_id, username);
        session
    }

    pub fn login(&self, user_id: &str, username: &str) {
        let snapshot = SessionSnapshot {
            logged_in: true,
            user_id: Some(user_id.to_string()),
            username: Some(username.to_string()),
        };
        match self.inner.write() {
            Ok(mut guard) => *guard = snapshot,
            Err(poisoned) => *poisoned.into_inner() = snapshot,
        }
    }

    /// Expire the session. The controller treats this as unauthenticated.
    pub fn expire(&self) {
        match self.inner.write() {
            Ok(mut guard) => *guard = SessionSnapshot::default(),
            Err(poisoned) => *poisoned.into_inner() = SessionSnapshot::default(),
        }
    }
}

impl SessionProvider for SharedSession {
    fn snapshot(&self) -> SessionSnapshot {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}
