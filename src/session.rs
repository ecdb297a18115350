//! Session state machine: `Anonymous` or `Authenticated` with a copy of the
//! signed-in user. State is derived at construction from the persisted
//! `currentUser` record and mutated only through the transitions below, so
//! `current().is_some() == is_auth()` always holds. The session owns the
//! `currentUser` key; the record collection itself lives in
//! [`crate::store::UserStore`].

use std::sync::Arc;
use tracing::{debug, warn};

use crate::store::{StorageBackend, UserRecord, CURRENT_USER_KEY};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated(UserRecord),
}

pub struct Session {
    backend: Arc<dyn StorageBackend>,
    state: SessionState,
}

impl Session {
    /// Restore session state from the persisted current-user record.
    /// A missing or unparseable record yields an anonymous session; the
    /// unparseable case also clears the key so the next restore is clean.
    pub fn restore(backend: Arc<dyn StorageBackend>) -> Self {
        let state = match backend.load(CURRENT_USER_KEY) {
            Some(raw) => match serde_json::from_str::<UserRecord>(&raw) {
                Ok(user) => {
                    debug!("session.restore user={}", user.email);
                    SessionState::Authenticated(user)
                }
                Err(e) => {
                    warn!("corrupt current-user record, starting anonymous: {}", e);
                    backend.remove(CURRENT_USER_KEY);
                    SessionState::Anonymous
                }
            },
            None => SessionState::Anonymous,
        };
        Self { backend, state }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The authenticated user's session copy, if any.
    pub fn current(&self) -> Option<&UserRecord> {
        match &self.state {
            SessionState::Authenticated(user) => Some(user),
            SessionState::Anonymous => None,
        }
    }

    /// `Anonymous -> Authenticated(user)`; persists the record as the
    /// current session.
    pub fn login(&mut self, user: UserRecord) -> anyhow::Result<()> {
        self.persist_current(&user)?;
        debug!("session.login user={}", user.email);
        self.state = SessionState::Authenticated(user);
        Ok(())
    }

    /// `Authenticated(_) -> Anonymous`; clears the persisted current
    /// session. Idempotent.
    pub fn logout(&mut self) {
        if let SessionState::Authenticated(user) = &self.state {
            debug!("session.logout user={}", user.email);
        }
        self.backend.remove(CURRENT_USER_KEY);
        self.state = SessionState::Anonymous;
    }

    /// `set_auth(false)` is `logout()` regardless of current state.
    /// `set_auth(true)` is a no-op: only [`Session::login`] can
    /// authenticate, which keeps the state/persistence invariant unforgeable.
    pub fn set_auth(&mut self, authenticated: bool) {
        if !authenticated {
            self.logout();
        }
    }

    /// Profile-update propagation: same authenticated identity, refreshed
    /// fields. Not a login; callers go through the account service.
    pub(crate) fn refresh(&mut self, user: UserRecord) -> anyhow::Result<()> {
        self.persist_current(&user)?;
        debug!("session.refresh user={}", user.email);
        self.state = SessionState::Authenticated(user);
        Ok(())
    }

    fn persist_current(&self, user: &UserRecord) -> anyhow::Result<()> {
        let raw = serde_json::to_string(user)?;
        self.backend.save(CURRENT_USER_KEY, &raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBackend;

    fn user(email: &str) -> UserRecord {
        UserRecord {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: email.into(),
            mobile: "0123456789".into(),
            password: crate::codec::encode("Abcdef1!"),
        }
    }

    #[test]
    fn fresh_backend_restores_anonymous() {
        let session = Session::restore(Arc::new(MemoryBackend::new()));
        assert!(!session.is_auth());
        assert!(session.current().is_none());
        assert_eq!(session.state(), &SessionState::Anonymous);
    }

    #[test]
    fn login_persists_and_restore_picks_it_up() {
        let backend = Arc::new(MemoryBackend::new());
        let mut session = Session::restore(backend.clone());
        session.login(user("a@x.com")).unwrap();
        assert!(session.is_auth());

        let restored = Session::restore(backend);
        assert!(restored.is_auth());
        assert_eq!(restored.current().unwrap().email, "a@x.com");
    }

    #[test]
    fn logout_clears_state_and_persistence_idempotently() {
        let backend = Arc::new(MemoryBackend::new());
        let mut session = Session::restore(backend.clone());
        session.login(user("a@x.com")).unwrap();
        session.logout();
        assert!(!session.is_auth());
        assert!(backend.load(CURRENT_USER_KEY).is_none());
        // again, from Anonymous
        session.logout();
        assert!(!session.is_auth());
    }

    #[test]
    fn set_auth_false_acts_as_logout_and_true_is_inert() {
        let backend = Arc::new(MemoryBackend::new());
        let mut session = Session::restore(backend.clone());
        session.set_auth(true);
        assert!(!session.is_auth());

        session.login(user("a@x.com")).unwrap();
        session.set_auth(false);
        assert!(!session.is_auth());
        assert!(backend.load(CURRENT_USER_KEY).is_none());
    }

    #[test]
    fn corrupt_current_user_restores_anonymous_and_clears_the_key() {
        let backend = Arc::new(MemoryBackend::new());
        backend.save(CURRENT_USER_KEY, "][").unwrap();
        let session = Session::restore(backend.clone());
        assert!(!session.is_auth());
        assert!(backend.load(CURRENT_USER_KEY).is_none());
    }

    #[test]
    fn refresh_keeps_identity_and_updates_persisted_copy() {
        let backend = Arc::new(MemoryBackend::new());
        let mut session = Session::restore(backend.clone());
        session.login(user("a@x.com")).unwrap();
        let mut updated = user("a@x.com");
        updated.mobile = "9876543210".into();
        session.refresh(updated).unwrap();
        assert_eq!(session.current().unwrap().mobile, "9876543210");
        let raw = backend.load(CURRENT_USER_KEY).unwrap();
        assert!(raw.contains("9876543210"));
    }
}
