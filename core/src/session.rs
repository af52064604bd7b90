//! Local session store.
//!
//! # Design
//! Seven independent scalar fields under one named store
//! (`user_preferences`). Reads never fail: unset fields come back as
//! `false`, `0` or `""`, and `user_id()` / `current_user()` turn those
//! defaults into `None`. Each setter is its own last-write-wins write; there
//! is no cross-field transaction apart from `save_session` and `clear`,
//! which rewrite every field at once.
//!
//! The store is built once by the host and shared by `Arc`. Persistence is a
//! JSON file in a host-provided directory, or nothing at all for tests and
//! ephemeral sessions. A change is written first and then published on a
//! `watch` channel, so subscribers never see a value that was not stored.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::client::AdminToken;
use crate::types::User;

/// Name of the store; the file is `<dir>/user_preferences.json`.
pub const STORE_NAME: &str = "user_preferences";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session store {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("session encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Snapshot of every stored field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    pub is_logged_in: bool,
    pub user_id: i64,
    pub is_admin: bool,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: String,
    pub auth_token: String,
}

#[derive(Debug)]
enum Backend {
    Memory,
    File(PathBuf),
}

#[derive(Debug)]
pub struct SessionStore {
    backend: Backend,
    state: watch::Sender<Session>,
    writes: Mutex<()>,
}

impl SessionStore {
    /// A store that forgets everything when dropped.
    pub fn in_memory() -> Self {
        Self::with_backend(Backend::Memory, Session::default())
    }

    /// Open (or create) the store under `dir`. An unreadable or corrupt
    /// file starts an empty session.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, SessionError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|source| SessionError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = dir.join(format!("{STORE_NAME}.json"));
        let session = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!(path = %path.display(), error = %err, "discarding unreadable session");
                Session::default()
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Session::default(),
            Err(source) => return Err(SessionError::Io { path, source }),
        };
        debug!(path = %path.display(), logged_in = session.is_logged_in, "session store opened");
        Ok(Self::with_backend(Backend::File(path), session))
    }

    fn with_backend(backend: Backend, session: Session) -> Self {
        let (state, _) = watch::channel(session);
        Self {
            backend,
            state,
            writes: Mutex::new(()),
        }
    }

    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Receives every change made through this store.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.borrow().is_logged_in
    }

    pub fn raw_user_id(&self) -> i64 {
        self.state.borrow().user_id
    }

    /// The logged-in user's id; `None` when unset or zero.
    pub fn user_id(&self) -> Option<i64> {
        let session = self.state.borrow();
        (session.is_logged_in && session.user_id != 0).then_some(session.user_id)
    }

    pub fn is_admin(&self) -> bool {
        self.state.borrow().is_admin
    }

    pub fn user_name(&self) -> String {
        self.state.borrow().user_name.clone()
    }

    pub fn user_email(&self) -> String {
        self.state.borrow().user_email.clone()
    }

    pub fn user_phone(&self) -> String {
        self.state.borrow().user_phone.clone()
    }

    pub fn auth_token(&self) -> String {
        self.state.borrow().auth_token.clone()
    }

    /// Bearer token for admin calls, only while an admin is logged in.
    pub fn admin_token(&self) -> Option<AdminToken> {
        let session = self.state.borrow();
        (session.is_logged_in && session.is_admin && !session.auth_token.is_empty())
            .then(|| AdminToken::new(session.auth_token.clone()))
    }

    /// The stored profile, if a user is logged in.
    pub fn current_user(&self) -> Option<User> {
        let session = self.state.borrow();
        if !session.is_logged_in || session.user_id == 0 {
            return None;
        }
        Some(User {
            id: session.user_id,
            name: session.user_name.clone(),
            email: session.user_email.clone(),
            phone: session.user_phone.clone(),
            is_admin: session.is_admin,
        })
    }

    pub fn set_logged_in(&self, value: bool) -> Result<(), SessionError> {
        self.write(|s| s.is_logged_in = value)
    }

    pub fn set_user_id(&self, value: i64) -> Result<(), SessionError> {
        self.write(|s| s.user_id = value)
    }

    pub fn set_admin(&self, value: bool) -> Result<(), SessionError> {
        self.write(|s| s.is_admin = value)
    }

    pub fn set_user_name(&self, value: &str) -> Result<(), SessionError> {
        self.write(|s| s.user_name = value.to_string())
    }

    pub fn set_user_email(&self, value: &str) -> Result<(), SessionError> {
        self.write(|s| s.user_email = value.to_string())
    }

    pub fn set_user_phone(&self, value: &str) -> Result<(), SessionError> {
        self.write(|s| s.user_phone = value.to_string())
    }

    pub fn set_auth_token(&self, value: &str) -> Result<(), SessionError> {
        self.write(|s| s.auth_token = value.to_string())
    }

    /// Store every field of a freshly logged-in user.
    pub fn save_session(&self, user: &User, token: Option<&str>) -> Result<(), SessionError> {
        self.write(|s| {
            *s = Session {
                is_logged_in: true,
                user_id: user.id,
                is_admin: user.is_admin,
                user_name: user.name.clone(),
                user_email: user.email.clone(),
                user_phone: user.phone.clone(),
                auth_token: token.unwrap_or_default().to_string(),
            }
        })
    }

    pub fn clear(&self) -> Result<(), SessionError> {
        self.write(|s| *s = Session::default())
    }

    /// Applies `change` to a copy and publishes it only once it is stored.
    /// A failed write leaves the session and its subscribers untouched.
    fn write(&self, change: impl FnOnce(&mut Session)) -> Result<(), SessionError> {
        let _guard = self.writes.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = self.snapshot();
        change(&mut next);
        self.persist(&next)?;
        self.state.send_replace(next);
        Ok(())
    }

    fn persist(&self, session: &Session) -> Result<(), SessionError> {
        let Backend::File(path) = &self.backend else {
            return Ok(());
        };
        let encoded = serde_json::to_string_pretty(session)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, encoded).map_err(|source| SessionError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, path).map_err(|source| SessionError::Io {
            path: path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(admin: bool) -> User {
        User {
            id: 42,
            name: "Ana".to_string(),
            email: "ana@test.com".to_string(),
            phone: "555".to_string(),
            is_admin: admin,
        }
    }

    #[test]
    fn unset_fields_read_as_defaults() {
        let store = SessionStore::in_memory();
        assert!(!store.is_logged_in());
        assert_eq!(store.raw_user_id(), 0);
        assert_eq!(store.user_name(), "");
        assert_eq!(store.user_id(), None);
        assert_eq!(store.current_user(), None);
        assert_eq!(store.admin_token(), None);
    }

    #[test]
    fn save_and_clear() {
        let store = SessionStore::in_memory();
        store.save_session(&user(false), Some("tok")).unwrap();
        assert_eq!(store.user_id(), Some(42));
        assert_eq!(store.current_user(), Some(user(false)));
        assert_eq!(store.auth_token(), "tok");
        // A regular user's token is not an admin credential.
        assert_eq!(store.admin_token(), None);

        store.clear().unwrap();
        assert_eq!(store.snapshot(), Session::default());
    }

    #[test]
    fn admin_token_requires_admin_session() {
        let store = SessionStore::in_memory();
        store.save_session(&user(true), Some("adm")).unwrap();
        assert_eq!(store.admin_token(), Some(AdminToken::new("adm")));
    }

    #[test]
    fn setters_are_independent() {
        let store = SessionStore::in_memory();
        store.set_user_name("Beto").unwrap();
        store.set_user_id(7).unwrap();
        assert_eq!(store.user_name(), "Beto");
        // Not logged in yet, so the id is not a session user.
        assert_eq!(store.user_id(), None);
        store.set_logged_in(true).unwrap();
        assert_eq!(store.user_id(), Some(7));
    }

    #[test]
    fn persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = SessionStore::open(dir.path()).unwrap();
            store.save_session(&user(true), Some("adm")).unwrap();
        }
        assert!(dir.path().join("user_preferences.json").exists());
        let reopened = SessionStore::open(dir.path()).unwrap();
        assert_eq!(reopened.current_user(), Some(user(true)));
        assert_eq!(reopened.auth_token(), "adm");
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("user_preferences.json"), "{not json").unwrap();
        let store = SessionStore::open(dir.path()).unwrap();
        assert!(!store.is_logged_in());
    }

    #[test]
    fn failed_write_keeps_previous_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path().join("prefs")).unwrap();
        store.save_session(&user(false), Some("tok")).unwrap();
        let mut rx = store.subscribe();

        // A directory in place of the temp file makes the write fail.
        fs::create_dir(dir.path().join("prefs").join("user_preferences.json.tmp")).unwrap();
        let err = store.save_session(&user(true), Some("adm")).unwrap_err();
        assert!(matches!(err, SessionError::Io { .. }), "{err:?}");
        assert!(store.clear().is_err());

        assert_eq!(store.current_user(), Some(user(false)));
        assert_eq!(store.auth_token(), "tok");
        assert!(!rx.has_changed().unwrap());
        let reopened = SessionStore::open(dir.path().join("prefs")).unwrap();
        assert_eq!(reopened.current_user(), Some(user(false)));
    }

    #[test]
    fn subscribers_see_changes() {
        let store = SessionStore::in_memory();
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());
        store.save_session(&user(false), None).unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().user_id, 42);
    }
}
