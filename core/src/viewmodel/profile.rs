use std::sync::Arc;

use tracing::warn;

use crate::repository::AuthRepository;
use crate::session::SessionStore;
use crate::state::Observable;
use crate::types::User;

use super::auth::SESSION_NOT_CLEARED;

const PROFILE_LOAD_FAILED: &str = "Error al cargar perfil";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileState {
    pub is_loading: bool,
    pub user: Option<User>,
    pub error: Option<String>,
}

pub struct ProfileViewModel {
    repo: AuthRepository,
    session: Arc<SessionStore>,
    pub state: Observable<ProfileState>,
}

impl ProfileViewModel {
    pub fn new(repo: AuthRepository, session: Arc<SessionStore>) -> Self {
        Self {
            repo,
            session,
            state: Observable::default(),
        }
    }

    /// Fetch the session user's profile. Without a session there is nothing
    /// to show and nothing is sent.
    pub fn load(&self) {
        let Some(user_id) = self.session.user_id() else {
            return;
        };
        self.state.update(|s| {
            s.is_loading = true;
            s.error = None;
        });
        match self.repo.find_by_id(user_id) {
            Ok(user) => self.state.update(|s| {
                s.is_loading = false;
                s.user = Some(user);
            }),
            Err(err) => {
                let message = if err.is_network() {
                    err.message()
                } else {
                    PROFILE_LOAD_FAILED.to_string()
                };
                self.state.update(|s| {
                    s.is_loading = false;
                    s.error = Some(message);
                });
            }
        }
    }

    pub fn refresh(&self) {
        self.load();
    }

    pub fn logout(&self) {
        if let Err(err) = self.session.clear() {
            warn!(error = %err, "could not clear session");
            self.state.update(|s| s.error = Some(SESSION_NOT_CLEARED.to_string()));
            return;
        }
        self.state.update(|s| s.user = None);
    }

    pub fn close(&self) {
        self.state.close();
    }
}
