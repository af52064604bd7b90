use std::sync::Arc;

use tracing::info;

use crate::repository::AdoptionRepository;
use crate::session::SessionStore;
use crate::state::{ListState, Observable, Phase};
use crate::types::{AdoptionApplication, AdoptionForm};
use crate::validation::validate_application;

use super::session_user;

/// Submission of one adoption form for the session user.
pub struct AdoptionFormViewModel {
    repo: AdoptionRepository,
    session: Arc<SessionStore>,
    pub state: Observable<Phase<AdoptionForm>>,
}

impl AdoptionFormViewModel {
    pub fn new(repo: AdoptionRepository, session: Arc<SessionStore>) -> Self {
        Self {
            repo,
            session,
            state: Observable::default(),
        }
    }

    pub fn submit(&self, animal_id: i64, application: &AdoptionApplication) {
        if let Err(errors) = validate_application(application) {
            return self.state.set(Phase::Error(errors.to_string()));
        }
        let user_id = match session_user(&self.session) {
            Ok(id) => id,
            Err(message) => return self.state.set(Phase::Error(message)),
        };
        self.state.set(Phase::Loading);
        match self.repo.submit(user_id, animal_id, application) {
            Ok(form) => {
                info!(user_id, animal_id, form_id = ?form.id, "adoption form submitted");
                self.state.set(Phase::Success(form));
            }
            Err(err) => self.state.set(Phase::Error(err.message())),
        }
    }

    pub fn reset(&self) {
        self.state.set(Phase::Idle);
    }

    pub fn close(&self) {
        self.state.close();
    }
}

/// The session user's own adoption requests.
pub struct AdoptionRequestsViewModel {
    repo: AdoptionRepository,
    session: Arc<SessionStore>,
    pub state: Observable<ListState<AdoptionForm>>,
}

impl AdoptionRequestsViewModel {
    pub fn new(repo: AdoptionRepository, session: Arc<SessionStore>) -> Self {
        Self {
            repo,
            session,
            state: Observable::default(),
        }
    }

    pub fn load(&self) {
        self.state.update(ListState::start);
        let result = session_user(&self.session)
            .and_then(|user_id| self.repo.by_user(user_id).map_err(|err| err.message()));
        match result {
            Ok(forms) => self.state.update(|s| s.loaded(forms)),
            Err(message) => self.state.update(|s| s.failed(message)),
        }
    }

    pub fn clear_error(&self) {
        self.state.update(|s| s.error = None);
    }

    pub fn close(&self) {
        self.state.close();
    }
}
