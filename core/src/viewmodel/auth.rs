use std::sync::Arc;

use tracing::{info, warn};

use crate::repository::AuthRepository;
use crate::session::SessionStore;
use crate::state::{Observable, Phase};
use crate::types::User;
use crate::validation::{validate_login, FieldErrors, RegistrationForm};

pub const SESSION_NOT_SAVED: &str = "No se pudo guardar la sesión";
pub const SESSION_NOT_CLEARED: &str = "No se pudo cerrar la sesión";

/// Login, registration and the logged-in user.
pub struct AuthViewModel {
    repo: AuthRepository,
    session: Arc<SessionStore>,
    pub login_state: Observable<Phase<User>>,
    pub register_state: Observable<Phase<User>>,
    pub current_user: Observable<Option<User>>,
}

impl AuthViewModel {
    /// Restores the user stored in `session`, if any.
    pub fn new(repo: AuthRepository, session: Arc<SessionStore>) -> Self {
        let current_user = Observable::new(session.current_user());
        Self {
            repo,
            session,
            login_state: Observable::default(),
            register_state: Observable::default(),
            current_user,
        }
    }

    pub fn current_user(&self) -> Option<User> {
        self.current_user.get()
    }

    /// Blank fields fail without a request. A login that cannot be stored
    /// fails too, so the next start never finds a half-saved user.
    pub fn login(&self, email: &str, password: &str) {
        let credentials = match validate_login(email, password) {
            Ok(credentials) => credentials,
            Err(errors) => {
                self.login_state.set(Phase::Error(errors.to_string()));
                return;
            }
        };
        self.login_state.set(Phase::Loading);

        match self.repo.login(&credentials) {
            Ok(auth) => {
                if let Err(err) = self.session.save_session(&auth.user, auth.token.as_deref()) {
                    warn!(user_id = auth.user.id, error = %err, "could not persist session");
                    self.login_state.set(Phase::Error(SESSION_NOT_SAVED.to_string()));
                    return;
                }
                info!(user_id = auth.user.id, "logged in");
                self.current_user.set(Some(auth.user.clone()));
                self.login_state.set(Phase::Success(auth.user));
            }
            Err(err) => self.login_state.set(Phase::Error(err.message())),
        }
    }

    /// Field errors come back to the caller for inline display and nothing
    /// is sent. Otherwise the outcome lands in `register_state`.
    pub fn register(&self, form: &RegistrationForm) -> Result<(), FieldErrors> {
        let request = form.validate()?;
        self.register_state.set(Phase::Loading);
        match self.repo.register(&request) {
            Ok(user) => self.register_state.set(Phase::Success(user)),
            Err(err) => self.register_state.set(Phase::Error(err.message())),
        }
        Ok(())
    }

    /// The user stays logged in when the stored session cannot be cleared.
    pub fn logout(&self) {
        if let Err(err) = self.session.clear() {
            warn!(error = %err, "could not clear session");
            self.login_state.set(Phase::Error(SESSION_NOT_CLEARED.to_string()));
            return;
        }
        self.current_user.set(None);
        self.login_state.set(Phase::Idle);
    }

    pub fn reset_states(&self) {
        self.login_state.set(Phase::Idle);
        self.register_state.set(Phase::Idle);
    }

    pub fn close(&self) {
        self.login_state.close();
        self.register_state.close();
        self.current_user.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppContext;
    use crate::http::HttpMethod;
    use crate::testing::{config, ScriptedTransport};

    const USER: &str = r#"{"id":9,"nombre":"Admin","email":"admin@test.com","telefono":"1","isAdmin":true}"#;

    fn context(transport: Arc<ScriptedTransport>) -> AppContext {
        AppContext::with_transport(config(), Arc::new(SessionStore::in_memory()), transport).unwrap()
    }

    #[test]
    fn login_saves_session() {
        let transport = ScriptedTransport::new();
        transport.reply(HttpMethod::Post, "/auth/login", 200, r#"{"success":true,"token":"adm"}"#);
        transport.reply(HttpMethod::Get, "/auth/usuario/correo/admin@test.com", 200, USER);
        let ctx = context(transport);
        let vm = ctx.auth_view_model();

        vm.login("admin@test.com", "admin123");

        assert_eq!(vm.login_state.get().success().map(|u| u.id), Some(9));
        assert_eq!(vm.current_user().map(|u| u.name), Some("Admin".to_string()));
        assert_eq!(ctx.session().user_id(), Some(9));
        assert!(ctx.session().admin_token().is_some());
    }

    /// File-backed store whose next write fails: a directory sits where the
    /// temp file goes.
    fn unwritable_session(dir: &tempfile::TempDir) -> Arc<SessionStore> {
        let store = SessionStore::open(dir.path()).unwrap();
        std::fs::create_dir(dir.path().join("user_preferences.json.tmp")).unwrap();
        Arc::new(store)
    }

    #[test]
    fn unsaved_session_fails_login() {
        let transport = ScriptedTransport::new();
        transport.reply(HttpMethod::Post, "/auth/login", 200, r#"{"success":true,"token":"adm"}"#);
        transport.reply(HttpMethod::Get, "/auth/usuario/correo/admin@test.com", 200, USER);
        let dir = tempfile::tempdir().unwrap();
        let ctx = AppContext::with_transport(config(), unwritable_session(&dir), transport).unwrap();
        let vm = ctx.auth_view_model();

        vm.login("admin@test.com", "admin123");

        assert_eq!(vm.login_state.get(), Phase::Error(SESSION_NOT_SAVED.to_string()));
        assert_eq!(vm.current_user(), None);
        assert!(!ctx.session().is_logged_in());
        assert_eq!(ctx.session().admin_token(), None);
    }

    #[test]
    fn profile_failure_leaves_session_empty() {
        let transport = ScriptedTransport::new();
        transport.reply(HttpMethod::Post, "/auth/login", 200, r#"{"success":true}"#);
        transport.reply(HttpMethod::Get, "/auth/usuario/correo/a@b.c", 500, "");
        let ctx = context(transport);
        let vm = ctx.auth_view_model();

        vm.login("a@b.c", "secreto");

        assert_eq!(
            vm.login_state.get(),
            Phase::Error("Error al obtener datos del usuario".to_string())
        );
        assert!(!ctx.session().is_logged_in());
    }

    #[test]
    fn blank_login_sends_nothing() {
        let transport = ScriptedTransport::new();
        let ctx = context(transport.clone());
        let vm = ctx.auth_view_model();
        vm.login("", "x");
        assert_eq!(vm.login_state.get(), Phase::Error("El email es requerido".to_string()));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn invalid_registration_sends_nothing() {
        let transport = ScriptedTransport::new();
        let ctx = context(transport.clone());
        let vm = ctx.auth_view_model();
        let errors = vm
            .register(&RegistrationForm {
                name: "Ana".to_string(),
                email: "ana@test.com".to_string(),
                phone: "555".to_string(),
                password: "abc".to_string(),
                confirmation: "abd".to_string(),
            })
            .unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(transport.requests().is_empty());
        assert_eq!(vm.register_state.get(), Phase::Idle);
    }

    #[test]
    fn logout_clears_everything() {
        let ctx = context(ScriptedTransport::new());
        ctx.session()
            .save_session(
                &User {
                    id: 3,
                    name: "Ana".to_string(),
                    email: "ana@test.com".to_string(),
                    phone: String::new(),
                    is_admin: false,
                },
                None,
            )
            .unwrap();
        let vm = ctx.auth_view_model();
        assert!(vm.current_user().is_some());

        vm.logout();
        assert_eq!(vm.current_user(), None);
        assert!(!ctx.session().is_logged_in());
    }

    #[test]
    fn uncleared_session_stays_logged_in() {
        let dir = tempfile::tempdir().unwrap();
        let session = SessionStore::open(dir.path()).unwrap();
        session
            .save_session(
                &User {
                    id: 3,
                    name: "Ana".to_string(),
                    email: "ana@test.com".to_string(),
                    phone: String::new(),
                    is_admin: false,
                },
                None,
            )
            .unwrap();
        drop(session);
        let ctx = AppContext::with_transport(config(), unwritable_session(&dir), ScriptedTransport::new()).unwrap();
        let vm = ctx.auth_view_model();

        vm.logout();

        assert_eq!(vm.login_state.get(), Phase::Error(SESSION_NOT_CLEARED.to_string()));
        assert_eq!(vm.current_user().map(|u| u.id), Some(3));
        assert!(ctx.session().is_logged_in());
    }
}
