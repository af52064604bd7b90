use std::sync::Arc;

use tracing::info;

use crate::client::AuthClient;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{AuthenticatedUser, LoginRequest, LoginResponse, RegisterRequest, User};

use super::call;

/// Message for a login whose credentials were accepted but whose profile
/// could not be loaded.
pub const PROFILE_LOOKUP_FAILED: &str = "Error al obtener datos del usuario";

#[derive(Clone)]
pub struct AuthRepository {
    client: AuthClient,
    transport: Arc<dyn Transport>,
}

impl AuthRepository {
    pub fn new(client: AuthClient, transport: Arc<dyn Transport>) -> Self {
        Self { client, transport }
    }

    /// Credential check followed by the profile lookup by e-mail.
    pub fn login(&self, credentials: &LoginRequest) -> Result<AuthenticatedUser, ApiError> {
        let ticket = self.check_credentials(credentials)?;
        self.then_fetch_profile(&credentials.email, ticket)
    }

    pub fn check_credentials(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        call(
            &*self.transport,
            "auth.login",
            self.client.build_login(credentials),
            |r| self.client.parse_login(r),
        )
    }

    /// Second step of login. An error response from the lookup fails the
    /// whole login with `PROFILE_LOOKUP_FAILED` even though the credentials
    /// were accepted; a network failure keeps its own message.
    pub fn then_fetch_profile(&self, email: &str, ticket: LoginResponse) -> Result<AuthenticatedUser, ApiError> {
        match self.find_by_email(email) {
            Ok(user) => {
                info!(user_id = user.id, admin = user.is_admin, "login completed");
                Ok(AuthenticatedUser {
                    user,
                    token: ticket.token,
                })
            }
            Err(err) if err.is_network() => Err(err),
            Err(err) => Err(err.with_message(PROFILE_LOOKUP_FAILED)),
        }
    }

    pub fn register(&self, input: &RegisterRequest) -> Result<User, ApiError> {
        call(
            &*self.transport,
            "auth.register",
            self.client.build_register(input),
            |r| self.client.parse_register(r),
        )
    }

    pub fn find_by_email(&self, email: &str) -> Result<User, ApiError> {
        call(
            &*self.transport,
            "auth.find_by_email",
            Ok(self.client.build_find_user_by_email(email)),
            |r| self.client.parse_find_user_by_email(r),
        )
    }

    pub fn find_by_id(&self, id: i64) -> Result<User, ApiError> {
        call(
            &*self.transport,
            "auth.find_by_id",
            Ok(self.client.build_get_user(id)),
            |r| self.client.parse_get_user(r),
        )
    }

    pub fn list_users(&self) -> Result<Vec<User>, ApiError> {
        call(
            &*self.transport,
            "auth.list_users",
            Ok(self.client.build_list_users()),
            |r| self.client.parse_list_users(r),
        )
    }
}
