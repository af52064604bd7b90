use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{LoginRequest, LoginResponse, RegisterRequest, User};

use super::{check_status, expect_json, expect_list, get, json, Endpoint};

/// Request builder and response parser for the auth service.
#[derive(Debug, Clone)]
pub struct AuthClient {
    endpoint: Endpoint,
}

impl AuthClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            endpoint: Endpoint::parse(base_url)?,
        })
    }

    pub fn build_login(&self, input: &LoginRequest) -> Result<HttpRequest, ApiError> {
        json(HttpMethod::Post, self.endpoint.url(&["auth", "login"], &[]), input)
    }

    pub fn build_register(&self, input: &RegisterRequest) -> Result<HttpRequest, ApiError> {
        json(HttpMethod::Post, self.endpoint.url(&["auth", "register"], &[]), input)
    }

    pub fn build_get_user(&self, id: i64) -> HttpRequest {
        let id = id.to_string();
        get(self.endpoint.url(&["auth", "usuarios", &id], &[]))
    }

    pub fn build_find_user_by_email(&self, email: &str) -> HttpRequest {
        get(self.endpoint.url(&["auth", "usuario", "correo", email], &[]))
    }

    pub fn build_list_users(&self) -> HttpRequest {
        get(self.endpoint.url(&["auth", "usuarios"], &[]))
    }

    /// A 2xx with `success: false` is a rejected login; its message (or
    /// "Credenciales incorrectas") is the error.
    pub fn parse_login(&self, response: HttpResponse) -> Result<LoginResponse, ApiError> {
        const FALLBACK: &str = "Credenciales incorrectas";
        check_status(&response, FALLBACK)?;
        let status = response.status;
        let login: LoginResponse = expect_json(response, FALLBACK)?;
        if !login.success {
            let message = login
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| FALLBACK.to_string());
            return Err(ApiError::Rejected { status, message });
        }
        Ok(login)
    }

    pub fn parse_register(&self, response: HttpResponse) -> Result<User, ApiError> {
        expect_json(response, "Error al registrar")
    }

    pub fn parse_get_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        expect_json(response, "Usuario no encontrado")
    }

    pub fn parse_find_user_by_email(&self, response: HttpResponse) -> Result<User, ApiError> {
        expect_json(response, "Usuario no encontrado")
    }

    pub fn parse_list_users(&self, response: HttpResponse) -> Result<Vec<User>, ApiError> {
        expect_list(response, "Error al cargar usuarios")
    }
}
