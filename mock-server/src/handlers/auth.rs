use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::info;

use crate::{next_id, Account, ApiResult, AppError, Db, LoginRequest, LoginResponse, RegisterRequest, User};

pub(crate) fn router() -> Router<Db> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/usuarios", get(list_users))
        .route("/auth/usuarios/{id}", get(get_user))
        .route("/auth/usuario/correo/{email}", get(find_by_email))
}

/// Bad credentials are still a 200, reported through `success: false`.
async fn login(State(db): State<Db>, Json(input): Json<LoginRequest>) -> Json<LoginResponse> {
    let mut store = db.write().await;
    let user_id = store
        .users
        .values()
        .find(|account| account.user.email.eq_ignore_ascii_case(input.email.trim()) && account.password == input.password)
        .map(|account| account.user.id);
    match user_id {
        Some(id) => {
            let token = store.issue_token(id);
            info!(user_id = id, "login");
            Json(LoginResponse {
                success: true,
                message: "Login exitoso".to_string(),
                token: Some(token),
            })
        }
        None => Json(LoginResponse {
            success: false,
            message: "Credenciales incorrectas".to_string(),
            token: None,
        }),
    }
}

async fn register(State(db): State<Db>, Json(input): Json<RegisterRequest>) -> ApiResult<(StatusCode, Json<User>)> {
    let email = input.email.trim().to_string();
    if input.name.trim().is_empty() || email.is_empty() || input.password.is_empty() {
        return Err(AppError::BadRequest("Nombre, email y contraseña son requeridos".to_string()));
    }
    let mut store = db.write().await;
    if store.users.values().any(|account| account.user.email.eq_ignore_ascii_case(&email)) {
        return Err(AppError::Conflict("El email ya está registrado".to_string()));
    }
    let user = User {
        id: next_id(&store.users),
        name: input.name.trim().to_string(),
        email,
        phone: input.phone,
        is_admin: false,
    };
    store.users.insert(
        user.id,
        Account {
            user: user.clone(),
            password: input.password,
        },
    );
    info!(user_id = user.id, "registered");
    Ok((StatusCode::CREATED, Json(user)))
}

async fn list_users(State(db): State<Db>) -> Json<Vec<User>> {
    let store = db.read().await;
    Json(store.users.values().map(|account| account.user.clone()).collect())
}

async fn get_user(State(db): State<Db>, Path(id): Path<i64>) -> ApiResult<Json<User>> {
    let store = db.read().await;
    store.user(id).cloned().map(Json)
}

async fn find_by_email(State(db): State<Db>, Path(email): Path<String>) -> ApiResult<Json<User>> {
    let store = db.read().await;
    store
        .users
        .values()
        .find(|account| account.user.email.eq_ignore_ascii_case(&email))
        .map(|account| Json(account.user.clone()))
        .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))
}
