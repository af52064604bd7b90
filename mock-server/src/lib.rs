//! In-memory stand-in for the six shop services, all served from one router.
//!
//! State lives behind a single `Arc<RwLock<Store>>`, seeded with an admin
//! account, a few products and a few animals. Login hands out opaque bearer
//! tokens; admin-only endpoints answer 401 unless the `Authorization`
//! header carries a token issued to an admin.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::{http::HeaderMap, Router};
use chrono::Utc;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

mod error;
mod handlers;
pub mod model;

pub use error::{ApiResult, AppError};
pub use model::*;

pub const ADMIN_EMAIL: &str = "admin@amilimetros.cl";
pub const ADMIN_PASSWORD: &str = "admin123";

pub(crate) struct Account {
    pub(crate) user: User,
    pub(crate) password: String,
}

#[derive(Default)]
pub struct Store {
    pub(crate) users: BTreeMap<i64, Account>,
    pub(crate) tokens: HashMap<String, i64>,
    pub(crate) products: BTreeMap<i64, Product>,
    pub(crate) animals: BTreeMap<i64, Animal>,
    pub(crate) cart: BTreeMap<i64, CartItem>,
    pub(crate) forms: BTreeMap<i64, AdoptionForm>,
    pub(crate) orders: BTreeMap<i64, Order>,
    pub(crate) order_items: BTreeMap<i64, OrderItem>,
}

pub type Db = Arc<RwLock<Store>>;

/// Next free key of a table.
pub(crate) fn next_id<V>(table: &BTreeMap<i64, V>) -> i64 {
    table.keys().next_back().map_or(1, |last| last + 1)
}

/// Timestamp in the services' `yyyy-MM-ddTHH:mm:ss` form.
pub(crate) fn now() -> String {
    Utc::now().naive_utc().format("%Y-%m-%dT%H:%M:%S").to_string()
}

impl Store {
    /// Admin account, three products and three animals (one adopted).
    pub fn seeded() -> Self {
        let mut store = Store::default();
        store.users.insert(
            1,
            Account {
                user: User {
                    id: 1,
                    name: "Administrador".to_string(),
                    email: ADMIN_EMAIL.to_string(),
                    phone: "+56900000000".to_string(),
                    is_admin: true,
                },
                password: ADMIN_PASSWORD.to_string(),
            },
        );
        for (id, name, price, category) in [
            (1, "Collar reflectante", 12.5, "Accesorios"),
            (2, "Pelota de goma", 5.0, "Juguetes"),
            (3, "Alimento premium 3kg", 24.9, "Alimentos"),
        ] {
            store.products.insert(
                id,
                Product {
                    id,
                    name: name.to_string(),
                    description: format!("{name} para tu mascota"),
                    price,
                    category: category.to_string(),
                    image: None,
                },
            );
        }
        for (id, name, species, breed, age, adopted) in [
            (1, "Luna", "Gato", "Mestizo", "2 años", false),
            (2, "Toby", "Perro", "Labrador", "4 años", false),
            (3, "Nala", "Perro", "Quiltro", "1 año", true),
        ] {
            store.animals.insert(
                id,
                Animal {
                    id,
                    name: name.to_string(),
                    species: species.to_string(),
                    breed: breed.to_string(),
                    age: age.to_string(),
                    description: String::new(),
                    adopted,
                    image: None,
                },
            );
        }
        store
    }

    pub(crate) fn issue_token(&mut self, user_id: i64) -> String {
        let token = Uuid::new_v4().to_string();
        self.tokens.insert(token.clone(), user_id);
        token
    }

    pub(crate) fn user(&self, id: i64) -> ApiResult<&User> {
        self.users
            .get(&id)
            .map(|account| &account.user)
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))
    }

    /// The admin behind the request's bearer token.
    pub(crate) fn require_admin(&self, headers: &HeaderMap) -> ApiResult<i64> {
        let token = headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| AppError::Unauthorized("Falta el token de administrador".to_string()))?;
        self.tokens
            .get(token.trim())
            .and_then(|id| self.users.get(id))
            .filter(|account| account.user.is_admin)
            .map(|account| account.user.id)
            .ok_or_else(|| AppError::Unauthorized("Solo administradores".to_string()))
    }
}

pub fn router(db: Db) -> Router {
    Router::new()
        .merge(handlers::auth::router())
        .merge(handlers::catalog::router())
        .merge(handlers::animals::router())
        .merge(handlers::cart::router())
        .merge(handlers::adoption::router())
        .merge(handlers::orders::router())
        .with_state(db)
}

/// Router over freshly seeded state.
pub fn app() -> Router {
    router(Arc::new(RwLock::new(Store::seeded())))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock services listening");
    }
    axum::serve(listener, app()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn next_id_follows_last_key() {
        let mut table = BTreeMap::new();
        assert_eq!(next_id(&table), 1);
        table.insert(7, ());
        assert_eq!(next_id(&table), 8);
    }

    #[test]
    fn admin_token_is_checked_against_role() {
        let mut store = Store::seeded();
        store.users.insert(
            2,
            Account {
                user: User {
                    id: 2,
                    name: "Ana".to_string(),
                    email: "ana@test.com".to_string(),
                    phone: String::new(),
                    is_admin: false,
                },
                password: "secreto".to_string(),
            },
        );
        let admin = store.issue_token(1);
        let regular = store.issue_token(2);

        let mut headers = HeaderMap::new();
        assert!(matches!(store.require_admin(&headers), Err(AppError::Unauthorized(_))));

        headers.insert("authorization", HeaderValue::from_str(&format!("Bearer {regular}")).unwrap());
        assert!(store.require_admin(&headers).is_err());

        headers.insert("authorization", HeaderValue::from_str(&format!("Bearer {admin}")).unwrap());
        assert_eq!(store.require_admin(&headers).unwrap(), 1);
    }

    #[test]
    fn timestamps_have_no_offset() {
        let stamp = now();
        assert_eq!(stamp.len(), 19);
        assert_eq!(&stamp[10..11], "T");
    }
}
