//! Application context: built once when the host starts.

use std::sync::Arc;

use tracing::info;

use crate::client::{AdoptionClient, AnimalClient, AuthClient, CartClient, CatalogClient, OrderClient};
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::repository::{
    AdoptionRepository, AnimalRepository, AuthRepository, CartRepository, OrderRepository, ProductRepository,
};
use crate::routes::Route;
use crate::session::SessionStore;
use crate::transport::{Transport, UreqTransport};
use crate::viewmodel::{
    AdminViewModel, AdoptionFormViewModel, AdoptionRequestsViewModel, AnimalViewModel, AuthViewModel,
    CartViewModel, OrderHistoryViewModel, PendingClears, ProductViewModel, ProfileViewModel,
};

/// Owns the shared transport, the session and one repository per service,
/// and hands out fresh view-models per screen.
#[derive(Clone)]
pub struct AppContext {
    config: ApiConfig,
    session: Arc<SessionStore>,
    auth: AuthRepository,
    products: ProductRepository,
    animals: AnimalRepository,
    cart: CartRepository,
    adoption: AdoptionRepository,
    orders: OrderRepository,
    pending_clears: PendingClears,
}

impl AppContext {
    /// Context over the default blocking HTTP transport.
    pub fn new(config: ApiConfig, session: Arc<SessionStore>) -> Result<Self, ApiError> {
        let transport = Arc::new(UreqTransport::new(config.timeout));
        Self::with_transport(config, session, transport)
    }

    pub fn with_transport(
        config: ApiConfig,
        session: Arc<SessionStore>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ApiError> {
        let ctx = Self {
            auth: AuthRepository::new(AuthClient::new(&config.auth_url)?, transport.clone()),
            products: ProductRepository::new(CatalogClient::new(&config.catalog_url)?, transport.clone()),
            animals: AnimalRepository::new(AnimalClient::new(&config.animals_url)?, transport.clone()),
            cart: CartRepository::new(CartClient::new(&config.cart_url)?, transport.clone()),
            adoption: AdoptionRepository::new(AdoptionClient::new(&config.adoption_url)?, transport.clone()),
            orders: OrderRepository::new(OrderClient::new(&config.orders_url)?, transport),
            config,
            session,
            pending_clears: PendingClears::default(),
        };
        info!(
            auth = %ctx.config.auth_url,
            catalog = %ctx.config.catalog_url,
            timeout_secs = ctx.config.timeout.as_secs(),
            "app context ready"
        );
        Ok(ctx)
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn auth(&self) -> &AuthRepository {
        &self.auth
    }

    pub fn products(&self) -> &ProductRepository {
        &self.products
    }

    pub fn animals(&self) -> &AnimalRepository {
        &self.animals
    }

    pub fn cart(&self) -> &CartRepository {
        &self.cart
    }

    pub fn adoption(&self) -> &AdoptionRepository {
        &self.adoption
    }

    pub fn orders(&self) -> &OrderRepository {
        &self.orders
    }

    /// Users whose server cart must be cleared before it is shown again.
    pub fn pending_clears(&self) -> &PendingClears {
        &self.pending_clears
    }

    /// Resolve a path against the current session; unknown paths land on
    /// home.
    pub fn navigate(&self, path: &str) -> Route {
        Route::parse(path).unwrap_or(Route::Home).resolve(&self.session)
    }

    pub fn auth_view_model(&self) -> AuthViewModel {
        AuthViewModel::new(self.auth.clone(), self.session.clone())
    }

    pub fn product_view_model(&self) -> ProductViewModel {
        ProductViewModel::new(self.products.clone())
    }

    pub fn animal_view_model(&self) -> AnimalViewModel {
        AnimalViewModel::new(self.animals.clone())
    }

    pub fn cart_view_model(&self) -> CartViewModel {
        CartViewModel::new(
            self.cart.clone(),
            self.orders.clone(),
            self.session.clone(),
            self.pending_clears.clone(),
        )
    }

    pub fn order_history_view_model(&self) -> OrderHistoryViewModel {
        OrderHistoryViewModel::new(self.orders.clone(), self.session.clone())
    }

    pub fn adoption_form_view_model(&self) -> AdoptionFormViewModel {
        AdoptionFormViewModel::new(self.adoption.clone(), self.session.clone())
    }

    pub fn adoption_requests_view_model(&self) -> AdoptionRequestsViewModel {
        AdoptionRequestsViewModel::new(self.adoption.clone(), self.session.clone())
    }

    pub fn admin_view_model(&self) -> AdminViewModel {
        AdminViewModel::new(
            self.products.clone(),
            self.animals.clone(),
            self.adoption.clone(),
            self.orders.clone(),
            self.session.clone(),
        )
    }

    pub fn profile_view_model(&self) -> ProfileViewModel {
        ProfileViewModel::new(self.auth.clone(), self.session.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_base_url_fails_construction() {
        let config = ApiConfig {
            cart_url: "not a url".to_string(),
            ..ApiConfig::default()
        };
        let err = AppContext::new(config, Arc::new(SessionStore::in_memory())).err();
        assert!(matches!(err, Some(ApiError::InvalidUrl(_))));
    }

    #[test]
    fn navigate_respects_session() {
        let ctx = AppContext::new(ApiConfig::default(), Arc::new(SessionStore::in_memory())).unwrap();
        assert_eq!(ctx.navigate("cart"), Route::Login);
        assert_eq!(ctx.navigate("nowhere"), Route::Home);
        assert_eq!(ctx.navigate("animals"), Route::Animals);
    }
}
