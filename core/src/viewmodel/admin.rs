use std::sync::Arc;

use tracing::info;

use crate::client::AdminToken;
use crate::error::ApiError;
use crate::repository::{AdoptionRepository, AnimalRepository, OrderRepository, ProductRepository};
use crate::session::SessionStore;
use crate::state::Observable;
use crate::types::{
    AdoptionForm, AdoptionStatus, Animal, AnimalInput, Order, Product, ProductInput, ReviewDecision,
};

pub const ADMIN_ONLY: &str = "Acceso restringido a administradores";
pub const ALREADY_REVIEWED: &str = "Solo se pueden revisar solicitudes pendientes";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminState {
    pub is_loading: bool,
    pub products: Vec<Product>,
    pub animals: Vec<Animal>,
    pub forms: Vec<AdoptionForm>,
    pub orders: Vec<Order>,
    pub error: Option<String>,
    pub success_message: Option<String>,
}

/// Admin panel. Every action needs an admin session; its token rides along
/// as the bearer credential.
pub struct AdminViewModel {
    products: ProductRepository,
    animals: AnimalRepository,
    adoption: AdoptionRepository,
    orders: OrderRepository,
    session: Arc<SessionStore>,
    pub state: Observable<AdminState>,
}

impl AdminViewModel {
    pub fn new(
        products: ProductRepository,
        animals: AnimalRepository,
        adoption: AdoptionRepository,
        orders: OrderRepository,
        session: Arc<SessionStore>,
    ) -> Self {
        Self {
            products,
            animals,
            adoption,
            orders,
            session,
            state: Observable::default(),
        }
    }

    pub fn load_products(&self) {
        if self.begin().is_none() {
            return;
        }
        match self.products.list() {
            Ok(products) => self.finish(|s| s.products = products),
            Err(err) => self.fail(err),
        }
    }

    /// Create when `id` is `None`, replace otherwise.
    pub fn save_product(&self, id: Option<i64>, input: &ProductInput) {
        let Some(token) = self.begin() else { return };
        let result = match id {
            Some(id) => self.products.update(id, input, &token),
            None => self.products.create(input, &token),
        };
        match result {
            Ok(product) => {
                self.notify("Producto guardado");
                info!(product_id = product.id, "product saved");
                self.load_products();
            }
            Err(err) => self.fail(err),
        }
    }

    pub fn delete_product(&self, id: i64) {
        let Some(token) = self.begin() else { return };
        match self.products.delete(id, &token) {
            Ok(()) => {
                self.notify("Producto eliminado");
                self.load_products();
            }
            Err(err) => self.fail(err),
        }
    }

    pub fn load_animals(&self) {
        if self.begin().is_none() {
            return;
        }
        match self.animals.list() {
            Ok(animals) => self.finish(|s| s.animals = animals),
            Err(err) => self.fail(err),
        }
    }

    pub fn save_animal(&self, id: Option<i64>, input: &AnimalInput) {
        let Some(token) = self.begin() else { return };
        let result = match id {
            Some(id) => self.animals.update(id, input, &token),
            None => self.animals.create(input, &token),
        };
        match result {
            Ok(animal) => {
                self.notify("Animal guardado");
                info!(animal_id = animal.id, "animal saved");
                self.load_animals();
            }
            Err(err) => self.fail(err),
        }
    }

    pub fn delete_animal(&self, id: i64) {
        let Some(token) = self.begin() else { return };
        match self.animals.delete(id, &token) {
            Ok(()) => {
                self.notify("Animal eliminado");
                self.load_animals();
            }
            Err(err) => self.fail(err),
        }
    }

    pub fn mark_adopted(&self, id: i64) {
        let Some(token) = self.begin() else { return };
        match self.animals.mark_adopted(id, &token) {
            Ok(()) => {
                self.notify("Animal marcado como adoptado");
                self.load_animals();
            }
            Err(err) => self.fail(err),
        }
    }

    pub fn load_forms(&self) {
        let Some(token) = self.begin() else { return };
        match self.adoption.all(&token) {
            Ok(forms) => self.finish(|s| s.forms = forms),
            Err(err) => self.fail(err),
        }
    }

    pub fn load_forms_by_status(&self, status: AdoptionStatus) {
        let Some(token) = self.begin() else { return };
        match self.adoption.by_status(status, &token) {
            Ok(forms) => self.finish(|s| s.forms = forms),
            Err(err) => self.fail(err),
        }
    }

    pub fn approve(&self, form_id: i64, comments: &str) {
        self.review(form_id, AdoptionStatus::Approved, comments);
    }

    pub fn reject(&self, form_id: i64, comments: &str) {
        self.review(form_id, AdoptionStatus::Rejected, comments);
    }

    /// Forms already known to be reviewed are refused locally; the service
    /// enforces the same rule for anything not yet loaded.
    fn review(&self, form_id: i64, target: AdoptionStatus, comments: &str) {
        let current = self
            .state
            .get()
            .forms
            .iter()
            .find(|f| f.id == Some(form_id))
            .map(|f| f.status);
        if let Some(current) = current {
            if !current.can_transition_to(target) {
                return self.state.update(|s| s.error = Some(ALREADY_REVIEWED.to_string()));
            }
        }

        let Some(token) = self.begin() else { return };
        let decision = ReviewDecision {
            comments: comments.to_string(),
        };
        let result = match target {
            AdoptionStatus::Rejected => self.adoption.reject(form_id, &decision, &token),
            _ => self.adoption.approve(form_id, &decision, &token),
        };
        match result {
            Ok(form) => {
                info!(form_id, status = form.status.as_str(), "adoption form reviewed");
                self.notify(match target {
                    AdoptionStatus::Rejected => "Solicitud rechazada",
                    _ => "Solicitud aprobada",
                });
                self.finish(|s| {
                    if let Some(slot) = s.forms.iter_mut().find(|f| f.id == Some(form_id)) {
                        *slot = form;
                    }
                });
            }
            Err(err) => self.fail(err),
        }
    }

    pub fn load_orders(&self) {
        let Some(token) = self.begin() else { return };
        match self.orders.all(&token) {
            Ok(orders) => self.finish(|s| s.orders = orders),
            Err(err) => self.fail(err),
        }
    }

    pub fn clear_messages(&self) {
        self.state.update(|s| {
            s.error = None;
            s.success_message = None;
        });
    }

    pub fn close(&self) {
        self.state.close();
    }

    fn begin(&self) -> Option<AdminToken> {
        match self.session.admin_token() {
            Some(token) => {
                self.state.update(|s| {
                    s.is_loading = true;
                    s.error = None;
                });
                Some(token)
            }
            None => {
                self.state.update(|s| s.error = Some(ADMIN_ONLY.to_string()));
                None
            }
        }
    }

    fn finish(&self, apply: impl FnOnce(&mut AdminState)) {
        self.state.update(|s| {
            apply(s);
            s.is_loading = false;
        });
    }

    fn notify(&self, message: &str) {
        self.state.update(|s| s.success_message = Some(message.to_string()));
    }

    fn fail(&self, err: ApiError) {
        self.state.update(|s| {
            s.is_loading = false;
            s.error = Some(err.message());
        });
    }
}
