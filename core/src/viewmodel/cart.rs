use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{info, warn};

use crate::error::ApiError;
use crate::repository::{CartRepository, OrderRepository};
use crate::session::SessionStore;
use crate::state::Observable;
use crate::types::{AddToCartRequest, CartItem, CreateOrderRequest};

use super::session_user;

pub const EMPTY_CART: &str = "El carrito está vacío";
pub const PURCHASE_COMPLETED: &str = "¡Compra realizada exitosamente!";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    pub is_loading: bool,
    pub items: Vec<CartItem>,
    pub total: f64,
    pub error: Option<String>,
    pub success_message: Option<String>,
    /// Set by a completed checkout until `reset_checkout_success`.
    pub checkout_success: bool,
}

/// Users whose server cart still holds lines of a completed order.
///
/// One set lives in the `AppContext` and every cart view-model it hands
/// out shares it, so a marker left by one screen is honoured by the next.
#[derive(Debug, Clone, Default)]
pub struct PendingClears(Arc<Mutex<HashSet<i64>>>);

impl PendingClears {
    pub fn contains(&self, user_id: i64) -> bool {
        self.users().contains(&user_id)
    }

    fn mark(&self, user_id: i64) {
        self.users().insert(user_id);
    }

    fn settle(&self, user_id: i64) {
        self.users().remove(&user_id);
    }

    fn users(&self) -> MutexGuard<'_, HashSet<i64>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The session user's cart and checkout.
///
/// Checkout creates the order first and only then clears the server cart.
/// Those are two independent calls, so the clear can fail after the order
/// exists. When it does, or when a re-fetch still shows items, the user is
/// marked in `PendingClears` and the next `load` or `add` on any cart
/// view-model clears the server cart before anything else.
pub struct CartViewModel {
    cart: CartRepository,
    orders: OrderRepository,
    session: Arc<SessionStore>,
    pending: PendingClears,
    pub state: Observable<CartState>,
}

impl CartViewModel {
    pub fn new(
        cart: CartRepository,
        orders: OrderRepository,
        session: Arc<SessionStore>,
        pending: PendingClears,
    ) -> Self {
        Self {
            cart,
            orders,
            session,
            pending,
            state: Observable::default(),
        }
    }

    /// The session user, if their server cart still holds purchased lines.
    pub fn pending_clear(&self) -> Option<i64> {
        self.session.user_id().filter(|&user_id| self.pending.contains(user_id))
    }

    pub fn load(&self) {
        let Some(user_id) = self.begin() else { return };
        self.refresh(user_id);
    }

    pub fn add(&self, product_id: i64, quantity: i32) {
        let Some(user_id) = self.begin() else { return };
        if let Err(err) = self.settle_pending(user_id) {
            return self.fail(err);
        }
        let request = AddToCartRequest {
            user_id,
            product_id,
            quantity: quantity.max(1),
        };
        match self.cart.add(&request) {
            Ok(_) => {
                self.state
                    .update(|s| s.success_message = Some("Producto agregado al carrito".to_string()));
                self.refresh(user_id);
            }
            Err(err) => self.fail(err),
        }
    }

    /// A quantity below one removes the line.
    pub fn update_quantity(&self, item_id: i64, quantity: i32) {
        if quantity < 1 {
            return self.remove_item(item_id);
        }
        let Some(user_id) = self.begin() else { return };
        match self.cart.update_quantity(item_id, quantity) {
            Ok(_) => self.refresh(user_id),
            Err(err) => self.fail(err),
        }
    }

    pub fn remove_item(&self, item_id: i64) {
        let Some(user_id) = self.begin() else { return };
        match self.cart.remove(item_id) {
            Ok(()) => {
                self.state
                    .update(|s| s.success_message = Some("Producto eliminado".to_string()));
                self.refresh(user_id);
            }
            Err(err) => self.fail(err),
        }
    }

    pub fn clear(&self) {
        let Some(user_id) = self.begin() else { return };
        match self.cart.clear(user_id) {
            Ok(()) => {
                self.pending.settle(user_id);
                self.state
                    .update(|s| s.success_message = Some("Carrito vaciado".to_string()));
                self.refresh(user_id);
            }
            Err(err) => self.fail(err),
        }
    }

    pub fn checkout(&self) {
        let Some(user_id) = self.begin() else { return };
        self.state.update(|s| s.checkout_success = false);

        let items = self.state.get().items;
        if items.is_empty() {
            self.state.update(|s| {
                s.is_loading = false;
                s.error = Some(EMPTY_CART.to_string());
            });
            return;
        }

        let request = CreateOrderRequest::from_cart(user_id, &items);
        let order = match self.orders.create(&request) {
            Ok(order) => order,
            Err(err) => return self.fail(err),
        };
        info!(order_id = order.id, user_id, total = request.total, "order created");

        // The order exists from here on; the local cart is empty whatever
        // the server cart does next.
        self.state.update(|s| {
            s.items.clear();
            s.total = 0.0;
            s.success_message = Some(PURCHASE_COMPLETED.to_string());
            s.checkout_success = true;
        });

        self.reconcile_after_checkout(user_id);
        self.state.update(|s| s.is_loading = false);
    }

    fn reconcile_after_checkout(&self, user_id: i64) {
        if let Err(err) = self.cart.clear(user_id) {
            warn!(user_id, error = %err, "cart not cleared after checkout; will retry");
            self.pending.mark(user_id);
            return;
        }
        match self.cart.items(user_id) {
            Ok(remaining) if remaining.is_empty() => self.pending.settle(user_id),
            Ok(remaining) => {
                warn!(user_id, remaining = remaining.len(), "cart still has items after clear; will retry");
                self.pending.mark(user_id);
            }
            Err(err) => {
                warn!(user_id, error = %err, "could not confirm empty cart; will retry");
                self.pending.mark(user_id);
            }
        }
    }

    pub fn reset_checkout_success(&self) {
        self.state.update(|s| s.checkout_success = false);
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

    /// Marks loading for the session user, or publishes the not-logged-in
    /// error.
    fn begin(&self) -> Option<i64> {
        match session_user(&self.session) {
            Ok(user_id) => {
                self.state.update(|s| {
                    s.is_loading = true;
                    s.error = None;
                });
                Some(user_id)
            }
            Err(message) => {
                self.state.update(|s| s.error = Some(message));
                None
            }
        }
    }

    fn settle_pending(&self, user_id: i64) -> Result<(), ApiError> {
        if !self.pending.contains(user_id) {
            return Ok(());
        }
        self.cart.clear(user_id)?;
        info!(user_id, "pending cart clear completed");
        self.pending.settle(user_id);
        Ok(())
    }

    fn refresh(&self, user_id: i64) {
        if let Err(err) = self.settle_pending(user_id) {
            return self.fail(err);
        }
        let items = match self.cart.items(user_id) {
            Ok(items) => items,
            Err(err) => return self.fail(err),
        };
        let local_total: f64 = items.iter().map(CartItem::line_total).sum();
        let total = self.cart.total(user_id).unwrap_or(local_total);
        self.state.update(|s| {
            s.items = items;
            s.total = total;
            s.is_loading = false;
        });
    }

    fn fail(&self, err: ApiError) {
        self.state.update(|s| {
            s.is_loading = false;
            s.error = Some(err.message());
        });
    }
}
