use std::sync::Arc;

use crate::client::CartClient;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{AddToCartRequest, CartItem};

use super::call;

#[derive(Clone)]
pub struct CartRepository {
    client: CartClient,
    transport: Arc<dyn Transport>,
}

impl CartRepository {
    pub fn new(client: CartClient, transport: Arc<dyn Transport>) -> Self {
        Self { client, transport }
    }

    pub fn items(&self, user_id: i64) -> Result<Vec<CartItem>, ApiError> {
        call(
            &*self.transport,
            "cart.items",
            Ok(self.client.build_get_cart(user_id)),
            |r| self.client.parse_get_cart(r),
        )
    }

    pub fn total(&self, user_id: i64) -> Result<f64, ApiError> {
        call(
            &*self.transport,
            "cart.total",
            Ok(self.client.build_get_total(user_id)),
            |r| self.client.parse_get_total(r),
        )
    }

    pub fn add(&self, input: &AddToCartRequest) -> Result<CartItem, ApiError> {
        call(
            &*self.transport,
            "cart.add",
            self.client.build_add_item(input),
            |r| self.client.parse_add_item(r),
        )
    }

    pub fn update_quantity(&self, item_id: i64, quantity: i32) -> Result<CartItem, ApiError> {
        call(
            &*self.transport,
            "cart.update_quantity",
            self.client.build_update_quantity(item_id, quantity),
            |r| self.client.parse_update_quantity(r),
        )
    }

    pub fn remove(&self, item_id: i64) -> Result<(), ApiError> {
        call(
            &*self.transport,
            "cart.remove",
            Ok(self.client.build_remove_item(item_id)),
            |r| self.client.parse_remove_item(r),
        )
    }

    pub fn clear(&self, user_id: i64) -> Result<(), ApiError> {
        call(
            &*self.transport,
            "cart.clear",
            Ok(self.client.build_clear_cart(user_id)),
            |r| self.client.parse_clear_cart(r),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use crate::testing::{ScriptedTransport, BASE};

    fn repo(transport: Arc<ScriptedTransport>) -> CartRepository {
        CartRepository::new(CartClient::new(BASE).unwrap(), transport)
    }

    #[test]
    fn empty_cart_body_is_empty_list() {
        let transport = ScriptedTransport::new();
        transport.reply(HttpMethod::Get, "/carrito/usuario/1", 200, "[]");
        assert!(repo(transport).items(1).unwrap().is_empty());
    }

    #[test]
    fn add_posts_one_unit() {
        let transport = ScriptedTransport::new();
        transport.reply(
            HttpMethod::Post,
            "/carrito/agregar",
            200,
            r#"{"id":10,"usuarioId":1,"productoId":7,"productoNombre":"Collar","productoPrecio":12.5,"cantidad":1}"#,
        );
        let item = repo(transport.clone()).add(&AddToCartRequest::new(1, 7)).unwrap();
        assert_eq!(item.id, Some(10));

        let body = transport.requests()[0].body.clone().unwrap();
        let sent: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(sent, serde_json::json!({"usuarioId": 1, "productoId": 7, "cantidad": 1}));
    }

    #[test]
    fn clear_failure_reports_service_message() {
        let transport = ScriptedTransport::new();
        transport.reply(HttpMethod::Delete, "/carrito/usuario/1", 503, "");
        let err = repo(transport).clear(1).unwrap_err();
        assert_eq!(err.message(), "Error al vaciar carrito");
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn total_reads_number() {
        let transport = ScriptedTransport::new();
        transport.reply(HttpMethod::Get, "/carrito/usuario/1/total", 200, r#"{"total":37.5}"#);
        assert_eq!(repo(transport).total(1).unwrap(), 37.5);
    }
}
