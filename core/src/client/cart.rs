use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{AddToCartRequest, CartItem, CartTotal, QuantityUpdate};

use super::{delete, expect_empty, expect_json, expect_list, get, json, Endpoint};

/// Request builder and response parser for the cart service.
#[derive(Debug, Clone)]
pub struct CartClient {
    endpoint: Endpoint,
}

impl CartClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            endpoint: Endpoint::parse(base_url)?,
        })
    }

    pub fn build_get_cart(&self, user_id: i64) -> HttpRequest {
        let user_id = user_id.to_string();
        get(self.endpoint.url(&["carrito", "usuario", &user_id], &[]))
    }

    pub fn build_get_total(&self, user_id: i64) -> HttpRequest {
        let user_id = user_id.to_string();
        get(self.endpoint.url(&["carrito", "usuario", &user_id, "total"], &[]))
    }

    pub fn build_add_item(&self, input: &AddToCartRequest) -> Result<HttpRequest, ApiError> {
        json(HttpMethod::Post, self.endpoint.url(&["carrito", "agregar"], &[]), input)
    }

    pub fn build_update_quantity(&self, item_id: i64, quantity: i32) -> Result<HttpRequest, ApiError> {
        let item_id = item_id.to_string();
        json(
            HttpMethod::Put,
            self.endpoint.url(&["carrito", "item", &item_id], &[]),
            &QuantityUpdate { quantity },
        )
    }

    pub fn build_remove_item(&self, item_id: i64) -> HttpRequest {
        let item_id = item_id.to_string();
        delete(self.endpoint.url(&["carrito", "item", &item_id], &[]))
    }

    pub fn build_clear_cart(&self, user_id: i64) -> HttpRequest {
        let user_id = user_id.to_string();
        delete(self.endpoint.url(&["carrito", "usuario", &user_id], &[]))
    }

    pub fn parse_get_cart(&self, response: HttpResponse) -> Result<Vec<CartItem>, ApiError> {
        expect_list(response, "Error al cargar carrito")
    }

    /// Missing `total` key reads as 0.
    pub fn parse_get_total(&self, response: HttpResponse) -> Result<f64, ApiError> {
        let total: CartTotal = expect_json(response, "Error al calcular total")?;
        Ok(total.total)
    }

    pub fn parse_add_item(&self, response: HttpResponse) -> Result<CartItem, ApiError> {
        expect_json(response, "Error al agregar al carrito")
    }

    pub fn parse_update_quantity(&self, response: HttpResponse) -> Result<CartItem, ApiError> {
        expect_json(response, "Error al actualizar cantidad")
    }

    pub fn parse_remove_item(&self, response: HttpResponse) -> Result<(), ApiError> {
        expect_empty(response, "Error al eliminar producto")
    }

    pub fn parse_clear_cart(&self, response: HttpResponse) -> Result<(), ApiError> {
        expect_empty(response, "Error al vaciar carrito")
    }
}
