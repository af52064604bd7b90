use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateOrderRequest, Order, OrderDetails, OrderItem};

use super::{expect_json, expect_list, get, json, put_empty, with_bearer, AdminToken, Endpoint};

/// Request builder and response parser for the orders service.
#[derive(Debug, Clone)]
pub struct OrderClient {
    endpoint: Endpoint,
}

impl OrderClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            endpoint: Endpoint::parse(base_url)?,
        })
    }

    pub fn build_create_order(&self, input: &CreateOrderRequest) -> Result<HttpRequest, ApiError> {
        json(HttpMethod::Post, self.endpoint.url(&["ordenes"], &[]), input)
    }

    pub fn build_list_by_user(&self, user_id: i64) -> HttpRequest {
        let user_id = user_id.to_string();
        get(self.endpoint.url(&["ordenes", "usuario", &user_id], &[]))
    }

    pub fn build_list_all(&self, token: &AdminToken) -> HttpRequest {
        with_bearer(get(self.endpoint.url(&["ordenes"], &[])), token)
    }

    pub fn build_get_order(&self, id: i64) -> HttpRequest {
        let id = id.to_string();
        get(self.endpoint.url(&["ordenes", &id], &[]))
    }

    pub fn build_get_items(&self, id: i64) -> HttpRequest {
        let id = id.to_string();
        get(self.endpoint.url(&["ordenes", &id, "items"], &[]))
    }

    pub fn build_get_details(&self, id: i64) -> HttpRequest {
        let id = id.to_string();
        get(self.endpoint.url(&["ordenes", &id, "detalles"], &[]))
    }

    pub fn build_cancel(&self, id: i64) -> HttpRequest {
        let id = id.to_string();
        put_empty(self.endpoint.url(&["ordenes", &id, "cancelar"], &[]))
    }

    pub fn parse_create_order(&self, response: HttpResponse) -> Result<Order, ApiError> {
        expect_json(response, "Error al crear orden")
    }

    pub fn parse_list_by_user(&self, response: HttpResponse) -> Result<Vec<Order>, ApiError> {
        expect_list(response, "Error al obtener órdenes")
    }

    pub fn parse_list_all(&self, response: HttpResponse) -> Result<Vec<Order>, ApiError> {
        expect_list(response, "Error al obtener órdenes")
    }

    pub fn parse_get_order(&self, response: HttpResponse) -> Result<Order, ApiError> {
        expect_json(response, "Orden no encontrada")
    }

    pub fn parse_get_items(&self, response: HttpResponse) -> Result<Vec<OrderItem>, ApiError> {
        expect_list(response, "Error al obtener items")
    }

    pub fn parse_get_details(&self, response: HttpResponse) -> Result<OrderDetails, ApiError> {
        expect_json(response, "Error al obtener detalles")
    }

    pub fn parse_cancel(&self, response: HttpResponse) -> Result<Order, ApiError> {
        expect_json(response, "Error al cancelar orden")
    }
}
