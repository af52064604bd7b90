use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Product, ProductInput};

use super::{delete, expect_empty, expect_json, expect_list, get, json, with_bearer, AdminToken, Endpoint};

/// Request builder and response parser for the product catalog.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    endpoint: Endpoint,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            endpoint: Endpoint::parse(base_url)?,
        })
    }

    pub fn build_list_products(&self) -> HttpRequest {
        get(self.endpoint.url(&["productos"], &[]))
    }

    pub fn build_get_product(&self, id: i64) -> HttpRequest {
        let id = id.to_string();
        get(self.endpoint.url(&["productos", &id], &[]))
    }

    pub fn build_list_by_category(&self, category: &str) -> HttpRequest {
        get(self.endpoint.url(&["productos", "categoria", category], &[]))
    }

    pub fn build_search(&self, name: &str) -> HttpRequest {
        get(self.endpoint.url(&["productos", "buscar"], &[("nombre", name)]))
    }

    pub fn build_create_product(&self, input: &ProductInput, token: &AdminToken) -> Result<HttpRequest, ApiError> {
        let req = json(HttpMethod::Post, self.endpoint.url(&["productos"], &[]), input)?;
        Ok(with_bearer(req, token))
    }

    pub fn build_update_product(
        &self,
        id: i64,
        input: &ProductInput,
        token: &AdminToken,
    ) -> Result<HttpRequest, ApiError> {
        let id = id.to_string();
        let req = json(HttpMethod::Put, self.endpoint.url(&["productos", &id], &[]), input)?;
        Ok(with_bearer(req, token))
    }

    pub fn build_delete_product(&self, id: i64, token: &AdminToken) -> HttpRequest {
        let id = id.to_string();
        with_bearer(delete(self.endpoint.url(&["productos", &id], &[])), token)
    }

    pub fn parse_list_products(&self, response: HttpResponse) -> Result<Vec<Product>, ApiError> {
        expect_list(response, "Error al obtener productos")
    }

    pub fn parse_get_product(&self, response: HttpResponse) -> Result<Product, ApiError> {
        expect_json(response, "Producto no encontrado")
    }

    pub fn parse_list_by_category(&self, response: HttpResponse) -> Result<Vec<Product>, ApiError> {
        expect_list(response, "Error al filtrar productos")
    }

    pub fn parse_search(&self, response: HttpResponse) -> Result<Vec<Product>, ApiError> {
        expect_list(response, "Error al buscar productos")
    }

    pub fn parse_create_product(&self, response: HttpResponse) -> Result<Product, ApiError> {
        expect_json(response, "Error al crear producto")
    }

    pub fn parse_update_product(&self, response: HttpResponse) -> Result<Product, ApiError> {
        expect_json(response, "Error al actualizar producto")
    }

    pub fn parse_delete_product(&self, response: HttpResponse) -> Result<(), ApiError> {
        expect_empty(response, "Error al eliminar producto")
    }
}
