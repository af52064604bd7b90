use std::sync::Arc;

use crate::client::{AdminToken, CatalogClient};
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{Product, ProductInput};

use super::call;

#[derive(Clone)]
pub struct ProductRepository {
    client: CatalogClient,
    transport: Arc<dyn Transport>,
}

impl ProductRepository {
    pub fn new(client: CatalogClient, transport: Arc<dyn Transport>) -> Self {
        Self { client, transport }
    }

    pub fn list(&self) -> Result<Vec<Product>, ApiError> {
        call(
            &*self.transport,
            "products.list",
            Ok(self.client.build_list_products()),
            |r| self.client.parse_list_products(r),
        )
    }

    pub fn get(&self, id: i64) -> Result<Product, ApiError> {
        call(
            &*self.transport,
            "products.get",
            Ok(self.client.build_get_product(id)),
            |r| self.client.parse_get_product(r),
        )
    }

    pub fn by_category(&self, category: &str) -> Result<Vec<Product>, ApiError> {
        call(
            &*self.transport,
            "products.by_category",
            Ok(self.client.build_list_by_category(category)),
            |r| self.client.parse_list_by_category(r),
        )
    }

    pub fn search(&self, name: &str) -> Result<Vec<Product>, ApiError> {
        call(
            &*self.transport,
            "products.search",
            Ok(self.client.build_search(name)),
            |r| self.client.parse_search(r),
        )
    }

    pub fn create(&self, input: &ProductInput, token: &AdminToken) -> Result<Product, ApiError> {
        call(
            &*self.transport,
            "products.create",
            self.client.build_create_product(input, token),
            |r| self.client.parse_create_product(r),
        )
    }

    pub fn update(&self, id: i64, input: &ProductInput, token: &AdminToken) -> Result<Product, ApiError> {
        call(
            &*self.transport,
            "products.update",
            self.client.build_update_product(id, input, token),
            |r| self.client.parse_update_product(r),
        )
    }

    pub fn delete(&self, id: i64, token: &AdminToken) -> Result<(), ApiError> {
        call(
            &*self.transport,
            "products.delete",
            Ok(self.client.build_delete_product(id, token)),
            |r| self.client.parse_delete_product(r),
        )
    }
}
