use std::sync::Arc;

use crate::client::{AdminToken, OrderClient};
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{CreateOrderRequest, Order, OrderDetails, OrderItem};

use super::call;

#[derive(Clone)]
pub struct OrderRepository {
    client: OrderClient,
    transport: Arc<dyn Transport>,
}

impl OrderRepository {
    pub fn new(client: OrderClient, transport: Arc<dyn Transport>) -> Self {
        Self { client, transport }
    }

    pub fn create(&self, input: &CreateOrderRequest) -> Result<Order, ApiError> {
        call(
            &*self.transport,
            "orders.create",
            self.client.build_create_order(input),
            |r| self.client.parse_create_order(r),
        )
    }

    pub fn by_user(&self, user_id: i64) -> Result<Vec<Order>, ApiError> {
        call(
            &*self.transport,
            "orders.by_user",
            Ok(self.client.build_list_by_user(user_id)),
            |r| self.client.parse_list_by_user(r),
        )
    }

    pub fn all(&self, token: &AdminToken) -> Result<Vec<Order>, ApiError> {
        call(
            &*self.transport,
            "orders.all",
            Ok(self.client.build_list_all(token)),
            |r| self.client.parse_list_all(r),
        )
    }

    pub fn get(&self, id: i64) -> Result<Order, ApiError> {
        call(
            &*self.transport,
            "orders.get",
            Ok(self.client.build_get_order(id)),
            |r| self.client.parse_get_order(r),
        )
    }

    pub fn items(&self, order_id: i64) -> Result<Vec<OrderItem>, ApiError> {
        call(
            &*self.transport,
            "orders.items",
            Ok(self.client.build_get_items(order_id)),
            |r| self.client.parse_get_items(r),
        )
    }

    pub fn details(&self, order_id: i64) -> Result<OrderDetails, ApiError> {
        call(
            &*self.transport,
            "orders.details",
            Ok(self.client.build_get_details(order_id)),
            |r| self.client.parse_get_details(r),
        )
    }

    pub fn cancel(&self, order_id: i64) -> Result<Order, ApiError> {
        call(
            &*self.transport,
            "orders.cancel",
            Ok(self.client.build_cancel(order_id)),
            |r| self.client.parse_cancel(r),
        )
    }
}
