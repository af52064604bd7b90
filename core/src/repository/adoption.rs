use std::sync::Arc;

use crate::client::{AdminToken, AdoptionClient};
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{AdoptionApplication, AdoptionForm, AdoptionStatus, ReviewDecision};

use super::call;

#[derive(Clone)]
pub struct AdoptionRepository {
    client: AdoptionClient,
    transport: Arc<dyn Transport>,
}

impl AdoptionRepository {
    pub fn new(client: AdoptionClient, transport: Arc<dyn Transport>) -> Self {
        Self { client, transport }
    }

    pub fn all(&self, token: &AdminToken) -> Result<Vec<AdoptionForm>, ApiError> {
        call(
            &*self.transport,
            "adoption.all",
            Ok(self.client.build_list_forms(token)),
            |r| self.client.parse_list_forms(r),
        )
    }

    pub fn get(&self, id: i64) -> Result<AdoptionForm, ApiError> {
        call(
            &*self.transport,
            "adoption.get",
            Ok(self.client.build_get_form(id)),
            |r| self.client.parse_get_form(r),
        )
    }

    pub fn by_user(&self, user_id: i64) -> Result<Vec<AdoptionForm>, ApiError> {
        call(
            &*self.transport,
            "adoption.by_user",
            Ok(self.client.build_list_by_user(user_id)),
            |r| self.client.parse_list_by_user(r),
        )
    }

    pub fn by_animal(&self, animal_id: i64) -> Result<Vec<AdoptionForm>, ApiError> {
        call(
            &*self.transport,
            "adoption.by_animal",
            Ok(self.client.build_list_by_animal(animal_id)),
            |r| self.client.parse_list_by_animal(r),
        )
    }

    pub fn by_status(&self, status: AdoptionStatus, token: &AdminToken) -> Result<Vec<AdoptionForm>, ApiError> {
        call(
            &*self.transport,
            "adoption.by_status",
            Ok(self.client.build_list_by_status(status, token)),
            |r| self.client.parse_list_by_status(r),
        )
    }

    pub fn submit(
        &self,
        user_id: i64,
        animal_id: i64,
        application: &AdoptionApplication,
    ) -> Result<AdoptionForm, ApiError> {
        call(
            &*self.transport,
            "adoption.submit",
            self.client.build_submit(user_id, animal_id, application),
            |r| self.client.parse_submit(r),
        )
    }

    pub fn approve(&self, id: i64, decision: &ReviewDecision, token: &AdminToken) -> Result<AdoptionForm, ApiError> {
        call(
            &*self.transport,
            "adoption.approve",
            self.client.build_approve(id, decision, token),
            |r| self.client.parse_approve(r),
        )
    }

    pub fn reject(&self, id: i64, decision: &ReviewDecision, token: &AdminToken) -> Result<AdoptionForm, ApiError> {
        call(
            &*self.transport,
            "adoption.reject",
            self.client.build_reject(id, decision, token),
            |r| self.client.parse_reject(r),
        )
    }

    pub fn delete(&self, id: i64, token: &AdminToken) -> Result<(), ApiError> {
        call(
            &*self.transport,
            "adoption.delete",
            Ok(self.client.build_delete_form(id, token)),
            |r| self.client.parse_delete_form(r),
        )
    }
}
