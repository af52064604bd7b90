use std::sync::Arc;

use crate::client::{AdminToken, AnimalClient};
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{Animal, AnimalInput};

use super::call;

#[derive(Clone)]
pub struct AnimalRepository {
    client: AnimalClient,
    transport: Arc<dyn Transport>,
}

impl AnimalRepository {
    pub fn new(client: AnimalClient, transport: Arc<dyn Transport>) -> Self {
        Self { client, transport }
    }

    pub fn list(&self) -> Result<Vec<Animal>, ApiError> {
        call(
            &*self.transport,
            "animals.list",
            Ok(self.client.build_list_animals()),
            |r| self.client.parse_list_animals(r),
        )
    }

    pub fn available(&self) -> Result<Vec<Animal>, ApiError> {
        call(
            &*self.transport,
            "animals.available",
            Ok(self.client.build_list_available()),
            |r| self.client.parse_list_available(r),
        )
    }

    pub fn adopted(&self) -> Result<Vec<Animal>, ApiError> {
        call(
            &*self.transport,
            "animals.adopted",
            Ok(self.client.build_list_adopted()),
            |r| self.client.parse_list_adopted(r),
        )
    }

    pub fn get(&self, id: i64) -> Result<Animal, ApiError> {
        call(
            &*self.transport,
            "animals.get",
            Ok(self.client.build_get_animal(id)),
            |r| self.client.parse_get_animal(r),
        )
    }

    pub fn by_species(&self, species: &str) -> Result<Vec<Animal>, ApiError> {
        call(
            &*self.transport,
            "animals.by_species",
            Ok(self.client.build_list_by_species(species)),
            |r| self.client.parse_list_by_species(r),
        )
    }

    pub fn search(&self, name: &str) -> Result<Vec<Animal>, ApiError> {
        call(
            &*self.transport,
            "animals.search",
            Ok(self.client.build_search(name)),
            |r| self.client.parse_search(r),
        )
    }

    pub fn create(&self, input: &AnimalInput, token: &AdminToken) -> Result<Animal, ApiError> {
        call(
            &*self.transport,
            "animals.create",
            self.client.build_create_animal(input, token),
            |r| self.client.parse_create_animal(r),
        )
    }

    pub fn update(&self, id: i64, input: &AnimalInput, token: &AdminToken) -> Result<Animal, ApiError> {
        call(
            &*self.transport,
            "animals.update",
            self.client.build_update_animal(id, input, token),
            |r| self.client.parse_update_animal(r),
        )
    }

    pub fn mark_adopted(&self, id: i64, token: &AdminToken) -> Result<(), ApiError> {
        call(
            &*self.transport,
            "animals.mark_adopted",
            Ok(self.client.build_mark_adopted(id, token)),
            |r| self.client.parse_mark_adopted(r),
        )
    }

    pub fn delete(&self, id: i64, token: &AdminToken) -> Result<(), ApiError> {
        call(
            &*self.transport,
            "animals.delete",
            Ok(self.client.build_delete_animal(id, token)),
            |r| self.client.parse_delete_animal(r),
        )
    }
}
