use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Animal, AnimalInput};

use super::{delete, expect_empty, expect_json, expect_list, get, json, put_empty, with_bearer, AdminToken, Endpoint};

/// Request builder and response parser for the animals service.
#[derive(Debug, Clone)]
pub struct AnimalClient {
    endpoint: Endpoint,
}

impl AnimalClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            endpoint: Endpoint::parse(base_url)?,
        })
    }

    pub fn build_list_animals(&self) -> HttpRequest {
        get(self.endpoint.url(&["animales"], &[]))
    }

    pub fn build_list_available(&self) -> HttpRequest {
        get(self.endpoint.url(&["animales", "disponibles"], &[]))
    }

    pub fn build_list_adopted(&self) -> HttpRequest {
        get(self.endpoint.url(&["animales", "adoptados"], &[]))
    }

    pub fn build_get_animal(&self, id: i64) -> HttpRequest {
        let id = id.to_string();
        get(self.endpoint.url(&["animales", &id], &[]))
    }

    pub fn build_list_by_species(&self, species: &str) -> HttpRequest {
        get(self.endpoint.url(&["animales", "especie", species], &[]))
    }

    pub fn build_search(&self, name: &str) -> HttpRequest {
        get(self.endpoint.url(&["animales", "buscar"], &[("nombre", name)]))
    }

    pub fn build_create_animal(&self, input: &AnimalInput, token: &AdminToken) -> Result<HttpRequest, ApiError> {
        let req = json(HttpMethod::Post, self.endpoint.url(&["animales"], &[]), input)?;
        Ok(with_bearer(req, token))
    }

    pub fn build_update_animal(
        &self,
        id: i64,
        input: &AnimalInput,
        token: &AdminToken,
    ) -> Result<HttpRequest, ApiError> {
        let id = id.to_string();
        let req = json(HttpMethod::Put, self.endpoint.url(&["animales", &id], &[]), input)?;
        Ok(with_bearer(req, token))
    }

    pub fn build_mark_adopted(&self, id: i64, token: &AdminToken) -> HttpRequest {
        let id = id.to_string();
        with_bearer(put_empty(self.endpoint.url(&["animales", &id, "adoptar"], &[])), token)
    }

    pub fn build_delete_animal(&self, id: i64, token: &AdminToken) -> HttpRequest {
        let id = id.to_string();
        with_bearer(delete(self.endpoint.url(&["animales", &id], &[])), token)
    }

    pub fn parse_list_animals(&self, response: HttpResponse) -> Result<Vec<Animal>, ApiError> {
        expect_list(response, "Error al cargar animales")
    }

    pub fn parse_list_available(&self, response: HttpResponse) -> Result<Vec<Animal>, ApiError> {
        expect_list(response, "Error al cargar animales disponibles")
    }

    pub fn parse_list_adopted(&self, response: HttpResponse) -> Result<Vec<Animal>, ApiError> {
        expect_list(response, "Error al cargar animales adoptados")
    }

    pub fn parse_get_animal(&self, response: HttpResponse) -> Result<Animal, ApiError> {
        expect_json(response, "Animal no encontrado")
    }

    pub fn parse_list_by_species(&self, response: HttpResponse) -> Result<Vec<Animal>, ApiError> {
        expect_list(response, "Error al filtrar animales")
    }

    pub fn parse_search(&self, response: HttpResponse) -> Result<Vec<Animal>, ApiError> {
        expect_list(response, "Error al buscar animales")
    }

    pub fn parse_create_animal(&self, response: HttpResponse) -> Result<Animal, ApiError> {
        expect_json(response, "Error al crear animal")
    }

    pub fn parse_update_animal(&self, response: HttpResponse) -> Result<Animal, ApiError> {
        expect_json(response, "Error al actualizar animal")
    }

    pub fn parse_mark_adopted(&self, response: HttpResponse) -> Result<(), ApiError> {
        expect_empty(response, "Error al marcar como adoptado")
    }

    pub fn parse_delete_animal(&self, response: HttpResponse) -> Result<(), ApiError> {
        expect_empty(response, "Error al eliminar animal")
    }
}
