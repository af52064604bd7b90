use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{AdoptionApplication, AdoptionForm, AdoptionStatus, ReviewDecision};

use super::{delete, expect_empty, expect_json, expect_list, get, json, with_bearer, AdminToken, Endpoint};

/// Request builder and response parser for the adoption-form service.
#[derive(Debug, Clone)]
pub struct AdoptionClient {
    endpoint: Endpoint,
}

impl AdoptionClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            endpoint: Endpoint::parse(base_url)?,
        })
    }

    pub fn build_list_forms(&self, token: &AdminToken) -> HttpRequest {
        with_bearer(get(self.endpoint.url(&["formularios"], &[])), token)
    }

    pub fn build_get_form(&self, id: i64) -> HttpRequest {
        let id = id.to_string();
        get(self.endpoint.url(&["formularios", &id], &[]))
    }

    pub fn build_list_by_user(&self, user_id: i64) -> HttpRequest {
        let user_id = user_id.to_string();
        get(self.endpoint.url(&["formularios", "usuario", &user_id], &[]))
    }

    pub fn build_list_by_animal(&self, animal_id: i64) -> HttpRequest {
        let animal_id = animal_id.to_string();
        get(self.endpoint.url(&["formularios", "animal", &animal_id], &[]))
    }

    pub fn build_list_by_status(&self, status: AdoptionStatus, token: &AdminToken) -> HttpRequest {
        with_bearer(
            get(self.endpoint.url(&["formularios", "estado", status.as_str()], &[])),
            token,
        )
    }

    pub fn build_submit(
        &self,
        user_id: i64,
        animal_id: i64,
        application: &AdoptionApplication,
    ) -> Result<HttpRequest, ApiError> {
        let user_id = user_id.to_string();
        let animal_id = animal_id.to_string();
        json(
            HttpMethod::Post,
            self.endpoint.url(&["formularios", "adoptar", &user_id, &animal_id], &[]),
            application,
        )
    }

    pub fn build_approve(&self, id: i64, decision: &ReviewDecision, token: &AdminToken) -> Result<HttpRequest, ApiError> {
        self.build_review(id, "aprobar", decision, token)
    }

    pub fn build_reject(&self, id: i64, decision: &ReviewDecision, token: &AdminToken) -> Result<HttpRequest, ApiError> {
        self.build_review(id, "rechazar", decision, token)
    }

    fn build_review(
        &self,
        id: i64,
        action: &str,
        decision: &ReviewDecision,
        token: &AdminToken,
    ) -> Result<HttpRequest, ApiError> {
        let id = id.to_string();
        let req = json(
            HttpMethod::Put,
            self.endpoint.url(&["formularios", &id, action], &[]),
            decision,
        )?;
        Ok(with_bearer(req, token))
    }

    pub fn build_delete_form(&self, id: i64, token: &AdminToken) -> HttpRequest {
        let id = id.to_string();
        with_bearer(delete(self.endpoint.url(&["formularios", &id], &[])), token)
    }

    pub fn parse_list_forms(&self, response: HttpResponse) -> Result<Vec<AdoptionForm>, ApiError> {
        expect_list(response, "Error al cargar formularios")
    }

    pub fn parse_get_form(&self, response: HttpResponse) -> Result<AdoptionForm, ApiError> {
        expect_json(response, "Formulario no encontrado")
    }

    pub fn parse_list_by_user(&self, response: HttpResponse) -> Result<Vec<AdoptionForm>, ApiError> {
        expect_list(response, "Error al cargar formularios")
    }

    pub fn parse_list_by_animal(&self, response: HttpResponse) -> Result<Vec<AdoptionForm>, ApiError> {
        expect_list(response, "Error al cargar formularios")
    }

    pub fn parse_list_by_status(&self, response: HttpResponse) -> Result<Vec<AdoptionForm>, ApiError> {
        expect_list(response, "Error al cargar formularios")
    }

    pub fn parse_submit(&self, response: HttpResponse) -> Result<AdoptionForm, ApiError> {
        expect_json(response, "Error al crear formulario")
    }

    pub fn parse_approve(&self, response: HttpResponse) -> Result<AdoptionForm, ApiError> {
        expect_json(response, "Error al aprobar")
    }

    pub fn parse_reject(&self, response: HttpResponse) -> Result<AdoptionForm, ApiError> {
        expect_json(response, "Error al rechazar")
    }

    pub fn parse_delete_form(&self, response: HttpResponse) -> Result<(), ApiError> {
        expect_empty(response, "Error al eliminar")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> AdoptionClient {
        AdoptionClient::new("http://localhost:8094").unwrap()
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_submit_puts_ids_in_path() {
        let application = AdoptionApplication {
            address: "Av. Siempre Viva 742".to_string(),
            housing_type: "Casa".to_string(),
            has_window_screens: true,
            lives_in_apartment: false,
            has_other_pets: true,
            motivation: "Compañía".to_string(),
        };
        let req = client().build_submit(3, 9, &application).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:8094/formularios/adoptar/3/9");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["direccion"], "Av. Siempre Viva 742");
        assert_eq!(body["tieneMallasVentanas"], true);
        assert_eq!(body["viveEnDepartamento"], false);
        assert!(body.get("usuarioId").is_none());
    }

    #[test]
    fn build_approve_carries_comments_and_bearer() {
        let req = client()
            .build_approve(
                11,
                &ReviewDecision {
                    comments: "Todo en orden".to_string(),
                },
                &AdminToken::new("adm"),
            )
            .unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:8094/formularios/11/aprobar");
        assert_eq!(req.body.as_deref(), Some(r#"{"comentarios":"Todo en orden"}"#));
        assert_eq!(req.header("authorization"), Some("Bearer adm"));
    }

    #[test]
    fn build_reject_targets_rechazar() {
        let req = client()
            .build_reject(11, &ReviewDecision::default(), &AdminToken::new("adm"))
            .unwrap();
        assert_eq!(req.path, "http://localhost:8094/formularios/11/rechazar");
    }

    #[test]
    fn build_list_by_status_uses_wire_name() {
        let req = client().build_list_by_status(AdoptionStatus::Pending, &AdminToken::new("adm"));
        assert_eq!(req.path, "http://localhost:8094/formularios/estado/PENDIENTE");
    }

    #[test]
    fn parse_approve_success() {
        let form = client()
            .parse_approve(response(
                200,
                r#"{"id":11,"usuarioId":3,"animalId":9,"direccion":"x","tipoVivienda":"Casa","estado":"APROBADO","comentariosAdmin":"ok","fechaRevision":"2024-05-02T10:00:00"}"#,
            ))
            .unwrap();
        assert_eq!(form.status, AdoptionStatus::Approved);
        assert_eq!(form.admin_comments.as_deref(), Some("ok"));
    }

    #[test]
    fn parse_approve_conflict() {
        let err = client()
            .parse_approve(response(409, r#"{"message":"El formulario ya fue revisado"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::Rejected { status: 409, .. }));
    }

    #[test]
    fn parse_list_by_user_empty_body() {
        assert!(client().parse_list_by_user(response(200, "")).unwrap().is_empty());
    }
}
