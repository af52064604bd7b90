//! Wire types served by the mock services. JSON keys follow the real
//! services' camelCase Spanish schema.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(rename = "contrasena")]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefono", default)]
    pub phone: String,
    #[serde(rename = "contrasena")]
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "imagen", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Deserialize)]
pub struct ProductInput {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "categoria", default)]
    pub category: String,
    #[serde(rename = "imagen", default)]
    pub image: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Animal {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "especie")]
    pub species: String,
    #[serde(rename = "raza")]
    pub breed: String,
    #[serde(rename = "edad")]
    pub age: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "isAdoptado")]
    pub adopted: bool,
    #[serde(rename = "imagen", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Deserialize)]
pub struct AnimalInput {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "especie")]
    pub species: String,
    #[serde(rename = "raza", default)]
    pub breed: String,
    #[serde(rename = "edad", default)]
    pub age: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "imagen", default)]
    pub image: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    pub id: i64,
    #[serde(rename = "usuarioId")]
    pub user_id: i64,
    #[serde(rename = "productoId")]
    pub product_id: i64,
    #[serde(rename = "productoNombre")]
    pub product_name: String,
    #[serde(rename = "productoPrecio")]
    pub product_price: f64,
    #[serde(rename = "cantidad")]
    pub quantity: i32,
    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Deserialize)]
pub struct AddToCart {
    #[serde(rename = "usuarioId")]
    pub user_id: i64,
    #[serde(rename = "productoId")]
    pub product_id: i64,
    #[serde(rename = "cantidad", default = "one")]
    pub quantity: i32,
}

fn one() -> i32 {
    1
}

#[derive(Deserialize)]
pub struct QuantityUpdate {
    #[serde(rename = "cantidad")]
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CartTotal {
    pub total: f64,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum FormStatus {
    #[serde(rename = "PENDIENTE")]
    Pending,
    #[serde(rename = "APROBADO")]
    Approved,
    #[serde(rename = "RECHAZADO")]
    Rejected,
}

impl FormStatus {
    pub fn from_path(raw: &str) -> Option<Self> {
        match raw.to_ascii_uppercase().as_str() {
            "PENDIENTE" | "PENDING" => Some(FormStatus::Pending),
            "APROBADO" | "APPROVED" => Some(FormStatus::Approved),
            "RECHAZADO" | "REJECTED" => Some(FormStatus::Rejected),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AdoptionForm {
    pub id: i64,
    #[serde(rename = "usuarioId")]
    pub user_id: i64,
    #[serde(rename = "animalId")]
    pub animal_id: i64,
    #[serde(rename = "nombreSolicitante")]
    pub applicant_name: String,
    #[serde(rename = "correoSolicitante")]
    pub applicant_email: String,
    #[serde(rename = "telefonoSolicitante")]
    pub applicant_phone: String,
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "tipoVivienda")]
    pub housing_type: String,
    #[serde(rename = "tieneMallasVentanas")]
    pub has_window_screens: bool,
    #[serde(rename = "viveEnDepartamento")]
    pub lives_in_apartment: bool,
    #[serde(rename = "tieneOtrosAnimales")]
    pub has_other_pets: bool,
    #[serde(rename = "motivoAdopcion")]
    pub motivation: String,
    #[serde(rename = "estado")]
    pub status: FormStatus,
    #[serde(rename = "comentariosAdmin", skip_serializing_if = "Option::is_none")]
    pub admin_comments: Option<String>,
    #[serde(rename = "fechaCreacion")]
    pub created_at: String,
    #[serde(rename = "fechaRevision", skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<String>,
}

#[derive(Deserialize)]
pub struct AdoptionApplication {
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "tipoVivienda", default)]
    pub housing_type: String,
    #[serde(rename = "tieneMallasVentanas", default)]
    pub has_window_screens: bool,
    #[serde(rename = "viveEnDepartamento", default)]
    pub lives_in_apartment: bool,
    #[serde(rename = "tieneOtrosAnimales", default)]
    pub has_other_pets: bool,
    #[serde(rename = "motivoAdopcion", default)]
    pub motivation: String,
}

#[derive(Deserialize, Default)]
pub struct ReviewDecision {
    #[serde(rename = "comentarios", default)]
    pub comments: String,
}

pub const ORDER_PENDING: &str = "PENDIENTE";
pub const ORDER_CANCELLED: &str = "CANCELADA";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: i64,
    #[serde(rename = "usuarioId")]
    pub user_id: i64,
    pub total: f64,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    pub status: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub id: i64,
    #[serde(rename = "ordenId")]
    pub order_id: i64,
    #[serde(rename = "productoId")]
    pub product_id: i64,
    #[serde(rename = "productoNombre")]
    pub product_name: String,
    #[serde(rename = "productoPrecio")]
    pub product_price: f64,
    #[serde(rename = "cantidad")]
    pub quantity: i32,
    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Deserialize)]
pub struct OrderLine {
    #[serde(rename = "productoId")]
    pub product_id: i64,
    #[serde(rename = "productoNombre")]
    pub product_name: String,
    #[serde(rename = "productoPrecio")]
    pub product_price: f64,
    #[serde(rename = "cantidad")]
    pub quantity: i32,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateOrder {
    #[serde(rename = "usuarioId")]
    pub user_id: i64,
    pub total: f64,
    pub items: Vec<OrderLine>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderDetails {
    #[serde(rename = "orden")]
    pub order: Order,
    pub items: Vec<OrderItem>,
    #[serde(rename = "cantidadItems")]
    pub item_count: i32,
}

#[derive(Deserialize)]
pub struct NameQuery {
    #[serde(rename = "nombre", default)]
    pub name: String,
}
