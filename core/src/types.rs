//! Domain DTOs for the six services.
//!
//! # Design
//! Field names are English; the JSON keys are the services' own camelCase
//! Spanish keys, mapped with `#[serde(rename)]`. These types mirror the
//! mock-server's schema but are defined independently; the integration tests
//! catch any drift between the two crates.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

/// A registered account as returned by the auth service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefono", default)]
    pub phone: String,
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    #[serde(rename = "contrasena")]
    pub password: String,
}

/// Credential-check answer. A 2xx with `success: false` is still a failed
/// login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "contrasena")]
    pub password: String,
}

/// Result of a completed two-step login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user: User,
    pub token: Option<String>,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "categoria", default)]
    pub category: String,
    #[serde(rename = "imagen", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Payload for creating or replacing a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductInput {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "imagen", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

// ---------------------------------------------------------------------------
// Animals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Animal {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "especie")]
    pub species: String,
    #[serde(rename = "raza", default)]
    pub breed: String,
    /// Free text as entered by the shelter ("2 años").
    #[serde(rename = "edad", default)]
    pub age: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "isAdoptado", default)]
    pub adopted: bool,
    #[serde(rename = "imagen", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnimalInput {
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
    #[serde(rename = "imagen", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

// ---------------------------------------------------------------------------
// Cart
// ---------------------------------------------------------------------------

/// A cart line. `id` is absent until the cart service assigns one; name and
/// price are a snapshot taken when the product was added.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "usuarioId")]
    pub user_id: i64,
    #[serde(rename = "productoId")]
    pub product_id: i64,
    #[serde(rename = "productoNombre", default)]
    pub product_name: String,
    #[serde(rename = "productoPrecio", default)]
    pub product_price: f64,
    #[serde(rename = "cantidad")]
    pub quantity: i32,
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.product_price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddToCartRequest {
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

impl AddToCartRequest {
    /// A single unit of `product_id`.
    pub fn new(user_id: i64, product_id: i64) -> Self {
        Self {
            user_id,
            product_id,
            quantity: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuantityUpdate {
    #[serde(rename = "cantidad")]
    pub quantity: i32,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct CartTotal {
    #[serde(default)]
    pub total: f64,
}

// ---------------------------------------------------------------------------
// Adoption forms
// ---------------------------------------------------------------------------

/// Review state of an adoption form. Moves forward only:
/// `Pending -> Approved | Rejected`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AdoptionStatus {
    #[default]
    #[serde(rename = "PENDIENTE", alias = "PENDING")]
    Pending,
    #[serde(rename = "APROBADO", alias = "APPROVED")]
    Approved,
    #[serde(rename = "RECHAZADO", alias = "REJECTED")]
    Rejected,
}

impl AdoptionStatus {
    /// Wire spelling, also used as the path segment of the by-status lookup.
    pub fn as_str(self) -> &'static str {
        match self {
            AdoptionStatus::Pending => "PENDIENTE",
            AdoptionStatus::Approved => "APROBADO",
            AdoptionStatus::Rejected => "RECHAZADO",
        }
    }

    pub fn can_transition_to(self, next: AdoptionStatus) -> bool {
        matches!(
            (self, next),
            (AdoptionStatus::Pending, AdoptionStatus::Approved)
                | (AdoptionStatus::Pending, AdoptionStatus::Rejected)
        )
    }

    pub fn is_final(self) -> bool {
        self != AdoptionStatus::Pending
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdoptionForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "usuarioId")]
    pub user_id: i64,
    #[serde(rename = "animalId")]
    pub animal_id: i64,
    #[serde(rename = "nombreSolicitante", default)]
    pub applicant_name: String,
    #[serde(rename = "correoSolicitante", default)]
    pub applicant_email: String,
    #[serde(rename = "telefonoSolicitante", default)]
    pub applicant_phone: String,
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "tipoVivienda")]
    pub housing_type: String,
    #[serde(rename = "tieneMallasVentanas", default)]
    pub has_window_screens: bool,
    #[serde(rename = "viveEnDepartamento", default)]
    pub lives_in_apartment: bool,
    #[serde(rename = "tieneOtrosAnimales", default)]
    pub has_other_pets: bool,
    #[serde(rename = "motivoAdopcion", default)]
    pub motivation: String,
    #[serde(rename = "estado", default)]
    pub status: AdoptionStatus,
    #[serde(rename = "comentariosAdmin", default, skip_serializing_if = "Option::is_none")]
    pub admin_comments: Option<String>,
    #[serde(rename = "fechaCreacion", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(rename = "fechaRevision", default, skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<String>,
}

/// The applicant-supplied part of an adoption form; user and animal travel
/// in the request path.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdoptionApplication {
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
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewDecision {
    #[serde(rename = "comentarios", default)]
    pub comments: String,
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: i64,
    #[serde(rename = "usuarioId")]
    pub user_id: i64,
    pub total: f64,
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
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
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderDetails {
    #[serde(rename = "orden")]
    pub order: Order,
    pub items: Vec<OrderItem>,
    #[serde(rename = "cantidadItems", default)]
    pub item_count: i32,
}

/// One line of a new order, snapshotting the cart line it came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    #[serde(rename = "productoId")]
    pub product_id: i64,
    #[serde(rename = "productoNombre")]
    pub product_name: String,
    #[serde(rename = "productoPrecio")]
    pub product_price: f64,
    #[serde(rename = "cantidad")]
    pub quantity: i32,
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl From<&CartItem> for OrderLine {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product_id,
            product_name: item.product_name.clone(),
            product_price: item.product_price,
            quantity: item.quantity,
            image_url: item.image_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateOrderRequest {
    #[serde(rename = "usuarioId")]
    pub user_id: i64,
    pub total: f64,
    pub items: Vec<OrderLine>,
}

impl CreateOrderRequest {
    /// Snapshot `items` into an order for `user_id`, totalling price × quantity.
    pub fn from_cart(user_id: i64, items: &[CartItem]) -> Self {
        let lines: Vec<OrderLine> = items.iter().map(OrderLine::from).collect();
        let total = items.iter().map(CartItem::line_total).sum();
        Self {
            user_id,
            total,
            items: lines,
        }
    }
}
