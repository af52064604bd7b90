use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use tracing::info;

use super::contains_ignore_case;
use crate::{next_id, ApiResult, AppError, Db, NameQuery, Product, ProductInput};

pub(crate) fn router() -> Router<Db> {
    Router::new()
        .route("/productos", get(list_products).post(create_product))
        .route("/productos/buscar", get(search_products))
        .route("/productos/categoria/{category}", get(by_category))
        .route(
            "/productos/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

fn not_found() -> AppError {
    AppError::NotFound("Producto no encontrado".to_string())
}

fn validate(input: &ProductInput) -> ApiResult<()> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("El nombre es requerido".to_string()));
    }
    if input.price < 0.0 {
        return Err(AppError::BadRequest("El precio no puede ser negativo".to_string()));
    }
    Ok(())
}

async fn list_products(State(db): State<Db>) -> Json<Vec<Product>> {
    let store = db.read().await;
    Json(store.products.values().cloned().collect())
}

async fn get_product(State(db): State<Db>, Path(id): Path<i64>) -> ApiResult<Json<Product>> {
    let store = db.read().await;
    store.products.get(&id).cloned().map(Json).ok_or_else(not_found)
}

async fn by_category(State(db): State<Db>, Path(category): Path<String>) -> Json<Vec<Product>> {
    let store = db.read().await;
    Json(
        store
            .products
            .values()
            .filter(|product| product.category.eq_ignore_ascii_case(&category))
            .cloned()
            .collect(),
    )
}

async fn search_products(State(db): State<Db>, Query(query): Query<NameQuery>) -> Json<Vec<Product>> {
    let store = db.read().await;
    Json(
        store
            .products
            .values()
            .filter(|product| contains_ignore_case(&product.name, &query.name))
            .cloned()
            .collect(),
    )
}

async fn create_product(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<ProductInput>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let mut store = db.write().await;
    store.require_admin(&headers)?;
    validate(&input)?;
    let product = Product {
        id: next_id(&store.products),
        name: input.name,
        description: input.description,
        price: input.price,
        category: input.category,
        image: input.image,
    };
    store.products.insert(product.id, product.clone());
    info!(product_id = product.id, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

async fn update_product(
    State(db): State<Db>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(input): Json<ProductInput>,
) -> ApiResult<Json<Product>> {
    let mut store = db.write().await;
    store.require_admin(&headers)?;
    validate(&input)?;
    let product = store.products.get_mut(&id).ok_or_else(not_found)?;
    product.name = input.name;
    product.description = input.description;
    product.price = input.price;
    product.category = input.category;
    product.image = input.image;
    Ok(Json(product.clone()))
}

async fn delete_product(State(db): State<Db>, Path(id): Path<i64>, headers: HeaderMap) -> ApiResult<StatusCode> {
    let mut store = db.write().await;
    store.require_admin(&headers)?;
    store.products.remove(&id).ok_or_else(not_found)?;
    info!(product_id = id, "product deleted");
    Ok(StatusCode::NO_CONTENT)
}
