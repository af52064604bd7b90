use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::info;

use crate::{next_id, AddToCart, ApiResult, AppError, CartItem, CartTotal, Db, QuantityUpdate};

pub(crate) fn router() -> Router<Db> {
    Router::new()
        .route("/carrito/usuario/{user_id}", get(user_cart).delete(clear_cart))
        .route("/carrito/usuario/{user_id}/total", get(cart_total))
        .route("/carrito/agregar", post(add_item))
        .route("/carrito/item/{id}", put(update_quantity).delete(remove_item))
}

fn check_quantity(quantity: i32) -> ApiResult<()> {
    if quantity < 1 {
        return Err(AppError::BadRequest("La cantidad debe ser mayor a 0".to_string()));
    }
    Ok(())
}

async fn user_cart(State(db): State<Db>, Path(user_id): Path<i64>) -> Json<Vec<CartItem>> {
    let store = db.read().await;
    Json(store.cart.values().filter(|item| item.user_id == user_id).cloned().collect())
}

async fn cart_total(State(db): State<Db>, Path(user_id): Path<i64>) -> Json<CartTotal> {
    let store = db.read().await;
    let total = store
        .cart
        .values()
        .filter(|item| item.user_id == user_id)
        .map(|item| item.product_price * f64::from(item.quantity))
        .sum();
    Json(CartTotal { total })
}

/// Adding a product already in the cart raises that line's quantity.
async fn add_item(State(db): State<Db>, Json(input): Json<AddToCart>) -> ApiResult<Json<CartItem>> {
    check_quantity(input.quantity)?;
    let mut store = db.write().await;
    store.user(input.user_id)?;
    let product = store
        .products
        .get(&input.product_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound("Producto no encontrado".to_string()))?;

    if let Some(line) = store
        .cart
        .values_mut()
        .find(|item| item.user_id == input.user_id && item.product_id == input.product_id)
    {
        line.quantity = line
            .quantity
            .checked_add(input.quantity)
            .ok_or_else(|| AppError::BadRequest("Cantidad fuera de rango".to_string()))?;
        return Ok(Json(line.clone()));
    }

    let item = CartItem {
        id: next_id(&store.cart),
        user_id: input.user_id,
        product_id: product.id,
        product_name: product.name,
        product_price: product.price,
        quantity: input.quantity,
        image_url: product.image,
    };
    store.cart.insert(item.id, item.clone());
    info!(user_id = item.user_id, product_id = item.product_id, "cart line added");
    Ok(Json(item))
}

async fn update_quantity(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<QuantityUpdate>,
) -> ApiResult<Json<CartItem>> {
    check_quantity(input.quantity)?;
    let mut store = db.write().await;
    let item = store
        .cart
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound("Item no encontrado".to_string()))?;
    item.quantity = input.quantity;
    Ok(Json(item.clone()))
}

async fn remove_item(State(db): State<Db>, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    let mut store = db.write().await;
    store
        .cart
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| AppError::NotFound("Item no encontrado".to_string()))
}

async fn clear_cart(State(db): State<Db>, Path(user_id): Path<i64>) -> StatusCode {
    let mut store = db.write().await;
    store.cart.retain(|_, item| item.user_id != user_id);
    info!(user_id, "cart cleared");
    StatusCode::NO_CONTENT
}
