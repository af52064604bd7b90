use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, put},
    Json, Router,
};
use tracing::info;

use crate::{
    next_id, now, ApiResult, AppError, CreateOrder, Db, Order, OrderDetails, OrderItem, ORDER_CANCELLED,
    ORDER_PENDING,
};

pub(crate) fn router() -> Router<Db> {
    Router::new()
        .route("/ordenes", get(list_orders).post(create_order))
        .route("/ordenes/usuario/{user_id}", get(by_user))
        .route("/ordenes/{id}", get(get_order))
        .route("/ordenes/{id}/items", get(order_items))
        .route("/ordenes/{id}/detalles", get(order_details))
        .route("/ordenes/{id}/cancelar", put(cancel_order))
}

fn not_found() -> AppError {
    AppError::NotFound("Orden no encontrada".to_string())
}

/// Lines are snapshotted as sent; the stored total is recomputed from them.
/// The cart is left alone.
async fn create_order(State(db): State<Db>, Json(input): Json<CreateOrder>) -> ApiResult<(StatusCode, Json<Order>)> {
    if input.items.is_empty() {
        return Err(AppError::BadRequest("La orden no tiene items".to_string()));
    }
    if input.items.iter().any(|line| line.quantity < 1) {
        return Err(AppError::BadRequest("La cantidad debe ser mayor a 0".to_string()));
    }
    let mut store = db.write().await;
    store.user(input.user_id)?;

    let total: f64 = input
        .items
        .iter()
        .map(|line| line.product_price * f64::from(line.quantity))
        .sum();
    if (total - input.total).abs() > 0.01 {
        info!(sent = input.total, computed = total, "order total differs from lines");
    }
    let order = Order {
        id: next_id(&store.orders),
        user_id: input.user_id,
        total,
        created_at: now(),
        status: ORDER_PENDING.to_string(),
    };
    for line in input.items {
        let item = OrderItem {
            id: next_id(&store.order_items),
            order_id: order.id,
            product_id: line.product_id,
            product_name: line.product_name,
            product_price: line.product_price,
            quantity: line.quantity,
            image_url: line.image_url,
        };
        store.order_items.insert(item.id, item);
    }
    store.orders.insert(order.id, order.clone());
    info!(order_id = order.id, user_id = order.user_id, total, "order created");
    Ok((StatusCode::CREATED, Json(order)))
}

async fn list_orders(State(db): State<Db>, headers: HeaderMap) -> ApiResult<Json<Vec<Order>>> {
    let store = db.read().await;
    store.require_admin(&headers)?;
    Ok(Json(store.orders.values().cloned().collect()))
}

async fn by_user(State(db): State<Db>, Path(user_id): Path<i64>) -> Json<Vec<Order>> {
    let store = db.read().await;
    Json(store.orders.values().filter(|order| order.user_id == user_id).cloned().collect())
}

async fn get_order(State(db): State<Db>, Path(id): Path<i64>) -> ApiResult<Json<Order>> {
    let store = db.read().await;
    store.orders.get(&id).cloned().map(Json).ok_or_else(not_found)
}

fn items_of(items: &std::collections::BTreeMap<i64, OrderItem>, order_id: i64) -> Vec<OrderItem> {
    items.values().filter(|item| item.order_id == order_id).cloned().collect()
}

async fn order_items(State(db): State<Db>, Path(id): Path<i64>) -> ApiResult<Json<Vec<OrderItem>>> {
    let store = db.read().await;
    if !store.orders.contains_key(&id) {
        return Err(not_found());
    }
    Ok(Json(items_of(&store.order_items, id)))
}

async fn order_details(State(db): State<Db>, Path(id): Path<i64>) -> ApiResult<Json<OrderDetails>> {
    let store = db.read().await;
    let order = store.orders.get(&id).cloned().ok_or_else(not_found)?;
    let items = items_of(&store.order_items, id);
    let item_count = items.iter().map(|item| item.quantity).sum();
    Ok(Json(OrderDetails {
        order,
        items,
        item_count,
    }))
}

async fn cancel_order(State(db): State<Db>, Path(id): Path<i64>) -> ApiResult<Json<Order>> {
    let mut store = db.write().await;
    let order = store.orders.get_mut(&id).ok_or_else(not_found)?;
    if order.status == ORDER_CANCELLED {
        return Err(AppError::Conflict("La orden ya está cancelada".to_string()));
    }
    order.status = ORDER_CANCELLED.to_string();
    info!(order_id = id, "order cancelled");
    Ok(Json(order.clone()))
}
