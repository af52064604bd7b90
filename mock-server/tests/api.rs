use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_server::{
    app, AdoptionForm, Animal, CartItem, CartTotal, FormStatus, LoginResponse, Order, OrderDetails, Product, User,
    ADMIN_EMAIL, ADMIN_PASSWORD,
};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder().method(method).uri(uri).body(String::new()).unwrap()
}

fn bearer(mut request: Request<String>, token: &str) -> Request<String> {
    request.headers_mut().insert(
        http::header::AUTHORIZATION,
        http::HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
    );
    request
}

/// The router is cheap to clone and every clone shares the same store.
async fn send(app: &Router, request: Request<String>) -> axum::response::Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn admin_token(app: &Router) -> String {
    let body = format!(r#"{{"email":"{ADMIN_EMAIL}","contrasena":"{ADMIN_PASSWORD}"}}"#);
    let resp = send(app, json_request("POST", "/auth/login", &body)).await;
    let login: LoginResponse = body_json(resp).await;
    assert!(login.success);
    login.token.unwrap()
}

async fn register(app: &Router, email: &str) -> User {
    let body = format!(r#"{{"nombre":"Ana","email":"{email}","telefono":"+5691234","contrasena":"secreto"}}"#);
    let resp = send(app, json_request("POST", "/auth/register", &body)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await
}

// --- auth ---

#[tokio::test]
async fn login_with_bad_password_reports_failure_in_body() {
    let app = app();
    let body = format!(r#"{{"email":"{ADMIN_EMAIL}","contrasena":"nope"}}"#);
    let resp = send(&app, json_request("POST", "/auth/login", &body)).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let login: LoginResponse = body_json(resp).await;
    assert!(!login.success);
    assert_eq!(login.message, "Credenciales incorrectas");
    assert!(login.token.is_none());
}

#[tokio::test]
async fn register_then_lookup_by_email() {
    let app = app();
    let user = register(&app, "ana@test.com").await;
    assert!(!user.is_admin);

    let resp = send(&app, empty_request("GET", "/auth/usuario/correo/ana@test.com")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let found: User = body_json(resp).await;
    assert_eq!(found, user);
}

#[tokio::test]
async fn duplicate_registration_is_a_conflict() {
    let app = app();
    register(&app, "ana@test.com").await;
    let resp = send(
        &app,
        json_request(
            "POST",
            "/auth/register",
            r#"{"nombre":"Otra","email":"ANA@test.com","contrasena":"secreto"}"#,
        ),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let error: Value = body_json(resp).await;
    assert_eq!(error["message"], "El email ya está registrado");
}

#[tokio::test]
async fn unknown_user_is_404_with_message() {
    let app = app();
    let resp = send(&app, empty_request("GET", "/auth/usuarios/99")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let error: Value = body_json(resp).await;
    assert_eq!(error["message"], "Usuario no encontrado");
}

// --- catalog and animals ---

#[tokio::test]
async fn search_is_case_insensitive() {
    let app = app();
    let resp = send(&app, empty_request("GET", "/productos/buscar?nombre=PELOTA")).await;
    let products: Vec<Product> = body_json(resp).await;
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Pelota de goma");
}

#[tokio::test]
async fn product_writes_need_an_admin_token() {
    let app = app();
    let input = r#"{"nombre":"Cama","descripcion":"","precio":30.0,"categoria":"Accesorios"}"#;

    let resp = send(&app, json_request("POST", "/productos", input)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let token = admin_token(&app).await;
    let resp = send(&app, bearer(json_request("POST", "/productos", input), &token)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Product = body_json(resp).await;
    assert_eq!(created.id, 4);

    let resp = send(&app, bearer(empty_request("DELETE", "/productos/4"), &token)).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn regular_user_token_is_not_admin() {
    let app = app();
    register(&app, "ana@test.com").await;
    let resp = send(
        &app,
        json_request("POST", "/auth/login", r#"{"email":"ana@test.com","contrasena":"secreto"}"#),
    )
    .await;
    let login: LoginResponse = body_json(resp).await;
    let token = login.token.unwrap();

    let resp = send(&app, bearer(empty_request("GET", "/formularios"), &token)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn available_excludes_adopted_animals() {
    let app = app();
    let resp = send(&app, empty_request("GET", "/animales/disponibles")).await;
    let animals: Vec<Animal> = body_json(resp).await;
    assert_eq!(animals.len(), 2);
    assert!(animals.iter().all(|animal| !animal.adopted));

    let resp = send(&app, empty_request("GET", "/animales/especie/perro")).await;
    let dogs: Vec<Animal> = body_json(resp).await;
    assert_eq!(dogs.len(), 2);
}

// --- cart ---

#[tokio::test]
async fn adding_same_product_merges_lines() {
    let app = app();
    let user = register(&app, "ana@test.com").await;
    let add = format!(r#"{{"usuarioId":{},"productoId":2,"cantidad":2}}"#, user.id);

    send(&app, json_request("POST", "/carrito/agregar", &add)).await;
    let resp = send(&app, json_request("POST", "/carrito/agregar", &add)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let line: CartItem = body_json(resp).await;
    assert_eq!(line.quantity, 4);

    let resp = send(&app, empty_request("GET", &format!("/carrito/usuario/{}", user.id))).await;
    let items: Vec<CartItem> = body_json(resp).await;
    assert_eq!(items.len(), 1);

    let resp = send(&app, empty_request("GET", &format!("/carrito/usuario/{}/total", user.id))).await;
    let total: CartTotal = body_json(resp).await;
    assert_eq!(total.total, 20.0);
}

#[tokio::test]
async fn cart_rejects_unknown_product_and_zero_quantity() {
    let app = app();
    let user = register(&app, "ana@test.com").await;

    let missing = format!(r#"{{"usuarioId":{},"productoId":77}}"#, user.id);
    let resp = send(&app, json_request("POST", "/carrito/agregar", &missing)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let add = format!(r#"{{"usuarioId":{},"productoId":1}}"#, user.id);
    let line: CartItem = body_json(send(&app, json_request("POST", "/carrito/agregar", &add)).await).await;
    let resp = send(
        &app,
        json_request("PUT", &format!("/carrito/item/{}", line.id), r#"{"cantidad":0}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn merged_quantity_overflow_is_rejected() {
    let app = app();
    let user = register(&app, "ana@test.com").await;
    let add = format!(r#"{{"usuarioId":{},"productoId":2,"cantidad":{}}}"#, user.id, i32::MAX);

    let resp = send(&app, json_request("POST", "/carrito/agregar", &add)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = send(&app, json_request("POST", "/carrito/agregar", &add)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = send(&app, empty_request("GET", &format!("/carrito/usuario/{}", user.id))).await;
    let lines: Vec<CartItem> = body_json(resp).await;
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].quantity, i32::MAX);
}

// --- adoption ---

#[tokio::test]
async fn adoption_review_lifecycle() {
    let app = app();
    let user = register(&app, "ana@test.com").await;
    let token = admin_token(&app).await;
    let application = r#"{"direccion":"Av. Siempre Viva 742","tipoVivienda":"Casa","tieneMallasVentanas":true,
        "viveEnDepartamento":false,"tieneOtrosAnimales":false,"motivoAdopcion":"Compañía"}"#;

    let resp = send(
        &app,
        json_request("POST", &format!("/formularios/adoptar/{}/2", user.id), application),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let form: AdoptionForm = body_json(resp).await;
    assert_eq!(form.status, FormStatus::Pending);
    assert_eq!(form.applicant_email, "ana@test.com");

    let resp = send(
        &app,
        bearer(
            json_request("PUT", &format!("/formularios/{}/aprobar", form.id), r#"{"comentarios":"Ok"}"#),
            &token,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let approved: AdoptionForm = body_json(resp).await;
    assert_eq!(approved.status, FormStatus::Approved);
    assert_eq!(approved.admin_comments.as_deref(), Some("Ok"));
    assert!(approved.reviewed_at.is_some());

    let resp = send(&app, empty_request("GET", "/animales/2")).await;
    let animal: Animal = body_json(resp).await;
    assert!(animal.adopted);

    let resp = send(
        &app,
        bearer(
            json_request("PUT", &format!("/formularios/{}/rechazar", form.id), r#"{"comentarios":""}"#),
            &token,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = send(&app, bearer(empty_request("GET", "/formularios/estado/APROBADO"), &token)).await;
    let approved: Vec<AdoptionForm> = body_json(resp).await;
    assert_eq!(approved.len(), 1);
}

#[tokio::test]
async fn adopted_animal_cannot_be_applied_for() {
    let app = app();
    let user = register(&app, "ana@test.com").await;
    let resp = send(
        &app,
        json_request(
            "POST",
            &format!("/formularios/adoptar/{}/3", user.id),
            r#"{"direccion":"Calle 1","tipoVivienda":"Casa"}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn unknown_status_path_is_400() {
    let app = app();
    let token = admin_token(&app).await;
    let resp = send(&app, bearer(empty_request("GET", "/formularios/estado/LUEGO"), &token)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- orders ---

#[tokio::test]
async fn order_lifecycle() {
    let app = app();
    let user = register(&app, "ana@test.com").await;
    let body = format!(
        r#"{{"usuarioId":{},"total":22.5,"items":[
            {{"productoId":1,"productoNombre":"Collar reflectante","productoPrecio":12.5,"cantidad":1}},
            {{"productoId":2,"productoNombre":"Pelota de goma","productoPrecio":5.0,"cantidad":2}}]}}"#,
        user.id
    );
    let resp = send(&app, json_request("POST", "/ordenes", &body)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let order: Order = body_json(resp).await;
    assert_eq!(order.status, "PENDIENTE");
    assert_eq!(order.total, 22.5);

    let resp = send(&app, empty_request("GET", &format!("/ordenes/{}/detalles", order.id))).await;
    let details: OrderDetails = body_json(resp).await;
    assert_eq!(details.items.len(), 2);
    assert_eq!(details.item_count, 3);

    let resp = send(&app, empty_request("PUT", &format!("/ordenes/{}/cancelar", order.id))).await;
    let cancelled: Order = body_json(resp).await;
    assert_eq!(cancelled.status, "CANCELADA");

    let resp = send(&app, empty_request("PUT", &format!("/ordenes/{}/cancelar", order.id))).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn empty_order_is_rejected() {
    let app = app();
    let resp = send(
        &app,
        json_request("POST", "/ordenes", r#"{"usuarioId":1,"total":0.0,"items":[]}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn listing_all_orders_is_admin_only() {
    let app = app();
    let resp = send(&app, empty_request("GET", "/ordenes")).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let token = admin_token(&app).await;
    let resp = send(&app, bearer(empty_request("GET", "/ordenes"), &token)).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
