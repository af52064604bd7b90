//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! `requests.json` pins the exact request each client builds; `responses.json`
//! pins how responses are classified into results and `ApiError`s. Bodies are
//! compared as parsed JSON so field order does not matter.

use adopt_core::client::{AdoptionClient, AnimalClient, AuthClient, CartClient, CatalogClient, OrderClient};
use adopt_core::types::{
    AddToCartRequest, AdoptionApplication, AdoptionStatus, LoginRequest, RegisterRequest, ReviewDecision,
};
use adopt_core::{AdminToken, ApiError, HttpMethod, HttpRequest, HttpResponse};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:8080";

struct Clients {
    auth: AuthClient,
    catalog: CatalogClient,
    animals: AnimalClient,
    cart: CartClient,
    adoption: AdoptionClient,
    orders: OrderClient,
}

fn clients() -> Clients {
    Clients {
        auth: AuthClient::new(BASE_URL).unwrap(),
        catalog: CatalogClient::new(BASE_URL).unwrap(),
        animals: AnimalClient::new(BASE_URL).unwrap(),
        cart: CartClient::new(BASE_URL).unwrap(),
        adoption: AdoptionClient::new(BASE_URL).unwrap(),
        orders: OrderClient::new(BASE_URL).unwrap(),
    }
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn token(input: &Value) -> AdminToken {
    AdminToken::new(input["token"].as_str().unwrap())
}

fn id(input: &Value, key: &str) -> i64 {
    input[key].as_i64().unwrap()
}

fn build(c: &Clients, op: &str, input: &Value) -> HttpRequest {
    match op {
        "auth.login" => {
            let credentials: LoginRequest = serde_json::from_value(input.clone()).unwrap();
            c.auth.build_login(&credentials).unwrap()
        }
        "auth.register" => {
            let request: RegisterRequest = serde_json::from_value(input.clone()).unwrap();
            c.auth.build_register(&request).unwrap()
        }
        "auth.find_by_email" => c.auth.build_find_user_by_email(input.as_str().unwrap()),
        "catalog.search" => c.catalog.build_search(input.as_str().unwrap()),
        "catalog.delete" => c.catalog.build_delete_product(id(input, "id"), &token(input)),
        "animals.by_species" => c.animals.build_list_by_species(input.as_str().unwrap()),
        "animals.mark_adopted" => c.animals.build_mark_adopted(id(input, "id"), &token(input)),
        "cart.add" => {
            let request: AddToCartRequest = serde_json::from_value(input.clone()).unwrap();
            c.cart.build_add_item(&request).unwrap()
        }
        "cart.update_quantity" => {
            let quantity = i32::try_from(id(input, "quantity")).unwrap();
            c.cart.build_update_quantity(id(input, "id"), quantity).unwrap()
        }
        "cart.clear" => c.cart.build_clear_cart(input.as_i64().unwrap()),
        "adoption.submit" => {
            let application: AdoptionApplication = serde_json::from_value(input["application"].clone()).unwrap();
            c.adoption
                .build_submit(id(input, "user_id"), id(input, "animal_id"), &application)
                .unwrap()
        }
        "adoption.by_status" => {
            let status: AdoptionStatus = serde_json::from_value(input["status"].clone()).unwrap();
            c.adoption.build_list_by_status(status, &token(input))
        }
        "adoption.approve" => {
            let decision = ReviewDecision {
                comments: input["comments"].as_str().unwrap().to_string(),
            };
            c.adoption.build_approve(id(input, "id"), &decision, &token(input)).unwrap()
        }
        "orders.details" => c.orders.build_get_details(input.as_i64().unwrap()),
        "orders.cancel" => c.orders.build_cancel(input.as_i64().unwrap()),
        other => panic!("unknown op: {other}"),
    }
}

/// Parse with the named operation; `Some(len)` for list results.
fn parse(c: &Clients, op: &str, response: HttpResponse) -> Result<Option<usize>, ApiError> {
    match op {
        "auth.login" => c.auth.parse_login(response).map(|_| None),
        "catalog.list" => c.catalog.parse_list_products(response).map(|l| Some(l.len())),
        "animals.available" => c.animals.parse_list_available(response).map(|l| Some(l.len())),
        "cart.clear" => c.cart.parse_clear_cart(response).map(|_| None),
        "adoption.approve" => c.adoption.parse_approve(response).map(|_| None),
        "orders.get" => c.orders.parse_get_order(response).map(|_| None),
        other => panic!("unknown op: {other}"),
    }
}

fn kind(err: &ApiError) -> &'static str {
    match err {
        ApiError::Transport(_) => "Transport",
        ApiError::Timeout(_) => "Timeout",
        ApiError::InvalidUrl(_) => "InvalidUrl",
        ApiError::Unauthorized { .. } => "Unauthorized",
        ApiError::NotFound { .. } => "NotFound",
        ApiError::Rejected { .. } => "Rejected",
        ApiError::Server { .. } => "Server",
        ApiError::MissingBody(_) => "MissingBody",
        ApiError::Deserialization(_) => "Deserialization",
        ApiError::Serialization(_) => "Serialization",
        ApiError::Validation(_) => "Validation",
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[test]
fn request_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();
    assert_eq!(vectors["base_url"], BASE_URL);

    let c = clients();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let expected = &case["expected_request"];
        let req = build(&c, case["op"].as_str().unwrap(), &case["input"]);

        assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.path, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: path");

        let expected_headers: Vec<(String, String)> = expected["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        match expected.get("body") {
            Some(body) => {
                let actual: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
                assert_eq!(&actual, body, "{name}: body");
            }
            None => assert!(req.body.is_none(), "{name}: unexpected body"),
        }
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[test]
fn response_vectors() {
    let raw = include_str!("../../test-vectors/responses.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = clients();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let expected = &case["expected"];
        let response = HttpResponse {
            status: u16::try_from(case["response"]["status"].as_u64().unwrap()).unwrap(),
            headers: Vec::new(),
            body: case["response"]["body"].as_str().unwrap().to_string(),
        };

        let result = parse(&c, case["op"].as_str().unwrap(), response);
        if expected["ok"].as_bool().unwrap() {
            let parsed = result.unwrap_or_else(|e| panic!("{name}: unexpected error {e:?}"));
            if let Some(len) = expected.get("len") {
                assert_eq!(parsed, Some(len.as_u64().unwrap() as usize), "{name}: len");
            }
            continue;
        }

        let err = result.err().unwrap_or_else(|| panic!("{name}: expected an error"));
        assert_eq!(kind(&err), expected["kind"].as_str().unwrap(), "{name}: kind");
        assert_eq!(err.message(), expected["message"].as_str().unwrap(), "{name}: message");
        assert_eq!(
            err.status().map(u64::from),
            expected.get("status").and_then(Value::as_u64),
            "{name}: status"
        );
    }
}
