use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use swagen_runtime::{
    ApiClient, HttpRequest, HttpResponse, HttpTransport, Method, RequestError, TransportError,
};

/// Transport stub that records the outgoing request and replays a
/// canned response.
struct StubTransport {
    status: u16,
    body: String,
    seen: RefCell<Vec<HttpRequest>>,
}

impl StubTransport {
    fn new(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            seen: RefCell::new(Vec::new()),
        }
    }

    fn last_url(&self) -> String {
        self.seen.borrow().last().map(|r| r.url.clone()).unwrap_or_default()
    }
}

impl HttpTransport for StubTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.seen.borrow_mut().push(request);
        Ok(HttpResponse {
            status: self.status,
            headers: vec![],
            body: self.body.clone(),
        })
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Pet {
    id: i64,
    name: String,
}

#[test]
fn test_success_response_decodes_into_model() {
    let transport = StubTransport::new(200, r#"{"id": 42, "name": "Rex"}"#);
    let client = ApiClient::new("http://petstore.example.com/api", transport);

    let mut request = client.new_request(Method::Get, "/pet/{petId}");
    request.path_param("petId", 42i64);
    request.define_response(404, "Pet not found", false);
    let pet: Pet = request.execute().unwrap();

    assert_eq!(
        pet,
        Pet {
            id: 42,
            name: "Rex".to_string()
        }
    );
}

#[test]
fn test_path_and_query_assembly() {
    let transport = StubTransport::new(200, "null");
    let client = ApiClient::new("http://petstore.example.com/api", transport);

    let mut request = client.new_request(Method::Get, "/store/{storeId}/pets");
    request.path_param("storeId", "north-7");
    request.query_param("tags", vec!["small", "friendly"]);
    request.query_param("limit", 10i32);
    request.execute_empty().unwrap();

    assert_eq!(
        client.transport().last_url(),
        "http://petstore.example.com/api/store/north-7/pets?tags=small&tags=friendly&limit=10"
    );
}

#[test]
fn test_query_values_are_percent_encoded() {
    let transport = StubTransport::new(200, "null");
    let client = ApiClient::new("http://petstore.example.com/api", transport);

    let mut request = client.new_request(Method::Get, "/pets");
    request.query_param("name", "Rex & Fido");
    request.execute_empty().unwrap();

    assert_eq!(
        client.transport().last_url(),
        "http://petstore.example.com/api/pets?name=Rex+%26+Fido"
    );
}

#[test]
fn test_void_operation_ignores_success_body() {
    let transport = StubTransport::new(200, "anything at all");
    let client = ApiClient::new("http://petstore.example.com/api", transport);

    let mut request = client.new_request(Method::Delete, "/pet/{petId}");
    request.path_param("petId", 42i64);
    assert!(request.execute_empty().is_ok());
}

#[test]
fn test_registered_error_with_model_attaches_body() {
    let transport = StubTransport::new(404, r#"{"code": 404, "reason": "gone"}"#);
    let client = ApiClient::new("http://petstore.example.com/api", transport);

    let mut request = client.new_request(Method::Get, "/pet/{petId}");
    request.path_param("petId", 9i64);
    request.define_response(404, "Pet not found", true);
    let err = request.execute::<Pet>().unwrap_err();

    match err {
        RequestError::Failed {
            status,
            message,
            body,
        } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Pet not found");
            assert_eq!(body, Some(serde_json::json!({"code": 404, "reason": "gone"})));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_unmapped_status_reports_generic_message() {
    let transport = StubTransport::new(503, "");
    let client = ApiClient::new("http://petstore.example.com/api", transport);

    let err = client
        .new_request(Method::Get, "/pets")
        .execute_empty()
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "request failed with status 503: unexpected status code from service"
    );
}

#[test]
fn test_body_is_serialized_json() {
    let transport = StubTransport::new(200, "null");
    let client = ApiClient::new("http://petstore.example.com/api", transport);

    let mut request = client.new_request(Method::Post, "/pet");
    request
        .body_param(&Pet {
            id: 1,
            name: "Rex".to_string(),
        })
        .unwrap();
    request.execute_empty().unwrap();

    let seen = client.transport().seen.borrow();
    let sent = seen.last().unwrap();
    assert_eq!(sent.body.as_deref(), Some(r#"{"id":1,"name":"Rex"}"#));
    assert!(sent
        .headers
        .iter()
        .any(|(name, value)| name == "Content-Type" && value == "application/json"));
}
