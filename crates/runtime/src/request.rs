//! Request building and response dispatch

use crate::error::RequestError;
use crate::serializer::{JsonSerializer, Serializer};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use url::form_urlencoded;

/// The one status code that resolves a request successfully.
const SUCCESS_STATUS: u16 = 200;

/// Message used when a response status has no table entry.
const UNEXPECTED_STATUS: &str = "unexpected status code from service";

/// Client shared by all generated services of one API.
#[derive(Debug, Clone)]
pub struct ApiClient<T: HttpTransport, S: Serializer = JsonSerializer> {
    base_url: String,
    transport: T,
    serializer: S,
}

impl<T: HttpTransport> ApiClient<T, JsonSerializer> {
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        Self::with_serializer(base_url, transport, JsonSerializer)
    }
}

impl<T: HttpTransport, S: Serializer> ApiClient<T, S> {
    pub fn with_serializer(base_url: impl Into<String>, transport: T, serializer: S) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
            serializer,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Open a request context for one operation call.
    ///
    /// The returned builder accumulates parameter state and must not
    /// be shared between in-flight requests.
    pub fn new_request(&self, method: Method, path: &str) -> ApiRequest<'_, T, S> {
        ApiRequest {
            client: self,
            method,
            path: path.to_string(),
            path_params: Vec::new(),
            query_params: Vec::new(),
            body: None,
            responses: BTreeMap::new(),
        }
    }
}

/// A request parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<ParamValue>),
}

impl ParamValue {
    /// Plain text rendering, if the value has one. Lists do not.
    fn as_text(&self) -> Option<String> {
        match self {
            ParamValue::Text(text) => Some(text.clone()),
            ParamValue::Int(value) => Some(value.to_string()),
            ParamValue::Float(value) => Some(value.to_string()),
            ParamValue::Bool(value) => Some(value.to_string()),
            ParamValue::List(_) => None,
        }
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<u8> for ParamValue {
    fn from(value: u8) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<f32> for ParamValue {
    fn from(value: f32) -> Self {
        ParamValue::Float(value.into())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl<V: Into<ParamValue>> From<Vec<V>> for ParamValue {
    fn from(values: Vec<V>) -> Self {
        ParamValue::List(values.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Clone)]
struct ResponseSpec {
    message: String,
    has_model: bool,
}

/// One in-flight request: Built → PathResolved → QueryEncoded →
/// BodyPrepared → Sent → Dispatched.
pub struct ApiRequest<'a, T: HttpTransport, S: Serializer = JsonSerializer> {
    client: &'a ApiClient<T, S>,
    method: Method,
    path: String,
    path_params: Vec<(String, ParamValue)>,
    query_params: Vec<(String, ParamValue)>,
    body: Option<String>,
    responses: BTreeMap<u16, ResponseSpec>,
}

impl<'a, T: HttpTransport, S: Serializer> ApiRequest<'a, T, S> {
    /// Attach a parameter substituted into a `{name}` path placeholder.
    pub fn path_param(&mut self, name: &str, value: impl Into<ParamValue>) -> &mut Self {
        self.path_params.push((name.to_string(), value.into()));
        self
    }

    /// Attach a query string parameter.
    pub fn query_param(&mut self, name: &str, value: impl Into<ParamValue>) -> &mut Self {
        self.query_params.push((name.to_string(), value.into()));
        self
    }

    /// Attach the request payload. There can only be one body; the
    /// first one wins and later calls are ignored.
    pub fn body_param<B: Serialize>(&mut self, value: &B) -> Result<&mut Self, RequestError> {
        if self.body.is_none() {
            self.body = Some(self.client.serializer.serialize(value)?);
        }
        Ok(self)
    }

    /// Register a response table entry for a status code. `has_model`
    /// marks codes whose body carries a decodable error model.
    pub fn define_response(&mut self, code: u16, message: &str, has_model: bool) -> &mut Self {
        self.responses.insert(
            code,
            ResponseSpec {
                message: message.to_string(),
                has_model,
            },
        );
        self
    }

    /// Execute the request and decode the success body.
    pub fn execute<R: DeserializeOwned>(mut self) -> Result<R, RequestError> {
        let response = self.dispatch()?;
        self.client
            .serializer
            .deserialize(&response.body)
            .map_err(RequestError::from)
    }

    /// Execute an operation with a void return; the success body is
    /// ignored.
    pub fn execute_empty(mut self) -> Result<(), RequestError> {
        self.dispatch().map(|_| ())
    }

    /// Send the request and run the response table. Only the success
    /// status yields a response; everything else becomes an error.
    fn dispatch(&mut self) -> Result<HttpResponse, RequestError> {
        let request = self.build()?;
        let response = self.client.transport.send(request)?;

        if response.status == SUCCESS_STATUS {
            return Ok(response);
        }

        match self.responses.get(&response.status) {
            Some(spec) => {
                let body = if spec.has_model {
                    Some(
                        self.client
                            .serializer
                            .deserialize::<serde_json::Value>(&response.body)?,
                    )
                } else {
                    None
                };
                Err(RequestError::Failed {
                    status: response.status,
                    message: spec.message.clone(),
                    body,
                })
            }
            None => Err(RequestError::Failed {
                status: response.status,
                message: UNEXPECTED_STATUS.to_string(),
                body: None,
            }),
        }
    }

    fn build(&mut self) -> Result<HttpRequest, RequestError> {
        let path = self.resolve_path()?;
        let query = self.encode_query();
        let body = self.body.take();

        let mut url = format!("{}{}", self.client.base_url, path);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }

        let mut headers = Vec::new();
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }

        Ok(HttpRequest {
            method: self.method,
            url,
            headers,
            body,
        })
    }

    /// Substitute every `{name}` placeholder with its parameter's
    /// text rendering.
    fn resolve_path(&self) -> Result<String, RequestError> {
        let mut path = self.path.clone();
        for (name, value) in &self.path_params {
            let text = value
                .as_text()
                .ok_or_else(|| RequestError::InvalidPathParameter { name: name.clone() })?;
            path = path.replace(&format!("{{{name}}}"), &text);
        }
        Ok(path)
    }

    /// Repeated values encode as repeated `name=value` pairs; the
    /// bracketed array syntax some encoders default to is not what
    /// these services expect.
    fn encode_query(&self) -> String {
        let mut pairs: Vec<String> = Vec::new();
        for (name, value) in &self.query_params {
            append_query_pairs(&mut pairs, name, value);
        }
        pairs.join("&")
    }
}

fn append_query_pairs(pairs: &mut Vec<String>, name: &str, value: &ParamValue) {
    match value {
        ParamValue::List(items) => {
            for item in items {
                append_query_pairs(pairs, name, item);
            }
        }
        scalar => {
            if let Some(text) = scalar.as_text() {
                let encoded = form_urlencoded::Serializer::new(String::new())
                    .append_pair(name, &text)
                    .finish();
                pairs.push(encoded);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockHttpTransport;

    fn ok_response(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: vec![],
            body: body.to_string(),
        }
    }

    #[test]
    fn test_path_placeholder_substitution() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_send()
            .withf(|request| request.url == "http://api.example.com/pets/42")
            .returning(|_| Ok(ok_response("null")));

        let client = ApiClient::new("http://api.example.com", transport);
        let mut request = client.new_request(Method::Get, "/pets/{id}");
        request.path_param("id", "42");
        request.execute_empty().unwrap();
    }

    #[test]
    fn test_list_path_parameter_is_invalid() {
        let transport = MockHttpTransport::new();
        let client = ApiClient::new("http://api.example.com", transport);
        let mut request = client.new_request(Method::Get, "/pets/{id}");
        request.path_param("id", vec!["a", "b"]);
        let err = request.execute_empty().unwrap_err();
        assert!(matches!(
            err,
            RequestError::InvalidPathParameter { name } if name == "id"
        ));
    }

    #[test]
    fn test_repeated_query_values_encode_as_repeated_pairs() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_send()
            .withf(|request| request.url == "http://api.example.com/pets?tags=a&tags=b")
            .returning(|_| Ok(ok_response("null")));

        let client = ApiClient::new("http://api.example.com", transport);
        let mut request = client.new_request(Method::Get, "/pets");
        request.query_param("tags", vec!["a", "b"]);
        request.execute_empty().unwrap();
    }

    #[test]
    fn test_no_question_mark_without_query() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_send()
            .withf(|request| request.url == "http://api.example.com/pets")
            .returning(|_| Ok(ok_response("null")));

        let client = ApiClient::new("http://api.example.com", transport);
        client
            .new_request(Method::Get, "/pets")
            .execute_empty()
            .unwrap();
    }

    #[test]
    fn test_first_body_wins() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_send()
            .withf(|request| request.body.as_deref() == Some("\"first\""))
            .returning(|_| Ok(ok_response("null")));

        let client = ApiClient::new("http://api.example.com", transport);
        let mut request = client.new_request(Method::Post, "/pets");
        request.body_param(&"first").unwrap();
        request.body_param(&"second").unwrap();
        request.execute_empty().unwrap();
    }

    #[test]
    fn test_unregistered_status_yields_generic_failure() {
        let mut transport = MockHttpTransport::new();
        transport.expect_send().returning(|_| {
            Ok(HttpResponse {
                status: 503,
                headers: vec![],
                body: String::new(),
            })
        });

        let client = ApiClient::new("http://api.example.com", transport);
        let err = client
            .new_request(Method::Get, "/pets")
            .execute_empty()
            .unwrap_err();
        match err {
            RequestError::Failed {
                status,
                message,
                body,
            } => {
                assert_eq!(status, 503);
                assert_eq!(message, "unexpected status code from service");
                assert!(body.is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_registered_status_carries_its_message() {
        let mut transport = MockHttpTransport::new();
        transport.expect_send().returning(|_| {
            Ok(HttpResponse {
                status: 404,
                headers: vec![],
                body: "{\"code\": 404}".to_string(),
            })
        });

        let client = ApiClient::new("http://api.example.com", transport);
        let mut request = client.new_request(Method::Get, "/pets/{id}");
        request.path_param("id", "7");
        request.define_response(404, "Pet not found", true);
        let err = request.execute_empty().unwrap_err();
        match err {
            RequestError::Failed {
                status,
                message,
                body,
            } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Pet not found");
                assert_eq!(body, Some(serde_json::json!({"code": 404})));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_body_sets_content_type() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_send()
            .withf(|request| {
                request
                    .headers
                    .iter()
                    .any(|(name, value)| name == "Content-Type" && value == "application/json")
            })
            .returning(|_| Ok(ok_response("null")));

        let client = ApiClient::new("http://api.example.com", transport);
        let mut request = client.new_request(Method::Post, "/pets");
        request.body_param(&42).unwrap();
        request.execute_empty().unwrap();
    }
}
