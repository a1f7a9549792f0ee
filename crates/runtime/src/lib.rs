//! Request runtime for swagen-generated clients
//!
//! Generated service methods delegate here: the [`ApiRequest`]
//! builder performs path templating, query encoding and body
//! serialization, sends the assembled request through an
//! [`HttpTransport`], and dispatches the response against the
//! operation's status-code table.
//!
//! The crate is self-contained on purpose; its sources are copied
//! into every generated package.

mod error;
mod request;
mod serializer;
mod transport;

pub use error::{RequestError, SerializationError, TransportError};
pub use request::{ApiClient, ApiRequest, ParamValue};
pub use serializer::{JsonSerializer, Serializer};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Method, ReqwestTransport};
