//! Gate-then-handler pipeline.
//!
//! ```text
//! HTTP Request
//!   ↓
//! Upstream authentication attaches a Principal (out of scope)
//!   ↓
//! access_controller(): AccessGate::evaluate()
//!   ↓                         ↓
//! Ok(ScopedRequest)      Err(Rejection) → 401/403 JSON, pipeline halts
//!   ↓
//! handler(&ScopedRequest)
//! ```

use serde::Serialize;

use crate::error::Rejection;
use crate::gate::{AccessGate, ScopedRequest};

use super::{ExtractMetadata, ExtractQuery};

/// A response produced by the pipeline: status code plus JSON body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Serialized JSON body
    pub body: String,
}

impl HttpResponse {
    /// Serializes `body` into a response with the given status.
    ///
    /// Falls back to a bare `500` if serialization fails.
    pub fn json(status: u16, body: &impl Serialize) -> Self {
        match serde_json::to_string(body) {
            Ok(body) => Self { status, body },
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize response body");
                Self {
                    status: 500,
                    body: r#"{"success":false,"error":"Internal server error"}"#.to_string(),
                }
            }
        }
    }

    /// Parses the body back into a JSON value.
    pub fn body_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.body)
    }
}

impl From<Rejection> for HttpResponse {
    fn from(rejection: Rejection) -> Self {
        Self {
            status: rejection.status(),
            body: rejection.body_json(),
        }
    }
}

/// Runs the access gate on a request.
///
/// Reads the principal and query from `request`, evaluates the gate, and
/// returns either the scoped request to hand to a handler or the rejection
/// to send back.
///
/// # Errors
///
/// Returns a 401 [`Rejection`] when no principal is attached, and a 403
/// [`Rejection`] when the principal's role is not admitted.
///
/// # Examples
///
/// ```
/// use planor_access::AccessGate;
/// use planor_access::web::{access_controller, RequestAdapter};
///
/// let adapter = RequestAdapter::new("req-anon".to_string());
/// let rejection = access_controller(&AccessGate::new(), &adapter).unwrap_err();
///
/// assert_eq!(rejection.status(), 401);
/// ```
pub fn access_controller<R>(gate: &AccessGate, request: &R) -> Result<ScopedRequest, Rejection>
where
    R: ExtractMetadata + ExtractQuery + ?Sized,
{
    gate.evaluate(request.extract_metadata(), request.extract_query())
        .into_result()
}

/// Runs the gate and, only if it admits the request, the handler.
///
/// A rejected request never reaches `handler`.
pub fn run_protected<R, F>(gate: &AccessGate, request: &R, handler: F) -> HttpResponse
where
    R: ExtractMetadata + ExtractQuery + ?Sized,
    F: FnOnce(&ScopedRequest) -> HttpResponse,
{
    match access_controller(gate, request) {
        Ok(scoped) => handler(&scoped),
        Err(rejection) => HttpResponse::from(rejection),
    }
}
