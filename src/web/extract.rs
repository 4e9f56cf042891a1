//! Extraction boundary traits for web integration.
//!
//! These traits map framework-specific request types onto the gate's inputs.

use crate::request::{Principal, RequestMeta};
use crate::scope::QueryParams;

/// Reads the principal attached by an upstream authentication step.
///
/// Implementations must not authenticate anything themselves and must have
/// no side effects. `None` means no principal is attached.
///
/// # Examples
///
/// ```
/// use planor_access::web::ExtractPrincipal;
/// use planor_access::Principal;
///
/// struct MySessionRequest {
///     claims: Option<String>,
/// }
///
/// impl ExtractPrincipal for MySessionRequest {
///     fn extract_principal(&self) -> Option<Principal> {
///         // Claims that fail to decode are treated as absent.
///         self.claims
///             .as_deref()
///             .and_then(|json| Principal::from_json(json).ok())
///     }
/// }
///
/// let req = MySessionRequest { claims: Some(r#"{"role":"admin"}"#.to_string()) };
/// assert!(req.extract_principal().is_some());
/// ```
pub trait ExtractPrincipal {
    /// Returns the attached principal, if any.
    fn extract_principal(&self) -> Option<Principal>;
}

/// Extracts request metadata for the gate.
pub trait ExtractMetadata {
    /// Returns the request id and attached principal.
    fn extract_metadata(&self) -> RequestMeta;
}

/// Extracts the query parameters the gate may scope.
pub trait ExtractQuery {
    /// Returns a copy of the request's query parameters.
    fn extract_query(&self) -> QueryParams;
}
