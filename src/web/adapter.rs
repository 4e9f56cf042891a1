//! Request adapter for mapping HTTP requests to gate inputs.

use std::collections::HashMap;

use crate::error::Error;
use crate::request::{Principal, RequestMeta};
use crate::scope::QueryParams;

use super::{ExtractMetadata, ExtractPrincipal, ExtractQuery};

/// Framework-neutral view of an inbound request.
///
/// `RequestAdapter` holds simple owned data so it does not couple to any
/// framework's request types. Framework-specific code should implement
/// `From<FrameworkRequest>` for `RequestAdapter`, or fill one in after its
/// own authentication middleware has run.
///
/// # Examples
///
/// ```
/// use planor_access::web::{ExtractMetadata, ExtractQuery, RequestAdapter};
/// use planor_access::Principal;
///
/// let mut adapter = RequestAdapter::new("req-12345".to_string());
/// adapter.set_principal(Some(Principal::standard_user("acme")));
/// adapter.add_query_param("page".to_string(), "2".to_string());
///
/// let meta = adapter.extract_metadata();
/// assert_eq!(meta.request_id, "req-12345");
///
/// let query = adapter.extract_query();
/// assert_eq!(query.get("page"), Some("2"));
/// ```
#[derive(Debug, Clone)]
pub struct RequestAdapter {
    /// Unique request identifier (required)
    request_id: String,
    /// Principal attached by upstream authentication (optional)
    principal: Option<Principal>,
    /// Query parameters from the URL, as sent by the caller
    query_params: QueryParams,
    /// Path parameters from routing
    path_params: HashMap<String, String>,
}

impl RequestAdapter {
    /// Creates a new request adapter with the given request ID.
    ///
    /// All other fields start empty.
    pub fn new(request_id: String) -> Self {
        Self {
            request_id,
            principal: None,
            query_params: QueryParams::new(),
            path_params: HashMap::new(),
        }
    }

    /// Sets the principal for this request.
    ///
    /// Called by the upstream authentication step after it verified the
    /// caller's token or session.
    pub fn set_principal(&mut self, principal: Option<Principal>) {
        self.principal = principal;
    }

    /// Decodes and sets the principal from its JSON claims.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if `json` is not a valid principal object.
    /// The current principal is left unchanged in that case.
    pub fn set_principal_json(&mut self, json: &str) -> Result<(), Error> {
        self.principal = Some(Principal::from_json(json)?);
        Ok(())
    }

    /// Adds a query parameter, replacing an earlier value for the same key.
    pub fn add_query_param(&mut self, key: String, value: String) {
        self.query_params.insert(key, value);
    }

    /// Replaces all query parameters.
    ///
    /// Useful for feeding the query of a previous [`ScopedRequest`](crate::ScopedRequest)
    /// back through the gate.
    pub fn set_query(&mut self, query: QueryParams) {
        self.query_params = query;
    }

    /// Adds a path parameter.
    pub fn add_path_param(&mut self, key: String, value: String) {
        self.path_params.insert(key, value);
    }

    /// Returns a reference to the request ID.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns a reference to the principal, if present.
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    /// Returns the query parameters as sent by the caller.
    pub fn query_params(&self) -> &QueryParams {
        &self.query_params
    }

    /// Returns a path parameter, if present.
    pub fn path_param(&self, key: &str) -> Option<&str> {
        self.path_params.get(key).map(String::as_str)
    }
}

impl ExtractPrincipal for RequestAdapter {
    fn extract_principal(&self) -> Option<Principal> {
        self.principal.clone()
    }
}

impl ExtractMetadata for RequestAdapter {
    fn extract_metadata(&self) -> RequestMeta {
        RequestMeta {
            request_id: self.request_id.clone(),
            principal: self.extract_principal(),
        }
    }
}

impl ExtractQuery for RequestAdapter {
    fn extract_query(&self) -> QueryParams {
        self.query_params.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Role;

    #[test]
    fn request_adapter_new() {
        let adapter = RequestAdapter::new("req-test".to_string());
        assert_eq!(adapter.request_id(), "req-test");
        assert!(adapter.principal().is_none());
        assert!(adapter.query_params().is_empty());
    }

    #[test]
    fn set_principal_json_decodes_claims() {
        let mut adapter = RequestAdapter::new("req-1".to_string());
        adapter
            .set_principal_json(r#"{"role":"standard_user","clientId":"acme","id":"u-1"}"#)
            .unwrap();

        let principal = adapter.principal().unwrap();
        assert_eq!(principal.role, Role::StandardUser);
        assert_eq!(principal.client_id.as_deref(), Some("acme"));
        assert_eq!(principal.id.as_deref(), Some("u-1"));
    }

    #[test]
    fn set_principal_json_keeps_previous_on_error() {
        let mut adapter = RequestAdapter::new("req-1".to_string());
        adapter.set_principal(Some(Principal::admin()));

        assert!(adapter.set_principal_json("not json").is_err());
        assert_eq!(adapter.principal().unwrap().role, Role::Admin);
    }

    #[test]
    fn extract_metadata_includes_principal() {
        let mut adapter = RequestAdapter::new("req-meta".to_string());
        adapter.set_principal(Some(Principal::admin()));

        let meta = adapter.extract_metadata();
        assert_eq!(meta.request_id, "req-meta");
        assert_eq!(meta.principal.unwrap().role, Role::Admin);
    }

    #[test]
    fn extract_query_is_a_copy() {
        let mut adapter = RequestAdapter::new("req-1".to_string());
        adapter.add_query_param("clientId".to_string(), "evil-corp".to_string());

        let mut query = adapter.extract_query();
        query.inject_tenant("clientId", "acme");

        assert_eq!(adapter.query_params().get("clientId"), Some("evil-corp"));
    }

    #[test]
    fn path_params_are_readable() {
        let mut adapter = RequestAdapter::new("req-1".to_string());
        adapter.add_path_param("id".to_string(), "prop-1".to_string());
        assert_eq!(adapter.path_param("id"), Some("prop-1"));
        assert!(adapter.path_param("missing").is_none());
    }
}
