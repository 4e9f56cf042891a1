//! Query parameters and tenant scope injection.

use std::collections::btree_map::{BTreeMap, Iter};

/// Default query key carrying the tenant identifier.
pub const DEFAULT_TENANT_PARAM: &str = "clientId";

/// Query parameters of an in-flight request.
///
/// Keys are kept in sorted order so that two containers with the same
/// entries compare and print identically.
///
/// # Examples
///
/// ```
/// use planor_access::QueryParams;
///
/// let mut query = QueryParams::new();
/// query.insert("clientId", "evil-corp");
/// query.insert("page", "2");
///
/// query.inject_tenant("clientId", "acme");
///
/// assert_eq!(query.get("clientId"), Some("acme"));
/// assert_eq!(query.get("page"), Some("2"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: BTreeMap<String, String>,
}

impl QueryParams {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a parameter, replacing any existing value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Returns the value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Returns true if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns true if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterates over parameters in key order.
    pub fn iter(&self) -> Iter<'_, String, String> {
        self.params.iter()
    }

    /// Writes the tenant identifier under `param`.
    ///
    /// Overwrites unconditionally. Whatever value the caller supplied for
    /// `param` is discarded, never merged.
    pub fn inject_tenant(&mut self, param: &str, client_id: &str) {
        if let Some(previous) = self.params.get(param) {
            if previous != client_id {
                tracing::debug!(
                    param,
                    client_id,
                    "discarding caller-supplied tenant parameter"
                );
            }
        }
        self.params.insert(param.to_string(), client_id.to_string());
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a QueryParams {
    type Item = (&'a String, &'a String);
    type IntoIter = Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}
