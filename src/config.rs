//! Gate configuration.

use serde::Deserialize;

use crate::error::Error;
use crate::scope::DEFAULT_TENANT_PARAM;

/// Configuration for an [`AccessGate`](crate::AccessGate).
///
/// Missing fields fall back to their defaults, so `{}` is a valid document.
///
/// # Examples
///
/// ```
/// use planor_access::GateConfig;
///
/// let config = GateConfig::from_json("{}").unwrap();
/// assert_eq!(config.tenant_param, "clientId");
///
/// let config = GateConfig::from_json(r#"{"tenant_param":"tenantId"}"#).unwrap();
/// assert_eq!(config.tenant_param, "tenantId");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GateConfig {
    /// Query key the tenant identifier is written under
    pub tenant_param: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            tenant_param: DEFAULT_TENANT_PARAM.to_string(),
        }
    }
}

impl GateConfig {
    /// Parses a configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] on malformed JSON or unknown fields.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_param_is_client_id() {
        assert_eq!(GateConfig::default().tenant_param, "clientId");
    }

    #[test]
    fn unknown_field_is_rejected() {
        assert!(GateConfig::from_json(r#"{"tenant":"x"}"#).is_err());
    }
}
