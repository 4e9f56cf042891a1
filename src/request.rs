use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::Error;

/// Role of an authenticated principal.
///
/// Roles arrive as free-form strings from the authentication layer. They are
/// closed into this enum at the deserialization boundary: anything that is
/// not exactly `"standard_user"` or `"admin"` becomes [`Role::Unknown`],
/// including an empty string, `null`, a missing field, or a non-string
/// value such as `42` (kept as its JSON text). Decoding a role never fails.
///
/// # Examples
///
/// ```
/// use planor_access::Role;
///
/// assert_eq!(Role::from("admin"), Role::Admin);
/// assert_eq!(Role::from("standard_user"), Role::StandardUser);
/// assert_eq!(Role::from("Admin"), Role::Unknown("Admin".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<Value>", into = "String")]
pub enum Role {
    /// A tenant-bound user; requests are scoped to the user's own client
    StandardUser,
    /// An unrestricted administrator
    Admin,
    /// Any other role value, kept verbatim for logging
    Unknown(String),
}

impl Role {
    /// Wire value for [`Role::StandardUser`].
    pub const STANDARD_USER: &'static str = "standard_user";
    /// Wire value for [`Role::Admin`].
    pub const ADMIN: &'static str = "admin";

    /// Returns the wire representation of this role.
    pub fn as_str(&self) -> &str {
        match self {
            Role::StandardUser => Self::STANDARD_USER,
            Role::Admin => Self::ADMIN,
            Role::Unknown(raw) => raw,
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Unknown(String::new())
    }
}

impl From<&str> for Role {
    fn from(raw: &str) -> Self {
        match raw {
            Self::STANDARD_USER => Role::StandardUser,
            Self::ADMIN => Role::Admin,
            other => Role::Unknown(other.to_string()),
        }
    }
}

impl From<Option<Value>> for Role {
    fn from(raw: Option<Value>) -> Self {
        match raw {
            Some(Value::String(raw)) => Role::from(raw.as_str()),
            None | Some(Value::Null) => Role::default(),
            Some(other) => Role::Unknown(other.to_string()),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata about an incoming request.
///
/// Contains the request identifier and optional principal attached by the
/// upstream authentication step.
#[derive(Debug, Clone)]
pub struct RequestMeta {
    /// Unique identifier for this request
    pub request_id: String,
    /// Authenticated principal, if any
    pub principal: Option<Principal>,
}

/// An authenticated caller.
///
/// Decoded from the shape `{"role": string, "clientId"?: string, "id"?: string}`;
/// unknown fields are ignored. A field of the wrong type does not fail the
/// decode: a non-string `role` becomes [`Role::Unknown`], and a non-string
/// `clientId` or `id` is treated as absent, so a malformed principal is
/// rejected by the gate with `403` rather than mistaken for no principal.
///
/// # Examples
///
/// ```
/// use planor_access::{Principal, Role};
///
/// let principal = Principal::from_json(r#"{"role":"standard_user","clientId":"acme"}"#)
///     .expect("valid principal");
///
/// assert_eq!(principal.role, Role::StandardUser);
/// assert_eq!(principal.client_id.as_deref(), Some("acme"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Principal {
    /// Identifier of the user, used for log and audit correlation only
    #[serde(
        default,
        deserialize_with = "string_or_absent",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// Role of the user
    #[serde(default)]
    pub role: Role,
    /// Tenant the user belongs to
    #[serde(
        default,
        rename = "clientId",
        deserialize_with = "string_or_absent",
        skip_serializing_if = "Option::is_none"
    )]
    pub client_id: Option<String>,
}

fn string_or_absent<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Ok(Some(s)),
        _ => Ok(None),
    }
}

impl Principal {
    /// Creates a standard user bound to `client_id`.
    pub fn standard_user(client_id: impl Into<String>) -> Self {
        Self {
            id: None,
            role: Role::StandardUser,
            client_id: Some(client_id.into()),
        }
    }

    /// Creates an administrator.
    pub fn admin() -> Self {
        Self {
            id: None,
            role: Role::Admin,
            client_id: None,
        }
    }

    /// Creates a principal with an arbitrary role string.
    pub fn with_role(role: impl AsRef<str>) -> Self {
        Self {
            id: None,
            role: Role::from(role.as_ref()),
            client_id: None,
        }
    }

    /// Sets the principal identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Decodes a principal from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] only if `json` is not a JSON object.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }
}
