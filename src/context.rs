use crate::error::{Violation, ViolationKind};
use crate::logging::GateLog;
use crate::request::{Principal, Role};
use crate::state::{Authed, Authorized, Stage, Unauthed};

/// What a request that passed the gate is allowed to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Restricted to a single tenant
    Tenant(String),
    /// No tenant restriction
    Unrestricted,
}

impl Access {
    /// Returns the tenant identifier for [`Access::Tenant`].
    pub fn tenant(&self) -> Option<&str> {
        match self {
            Access::Tenant(client_id) => Some(client_id),
            Access::Unrestricted => None,
        }
    }
}

/// Per-request context carrying the principal through the gate.
///
/// `Ctx<S>` is generic over its progress:
/// - `Ctx<Unauthed>`: no principal
/// - `Ctx<Authed>`: principal present, role not yet checked
/// - `Ctx<Authorized>`: role admitted, [`Access`] decided
///
/// ```text
/// Ctx<Unauthed> --authenticate--> Ctx<Authed> --authorize--> Ctx<Authorized>
/// ```
///
/// Contexts cannot be constructed outside this crate. The only way to obtain
/// a `Ctx<Authorized>` is through [`AccessGate`](crate::AccessGate).
///
/// # Examples
///
/// ```
/// use planor_access::{AccessGate, Decision, Principal, QueryParams, RequestMeta};
///
/// let meta = RequestMeta {
///     request_id: "req-1".to_string(),
///     principal: Some(Principal::standard_user("acme")),
/// };
///
/// let Decision::Allow(scoped) = AccessGate::new().evaluate(meta, QueryParams::new()) else {
///     panic!("standard users are admitted");
/// };
///
/// assert_eq!(scoped.context().tenant_scope(), Some("acme"));
/// ```
#[derive(Debug, Clone)]
pub struct Ctx<S: Stage = Authorized> {
    request_id: String,
    state: S,
}

impl<S: Stage> Ctx<S> {
    /// Returns the request ID for this context.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns the principal if present.
    ///
    /// Always `Some` for `Ctx<Authed>` and `Ctx<Authorized>`.
    pub fn principal(&self) -> Option<&Principal> {
        self.state.principal()
    }

    /// Returns a logger bound to this request.
    pub fn log(&self) -> GateLog<'_> {
        GateLog::new(&self.request_id)
    }
}

impl Ctx<Unauthed> {
    pub(crate) fn new_unauthed(request_id: String) -> Self {
        Self {
            request_id,
            state: Unauthed::new(),
        }
    }

    /// Attaches a principal, progressing to `Ctx<Authed>`.
    ///
    /// # Errors
    ///
    /// Returns an `Unauthenticated` violation if `principal` is `None`.
    pub fn authenticate(self, principal: Option<Principal>) -> Result<Ctx<Authed>, Violation> {
        match principal {
            Some(principal) => Ok(Ctx {
                request_id: self.request_id,
                state: Authed { principal },
            }),
            None => Err(Violation::new(
                ViolationKind::Unauthenticated,
                "no principal attached to request",
            )),
        }
    }
}

impl Ctx<Authed> {
    /// Returns the role of the attached principal.
    pub fn role(&self) -> &Role {
        &self.state.principal.role
    }

    pub(crate) fn authorize(self, access: Access) -> Ctx<Authorized> {
        Ctx {
            request_id: self.request_id,
            state: Authorized {
                principal: self.state.principal,
                access,
            },
        }
    }
}

impl Ctx<Authorized> {
    /// Returns the access level decided by the gate.
    pub fn access(&self) -> &Access {
        &self.state.access
    }

    /// Returns the tenant this request is confined to, if any.
    pub fn tenant_scope(&self) -> Option<&str> {
        self.state.access.tenant()
    }

    /// Returns true if the request is not confined to a tenant.
    pub fn is_unrestricted(&self) -> bool {
        matches!(self.state.access, Access::Unrestricted)
    }
}
