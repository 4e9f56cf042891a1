//! Audit event schema.

use std::fmt;

use crate::request::Role;

/// Which check of the gate produced the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditEventKind {
    /// Presence of a principal was checked
    Authentication,
    /// The principal's role was checked
    Authorization,
}

impl fmt::Display for AuditEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditEventKind::Authentication => write!(f, "authentication"),
            AuditEventKind::Authorization => write!(f, "authorization"),
        }
    }
}

/// Outcome of a gate decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditOutcome {
    /// The request was let through
    Success,
    /// The request was rejected
    Denied,
}

impl fmt::Display for AuditOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditOutcome::Success => write!(f, "success"),
            AuditOutcome::Denied => write!(f, "denied"),
        }
    }
}

/// A structured record of one gate decision.
///
/// # Example
///
/// ```
/// use planor_access::Role;
/// use planor_access::audit::{AuditEvent, AuditEventKind, AuditOutcome};
///
/// let event = AuditEvent::new("req-123", AuditEventKind::Authorization, AuditOutcome::Success)
///     .with_principal(Some("user-7"))
///     .with_role(&Role::StandardUser)
///     .with_tenant("acme");
///
/// assert_eq!(event.request_id(), "req-123");
/// assert_eq!(event.tenant(), Some("acme"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    request_id: String,
    principal: Option<String>,
    kind: AuditEventKind,
    outcome: AuditOutcome,
    role: Option<String>,
    /// Tenant the request was confined to; never a caller-supplied value
    tenant: Option<String>,
    status: Option<u16>,
}

impl AuditEvent {
    /// Creates a new audit event with required fields.
    pub fn new(request_id: impl Into<String>, kind: AuditEventKind, outcome: AuditOutcome) -> Self {
        Self {
            request_id: request_id.into(),
            principal: None,
            kind,
            outcome,
            role: None,
            tenant: None,
            status: None,
        }
    }

    /// Sets the principal identifier.
    pub fn with_principal(mut self, principal: Option<impl Into<String>>) -> Self {
        self.principal = principal.map(Into::into);
        self
    }

    /// Sets the role the decision was made on.
    pub fn with_role(mut self, role: &Role) -> Self {
        self.role = Some(role.as_str().to_string());
        self
    }

    /// Sets the tenant the request was confined to.
    pub fn with_tenant(mut self, tenant: impl Into<String>) -> Self {
        self.tenant = Some(tenant.into());
        self
    }

    /// Sets the HTTP status of a rejection.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns the request identifier.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns the principal identifier, if known.
    pub fn principal(&self) -> Option<&str> {
        self.principal.as_deref()
    }

    /// Returns the event kind.
    pub fn kind(&self) -> AuditEventKind {
        self.kind
    }

    /// Returns the decision outcome.
    pub fn outcome(&self) -> AuditOutcome {
        self.outcome
    }

    /// Returns the role, if a principal was present.
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    /// Returns the tenant scope, if one was injected.
    pub fn tenant(&self) -> Option<&str> {
        self.tenant.as_deref()
    }

    /// Returns the rejection status, if rejected.
    pub fn status(&self) -> Option<u16> {
        self.status
    }
}

impl fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AuditEvent[kind={}, outcome={}, request_id={}, principal={}",
            self.kind,
            self.outcome,
            self.request_id,
            self.principal.as_deref().unwrap_or("<none>")
        )?;

        if let Some(role) = &self.role {
            write!(f, ", role={:?}", role)?;
        }
        if let Some(tenant) = &self.tenant {
            write!(f, ", tenant={}", tenant)?;
        }
        if let Some(status) = self.status {
            write!(f, ", status={}", status)?;
        }

        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_and_outcome_display() {
        assert_eq!(AuditEventKind::Authentication.to_string(), "authentication");
        assert_eq!(AuditEventKind::Authorization.to_string(), "authorization");
        assert_eq!(AuditOutcome::Success.to_string(), "success");
        assert_eq!(AuditOutcome::Denied.to_string(), "denied");
    }

    #[test]
    fn minimal_event() {
        let event = AuditEvent::new("req-1", AuditEventKind::Authentication, AuditOutcome::Denied);

        assert_eq!(event.request_id(), "req-1");
        assert!(event.principal().is_none());
        assert!(event.role().is_none());
        assert!(event.tenant().is_none());
        assert!(event.to_string().contains("<none>"));
    }

    #[test]
    fn builder_fills_fields() {
        let event = AuditEvent::new("req-2", AuditEventKind::Authorization, AuditOutcome::Denied)
            .with_principal(Some("u-9"))
            .with_role(&Role::Unknown("guest".to_string()))
            .with_status(403);

        assert_eq!(event.principal(), Some("u-9"));
        assert_eq!(event.role(), Some("guest"));
        assert_eq!(event.status(), Some(403));
    }

    #[test]
    fn display_quotes_role_so_empty_is_visible() {
        let event = AuditEvent::new("req-3", AuditEventKind::Authorization, AuditOutcome::Denied)
            .with_role(&Role::Unknown(String::new()));

        assert!(event.to_string().contains(r#"role="""#));
    }
}
