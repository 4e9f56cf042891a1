use std::sync::Arc;

use crate::{
    audit::{AuditEvent, AuditEventKind, AuditOutcome, AuditTrail},
    config::GateConfig,
    context::{Access, Ctx},
    error::{Rejection, Violation, ViolationKind},
    logging::GateLog,
    request::{RequestMeta, Role},
    scope::QueryParams,
    state::{Authed, Authorized},
};

/// Outcome of running a request through the [`AccessGate`].
#[derive(Debug, Clone)]
pub enum Decision {
    /// Continue to the handler with this scoped request
    Allow(ScopedRequest),
    /// Halt the pipeline and send this response
    Reject(Rejection),
}

impl Decision {
    /// Returns true for [`Decision::Allow`].
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow(_))
    }

    /// Converts into a `Result`, mapping `Reject` to `Err`.
    pub fn into_result(self) -> Result<ScopedRequest, Rejection> {
        match self {
            Decision::Allow(scoped) => Ok(scoped),
            Decision::Reject(rejection) => Err(rejection),
        }
    }
}

/// A request that passed the gate.
///
/// Holds the authorized context and the final query parameters. For a
/// standard user the query's tenant parameter always equals the principal's
/// own tenant.
#[derive(Debug, Clone)]
pub struct ScopedRequest {
    context: Ctx<Authorized>,
    query: QueryParams,
    tenant_param: String,
}

impl ScopedRequest {
    /// Returns the authorized context.
    pub fn context(&self) -> &Ctx<Authorized> {
        &self.context
    }

    /// Returns the query parameters handlers must honor.
    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    /// Returns the tenant filter handlers must apply, if any.
    ///
    /// For standard users this is always their own tenant. Admins may pass
    /// the parameter to narrow their listing, or omit it to see everything.
    pub fn client_filter(&self) -> Option<&str> {
        self.query.get(&self.tenant_param)
    }

    /// Splits into context and query.
    pub fn into_parts(self) -> (Ctx<Authorized>, QueryParams) {
        (self.context, self.query)
    }
}

/// The role gate run in front of every protected handler.
///
/// Checks are evaluated in a fixed order and the first match wins:
///
/// 1. no principal: `401 Unauthorized`
/// 2. `standard_user`: tenant injected into the query, continue
/// 3. `admin`: continue with the query untouched
/// 4. anything else: `403 Access denied`
///
/// The gate holds no per-request state, so one instance can serve any
/// number of concurrent requests.
///
/// # Examples
///
/// ```
/// use planor_access::{AccessGate, Decision, Principal, QueryParams, RequestMeta};
///
/// let gate = AccessGate::new();
/// let meta = RequestMeta {
///     request_id: "req-123".to_string(),
///     principal: Some(Principal::standard_user("acme")),
/// };
/// let query: QueryParams = [("clientId", "evil-corp"), ("page", "2")].into_iter().collect();
///
/// let scoped = gate.evaluate(meta, query).into_result().expect("standard user admitted");
/// assert_eq!(scoped.query().get("clientId"), Some("acme"));
/// assert_eq!(scoped.query().get("page"), Some("2"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct AccessGate {
    config: GateConfig,
    audit: Option<Arc<AuditTrail>>,
}

impl AccessGate {
    /// Creates a gate with default configuration and no audit trail.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: GateConfig) -> Self {
        self.config = config;
        self
    }

    /// Records every decision into `trail`.
    pub fn with_audit(mut self, trail: Arc<AuditTrail>) -> Self {
        self.audit = Some(trail);
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Decides whether the request may continue, and with what query.
    ///
    /// Never panics: every principal, including one with an empty or
    /// unrecognized role, resolves to one of the four outcomes. On
    /// rejection the query is dropped untouched.
    pub fn evaluate(&self, meta: RequestMeta, query: QueryParams) -> Decision {
        let request_id = meta.request_id.clone();

        let authed = match Ctx::new_unauthed(meta.request_id).authenticate(meta.principal) {
            Ok(authed) => authed,
            Err(violation) => return self.reject(&request_id, None, violation),
        };

        match authed.role().clone() {
            Role::StandardUser => self.scope_to_tenant(authed, query),
            Role::Admin => self.allow(authed, Access::Unrestricted, query),
            Role::Unknown(raw) => {
                let message = format!("role {:?} is not admitted", raw);
                self.forbid(authed, message)
            }
        }
    }

    fn scope_to_tenant(&self, authed: Ctx<Authed>, mut query: QueryParams) -> Decision {
        let client_id = authed.principal().and_then(|p| p.client_id.clone());

        match client_id {
            Some(client_id) => {
                query.inject_tenant(&self.config.tenant_param, &client_id);
                self.allow(authed, Access::Tenant(client_id), query)
            }
            None => self.forbid(authed, "standard user has no tenant"),
        }
    }

    fn allow(&self, authed: Ctx<Authed>, access: Access, query: QueryParams) -> Decision {
        authed.log().allowed(authed.role(), access.tenant());

        if let Some(trail) = &self.audit {
            let mut event = AuditEvent::new(
                authed.request_id(),
                AuditEventKind::Authorization,
                AuditOutcome::Success,
            )
            .with_principal(authed.principal().and_then(|p| p.id.as_deref()))
            .with_role(authed.role());
            if let Some(tenant) = access.tenant() {
                event = event.with_tenant(tenant);
            }
            trail.record(event);
        }

        Decision::Allow(ScopedRequest {
            context: authed.authorize(access),
            query,
            tenant_param: self.config.tenant_param.clone(),
        })
    }

    fn forbid(&self, authed: Ctx<Authed>, message: impl Into<String>) -> Decision {
        let violation = Violation::new(ViolationKind::Forbidden, message);
        let principal = authed.principal();
        self.reject(
            authed.request_id(),
            principal.map(|p| (p.id.as_deref(), &p.role)),
            violation,
        )
    }

    fn reject(
        &self,
        request_id: &str,
        principal: Option<(Option<&str>, &Role)>,
        violation: Violation,
    ) -> Decision {
        let status = violation.kind.status();
        GateLog::new(request_id).rejected(
            status,
            principal.map(|(_, role)| role),
            &violation.message,
        );

        if let Some(trail) = &self.audit {
            let kind = match violation.kind {
                ViolationKind::Unauthenticated => AuditEventKind::Authentication,
                ViolationKind::Forbidden => AuditEventKind::Authorization,
            };
            let mut event =
                AuditEvent::new(request_id, kind, AuditOutcome::Denied).with_status(status);
            if let Some((id, role)) = principal {
                event = event.with_principal(id).with_role(role);
            }
            trail.record(event);
        }

        Decision::Reject(Rejection::from(violation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Principal;

    fn meta(principal: Option<Principal>) -> RequestMeta {
        RequestMeta {
            request_id: "req-gate".to_string(),
            principal,
        }
    }

    fn query(pairs: &[(&str, &str)]) -> QueryParams {
        pairs.iter().copied().collect()
    }

    #[test]
    fn missing_principal_is_401() {
        let decision = AccessGate::new().evaluate(meta(None), query(&[("clientId", "x")]));
        let rejection = decision.into_result().unwrap_err();

        assert_eq!(rejection.status(), 401);
        assert_eq!(rejection.kind(), ViolationKind::Unauthenticated);
        assert_eq!(
            rejection.body_json(),
            r#"{"success":false,"error":"Unauthorized"}"#
        );
    }

    #[test]
    fn standard_user_is_scoped() {
        let decision = AccessGate::new().evaluate(
            meta(Some(Principal::standard_user("acme"))),
            query(&[("clientId", "evil-corp"), ("page", "2")]),
        );
        let scoped = decision.into_result().unwrap();

        assert_eq!(scoped.query(), &query(&[("clientId", "acme"), ("page", "2")]));
        assert_eq!(scoped.context().access(), &Access::Tenant("acme".to_string()));
        assert_eq!(scoped.client_filter(), Some("acme"));
    }

    #[test]
    fn admin_passes_through_untouched() {
        let original = query(&[("clientId", "anything")]);
        let decision = AccessGate::new().evaluate(meta(Some(Principal::admin())), original.clone());
        let scoped = decision.into_result().unwrap();

        assert_eq!(scoped.query(), &original);
        assert!(scoped.context().is_unrestricted());
    }

    #[test]
    fn unknown_roles_are_403() {
        for role in ["guest", "", "ADMIN", "standard-user", "superadmin"] {
            let decision =
                AccessGate::new().evaluate(meta(Some(Principal::with_role(role))), QueryParams::new());
            let rejection = decision.into_result().unwrap_err();

            assert_eq!(rejection.status(), 403, "role {:?}", role);
            assert_eq!(
                rejection.body_json(),
                r#"{"success":false,"error":"Access denied. Admin privileges required."}"#
            );
        }
    }

    #[test]
    fn standard_user_without_tenant_is_403() {
        let mut principal = Principal::standard_user("acme");
        principal.client_id = None;
        let decision = AccessGate::new().evaluate(meta(Some(principal)), QueryParams::new());
        assert_eq!(decision.into_result().unwrap_err().status(), 403);
    }

    #[test]
    fn empty_tenant_is_injected_like_any_other() {
        let decision = AccessGate::new().evaluate(
            meta(Some(Principal::standard_user(""))),
            query(&[("clientId", "evil-corp")]),
        );
        let scoped = decision.into_result().unwrap();

        assert_eq!(scoped.query().get("clientId"), Some(""));
        assert_eq!(scoped.client_filter(), Some(""));
    }

    #[test]
    fn non_string_role_is_403_not_401() {
        let principal = Principal::from_json(r#"{"role":42,"clientId":"acme"}"#).unwrap();
        let rejection = AccessGate::new()
            .evaluate(meta(Some(principal)), query(&[("clientId", "acme")]))
            .into_result()
            .unwrap_err();

        assert_eq!(rejection.status(), 403);
        assert_eq!(rejection.kind(), ViolationKind::Forbidden);
    }

    #[test]
    fn admin_ignores_client_id_on_principal() {
        let mut principal = Principal::admin();
        principal.client_id = Some("acme".to_string());

        let decision = AccessGate::new().evaluate(meta(Some(principal)), QueryParams::new());
        let scoped = decision.into_result().unwrap();

        assert!(scoped.query().is_empty());
        assert!(scoped.client_filter().is_none());
    }

    #[test]
    fn custom_tenant_param() {
        let gate = AccessGate::new().with_config(GateConfig {
            tenant_param: "tenantId".to_string(),
        });
        let decision = gate.evaluate(
            meta(Some(Principal::standard_user("acme"))),
            query(&[("tenantId", "evil-corp")]),
        );
        let scoped = decision.into_result().unwrap();

        assert_eq!(scoped.query().get("tenantId"), Some("acme"));
        assert!(!scoped.query().contains_key("clientId"));
        assert_eq!(scoped.client_filter(), Some("acme"));
    }

    #[test]
    fn re_evaluation_is_idempotent() {
        let gate = AccessGate::new();
        let principal = Principal::standard_user("acme");

        let first = gate
            .evaluate(meta(Some(principal.clone())), query(&[("clientId", "evil-corp")]))
            .into_result()
            .unwrap();
        let second = gate
            .evaluate(meta(Some(principal)), first.query().clone())
            .into_result()
            .unwrap();

        assert_eq!(first.query(), second.query());
    }

    #[test]
    fn audit_records_each_decision() {
        let trail = Arc::new(AuditTrail::new());
        let gate = AccessGate::new().with_audit(Arc::clone(&trail));

        gate.evaluate(meta(None), QueryParams::new());
        gate.evaluate(
            meta(Some(Principal::standard_user("acme").with_id("u-1"))),
            query(&[("clientId", "evil-corp")]),
        );
        gate.evaluate(meta(Some(Principal::with_role("guest"))), QueryParams::new());

        let events = trail.events();
        assert_eq!(events.len(), 3);

        assert_eq!(events[0].kind(), AuditEventKind::Authentication);
        assert_eq!(events[0].outcome(), AuditOutcome::Denied);
        assert_eq!(events[0].status(), Some(401));

        assert_eq!(events[1].outcome(), AuditOutcome::Success);
        assert_eq!(events[1].principal(), Some("u-1"));
        assert_eq!(events[1].tenant(), Some("acme"));
        assert!(!events[1].to_string().contains("evil-corp"));

        assert_eq!(events[2].kind(), AuditEventKind::Authorization);
        assert_eq!(events[2].role(), Some("guest"));
        assert_eq!(events[2].status(), Some(403));
    }

    #[test]
    fn gate_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AccessGate>();
    }
}
