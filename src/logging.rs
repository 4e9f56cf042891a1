use std::fmt;

use crate::request::Role;

/// Logger bound to a single request.
///
/// Every event carries a `request_id` field so gate decisions can be
/// correlated with the handler logs that follow them.
#[derive(Debug, Clone, Copy)]
pub struct GateLog<'a> {
    request_id: &'a str,
}

impl<'a> GateLog<'a> {
    pub(crate) fn new(request_id: &'a str) -> Self {
        Self { request_id }
    }

    /// Returns the request ID associated with this logger.
    pub fn request_id(&self) -> &str {
        self.request_id
    }

    /// Logs an info-level message with request ID.
    pub fn info(&self, args: fmt::Arguments<'_>) {
        tracing::info!(request_id = %self.request_id, "{}", args);
    }

    /// Logs a warning-level message with request ID.
    pub fn warn(&self, args: fmt::Arguments<'_>) {
        tracing::warn!(request_id = %self.request_id, "{}", args);
    }

    /// Logs a debug-level message with request ID.
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        tracing::debug!(request_id = %self.request_id, "{}", args);
    }

    pub(crate) fn allowed(&self, role: &Role, tenant: Option<&str>) {
        tracing::debug!(
            request_id = %self.request_id,
            role = %role,
            tenant = tenant.unwrap_or("*"),
            "access granted"
        );
    }

    pub(crate) fn rejected(&self, status: u16, role: Option<&Role>, reason: &str) {
        match role {
            Some(role) => tracing::warn!(
                request_id = %self.request_id,
                status,
                role = %role,
                reason,
                "access rejected"
            ),
            None => tracing::warn!(
                request_id = %self.request_id,
                status,
                reason,
                "access rejected"
            ),
        }
    }
}
