//! Audit trail of gate decisions.
//!
//! This module provides:
//! - `AuditEvent`: structured record of one gate decision
//! - `AuditTrail`: thread-safe in-memory recorder
//!
//! Events only hold identifiers chosen by the server (request id, principal
//! id, role, the principal's own tenant). Caller-supplied query values are
//! never recorded.

mod event;
mod trail;

pub use event::{AuditEvent, AuditEventKind, AuditOutcome};
pub use trail::AuditTrail;
