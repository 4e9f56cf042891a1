//! Role-based access gate for the Planor management portal API.
//!
//! Every protected endpoint runs this gate before its handler. The gate:
//! - rejects requests with no authenticated principal (`401`)
//! - confines `standard_user` principals to their own tenant by overwriting
//!   the `clientId` query parameter
//! - lets `admin` principals through unmodified
//! - rejects every other role (`403`)
//!
//! # Core Types
//!
//! - [`Principal`] / [`Role`]: the authenticated caller, decoded at the boundary
//! - [`AccessGate`]: the decision point, returning a [`Decision`]
//! - [`ScopedRequest`]: an admitted request and the query handlers must honor
//! - [`Rejection`]: a terminal `401`/`403` with its JSON body
//! - [`Ctx`]: type-state context (`Unauthed` → `Authed` → `Authorized`)
//!
//! # Examples
//!
//! ```
//! use planor_access::{AccessGate, Decision, Principal, QueryParams, RequestMeta};
//!
//! let gate = AccessGate::new();
//!
//! let meta = RequestMeta {
//!     request_id: "req-123".to_string(),
//!     principal: Some(Principal::standard_user("acme")),
//! };
//! let query: QueryParams = [("clientId", "evil-corp"), ("page", "2")].into_iter().collect();
//!
//! match gate.evaluate(meta, query) {
//!     Decision::Allow(scoped) => {
//!         assert_eq!(scoped.query().get("clientId"), Some("acme"));
//!     }
//!     Decision::Reject(rejection) => panic!("unexpected {}", rejection),
//! }
//!
//! let anonymous = RequestMeta {
//!     request_id: "req-124".to_string(),
//!     principal: None,
//! };
//! let Decision::Reject(rejection) = gate.evaluate(anonymous, QueryParams::new()) else {
//!     panic!("anonymous requests are rejected");
//! };
//! assert_eq!(rejection.status(), 401);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod audit;
mod config;
mod context;
mod error;
mod gate;
mod logging;
mod request;
mod scope;
mod state;
pub mod web;

pub use config::GateConfig;
pub use context::{Access, Ctx};
pub use error::{
    Error, ErrorBody, Rejection, Violation, ViolationKind, FORBIDDEN_MESSAGE, UNAUTHORIZED_MESSAGE,
};
pub use gate::{AccessGate, Decision, ScopedRequest};
pub use logging::GateLog;
pub use request::{Principal, RequestMeta, Role};
pub use scope::{QueryParams, DEFAULT_TENANT_PARAM};
pub use state::{Authed, Authorized, Stage, Unauthed};
