//! Web framework integration surface.
//!
//! This module is the boundary between an HTTP framework and the access
//! gate. It handles:
//! - Reading the principal an upstream authentication step attached
//! - Collecting query and path parameters
//! - Running the gate before a handler and turning rejections into responses
//!
//! # Design Principles
//!
//! 1. **No Framework Dependencies**: nothing here names a specific HTTP
//!    framework. Integrations build a [`RequestAdapter`] from their native
//!    request type, or implement the extraction traits directly.
//!
//! 2. **No Authentication**: token verification happens upstream. This layer
//!    only reads its result.
//!
//! 3. **Explicit Context**: the gate returns a [`ScopedRequest`](crate::ScopedRequest)
//!    instead of mutating a shared request object, and handlers take that
//!    type, so an unscoped request cannot reach them.
//!
//! # Example Flow
//!
//! ```
//! use planor_access::AccessGate;
//! use planor_access::web::{handlers::RecordStore, run_protected, RequestAdapter};
//!
//! let gate = AccessGate::new();
//! let store = RecordStore::sample();
//!
//! let mut adapter = RequestAdapter::new("req-1".to_string());
//! adapter
//!     .set_principal_json(r#"{"role":"standard_user","clientId":"acme"}"#)
//!     .expect("valid principal");
//! adapter.add_query_param("clientId".to_string(), "globex".to_string());
//!
//! let response = run_protected(&gate, &adapter, |scoped| store.list_properties(scoped));
//! assert_eq!(response.status, 200);
//! ```

mod adapter;
mod extract;
pub mod handlers;
mod middleware;

pub use adapter::RequestAdapter;
pub use extract::{ExtractMetadata, ExtractPrincipal, ExtractQuery};
pub use middleware::{access_controller, run_protected, HttpResponse};
