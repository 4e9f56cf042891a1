//! Type-state markers for context progression.
//!
//! Each state carries exactly the data that is known once a request has
//! reached it, so accessors on later states never have to handle absence.

use crate::context::Access;
use crate::request::Principal;

mod sealed {
    pub trait Sealed {}
}

/// A stage of the gate a [`Ctx`](crate::Ctx) can be in.
///
/// Sealed: the three stages below are the only implementors.
pub trait Stage: sealed::Sealed {
    /// Returns the principal known at this stage, if any.
    fn principal(&self) -> Option<&Principal>;
}

/// Marker type for a context with no principal.
#[derive(Debug, Clone, Copy)]
pub struct Unauthed {
    _private: (),
}

impl Unauthed {
    pub(crate) fn new() -> Self {
        Self { _private: () }
    }
}

/// State of a context whose principal is present but whose role has not
/// been checked yet.
#[derive(Debug, Clone)]
pub struct Authed {
    pub(crate) principal: Principal,
}

/// State of a context that passed the role gate.
///
/// Cannot be built outside this crate, so a `Ctx<Authorized>` always comes
/// from the gate:
///
/// ```compile_fail
/// use planor_access::{Access, Authorized, Principal};
///
/// let forged = Authorized {
///     principal: Principal::admin(),
///     access: Access::Unrestricted,
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Authorized {
    pub(crate) principal: Principal,
    pub(crate) access: Access,
}

impl sealed::Sealed for Unauthed {}
impl sealed::Sealed for Authed {}
impl sealed::Sealed for Authorized {}

impl Stage for Unauthed {
    fn principal(&self) -> Option<&Principal> {
        None
    }
}

impl Stage for Authed {
    fn principal(&self) -> Option<&Principal> {
        Some(&self.principal)
    }
}

impl Stage for Authorized {
    fn principal(&self) -> Option<&Principal> {
        Some(&self.principal)
    }
}
