use std::fmt;

use serde::Serialize;

/// Response body returned when the gate rejects a request.
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

/// Response body returned when the principal's role is not allowed through.
pub const FORBIDDEN_MESSAGE: &str = "Access denied. Admin privileges required.";

/// Errors that can occur in the access gate crate.
#[derive(Debug)]
pub enum Error {
    /// An access violation occurred
    Violation(Violation),
    /// A principal or configuration document could not be decoded
    Decode(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Violation(v) => write!(f, "Access violation: {}", v),
            Error::Decode(e) => write!(f, "Decode error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Violation(v) => Some(v),
            Error::Decode(e) => Some(e),
        }
    }
}

impl From<Violation> for Error {
    fn from(v: Violation) -> Self {
        Error::Violation(v)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Decode(e)
    }
}

/// An access violation with details about what failed.
///
/// `message` is the internal, log-facing explanation. The client-facing text
/// is fixed per [`ViolationKind`] and produced by [`Rejection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The kind of violation that occurred
    pub kind: ViolationKind,
    /// Human-readable message explaining the violation
    pub message: String,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Violation {}

/// The kind of access violation.
///
/// The taxonomy is closed: a request either has no principal or has a
/// principal whose role is not admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// No principal was attached to the request
    Unauthenticated,
    /// A principal was attached but its role is not admitted
    Forbidden,
}

impl ViolationKind {
    /// HTTP status code surfaced for this kind.
    pub fn status(self) -> u16 {
        match self {
            ViolationKind::Unauthenticated => 401,
            ViolationKind::Forbidden => 403,
        }
    }

    /// Client-facing error text for this kind.
    pub fn public_message(self) -> &'static str {
        match self {
            ViolationKind::Unauthenticated => UNAUTHORIZED_MESSAGE,
            ViolationKind::Forbidden => FORBIDDEN_MESSAGE,
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::Unauthenticated => write!(f, "Unauthenticated"),
            ViolationKind::Forbidden => write!(f, "Forbidden"),
        }
    }
}

/// JSON body of a rejected request: `{"success":false,"error":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// Always `false` for rejections
    pub success: bool,
    /// Fixed client-facing error text
    pub error: String,
}

/// A terminal gate outcome: the pipeline halts and this response is sent.
///
/// # Examples
///
/// ```
/// use planor_access::{Rejection, Violation, ViolationKind};
///
/// let rejection = Rejection::from(Violation::new(
///     ViolationKind::Unauthenticated,
///     "no principal attached",
/// ));
///
/// assert_eq!(rejection.status(), 401);
/// assert_eq!(
///     rejection.body_json(),
///     r#"{"success":false,"error":"Unauthorized"}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    violation: Violation,
}

impl Rejection {
    /// Returns the HTTP status code (401 or 403).
    pub fn status(&self) -> u16 {
        self.violation.kind.status()
    }

    /// Returns the kind of violation behind this rejection.
    pub fn kind(&self) -> ViolationKind {
        self.violation.kind
    }

    /// Returns the underlying violation, including the internal message.
    pub fn violation(&self) -> &Violation {
        &self.violation
    }

    /// Builds the response body.
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            success: false,
            error: self.violation.kind.public_message().to_string(),
        }
    }

    /// Serializes the response body to a JSON string.
    pub fn body_json(&self) -> String {
        // ErrorBody holds a bool and a String; serialization cannot fail.
        serde_json::to_string(&self.body()).unwrap_or_else(|_| {
            format!(
                r#"{{"success":false,"error":"{}"}}"#,
                self.violation.kind.public_message()
            )
        })
    }
}

impl From<Violation> for Rejection {
    fn from(violation: Violation) -> Self {
        Self { violation }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status(), self.violation)
    }
}

impl std::error::Error for Rejection {}
