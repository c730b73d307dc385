//! Failure kinds a handler can raise.
//!
//! A [`Failure`] is a [`FailureKind`] plus where it was raised (captured via
//! `#[track_caller]`) and a backtrace. The location and backtrace only ever
//! reach the wire through the debug block of an envelope.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;
use std::panic::Location;
use std::sync::atomic::{AtomicBool, Ordering};

use indexmap::IndexMap;

/// Field name → error messages, in declaration order.
pub type FieldErrors = IndexMap<String, Vec<String>>;

/// Status used for validation failures unless one is declared explicitly.
pub const VALIDATION_STATUS: u32 = 422;

const VALIDATION_FALLBACK: &str = "The given data was invalid.";

/// Closed set of failure categories.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FailureKind {
    /// Caller's fault; the message is safe to show verbatim.
    #[error("{message}")]
    ClientError { code: u32, message: String },

    /// Internal fault raised deliberately by application code.
    #[error("{message}")]
    ServerError { code: u32, message: String },

    #[error("Validation failed for {} field(s)", .field_errors.len())]
    Validation { status: u32, field_errors: FieldErrors },

    /// A downstream data-access or network failure. The message is raw and
    /// must never be exposed outside debug output.
    #[error("{message}")]
    Transport { message: String },

    /// Anything else, carrying whatever code the raiser attached.
    #[error("{raw_message}")]
    Unclassified {
        raw_code: Option<i64>,
        raw_message: String,
    },
}

static FORCE_BACKTRACES: AtomicBool = AtomicBool::new(false);

/// Capture a backtrace for every failure built from now on, regardless of
/// `RUST_BACKTRACE` / `RUST_LIB_BACKTRACE`. Turned on when debug envelopes are
/// enabled so their `trace` is populated.
pub fn force_backtraces(enabled: bool) {
    FORCE_BACKTRACES.store(enabled, Ordering::Relaxed);
}

/// A raised failure: its kind plus origin and trace.
pub struct Failure {
    kind: FailureKind,
    location: &'static Location<'static>,
    backtrace: Backtrace,
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl Failure {
    #[track_caller]
    pub fn new(kind: FailureKind) -> Self {
        Self {
            kind,
            location: Location::caller(),
            backtrace: if FORCE_BACKTRACES.load(Ordering::Relaxed) {
                Backtrace::force_capture()
            } else {
                Backtrace::capture()
            },
            source: None,
        }
    }

    /// A 4xx failure. Codes outside `400..=499` are clamped to 400.
    #[track_caller]
    pub fn client_error(message: impl Into<String>, code: u32) -> Self {
        let code = if (400..=499).contains(&code) {
            code
        } else {
            tracing::warn!(code, "Client error code outside 4xx, using 400");
            400
        };
        Self::new(FailureKind::ClientError {
            code,
            message: message.into(),
        })
    }

    /// A 5xx failure. Codes outside `500..=599` are clamped to 500.
    #[track_caller]
    pub fn server_error(message: impl Into<String>, code: u32) -> Self {
        let code = if (500..=599).contains(&code) {
            code
        } else {
            tracing::warn!(code, "Server error code outside 5xx, using 500");
            500
        };
        Self::new(FailureKind::ServerError {
            code,
            message: message.into(),
        })
    }

    #[track_caller]
    pub fn unauthorized() -> Self {
        Self::client_error("Unauthorized", 401)
    }

    #[track_caller]
    pub fn forbidden() -> Self {
        Self::client_error("Forbidden", 403)
    }

    #[track_caller]
    pub fn unprocessable_entity() -> Self {
        Self::client_error("Unprocessable Entity", 422)
    }

    /// A 500 with an empty message, so the registry default is used.
    #[track_caller]
    pub fn internal_server_error() -> Self {
        Self::server_error("", 500)
    }

    #[track_caller]
    pub fn validation(field_errors: FieldErrors) -> Self {
        Self::validation_with_status(VALIDATION_STATUS, field_errors)
    }

    #[track_caller]
    pub fn validation_with_status(status: u32, field_errors: FieldErrors) -> Self {
        Self::new(FailureKind::Validation {
            status,
            field_errors,
        })
    }

    /// Shorthand for a validation failure on a single field.
    #[track_caller]
    pub fn field_error(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut field_errors = FieldErrors::new();
        field_errors.insert(field.into(), vec![message.into()]);
        Self::validation(field_errors)
    }

    /// Wrap a downstream failure (database, HTTP client, socket, ...).
    #[track_caller]
    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let mut failure = Self::new(FailureKind::Transport {
            message: err.to_string(),
        });
        failure.source = Some(Box::new(err));
        failure
    }

    #[track_caller]
    pub fn unclassified(raw_code: Option<i64>, raw_message: impl Into<String>) -> Self {
        Self::new(FailureKind::Unclassified {
            raw_code,
            raw_message: raw_message.into(),
        })
    }

    /// Build a failure from a raw `(code, message)` pair, picking the kind by
    /// the code's range.
    #[track_caller]
    pub fn from_code(code: i64, message: impl Into<String>) -> Self {
        match code {
            400..=499 => Self::client_error(message, code as u32),
            500..=599 => Self::server_error(message, code as u32),
            _ => Self::unclassified(Some(code), message),
        }
    }

    pub fn kind(&self) -> &FailureKind {
        &self.kind
    }

    /// The failure's own message, before any classification policy applies.
    pub fn raw_message(&self) -> String {
        match &self.kind {
            FailureKind::Validation { field_errors, .. } => first_field_error(field_errors)
                .unwrap_or(VALIDATION_FALLBACK)
                .to_string(),
            other => other.to_string(),
        }
    }

    pub fn file(&self) -> &'static str {
        self.location.file()
    }

    pub fn line(&self) -> u32 {
        self.location.line()
    }

    /// Backtrace frames, one entry per rendered line. Empty when nothing was
    /// captured: see [`force_backtraces`].
    pub fn trace(&self) -> Vec<String> {
        if self.backtrace.status() != BacktraceStatus::Captured {
            return Vec::new();
        }
        self.backtrace
            .to_string()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect()
    }
}

/// First message of the first field, in declaration order.
pub(crate) fn first_field_error(field_errors: &FieldErrors) -> Option<&str> {
    field_errors
        .values()
        .next()
        .and_then(|messages| messages.first())
        .map(String::as_str)
}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Failure")
            .field("kind", &self.kind)
            .field("file", &self.file())
            .field("line", &self.line())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

impl std::error::Error for Failure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|err| err as &(dyn std::error::Error + 'static))
    }
}

impl From<FailureKind> for Failure {
    #[track_caller]
    fn from(kind: FailureKind) -> Self {
        Self::new(kind)
    }
}
