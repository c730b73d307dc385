//! Default messages keyed by numeric status code.
//!
//! The registry is consulted only when nothing else supplies a message: the
//! response was built without one, or the failure carried an empty string.
//! Deployments can override any entry (for example to localise messages).

use std::collections::HashMap;

/// Generic message used when a server-side failure must not expose its own text.
pub const GENERIC_SERVER_ERROR: &str = "Internal Server Error";

/// Built-in reason phrase for a status code, if it is a well-known one.
pub fn reason_phrase(code: u32) -> Option<&'static str> {
    let phrase = match code {
        100 => "Continue",
        101 => "Switching Protocols",
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        203 => "Non-Authoritative Information",
        204 => "No Content",
        205 => "Reset Content",
        206 => "Partial Content",
        301 => "Moved Permanently",
        302 => "Found",
        303 => "See Other",
        304 => "Not Modified",
        307 => "Temporary Redirect",
        308 => "Permanent Redirect",
        400 => "Bad Request",
        401 => "Unauthorized",
        402 => "Payment Required",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        406 => "Not Acceptable",
        408 => "Request Timeout",
        409 => "Conflict",
        410 => "Gone",
        411 => "Length Required",
        412 => "Precondition Failed",
        413 => "Payload Too Large",
        414 => "URI Too Long",
        415 => "Unsupported Media Type",
        416 => "Range Not Satisfiable",
        417 => "Expectation Failed",
        418 => "I'm a teapot",
        421 => "Misdirected Request",
        422 => "Unprocessable Entity",
        423 => "Locked",
        424 => "Failed Dependency",
        425 => "Too Early",
        426 => "Upgrade Required",
        428 => "Precondition Required",
        429 => "Too Many Requests",
        431 => "Request Header Fields Too Large",
        451 => "Unavailable For Legal Reasons",
        500 => GENERIC_SERVER_ERROR,
        501 => "Not Implemented",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        505 => "HTTP Version Not Supported",
        507 => "Insufficient Storage",
        508 => "Loop Detected",
        511 => "Network Authentication Required",
        _ => return None,
    };
    Some(phrase)
}

/// Code → default message lookup with per-deployment overrides.
#[derive(Debug, Clone, Default)]
pub struct StatusRegistry {
    overrides: HashMap<u32, String>,
}

impl StatusRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override (or add) the message for `code`. Empty messages are ignored.
    pub fn with_message(mut self, code: u32, message: impl Into<String>) -> Self {
        self.insert(code, message);
        self
    }

    pub fn insert(&mut self, code: u32, message: impl Into<String>) {
        let message = message.into();
        if !message.is_empty() {
            self.overrides.insert(code, message);
        }
    }

    /// Resolve the default message for `code`. Never returns an empty string.
    ///
    /// Order: deployment override, built-in reason phrase, then a generic
    /// phrase for the code's class.
    pub fn message_for(&self, code: u32) -> &str {
        if let Some(message) = self.overrides.get(&code) {
            return message;
        }
        if let Some(phrase) = reason_phrase(code) {
            return phrase;
        }
        match code {
            400..=499 => "Client Error",
            500..=599 => "Server Error",
            _ => "Unknown Status",
        }
    }
}
