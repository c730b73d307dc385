//! Failure → `(code, message)` classification.

use crate::failure::{Failure, FailureKind};

/// Status used when a failure carries no usable code.
pub const FALLBACK_STATUS: u32 = 500;

/// The outcome of classifying a failure. Recomputed on demand, never stored.
#[derive(Debug)]
pub struct ClassifiedFailure<'a> {
    pub code: u32,
    /// May be empty; the envelope then falls back to the status registry.
    pub message: String,
    pub source: &'a Failure,
}

/// Map a raised failure to the code and message the envelope should carry.
///
/// - Validation failures report their declared status and the first message
///   of the first field.
/// - Transport failures always become a 500 with an empty message, so the
///   envelope shows the registry's 500 text; their own text stays out.
/// - Client and server errors report their explicit code.
/// - Anything else uses its raw code when positive, otherwise 500.
pub fn classify(failure: &Failure) -> ClassifiedFailure<'_> {
    let (code, message) = match failure.kind() {
        FailureKind::Validation { status, .. } => (positive_or_fallback(*status), failure.raw_message()),
        FailureKind::Transport { .. } => (FALLBACK_STATUS, String::new()),
        FailureKind::ClientError { code, message } | FailureKind::ServerError { code, message } => {
            (positive_or_fallback(*code), message.clone())
        }
        FailureKind::Unclassified {
            raw_code,
            raw_message,
        } => {
            let code = raw_code
                .filter(|code| *code > 0)
                .and_then(|code| u32::try_from(code).ok())
                .unwrap_or(FALLBACK_STATUS);
            (code, raw_message.clone())
        }
    };

    ClassifiedFailure {
        code,
        message,
        source: failure,
    }
}

fn positive_or_fallback(code: u32) -> u32 {
    if code == 0 {
        FALLBACK_STATUS
    } else {
        code
    }
}
