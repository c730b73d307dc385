//! Response envelopes and failure classification.
//!
//! Handlers hand back an [`ApiResponse`] (usually built through
//! [`ResponseFactory`]) or raise a [`Failure`]. Either way the result is
//! rendered into the same `{code, message, data?, meta?}` JSON shape by
//! [`ApiResponse::prepare`], driven by an explicit [`EnvelopeConfig`].

pub mod casing;
pub mod classify;
pub mod config;
pub mod error;
pub mod factory;
pub mod failure;
pub mod pagination;
pub mod response;
pub mod status;

pub use classify::{classify, ClassifiedFailure};
pub use config::EnvelopeConfig;
pub use error::EnvelopeError;
pub use factory::ResponseFactory;
pub use failure::{force_backtraces, Failure, FailureKind, FieldErrors};
pub use pagination::{Page, PaginationMeta};
pub use response::{ApiResponse, Content};
pub use status::StatusRegistry;
