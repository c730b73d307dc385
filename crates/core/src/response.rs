//! The response object and the pipeline that turns it into a JSON envelope.
//!
//! An [`ApiResponse`] is configured fluently, then [`ApiResponse::prepare`]
//! renders it exactly once:
//!
//! 1. resolve the content (already-serialized text is parsed back);
//! 2. lift pagination out of paginated content into `meta.pagination`;
//! 3. assemble `{code, message, data?, meta?}`, attached meta overriding
//!    pagination meta on key collision;
//! 4. drop empty `meta`;
//! 5. optionally reshape into the standard `{code, message, data: {...}}` form;
//! 6. optionally camelCase every key;
//! 7. attach a `debug` block for failures when debug mode is on;
//! 8. serialize and cache the body.
//!
//! Every later call to `prepare` returns the cached body.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::casing::map_keys_to_camel;
use crate::classify::classify;
use crate::config::EnvelopeConfig;
use crate::error::EnvelopeError;
use crate::failure::Failure;
use crate::pagination::{Page, PaginationMeta};
use crate::status::StatusRegistry;

/// Code used when none (or zero) was set.
pub const DEFAULT_CODE: u32 = 200;

/// What a handler hands back, before enveloping.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Content {
    #[default]
    Null,
    Value(Value),
    /// Text that may already be serialized JSON.
    Raw(String),
    Paginated {
        items: Value,
        pagination: PaginationMeta,
    },
    /// A value whose serialization failed; preparing it is an error.
    Unencodable(String),
}

impl Content {
    /// Serialize any value into content. Serialization failures are kept and
    /// reported when the response is prepared.
    pub fn of<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => Self::Value(value),
            Err(err) => Self::Unencodable(err.to_string()),
        }
    }

    pub fn raw(text: impl Into<String>) -> Self {
        Self::Raw(text.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null | Self::Value(Value::Null))
    }
}

impl From<Value> for Content {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl<T: Serialize> From<Page<T>> for Content {
    fn from(page: Page<T>) -> Self {
        match serde_json::to_value(&page.items) {
            Ok(items) => Self::Paginated {
                items,
                pagination: page.pagination,
            },
            Err(err) => Self::Unencodable(err.to_string()),
        }
    }
}

/// Per-request response state.
#[derive(Debug, Default)]
pub struct ApiResponse {
    code: u32,
    message: Option<String>,
    keys_to_camel: bool,
    format_std: bool,
    with_list: bool,
    meta: Map<String, Value>,
    content: Content,
    failure: Option<Failure>,
    prepared: Option<String>,
}

impl ApiResponse {
    pub fn new(content: impl Into<Content>, code: u32) -> Self {
        Self {
            code,
            content: content.into(),
            ..Self::default()
        }
    }

    /// A content-less response carrying the classified code and message of
    /// `failure`, which stays attached for debug output.
    pub fn from_failure(failure: Failure) -> Self {
        let classified = classify(&failure);
        let (code, message) = (classified.code, classified.message);
        Self::new(Content::Null, code)
            .with_message(message)
            .with_failure(failure)
    }

    pub fn with_code(mut self, code: u32) -> Self {
        self.code = code;
        self
    }

    /// An empty message means "use the registry default".
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn add_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Merge several meta pairs; later pairs overwrite earlier ones.
    pub fn extend_meta(mut self, meta: Map<String, Value>) -> Self {
        self.meta.extend(meta);
        self
    }

    /// Replace all attached meta.
    pub fn set_meta(mut self, meta: Map<String, Value>) -> Self {
        self.meta = meta;
        self
    }

    pub fn enable_keys_to_camel(mut self, enable: bool) -> Self {
        self.keys_to_camel = enable;
        self
    }

    /// Standard format. Implies camelCase keys.
    pub fn std(mut self) -> Self {
        self.keys_to_camel = true;
        self.format_std = true;
        self
    }

    pub fn with_list(mut self) -> Self {
        self.with_list = true;
        self
    }

    pub fn with_failure(mut self, failure: Failure) -> Self {
        self.failure = Some(failure);
        self
    }

    /// The envelope code before the service prefix is applied.
    pub fn code(&self) -> u32 {
        if self.code == 0 {
            DEFAULT_CODE
        } else {
            self.code
        }
    }

    /// The message that will be written, falling back to the registry.
    pub fn resolved_message<'a>(&'a self, registry: &'a StatusRegistry) -> &'a str {
        match self.message.as_deref() {
            Some(message) if !message.is_empty() => message,
            _ => registry.message_for(self.code()),
        }
    }

    pub fn meta(&self) -> &Map<String, Value> {
        &self.meta
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn failure(&self) -> Option<&Failure> {
        self.failure.as_ref()
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared.is_some()
    }

    /// Render the envelope once and cache it. Repeated calls return the
    /// cached body untouched, whatever the state has become since.
    pub fn prepare(&mut self, config: &EnvelopeConfig) -> Result<&str, EnvelopeError> {
        let body = match self.prepared.take() {
            Some(body) => body,
            None => {
                let envelope = self.build(config)?;
                let body = serde_json::to_string(&envelope)
                    .map_err(|err| EnvelopeError::ContentEncoding(err.to_string()))?;
                tracing::debug!(
                    code = self.code(),
                    failure = self.failure.is_some(),
                    "Prepared response envelope"
                );
                body
            }
        };
        Ok(self.prepared.insert(body).as_str())
    }

    /// Prepare and hand back the body.
    pub fn into_body(mut self, config: &EnvelopeConfig) -> Result<String, EnvelopeError> {
        self.prepare(config)?;
        Ok(self.prepared.unwrap_or_default())
    }

    /// Assemble the envelope value without caching it.
    pub fn build(&self, config: &EnvelopeConfig) -> Result<Value, EnvelopeError> {
        let (data, pagination) = self.resolve_content()?;

        let mut envelope = Map::new();
        envelope.insert("code".into(), config.full_code(self.code()).into());
        envelope.insert(
            "message".into(),
            self.resolved_message(&config.registry).into(),
        );
        if let Some(data) = data {
            envelope.insert("data".into(), data);
        }

        let mut meta = Map::new();
        if let Some(pagination) = pagination {
            let pagination = serde_json::to_value(pagination)
                .map_err(|err| EnvelopeError::ContentEncoding(err.to_string()))?;
            meta.insert("pagination".into(), pagination);
        }
        for (key, value) in &self.meta {
            meta.insert(key.clone(), value.clone());
        }
        if !meta.is_empty() {
            envelope.insert("meta".into(), Value::Object(meta));
        }

        if self.format_std {
            envelope = reshape_standard(envelope, self.with_list);
        }

        if self.keys_to_camel {
            envelope = map_keys_to_camel(envelope);
        }

        if config.debug {
            if let Some(failure) = &self.failure {
                envelope.insert("debug".into(), debug_block(failure));
            }
        }

        Ok(Value::Object(envelope))
    }

    /// Returns `(data, pagination)`; `data` is `None` when the attached
    /// content was null.
    fn resolve_content(&self) -> Result<(Option<Value>, Option<&PaginationMeta>), EnvelopeError> {
        let resolved = match &self.content {
            Content::Null => (None, None),
            Content::Value(Value::Null) => (None, None),
            Content::Value(value) => (Some(value.clone()), None),
            Content::Raw(text) => {
                let value = serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.clone()));
                (Some(value), None)
            }
            Content::Paginated { items, pagination } => (Some(items.clone()), Some(pagination)),
            Content::Unencodable(reason) => {
                return Err(EnvelopeError::ContentEncoding(reason.clone()));
            }
        };
        Ok(resolved)
    }
}

/// Reshape `{code, message, data?, meta?}` into the standard
/// `{code, message, data: {page?, meta?, list?}}` form.
///
/// With `with_list` the data goes under `data.list` (`[]` when absent) beside
/// `page` and `meta`. Without it, present data replaces the whole `data`
/// object; absent data leaves the `page`/`meta` bucket in place, or `null`
/// when that bucket is empty.
pub fn reshape_standard(mut envelope: Map<String, Value>, with_list: bool) -> Map<String, Value> {
    let mut results = Map::new();
    results.insert(
        "code".into(),
        envelope.remove("code").unwrap_or(Value::Null),
    );
    results.insert(
        "message".into(),
        envelope.remove("message").unwrap_or(Value::Null),
    );

    let mut bucket = Map::new();
    if let Some(Value::Object(meta)) = envelope.remove("meta") {
        let mut rest = Map::new();
        for (key, value) in meta {
            if key == "pagination" {
                bucket.insert("page".into(), value);
            } else {
                rest.insert(key, value);
            }
        }
        if !rest.is_empty() {
            bucket.insert("meta".into(), Value::Object(rest));
        }
    }

    let data = envelope.remove("data").filter(|data| !data.is_null());
    let data = if with_list {
        bucket.insert("list".into(), data.unwrap_or_else(|| Value::Array(Vec::new())));
        Value::Object(bucket)
    } else {
        match data {
            Some(data) => data,
            None if bucket.is_empty() => Value::Null,
            None => Value::Object(bucket),
        }
    };
    results.insert("data".into(), data);

    results
}

fn debug_block(failure: &Failure) -> Value {
    serde_json::json!({
        "message": failure.raw_message(),
        "file": failure.file(),
        "line": failure.line(),
        "trace": failure.trace(),
    })
}
