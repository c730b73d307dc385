use crate::error::EnvelopeError;
use crate::status::StatusRegistry;

/// Longest service prefix accepted; keeps every full code inside `i64`.
const MAX_PREFIX_DIGITS: usize = 8;

/// Read-only settings consulted while preparing an envelope.
#[derive(Debug, Clone, Default)]
pub struct EnvelopeConfig {
    /// Attach a `debug` block to failure envelopes.
    pub debug: bool,
    service_prefix: String,
    pub registry: StatusRegistry,
}

impl EnvelopeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set the digits prepended to every code (`"10"` + `404` → `10404`).
    pub fn with_service_prefix(mut self, prefix: impl Into<String>) -> Result<Self, EnvelopeError> {
        let prefix = prefix.into();
        if prefix.len() > MAX_PREFIX_DIGITS || !prefix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(EnvelopeError::InvalidServicePrefix(prefix));
        }
        self.service_prefix = prefix;
        Ok(self)
    }

    pub fn with_registry(mut self, registry: StatusRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn service_prefix(&self) -> &str {
        &self.service_prefix
    }

    /// The service-prefixed code written to the wire.
    pub fn full_code(&self, code: u32) -> i64 {
        // Prefix is at most eight digits and `code` at most ten, so this fits.
        let mut full: i64 = 0;
        for digit in self
            .service_prefix
            .bytes()
            .chain(code.to_string().into_bytes())
        {
            full = full * 10 + i64::from(digit - b'0');
        }
        full
    }
}
