use std::collections::HashMap;
use std::sync::OnceLock;

use envelope_core::{force_backtraces, EnvelopeConfig, StatusRegistry};

/// Envelope settings shared by every response in the process. Installed once
/// at startup and read-only afterwards.
static ENVELOPE_CONFIG: OnceLock<EnvelopeConfig> = OnceLock::new();

/// Install the process-wide envelope configuration.
///
/// Returns `false` if a configuration was already installed; the first one
/// stays in effect. Installing a debug configuration also turns on backtrace
/// capture for every failure raised afterwards.
pub fn install_envelope_config(config: EnvelopeConfig) -> bool {
    let debug = config.debug;
    let installed = ENVELOPE_CONFIG.set(config).is_ok();
    if installed && debug {
        force_backtraces(true);
    }
    installed
}

/// The installed envelope configuration, or the defaults (debug off, no
/// service prefix, built-in messages) if none was installed.
pub fn envelope_config() -> &'static EnvelopeConfig {
    ENVELOPE_CONFIG.get_or_init(EnvelopeConfig::default)
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Envelope rendering settings (debug flag, service prefix, messages).
    pub envelope: EnvelopeConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default   |
    /// |------------------------|-----------|
    /// | `HOST`                 | `0.0.0.0` |
    /// | `PORT`                 | `3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`      |
    /// | `APP_DEBUG`            | `false`   |
    /// | `APP_SERVICE_CODE`     | (empty)   |
    /// | `STATUS_MESSAGES_PATH` | (unset)   |
    ///
    /// With `APP_DEBUG` on, failure envelopes carry a `debug` block whose
    /// `trace` is captured unconditionally once the configuration is passed
    /// to [`install_envelope_config`]; `RUST_BACKTRACE` is not needed.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let debug = std::env::var("APP_DEBUG")
            .map(|value| parse_flag(&value))
            .unwrap_or(false);

        let service_code = std::env::var("APP_SERVICE_CODE").unwrap_or_default();

        let registry = match std::env::var("STATUS_MESSAGES_PATH") {
            Ok(path) => {
                let text = std::fs::read_to_string(&path)
                    .unwrap_or_else(|e| panic!("Cannot read STATUS_MESSAGES_PATH '{path}': {e}"));
                parse_status_messages(&text)
                    .unwrap_or_else(|e| panic!("Invalid status messages in '{path}': {e}"))
            }
            Err(_) => StatusRegistry::new(),
        };

        let envelope = EnvelopeConfig::new()
            .with_debug(debug)
            .with_registry(registry)
            .with_service_prefix(service_code.trim())
            .expect("APP_SERVICE_CODE must be at most 8 digits");

        Self {
            host,
            port,
            request_timeout_secs,
            envelope,
        }
    }
}

/// Interpret an env flag the way dotenv files usually spell booleans.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Parse a JSON object of `"code": "message"` overrides.
///
/// Keys that are not numeric codes are skipped with a warning.
pub fn parse_status_messages(text: &str) -> Result<StatusRegistry, serde_json::Error> {
    let raw: HashMap<String, String> = serde_json::from_str(text)?;

    let mut registry = StatusRegistry::new();
    for (key, message) in raw {
        match key.trim().parse::<u32>() {
            Ok(code) => registry.insert(code, message),
            Err(_) => tracing::warn!(key = %key, "Ignoring non-numeric status message key"),
        }
    }
    Ok(registry)
}
