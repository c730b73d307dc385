//! Failure envelopes rendered with debug mode installed process-wide.

mod common;

use envelope_api::config::install_envelope_config;
use envelope_core::EnvelopeConfig;

use common::{build_test_app, get};

fn install() {
    install_envelope_config(EnvelopeConfig::new().with_debug(true));
}

#[tokio::test]
async fn debug_trace_is_populated_without_rust_backtrace() {
    install();

    let (_, json) = get(build_test_app(), "/api/v1/status/404").await;

    assert_eq!(json["code"], 404);
    assert_eq!(json["message"], "Not Found");
    let trace = json["debug"]["trace"].as_array().unwrap();
    assert!(!trace.is_empty());
}

#[tokio::test]
async fn successful_envelopes_stay_free_of_debug() {
    install();

    let (_, json) = get(build_test_app(), "/health").await;

    assert!(json.get("debug").is_none());
}
