//! Node detection and adapter tests
//!
//! Runs the real alloy HTTP transport against an in-process stub node.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

pub mod detection_tests;
pub mod helpers;

static INIT: Once = Once::new();

/// Initializes the global logger (only once).
pub fn init_logger() {
    INIT.call_once(|| {
        let filter = EnvFilter::from_default_env()
            .add_directive("ethnode=debug".parse().unwrap())
            .add_directive("actix_web=error".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}
