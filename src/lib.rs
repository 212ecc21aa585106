#![doc(test(attr(deny(warnings))))]

//! Inquiry Core implements the schema-driven booking-inquiry form engine:
//! catalog loading, schema normalization, conditional visibility, a linear
//! step state machine, per-type answer validation, and submission dispatch,
//! plus a reference CLI front-end.

pub mod cli;
pub mod client;
pub mod config;
pub mod engine;
pub mod errors;
pub mod schema;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Inquiry Core tracing initialized.");
    });
}
