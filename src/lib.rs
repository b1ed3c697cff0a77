#![doc(test(attr(deny(warnings))))]

//! Kakeibo Core models a household income/expense book: validated records,
//! monthly and daily aggregation, and an application store that keeps the
//! in-memory collection consistent with a pluggable storage backend.

pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Kakeibo Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
