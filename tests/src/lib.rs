//! # Arbor Test Suite
//!
//! Unified test crate for flows that cross subsystem boundaries:
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── wsv_flows.rs        # durable WSV command/query flows
//!     └── simulator_flows.rs  # ordering → simulator → block pipeline
//! ```
//!
//! Single-subsystem behavior is tested inside each crate; everything here
//! wires real adapters together (SQLite world state, flat-file block
//! storage, Ed25519 signing).
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p arbor-tests
//! cargo test -p arbor-tests integration::
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;

/// Install a tracing subscriber honoring `RUST_LOG`, once per process.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
