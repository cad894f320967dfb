//! # Logging
//!
//! Structured logs through `tracing`, filtered by `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info order-lookup abc123
//! RUST_LOG=debug order-lookup abc123   # element requests and request bodies
//! ```
//!
//! Each submission runs inside a `submission` span carrying its sequence
//! number and order identifier, so overlapping lookups stay distinguishable:
//!
//! ```text
//! INFO Widget attached form="ord_uid_form" display="ord_data"
//! INFO submission: Order rendered submission=1 order_uid=abc123 lines=3
//! WARN submission: Lookup failed submission=2 order_uid=gone error=Error on response: 500 Internal Server Error
//! ```
//!
//! Logs go to stderr so the rendered markup on stdout stays clean.

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
