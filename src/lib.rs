//! # Order Lookup
//!
//! A lookup form for customer orders: the user submits an order identifier,
//! the widget posts `{"order_uid": ...}` to the order service and appends the
//! returned `CustomerOrder` to a display as indented `key: value` lines.
//!
//! ## Module Tour
//!
//! - [`framework`]: the generic [`ResourceActor`](framework::ResourceActor) that
//!   owns state and processes requests one at a time, plus
//!   [`MockClient`](framework::mock::MockClient) for tests.
//! - [`document`]: the page as an actor of [`Element`](model::Element)s. Every
//!   append goes through it, so each rendered block lands whole.
//! - [`clients`]: [`DocumentClient`](clients::DocumentClient) for elements and
//!   the [`OrderTransport`](clients::OrderTransport) seam with its HTTP and
//!   mock implementations.
//! - [`widget`]: the [`OrderLookupWidget`](widget::OrderLookupWidget), its
//!   event loop and the order renderer.
//! - [`lifecycle`]: [`LookupPage`](lifecycle::LookupPage) wires everything
//!   together; [`setup_tracing`](lifecycle::setup_tracing) sets up logs.
//! - [`config`]: defaults, an optional file and `ORDER_LOOKUP_*` overrides.
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info cargo run -- b563feb7b2b84b6test
//! echo b563feb7b2b84b6test | ORDER_LOOKUP_ENDPOINT=http://orders:8000/orders cargo run
//! ```

pub mod clients;
pub mod config;
pub mod document;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod widget;
