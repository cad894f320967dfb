//! Generic actor framework for resource management.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that resource types implement to be managed by actors
//! - [`ResourceActor`] - Generic actor that owns the entities
//! - [`ResourceClient`] - Typed handle for sending requests to the actor
//! - [`FrameworkError`] - Errors raised by the plumbing
//!
//! # Testing
//!
//! See [`mock`] for a [`MockClient`](mock::MockClient) that answers requests from
//! scripted expectations instead of a running actor.

pub mod core;
pub mod mock;

pub use core::*;
