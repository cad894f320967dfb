//! Starting, wiring and stopping the lookup page.
//!
//! - [`LookupPage`] builds the document, locates the widget's elements and
//!   runs the widget's event loop.
//! - [`setup_tracing`] initializes logging for the binary.

pub mod lookup_page;
pub mod tracing;

pub use lookup_page::*;
pub use tracing::*;
