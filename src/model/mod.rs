//! Plain data: page elements, the lookup wire types and the typed order payload.

pub mod customer_order;
pub mod element;
pub mod order;

pub use customer_order::*;
pub use element::*;
pub use order::*;
