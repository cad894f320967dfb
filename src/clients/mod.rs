//! Clients: typed access to the page's elements and to the order endpoint.

pub mod actor_client;
pub mod document_client;
pub mod mock_transport;
pub mod order_client;

pub use actor_client::*;
pub use document_client::*;
pub use mock_transport::*;
pub use order_client::*;
