//! The page as an actor: elements stored by identifier, mutated one request at a time.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::DocumentClient;
use crate::framework::ResourceActor;
use crate::model::Element;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Default identifier of the lookup form.
pub const FORM_ID: &str = "ord_uid_form";
/// Default name of the order identifier field inside the form.
pub const ORDER_FIELD: &str = "ordField";
/// Default identifier of the container that receives rendered orders.
pub const DISPLAY_ID: &str = "ord_data";

/// Creates a new document actor and its client.
///
/// Elements created without an identifier are named `element_1`, `element_2`, ...
pub fn new(buffer_size: usize) -> (ResourceActor<Element>, DocumentClient) {
    let element_counter = Arc::new(AtomicU64::new(1));
    let next_element_id = move || {
        let id = element_counter.fetch_add(1, Ordering::SeqCst);
        format!("element_{}", id)
    };

    let (actor, generic_client) = ResourceActor::new(buffer_size, next_element_id);
    let client = DocumentClient::new(generic_client);

    (actor, client)
}
