//! # Mock Framework
//!
//! A [`MockClient`] hands out a real [`ResourceClient`] whose requests are
//! answered from a queue of scripted expectations. Each expectation names the
//! operation and id it expects; a mismatch panics inside the mock task, which
//! surfaces in the test as [`FrameworkError::ActorDropped`].

use crate::framework::{ActorEntity, FrameworkError, ResourceClient, ResourceRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn push<T: ActorEntity>(queue: &Queue<T>, expectation: Expectation<T>) {
    queue
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .push_back(expectation);
}

fn operation<T: ActorEntity>(request: &ResourceRequest<T>) -> &'static str {
    match request {
        ResourceRequest::Create { .. } => "create",
        ResourceRequest::Get { .. } => "get",
        ResourceRequest::Update { .. } => "update",
        ResourceRequest::Delete { .. } => "delete",
        ResourceRequest::Action { .. } => "action",
    }
}

/// A mock resource actor driven by expectations.
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<Element>::new();
/// mock.expect_get("ord_uid_form".to_string()).return_ok(None);
///
/// let document = DocumentClient::new(mock.client());
/// // exercise code that uses the document...
/// mock.verify();
/// ```
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .pop_front();

                match (request, expectation) {
                    (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: expected, response })) => {
                        assert_eq!(id, expected, "get called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Update { id, respond_to, .. }, Some(Expectation::Update { id: expected, response })) => {
                        assert_eq!(id, expected, "update called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Delete { id, respond_to }, Some(Expectation::Delete { id: expected, response })) => {
                        assert_eq!(id, expected, "delete called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Action { id, respond_to, .. }, Some(Expectation::Action { id: expected, response })) => {
                        assert_eq!(id, expected, "action called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        panic!("Unexpected {} request or expectation mismatch", operation(&request));
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Get { id, response })
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(|response| Expectation::Create { response })
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Update { id, response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |response| Expectation::Delete { id, response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |response| Expectation::Action { id, response })
    }

    /// Panics if any expectation is still queued.
    pub fn verify(&self) {
        let remaining = self
            .expectations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }

    fn builder<R>(
        &self,
        make: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            make: Box::new(make),
            expectations: self.expectations.clone(),
        }
    }
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Finishes an expectation by choosing its response.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    make: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
    expectations: Queue<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    pub fn return_ok(self, value: R) {
        push(&self.expectations, (self.make)(Ok(value)));
    }

    pub fn return_err(self, error: FrameworkError) {
        push(&self.expectations, (self.make)(Err(error)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Element, ElementAction, ElementActionResult, ElementCreate, ElementKind, ElementUpdate};

    #[tokio::test]
    async fn test_mock_answers_in_order() {
        let mut mock = MockClient::<Element>::new();
        mock.expect_create().return_ok("ord_data".to_string());
        mock.expect_update("ord_uid_form".to_string())
            .return_err(FrameworkError::Custom("form ord_uid_form has no field other".to_string()));
        mock.expect_get("ord_data".to_string())
            .return_ok(Some(Element::new("ord_data", ElementKind::container())));
        mock.expect_action("ord_data".to_string())
            .return_ok(ElementActionResult::AppendHtml(12));
        mock.expect_delete("ord_data".to_string())
            .return_err(FrameworkError::NotFound("ord_data".to_string()));

        let client = mock.client();
        let created = client
            .create(ElementCreate { id: Some("ord_data".to_string()), kind: ElementKind::container() })
            .await;
        assert_eq!(created, Ok("ord_data".to_string()));

        let update = ElementUpdate::SetField { name: "other".into(), value: "x".into() };
        let updated = client.update("ord_uid_form".to_string(), update).await;
        assert!(matches!(updated, Err(FrameworkError::Custom(_))));

        let element = client.get("ord_data".to_string()).await.unwrap();
        assert!(element.is_some());

        let appended = client
            .perform_action("ord_data".to_string(), ElementAction::AppendHtml("<br>".into()))
            .await
            .unwrap();
        assert!(matches!(appended, ElementActionResult::AppendHtml(12)));

        let deleted = client.delete("ord_data".to_string()).await;
        assert_eq!(deleted, Err(FrameworkError::NotFound("ord_data".to_string())));

        mock.verify();
    }

    #[tokio::test]
    async fn test_mismatch_drops_the_response() {
        let mut mock = MockClient::<Element>::new();
        mock.expect_get("ord_uid_form".to_string()).return_ok(None);

        let result = mock.client().delete("ord_uid_form".to_string()).await;
        assert_eq!(result, Err(FrameworkError::ActorDropped));
    }
}
