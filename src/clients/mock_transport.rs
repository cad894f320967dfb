//! # Mock Transport
//!
//! An [`OrderTransport`] that answers from scripted expectations instead of
//! the network. Expectations are queued per order identifier, so concurrent
//! lookups for different orders never steal each other's answers. Every
//! request is recorded for later assertions.

use crate::clients::OrderTransport;
use crate::model::OrderLookupRequest;
use crate::widget::LookupError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

struct Expectation {
    delay: Option<Duration>,
    response: Result<Value, LookupError>,
}

#[derive(Default)]
struct State {
    expectations: HashMap<String, VecDeque<Expectation>>,
    requests: Vec<OrderLookupRequest>,
}

/// A scripted stand-in for the order endpoint.
///
/// # Example
/// ```ignore
/// let transport = MockTransport::new();
/// transport.expect_lookup("abc123").return_ok(json!({"CustomerOrder": {"age": 30}}));
///
/// // hand `transport.clone()` to the widget, submit...
/// transport.verify();
/// assert_eq!(transport.requests().len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<State>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_lookup(&self, order_uid: impl Into<String>) -> LookupExpectationBuilder {
        LookupExpectationBuilder {
            order_uid: order_uid.into(),
            delay: None,
            state: self.state.clone(),
        }
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<OrderLookupRequest> {
        self.lock().requests.clone()
    }

    /// Panics if any expectation was never consumed.
    pub fn verify(&self) {
        let remaining: usize = self.lock().expectations.values().map(VecDeque::len).sum();
        if remaining > 0 {
            panic!("Not all lookups were made. {} remaining", remaining);
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl OrderTransport for MockTransport {
    async fn lookup(&self, request: &OrderLookupRequest) -> Result<Value, LookupError> {
        let expectation = {
            let mut state = self.lock();
            state.requests.push(request.clone());
            state
                .expectations
                .get_mut(&request.order_uid)
                .and_then(VecDeque::pop_front)
        };

        let Some(expectation) = expectation else {
            panic!("Unexpected lookup for order {:?}", request.order_uid);
        };
        if let Some(delay) = expectation.delay {
            tokio::time::sleep(delay).await;
        }
        expectation.response
    }
}

/// Finishes a lookup expectation.
pub struct LookupExpectationBuilder {
    order_uid: String,
    delay: Option<Duration>,
    state: Arc<Mutex<State>>,
}

impl LookupExpectationBuilder {
    /// Holds the response back for `delay`.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn return_ok(self, body: Value) {
        self.push(Ok(body));
    }

    pub fn return_err(self, error: LookupError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Value, LookupError>) {
        let mut state = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        state
            .expectations
            .entry(self.order_uid)
            .or_default()
            .push_back(Expectation {
                delay: self.delay,
                response,
            });
    }
}
