//! The order lookup widget: form submit → one POST → rendered order appended to the display.
//!
//! ```text
//! WidgetHandle::submit ──► WidgetListener (reads the field) ──► task: fetch_order ─► render_order
//!                                                                        │
//!                                      Result<RenderSummary, WidgetError> ◄┘
//! ```
//!
//! The listener reads the form field at event time and spawns one task per
//! submission, so lookups overlap freely and each rendered block lands in the
//! display in the order responses arrive. Failures are returned to the
//! submitter; nothing is appended for them.

pub mod error;
pub mod handles;
pub mod render;

pub use error::*;
pub use handles::*;
pub use render::{RenderedLine, MAX_NESTING_DEPTH};

use crate::clients::{DocumentClient, OrderTransport};
use crate::config::LookupConfig;
use crate::model::{OrderDocument, OrderLookupRequest};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;
use tracing::{debug, error, info, info_span, warn, Instrument};

/// Outcome of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSummary {
    pub order_uid: String,
    /// Lines appended to the display; zero when the response held no order.
    pub lines: usize,
}

/// A submission whose lookup is in flight.
#[derive(Debug)]
pub struct PendingSubmission {
    order_uid: String,
    outcome: oneshot::Receiver<Result<RenderSummary, WidgetError>>,
}

impl PendingSubmission {
    /// The identifier read from the form for this submission.
    pub fn order_uid(&self) -> &str {
        &self.order_uid
    }

    pub async fn outcome(self) -> Result<RenderSummary, WidgetError> {
        self.outcome.await.map_err(|_| WidgetError::Detached)?
    }
}

/// Events the form delivers to the widget.
#[derive(Debug)]
pub enum FormEvent {
    /// Answered as soon as the field has been read, before the lookup completes.
    Submit {
        respond_to: oneshot::Sender<Result<PendingSubmission, WidgetError>>,
    },
    Reset {
        respond_to: oneshot::Sender<()>,
    },
}

pub struct OrderLookupWidget {
    form: FormHandle,
    display: DisplayHandle,
    transport: Arc<dyn OrderTransport>,
    field_name: String,
}

impl OrderLookupWidget {
    pub fn new(
        form: FormHandle,
        display: DisplayHandle,
        transport: Arc<dyn OrderTransport>,
        field_name: impl Into<String>,
    ) -> Self {
        Self {
            form,
            display,
            transport,
            field_name: field_name.into(),
        }
    }

    /// Locates the form and display configured in `config`.
    ///
    /// Fails fast with [`WidgetError::MissingElement`] or
    /// [`WidgetError::WrongElementKind`] instead of leaving a widget that can
    /// only fail later.
    pub async fn initialize(
        document: &DocumentClient,
        config: &LookupConfig,
        transport: Arc<dyn OrderTransport>,
    ) -> Result<Self, WidgetError> {
        let form_handle = FormHandle::locate(document, &config.form_id).await?;
        let display_handle = DisplayHandle::locate(document, &config.display_id).await?;
        info!(form = %form_handle.id(), display = %display_handle.id(), "Widget initialized");
        Ok(Self::new(form_handle, display_handle, transport, config.field_name.clone()))
    }

    /// Splits the widget into its event loop and a handle that delivers events to it.
    pub fn attach(self, buffer_size: usize) -> (WidgetListener, WidgetHandle) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let listener = WidgetListener {
            widget: Arc::new(self),
            events: receiver,
        };
        (listener, WidgetHandle { events: sender })
    }

    pub fn form(&self) -> &FormHandle {
        &self.form
    }

    pub fn display(&self) -> &DisplayHandle {
        &self.display
    }

    /// Reads the order field and runs one lookup to completion.
    ///
    /// An empty field is still sent.
    pub async fn on_submit(&self) -> Result<RenderSummary, WidgetError> {
        let identifier = self.read_identifier().await?;
        self.lookup_and_render(identifier).await
    }

    /// The display is left as it is.
    pub async fn on_reset(&self) {
        debug!(form = %self.form.id(), "Reset ignored");
    }

    /// Posts `{"order_uid": identifier}` and interprets the response body.
    pub async fn fetch_order(&self, identifier: &str) -> Result<OrderDocument, LookupError> {
        let body = self.transport.lookup(&OrderLookupRequest::new(identifier)).await?;
        OrderDocument::from_value(body)
    }

    /// Appends the rendered order as one block and returns its line count.
    pub async fn render_order(&self, document: &OrderDocument) -> Result<usize, WidgetError> {
        let lines = render::render_order(document);
        if lines.is_empty() {
            debug!("No order fields to render");
            return Ok(0);
        }
        let len = self.display.append_html(render::to_html(&lines)).await?;
        debug!(lines = lines.len(), display_len = len, "Appended order");
        Ok(lines.len())
    }

    async fn read_identifier(&self) -> Result<String, WidgetError> {
        self.form.field_value(&self.field_name).await
    }

    async fn lookup_and_render(&self, identifier: String) -> Result<RenderSummary, WidgetError> {
        let result = async {
            let document = self.fetch_order(&identifier).await?;
            let lines = self.render_order(&document).await?;
            Ok::<_, WidgetError>(lines)
        }
        .await;

        match result {
            Ok(lines) => {
                info!(lines, "Order rendered");
                Ok(RenderSummary {
                    order_uid: identifier,
                    lines,
                })
            }
            Err(e) => {
                warn!(error = %e, "Lookup failed");
                Err(e)
            }
        }
    }
}

/// Runs the widget's event loop.
pub struct WidgetListener {
    widget: Arc<OrderLookupWidget>,
    events: mpsc::Receiver<FormEvent>,
}

impl WidgetListener {
    /// Handles events until every [`WidgetHandle`] is dropped, then waits for
    /// submissions still in flight.
    pub async fn run(mut self) {
        info!(form = %self.widget.form.id(), display = %self.widget.display.id(), "Widget attached");
        let mut in_flight = JoinSet::new();
        let mut submissions: u64 = 0;

        loop {
            tokio::select! {
                event = self.events.recv() => match event {
                    Some(FormEvent::Submit { respond_to }) => {
                        submissions += 1;
                        match self.widget.read_identifier().await {
                            Ok(identifier) => {
                                let span = info_span!("submission", submission = submissions, order_uid = %identifier);
                                let (outcome_tx, outcome) = oneshot::channel();
                                let widget = self.widget.clone();
                                let order_uid = identifier.clone();
                                in_flight.spawn(
                                    async move {
                                        let _ = outcome_tx.send(widget.lookup_and_render(identifier).await);
                                    }
                                    .instrument(span),
                                );
                                let _ = respond_to.send(Ok(PendingSubmission { order_uid, outcome }));
                            }
                            Err(e) => {
                                warn!(submission = submissions, error = %e, "Submit failed");
                                let _ = respond_to.send(Err(e));
                            }
                        }
                    }
                    Some(FormEvent::Reset { respond_to }) => {
                        self.widget.on_reset().await;
                        let _ = respond_to.send(());
                    }
                    None => break,
                },
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    if let Err(e) = joined {
                        error!(error = %e, "Submission task failed");
                    }
                }
            }
        }

        while let Some(joined) = in_flight.join_next().await {
            if let Err(e) = joined {
                error!(error = %e, "Submission task failed");
            }
        }
        info!(submissions, "Widget detached");
    }
}

/// Cloneable sender of form events; the widget stops once all are dropped.
#[derive(Clone)]
pub struct WidgetHandle {
    events: mpsc::Sender<FormEvent>,
}

impl WidgetHandle {
    /// Submits the form and waits for that submission's outcome.
    pub async fn submit(&self) -> Result<RenderSummary, WidgetError> {
        self.dispatch().await?.outcome().await
    }

    /// Submits the form, returning once the field has been read.
    ///
    /// The form may be edited again as soon as this returns.
    pub async fn dispatch(&self) -> Result<PendingSubmission, WidgetError> {
        let (respond_to, response) = oneshot::channel();
        self.events
            .send(FormEvent::Submit { respond_to })
            .await
            .map_err(|_| WidgetError::Detached)?;
        response.await.map_err(|_| WidgetError::Detached)?
    }

    pub async fn reset(&self) -> Result<(), WidgetError> {
        let (respond_to, response) = oneshot::channel();
        self.events
            .send(FormEvent::Reset { respond_to })
            .await
            .map_err(|_| WidgetError::Detached)?;
        response.await.map_err(|_| WidgetError::Detached)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::MockTransport;
    use crate::framework::mock::MockClient;
    use crate::model::{Element, ElementKind};
    use serde_json::json;

    async fn page() -> DocumentClient {
        let (actor, document) = crate::document::new(8);
        tokio::spawn(actor.run(()));
        document.create_form("ord_uid_form", &["ordField"]).await.unwrap();
        document.create_container("ord_data").await.unwrap();
        document
    }

    async fn widget(document: &DocumentClient, transport: &MockTransport) -> OrderLookupWidget {
        OrderLookupWidget::initialize(document, &LookupConfig::default(), Arc::new(transport.clone()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_submit_posts_field_value_once() {
        let document = page().await;
        let transport = MockTransport::new();
        transport.expect_lookup("abc123").return_ok(json!({"CustomerOrder": {"info": {"name": "Alice"}, "age": 30}}));
        document.set_field("ord_uid_form", "ordField", "abc123").await.unwrap();

        let summary = widget(&document, &transport).await.on_submit().await.unwrap();

        assert_eq!(summary, RenderSummary { order_uid: "abc123".into(), lines: 3 });
        assert_eq!(transport.requests(), vec![OrderLookupRequest::new("abc123")]);
        assert_eq!(
            document.inner_html("ord_data").await.unwrap(),
            "<b><code>info:</code></b><br><code>*name: Alice</code><br><code>age: 30</code><br>"
        );
        transport.verify();
    }

    #[tokio::test]
    async fn test_empty_field_is_still_sent() {
        let document = page().await;
        let transport = MockTransport::new();
        transport.expect_lookup("").return_ok(json!("No same order"));

        let result = widget(&document, &transport).await.on_submit().await;

        assert_eq!(result, Err(WidgetError::Lookup(LookupError::Rejected("No same order".into()))));
        assert_eq!(transport.requests(), vec![OrderLookupRequest::new("")]);
    }

    #[tokio::test]
    async fn test_http_failure_appends_nothing() {
        let document = page().await;
        let transport = MockTransport::new();
        transport.expect_lookup("gone").return_err(LookupError::HttpStatus {
            status: 500,
            reason: "Internal Server Error".into(),
        });
        document.set_field("ord_uid_form", "ordField", "gone").await.unwrap();

        let result = widget(&document, &transport).await.on_submit().await;

        assert!(matches!(
            result,
            Err(WidgetError::Lookup(LookupError::HttpStatus { status: 500, .. }))
        ));
        assert_eq!(document.inner_html("ord_data").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_malformed_order_appends_nothing() {
        let document = page().await;
        let transport = MockTransport::new();
        transport.expect_lookup("x").return_ok(json!({"CustomerOrder": "oops"}));
        document.set_field("ord_uid_form", "ordField", "x").await.unwrap();

        let result = widget(&document, &transport).await.on_submit().await;

        assert!(matches!(result, Err(WidgetError::Lookup(LookupError::MalformedOrder(_)))));
        assert_eq!(document.inner_html("ord_data").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_initialize_fails_fast_on_missing_elements() {
        let mut mock = MockClient::<Element>::new();
        mock.expect_get("ord_uid_form".to_string()).return_ok(None);
        let document = DocumentClient::new(mock.client());

        let result = OrderLookupWidget::initialize(&document, &LookupConfig::default(), Arc::new(MockTransport::new())).await;
        assert!(matches!(result, Err(WidgetError::MissingElement(id)) if id == "ord_uid_form"));
        mock.verify();

        let mut mock = MockClient::<Element>::new();
        mock.expect_get("ord_uid_form".to_string())
            .return_ok(Some(Element::new("ord_uid_form", ElementKind::form(["ordField"]))));
        mock.expect_get("ord_data".to_string()).return_ok(None);
        let document = DocumentClient::new(mock.client());

        let result = OrderLookupWidget::initialize(&document, &LookupConfig::default(), Arc::new(MockTransport::new())).await;
        assert!(matches!(result, Err(WidgetError::MissingElement(id)) if id == "ord_data"));
        mock.verify();
    }

    #[tokio::test]
    async fn test_initialize_checks_element_kinds() {
        let (actor, document) = crate::document::new(8);
        tokio::spawn(actor.run(()));
        document.create_container("ord_uid_form").await.unwrap();
        document.create_container("ord_data").await.unwrap();

        let result = OrderLookupWidget::initialize(&document, &LookupConfig::default(), Arc::new(MockTransport::new())).await;
        assert_eq!(
            result.err(),
            Some(WidgetError::WrongElementKind {
                id: "ord_uid_form".into(),
                expected: "form",
                found: "container",
            })
        );
    }

    #[tokio::test]
    async fn test_missing_field_is_reported() {
        let document = page().await;
        let config = LookupConfig {
            field_name: "orderField".into(),
            ..LookupConfig::default()
        };
        let widget = OrderLookupWidget::initialize(&document, &config, Arc::new(MockTransport::new()))
            .await
            .unwrap();

        assert_eq!(
            widget.on_submit().await,
            Err(WidgetError::MissingField {
                form: "ord_uid_form".into(),
                field: "orderField".into(),
            })
        );
    }

    #[tokio::test]
    async fn test_reset_leaves_display_alone() {
        let document = page().await;
        let transport = MockTransport::new();
        transport.expect_lookup("abc123").return_ok(json!({"CustomerOrder": {"age": 30}}));
        document.set_field("ord_uid_form", "ordField", "abc123").await.unwrap();

        let (listener, handle) = widget(&document, &transport).await.attach(4);
        let running = tokio::spawn(listener.run());

        handle.submit().await.unwrap();
        let before = document.inner_html("ord_data").await.unwrap();
        handle.reset().await.unwrap();
        let after = document.inner_html("ord_data").await.unwrap();
        assert_eq!(before, "<code>age: 30</code><br>");
        assert_eq!(before, after);

        drop(handle);
        running.await.unwrap();
    }

    #[tokio::test]
    async fn test_detached_handle() {
        let document = page().await;
        let (listener, handle) = widget(&document, &MockTransport::new()).await.attach(4);
        drop(listener);

        assert_eq!(handle.submit().await, Err(WidgetError::Detached));
        assert_eq!(handle.reset().await, Err(WidgetError::Detached));
    }
}
