use crate::clients::{DocumentClient, HttpOrderClient, OrderTransport};
use crate::config::{LookupConfig, SettingsError};
use crate::widget::{OrderLookupWidget, RenderSummary, WidgetError, WidgetHandle};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Widget(#[from] WidgetError),
}

/// A page holding the lookup form and the order display, with the widget attached.
///
/// # Example
///
/// ```ignore
/// let page = LookupPage::start(&LookupConfig::load()?).await?;
/// page.lookup("b563feb7b2b84b6test").await?;
/// println!("{}", page.display_html().await?);
/// page.shutdown().await?;
/// ```
pub struct LookupPage {
    /// Client for the page's elements
    pub document: DocumentClient,

    /// Delivers form events to the widget
    pub widget: WidgetHandle,

    form_id: String,
    field_name: String,
    display_id: String,
    /// Held while the field is written and read for one submission
    form_lock: Mutex<()>,
    handles: Vec<JoinHandle<()>>,
}

impl LookupPage {
    /// Starts a page whose widget posts to the configured endpoint.
    pub async fn start(config: &LookupConfig) -> Result<Self, PageError> {
        let transport = HttpOrderClient::from_config(config)?;
        Self::with_transport(config, Arc::new(transport)).await
    }

    /// Starts a page whose widget uses `transport` for lookups.
    pub async fn with_transport(
        config: &LookupConfig,
        transport: Arc<dyn OrderTransport>,
    ) -> Result<Self, PageError> {
        let (document_actor, document) = crate::document::new(config.channel_buffer);
        let document_handle = tokio::spawn(document_actor.run(()));

        document
            .create_form(&config.form_id, &[config.field_name.as_str()])
            .await
            .map_err(WidgetError::from)?;
        document
            .create_container(&config.display_id)
            .await
            .map_err(WidgetError::from)?;

        let widget = OrderLookupWidget::initialize(&document, config, transport).await?;
        let (listener, handle) = widget.attach(config.channel_buffer);
        let widget_handle = tokio::spawn(listener.run());

        Ok(Self {
            document,
            widget: handle,
            form_id: config.form_id.clone(),
            field_name: config.field_name.clone(),
            display_id: config.display_id.clone(),
            form_lock: Mutex::new(()),
            handles: vec![widget_handle, document_handle],
        })
    }

    /// Types `order_uid` into the form, submits it and waits for the outcome.
    ///
    /// Safe to call concurrently; lookups overlap once each has been submitted.
    pub async fn lookup(&self, order_uid: &str) -> Result<RenderSummary, WidgetError> {
        let pending = {
            let _form = self.form_lock.lock().await;
            self.document
                .set_field(&self.form_id, &self.field_name, order_uid)
                .await?;
            self.widget.dispatch().await?
        };
        pending.outcome().await
    }

    /// Current markup of the order display.
    pub async fn display_html(&self) -> Result<String, WidgetError> {
        Ok(self.document.inner_html(&self.display_id).await?)
    }

    /// Detaches the widget and stops the document, waiting for in-flight lookups.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down page...");

        drop(self.widget);
        drop(self.document);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Page task failed: {:?}", e);
                return Err(format!("Page task failed: {:?}", e));
            }
        }

        info!("Page shutdown complete.");
        Ok(())
    }
}
