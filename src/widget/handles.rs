//! Explicit handles to the two elements the widget works with.

use crate::clients::{ActorClient, DocumentClient};
use crate::document::DocumentError;
use crate::model::{ElementId, ElementKind};
use crate::widget::WidgetError;

/// The lookup form.
#[derive(Clone)]
pub struct FormHandle {
    document: DocumentClient,
    id: ElementId,
}

impl FormHandle {
    pub fn new(document: DocumentClient, id: impl Into<ElementId>) -> Self {
        Self { document, id: id.into() }
    }

    /// Resolves `id` on the page, failing if it is absent or not a form.
    pub async fn locate(document: &DocumentClient, id: &str) -> Result<Self, WidgetError> {
        let element = require(document, id).await?;
        match element.kind {
            ElementKind::Form { .. } => Ok(Self::new(document.clone(), id)),
            other => Err(WidgetError::WrongElementKind {
                id: id.to_string(),
                expected: "form",
                found: other.label(),
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current value of the named field.
    pub async fn field_value(&self, name: &str) -> Result<String, WidgetError> {
        self.document
            .read_field(&self.id, name)
            .await?
            .ok_or_else(|| WidgetError::MissingField {
                form: self.id.clone(),
                field: name.to_string(),
            })
    }
}

/// The container rendered orders are appended to.
#[derive(Clone)]
pub struct DisplayHandle {
    document: DocumentClient,
    id: ElementId,
}

impl DisplayHandle {
    pub fn new(document: DocumentClient, id: impl Into<ElementId>) -> Self {
        Self { document, id: id.into() }
    }

    /// Resolves `id` on the page, failing if it is absent or not a container.
    pub async fn locate(document: &DocumentClient, id: &str) -> Result<Self, WidgetError> {
        let element = require(document, id).await?;
        match element.kind {
            ElementKind::Container { .. } => Ok(Self::new(document.clone(), id)),
            other => Err(WidgetError::WrongElementKind {
                id: id.to_string(),
                expected: "container",
                found: other.label(),
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub async fn append_html(&self, html: String) -> Result<usize, WidgetError> {
        Ok(self.document.append_html(&self.id, html).await?)
    }

    pub async fn inner_html(&self) -> Result<String, WidgetError> {
        Ok(self.document.inner_html(&self.id).await?)
    }
}

async fn require(document: &DocumentClient, id: &str) -> Result<crate::model::Element, WidgetError> {
    document.require(id.to_string()).await.map_err(|e| match e {
        DocumentError::NotFound(id) => WidgetError::MissingElement(id),
        other => WidgetError::Document(other),
    })
}
