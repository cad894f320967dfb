use crate::clients::actor_client::ActorClient;
use crate::document::DocumentError;
use crate::framework::ResourceClient;
use crate::model::{Element, ElementAction, ElementActionResult, ElementCreate, ElementId, ElementKind, ElementUpdate};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the page's elements.
#[derive(Clone)]
pub struct DocumentClient {
    inner: ResourceClient<Element>,
}

impl DocumentClient {
    pub fn new(inner: ResourceClient<Element>) -> Self {
        Self { inner }
    }

    /// Places a form with the given (initially empty) fields on the page.
    #[instrument(skip(self, field_names))]
    pub async fn create_form(&self, id: &str, field_names: &[&str]) -> Result<ElementId, DocumentError> {
        let params = ElementCreate {
            id: Some(id.to_string()),
            kind: ElementKind::form(field_names.iter().copied()),
        };
        Ok(self.inner.create(params).await?)
    }

    /// Places an empty container on the page.
    #[instrument(skip(self))]
    pub async fn create_container(&self, id: &str) -> Result<ElementId, DocumentError> {
        let params = ElementCreate {
            id: Some(id.to_string()),
            kind: ElementKind::container(),
        };
        Ok(self.inner.create(params).await?)
    }

    /// Types `value` into a form field.
    #[instrument(skip(self, value))]
    pub async fn set_field(&self, form_id: &str, name: &str, value: &str) -> Result<(), DocumentError> {
        debug!(value, "set_field called");
        let update = ElementUpdate::SetField {
            name: name.to_string(),
            value: value.to_string(),
        };
        self.inner.update(form_id.to_string(), update).await?;
        Ok(())
    }

    /// Current value of a form field, `None` when the form has no such field.
    #[instrument(skip(self))]
    pub async fn read_field(&self, form_id: &str, name: &str) -> Result<Option<String>, DocumentError> {
        match self
            .inner
            .perform_action(form_id.to_string(), ElementAction::ReadField(name.to_string()))
            .await?
        {
            ElementActionResult::ReadField(value) => Ok(value),
            other => Err(DocumentError::UnexpectedResult(format!("{:?}", other))),
        }
    }

    /// Appends markup to a container and returns its new length.
    #[instrument(skip(self, html), fields(bytes = html.len()))]
    pub async fn append_html(&self, container_id: &str, html: String) -> Result<usize, DocumentError> {
        match self
            .inner
            .perform_action(container_id.to_string(), ElementAction::AppendHtml(html))
            .await?
        {
            ElementActionResult::AppendHtml(len) => Ok(len),
            other => Err(DocumentError::UnexpectedResult(format!("{:?}", other))),
        }
    }

    #[instrument(skip(self))]
    pub async fn inner_html(&self, container_id: &str) -> Result<String, DocumentError> {
        match self
            .inner
            .perform_action(container_id.to_string(), ElementAction::InnerHtml)
            .await?
        {
            ElementActionResult::InnerHtml(html) => Ok(html),
            other => Err(DocumentError::UnexpectedResult(format!("{:?}", other))),
        }
    }
}

#[async_trait]
impl ActorClient<Element> for DocumentClient {
    type Error = DocumentError;

    fn inner(&self) -> &ResourceClient<Element> {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockClient;

    #[tokio::test]
    async fn test_page_round_trip() {
        let (actor, document) = crate::document::new(8);
        let handle = tokio::spawn(actor.run(()));

        document.create_form("ord_uid_form", &["ordField"]).await.unwrap();
        document.create_container("ord_data").await.unwrap();
        assert_eq!(
            document.create_container("ord_data").await,
            Err(DocumentError::AlreadyExists("ord_data".into()))
        );

        document.set_field("ord_uid_form", "ordField", "abc123").await.unwrap();
        assert_eq!(
            document.read_field("ord_uid_form", "ordField").await,
            Ok(Some("abc123".to_string()))
        );

        document.append_html("ord_data", "<br>".to_string()).await.unwrap();
        document.append_html("ord_data", "<br>".to_string()).await.unwrap();
        assert_eq!(document.inner_html("ord_data").await.unwrap(), "<br><br>");

        assert!(matches!(
            document.append_html("ord_uid_form", "<br>".to_string()).await,
            Err(DocumentError::Rejected(_))
        ));

        document.delete("ord_data".to_string()).await.unwrap();
        assert_eq!(document.get("ord_data".to_string()).await, Ok(None));
        assert_eq!(
            document.require("ord_data".to_string()).await,
            Err(DocumentError::NotFound("ord_data".into()))
        );

        drop(document);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_unexpected_result_is_reported() {
        let mut mock = MockClient::<Element>::new();
        mock.expect_action("ord_data".to_string())
            .return_ok(ElementActionResult::ReadField(None));

        let document = DocumentClient::new(mock.client());
        let result = document.inner_html("ord_data").await;
        assert!(matches!(result, Err(DocumentError::UnexpectedResult(_))));
        mock.verify();
    }
}
