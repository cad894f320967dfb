//! [`ActorEntity`] implementation for [`Element`].
//!
//! Forms accept field updates and field reads; containers accept appends and
//! reads of their markup. Anything else is rejected with a message naming the
//! element and its kind.

use crate::framework::ActorEntity;
use crate::model::{Element, ElementAction, ElementActionResult, ElementCreate, ElementId, ElementKind, ElementUpdate};
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for Element {
    type Id = ElementId;
    type CreateParams = ElementCreate;
    type UpdateParams = ElementUpdate;
    type Action = ElementAction;
    type ActionResult = ElementActionResult;
    type Context = ();

    fn requested_id(params: &ElementCreate) -> Option<ElementId> {
        params.id.clone()
    }

    fn from_create_params(id: ElementId, params: ElementCreate) -> Result<Self, String> {
        if id.trim().is_empty() {
            return Err("element id must not be blank".to_string());
        }
        Ok(Element::new(id, params.kind))
    }

    async fn on_update(&mut self, update: ElementUpdate, _ctx: &()) -> Result<(), String> {
        match update {
            ElementUpdate::SetField { name, value } => {
                let ElementKind::Form { fields } = &mut self.kind else {
                    return Err(format!("{} is a {}, not a form", self.id, self.kind.label()));
                };
                let Some((_, slot)) = fields.iter_mut().find(|(field, _)| *field == name) else {
                    return Err(format!("form {} has no field {}", self.id, name));
                };
                *slot = value;
                Ok(())
            }
        }
    }

    async fn handle_action(&mut self, action: ElementAction, _ctx: &()) -> Result<ElementActionResult, String> {
        match (action, &mut self.kind) {
            (ElementAction::ReadField(name), ElementKind::Form { fields }) => {
                let value = fields
                    .iter()
                    .find(|(field, _)| *field == name)
                    .map(|(_, value)| value.clone());
                Ok(ElementActionResult::ReadField(value))
            }
            (ElementAction::AppendHtml(html), ElementKind::Container { inner_html }) => {
                inner_html.push_str(&html);
                Ok(ElementActionResult::AppendHtml(inner_html.len()))
            }
            (ElementAction::InnerHtml, ElementKind::Container { inner_html }) => {
                Ok(ElementActionResult::InnerHtml(inner_html.clone()))
            }
            (action, kind) => Err(format!(
                "{} is a {} and cannot handle {:?}",
                self.id,
                kind.label(),
                action
            )),
        }
    }
}
