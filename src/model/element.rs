//! Page elements managed by the document actor.
//!
//! See [`impl ActorEntity for Element`](crate::document::entity) for how the
//! actor applies updates and actions to them.

/// Identifier of an element on the page (`ord_uid_form`, `ord_data`, ...).
pub type ElementId = String;

/// What an element is and the state it carries.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// A form with named input fields, in declaration order.
    Form { fields: Vec<(String, String)> },
    /// A container whose markup only ever grows.
    Container { inner_html: String },
}

impl ElementKind {
    /// A form whose fields all start empty.
    pub fn form<I, S>(field_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ElementKind::Form {
            fields: field_names
                .into_iter()
                .map(|name| (name.into(), String::new()))
                .collect(),
        }
    }

    /// An empty container.
    pub fn container() -> Self {
        ElementKind::Container { inner_html: String::new() }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ElementKind::Form { .. } => "form",
            ElementKind::Container { .. } => "container",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: ElementId,
    pub kind: ElementKind,
}

impl Element {
    pub fn new(id: impl Into<ElementId>, kind: ElementKind) -> Self {
        Self { id: id.into(), kind }
    }

    /// Value of a named form field. `None` for unknown fields and non-forms.
    pub fn field(&self, name: &str) -> Option<&str> {
        match &self.kind {
            ElementKind::Form { fields } => fields
                .iter()
                .find(|(field, _)| field == name)
                .map(|(_, value)| value.as_str()),
            ElementKind::Container { .. } => None,
        }
    }

    /// Current markup of a container. `None` for forms.
    pub fn inner_html(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Container { inner_html } => Some(inner_html),
            ElementKind::Form { .. } => None,
        }
    }
}

/// Payload for placing a new element on the page.
#[derive(Debug, Clone)]
pub struct ElementCreate {
    /// Fixed identifier; a generated one is used when absent.
    pub id: Option<ElementId>,
    pub kind: ElementKind,
}

/// Updates a user can make to an element.
#[derive(Debug, Clone)]
pub enum ElementUpdate {
    /// Typing into a form field.
    SetField { name: String, value: String },
}

/// Operations the widget performs on elements.
#[derive(Debug, Clone)]
pub enum ElementAction {
    /// Read the current value of a form field.
    ReadField(String),
    /// Append markup to a container.
    AppendHtml(String),
    /// Read a container's markup.
    InnerHtml,
}

/// Results from [`ElementAction`]s, one variant per action.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementActionResult {
    /// The field's value, `None` when the form has no such field.
    ReadField(Option<String>),
    /// Length of the container's markup after the append.
    AppendHtml(usize),
    InnerHtml(String),
}
