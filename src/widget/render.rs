//! Turns an [`OrderDocument`] into display lines and markup.
//!
//! One recursive walk, bounded by [`MAX_NESTING_DEPTH`]:
//!
//! | value                          | output                                   |
//! |--------------------------------|------------------------------------------|
//! | nested, depth 0                | `<b><code>key:</code></b><br>`, then children at depth 1 |
//! | nested, below the limit        | children at the next depth, no label     |
//! | leaf, or nested at the limit   | `<code>{"*" x depth}key: value</code><br>` |

use crate::model::{FieldValue, OrderDocument};

/// Deepest level whose entries are still printed one per line.
/// Values still nested at this depth print as compact JSON.
pub const MAX_NESTING_DEPTH: usize = 2;

/// One line of a rendered order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedLine {
    /// Heading for a top-level nested value.
    Label { key: String },
    /// A `key: value` pair, prefixed with one `*` per nesting level.
    Entry { depth: usize, key: String, value: String },
}

impl RenderedLine {
    /// Plain text of the line, as it reads on the page.
    pub fn text(&self) -> String {
        match self {
            RenderedLine::Label { key } => format!("{}:", key),
            RenderedLine::Entry { depth, key, value } => {
                format!("{}{}: {}", "*".repeat(*depth), key, value)
            }
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            RenderedLine::Label { key } => format!("<b><code>{}:</code></b><br>", escape_html(key)),
            RenderedLine::Entry { depth, key, value } => format!(
                "<code>{}{}: {}</code><br>",
                "*".repeat(*depth),
                escape_html(key),
                escape_html(value)
            ),
        }
    }
}

/// Lines for every field under `CustomerOrder`, in response order.
pub fn render_order(document: &OrderDocument) -> Vec<RenderedLine> {
    let mut lines = Vec::new();
    walk(&document.fields, 0, &mut lines);
    lines
}

fn walk(entries: &[(String, FieldValue)], depth: usize, lines: &mut Vec<RenderedLine>) {
    for (key, value) in entries {
        match value {
            FieldValue::Nested { entries: children, .. } if depth < MAX_NESTING_DEPTH => {
                if depth == 0 {
                    lines.push(RenderedLine::Label { key: key.clone() });
                }
                walk(children, depth + 1, lines);
            }
            value => lines.push(RenderedLine::Entry {
                depth,
                key: key.clone(),
                value: value.to_string(),
            }),
        }
    }
}

/// Markup for a whole block of lines.
pub fn to_html(lines: &[RenderedLine]) -> String {
    lines.iter().map(RenderedLine::to_html).collect()
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
