//! prerender tree
//!
//! The in-memory node model consumed by the HTML serializer, plus the two
//! collaborators that feed it: a style map (logical style name to generated
//! identifier) and JSON templates whose attribute values may reference it.
//!
//! ```text
//! Template + StyleMap → instantiate() → Node tree → prerender_html::serialize()
//! ```
//!
//! # Example
//!
//! ```
//! use prerender_tree::{Element, Node, StyleMap, Template};
//!
//! let styles = StyleMap::from_json(r#"{ "warning": "_warning_1x2y" }"#).unwrap();
//! let template = Template::from_json(r#"{ "tag": "div", "attributes": { "id": { "style": "warning" } } }"#).unwrap();
//! let nodes = template.instantiate(&styles).unwrap();
//!
//! let expected: Node = Element::new("div").attr("id", "_warning_1x2y").into();
//! assert_eq!(nodes, vec![expected]);
//! ```

pub mod node;
pub mod style;
pub mod template;

pub use node::{format_number, AttrValue, Attributes, Element, Node};
pub use style::StyleMap;
pub use template::{Template, TemplateNode, TemplateValue};

/// Error raised while loading a style map or instantiating a template.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// The source is not well-formed JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[source] serde_json::Error),

    /// Well-formed JSON that is not a valid template (wrong type, missing or
    /// unknown field). The message carries the line and column.
    #[error("Invalid template: {0}")]
    InvalidTemplate(#[source] serde_json::Error),

    #[error("Unknown style `{key}`")]
    UnknownStyle { key: String },

    #[error("Invalid style map: {message}")]
    InvalidStyleMap { message: String },
}

impl From<serde_json::Error> for TreeError {
    fn from(e: serde_json::Error) -> Self {
        match e.classify() {
            serde_json::error::Category::Data => TreeError::InvalidTemplate(e),
            _ => TreeError::Json(e),
        }
    }
}
