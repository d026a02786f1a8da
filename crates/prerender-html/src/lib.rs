//! prerender HTML serializer
//!
//! Turns a [`Node`](prerender_tree::Node) tree into one HTML string in a
//! single depth-first pass. Pure and stateless: no I/O, no shared state,
//! safe to call from any number of threads at once.
//!
//! ```
//! use prerender_tree::Element;
//!
//! let tree = Element::new("div").attr("id", "x").child(Element::new("span").text("A & B"));
//! let html = prerender_html::serialize(&tree.into()).unwrap();
//! assert_eq!(html, r#"<div id="x"><span>A &amp; B</span></div>"#);
//! ```
//!
//! Children of void elements (`img`, `br`, ...) are never emitted.

pub mod escape;
pub mod serialize;

pub use escape::{escape, escape_into};
pub use serialize::{is_void_element, serialize, serialize_fragment, validate_tag};

/// Error raised when a node cannot be serialized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SerializeError {
    /// Tag is empty or does not match `[a-zA-Z][a-zA-Z0-9-]*`.
    #[error("Invalid tag name `{tag}`")]
    InvalidTag { tag: String },

    /// An attribute key on element `tag` is empty.
    #[error("Empty attribute key on <{tag}>")]
    InvalidAttributeKey { tag: String },
}
