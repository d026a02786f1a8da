//! Node tree → HTML string.
//!
//! Depth-first, pre-order. Output is the exact concatenation of the tree in
//! document order; no whitespace is added. Attributes are emitted in their
//! insertion order. Either the whole string is produced or the first error
//! found is returned.

use prerender_tree::{AttrValue, Element, Node};

use crate::escape::escape_into;
use crate::SerializeError;

/// Serialize a single node and its descendants.
pub fn serialize(root: &Node) -> Result<String, SerializeError> {
    let mut out = String::new();
    write_node(root, &mut out)?;
    Ok(out)
}

/// Serialize several root nodes back to back.
pub fn serialize_fragment(nodes: &[Node]) -> Result<String, SerializeError> {
    let mut out = String::new();
    for node in nodes {
        write_node(node, &mut out)?;
    }
    Ok(out)
}

fn write_node(node: &Node, out: &mut String) -> Result<(), SerializeError> {
    match node {
        Node::Element(el) => write_element(el, out),
        Node::Text(text) => {
            escape_into(text, out);
            Ok(())
        }
    }
}

fn write_element(el: &Element, out: &mut String) -> Result<(), SerializeError> {
    validate_tag(&el.tag)?;

    // Opening tag
    out.push('<');
    out.push_str(&el.tag);

    for (key, value) in el.attributes.iter() {
        if key.is_empty() {
            return Err(SerializeError::InvalidAttributeKey {
                tag: el.tag.clone(),
            });
        }
        match value {
            AttrValue::Bool(false) => {}
            AttrValue::Bool(true) => {
                out.push(' ');
                out.push_str(key);
            }
            AttrValue::Str(_) | AttrValue::Number(_) => {
                out.push(' ');
                out.push_str(key);
                out.push_str("=\"");
                escape_into(&value.to_attr_string(), out);
                out.push('"');
            }
        }
    }

    if is_void_element(&el.tag) {
        if !el.children.is_empty() {
            log::debug!(
                "discarding {} child node(s) of void element <{}>",
                el.children.len(),
                el.tag
            );
        }
        out.push_str("/>");
        return Ok(());
    }

    out.push('>');
    for child in &el.children {
        write_node(child, out)?;
    }

    // Closing tag
    out.push_str("</");
    out.push_str(&el.tag);
    out.push('>');

    Ok(())
}

/// Check a tag name against `[a-zA-Z][a-zA-Z0-9-]*`.
pub fn validate_tag(tag: &str) -> Result<(), SerializeError> {
    let mut chars = tag.chars();
    let valid = match chars.next() {
        Some(first) => {
            first.is_ascii_alphabetic() && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(SerializeError::InvalidTag {
            tag: tag.to_string(),
        })
    }
}

/// Check if a tag is a void element (self-closing, children ignored).
/// Case-sensitive: `IMG` is an ordinary element.
pub fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "source"
            | "track"
            | "wbr"
    )
}
