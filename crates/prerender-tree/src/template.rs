//! JSON templates.
//!
//! A template describes a node tree in JSON. Strings are text nodes, objects
//! are elements:
//!
//! ```json
//! { "tag": "div",
//!   "attributes": { "id": { "style": "warning" }, "hidden": false },
//!   "children": ["Careful!"] }
//! ```
//!
//! Attribute values are strings, booleans, numbers, or `{ "style": key }`
//! references resolved against a [`StyleMap`] during instantiation. The top
//! level may also be an array of nodes.

use std::fmt;

use serde::de::value::MapAccessDeserializer;
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;

use crate::node::{AttrValue, Attributes, Element, Node};
use crate::style::StyleMap;
use crate::TreeError;

/// A whole template document: one node or a fragment of nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Template {
    Node(TemplateNode),
    Fragment(Vec<TemplateNode>),
}

impl Template {
    /// Parse a template from JSON source.
    pub fn from_json(source: &str) -> Result<Self, TreeError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Build the node tree(s), resolving style references against `styles`.
    pub fn instantiate(&self, styles: &StyleMap) -> Result<Vec<Node>, TreeError> {
        match self {
            Template::Node(node) => Ok(vec![node.instantiate(styles)?]),
            Template::Fragment(nodes) => nodes.iter().map(|n| n.instantiate(styles)).collect(),
        }
    }
}

impl<'de> Deserialize<'de> for Template {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TemplateVisitor;

        impl<'de> Visitor<'de> for TemplateVisitor {
            type Value = Template;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a text string, an element object, or an array of nodes")
            }

            fn visit_str<E: de::Error>(self, text: &str) -> Result<Self::Value, E> {
                Ok(Template::Node(TemplateNode::Text(text.to_string())))
            }

            fn visit_string<E: de::Error>(self, text: String) -> Result<Self::Value, E> {
                Ok(Template::Node(TemplateNode::Text(text)))
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
                let el = TemplateElement::deserialize(MapAccessDeserializer::new(map))?;
                Ok(Template::Node(TemplateNode::Element(el)))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut nodes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(node) = seq.next_element::<TemplateNode>()? {
                    nodes.push(node);
                }
                Ok(Template::Fragment(nodes))
            }
        }

        deserializer.deserialize_any(TemplateVisitor)
    }
}

/// A node in a template.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateNode {
    Text(String),
    Element(TemplateElement),
}

impl<'de> Deserialize<'de> for TemplateNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NodeVisitor;

        impl<'de> Visitor<'de> for NodeVisitor {
            type Value = TemplateNode;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a text string or an element object")
            }

            fn visit_str<E: de::Error>(self, text: &str) -> Result<Self::Value, E> {
                Ok(TemplateNode::Text(text.to_string()))
            }

            fn visit_string<E: de::Error>(self, text: String) -> Result<Self::Value, E> {
                Ok(TemplateNode::Text(text))
            }

            // Element errors (missing `tag`, unknown fields) surface as-is.
            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
                let el = TemplateElement::deserialize(MapAccessDeserializer::new(map))?;
                Ok(TemplateNode::Element(el))
            }
        }

        deserializer.deserialize_any(NodeVisitor)
    }
}

impl TemplateNode {
    pub fn instantiate(&self, styles: &StyleMap) -> Result<Node, TreeError> {
        match self {
            TemplateNode::Text(text) => Ok(Node::Text(text.clone())),
            TemplateNode::Element(el) => Ok(Node::Element(el.instantiate(styles)?)),
        }
    }
}

/// An element in a template.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateElement {
    pub tag: String,
    #[serde(default)]
    pub attributes: TemplateAttributes,
    #[serde(default)]
    pub children: Vec<TemplateNode>,
}

impl TemplateElement {
    fn instantiate(&self, styles: &StyleMap) -> Result<Element, TreeError> {
        let mut attributes = Attributes::new();
        for (key, value) in &self.attributes.0 {
            attributes.insert(key.clone(), value.resolve(styles)?);
        }

        let children = self
            .children
            .iter()
            .map(|c| c.instantiate(styles))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Element {
            tag: self.tag.clone(),
            attributes,
            children,
        })
    }
}

/// Template attributes in document order.
///
/// A repeated key keeps its first position and takes the last value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TemplateAttributes(pub Vec<(String, TemplateValue)>);

impl<'de> Deserialize<'de> for TemplateAttributes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AttributesVisitor;

        impl<'de> Visitor<'de> for AttributesVisitor {
            type Value = TemplateAttributes;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of attribute names to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries: Vec<(String, TemplateValue)> =
                    Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, TemplateValue>()? {
                    match entries.iter_mut().find(|(k, _)| *k == key) {
                        Some((_, slot)) => *slot = value,
                        None => entries.push((key, value)),
                    }
                }
                Ok(TemplateAttributes(entries))
            }
        }

        deserializer.deserialize_map(AttributesVisitor)
    }
}

/// An attribute value in a template.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateValue {
    Bool(bool),
    Number(f64),
    Str(String),
    Style(StyleRef),
}

impl<'de> Deserialize<'de> for TemplateValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = TemplateValue;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a string, boolean, number, or {\"style\": key} reference")
            }

            fn visit_bool<E: de::Error>(self, b: bool) -> Result<Self::Value, E> {
                Ok(TemplateValue::Bool(b))
            }

            fn visit_i64<E: de::Error>(self, n: i64) -> Result<Self::Value, E> {
                Ok(TemplateValue::Number(n as f64))
            }

            fn visit_u64<E: de::Error>(self, n: u64) -> Result<Self::Value, E> {
                Ok(TemplateValue::Number(n as f64))
            }

            fn visit_f64<E: de::Error>(self, n: f64) -> Result<Self::Value, E> {
                Ok(TemplateValue::Number(n))
            }

            fn visit_str<E: de::Error>(self, s: &str) -> Result<Self::Value, E> {
                Ok(TemplateValue::Str(s.to_string()))
            }

            fn visit_string<E: de::Error>(self, s: String) -> Result<Self::Value, E> {
                Ok(TemplateValue::Str(s))
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
                let style = StyleRef::deserialize(MapAccessDeserializer::new(map))?;
                Ok(TemplateValue::Style(style))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

/// `{ "style": "<key>" }`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleRef {
    pub style: String,
}

impl TemplateValue {
    fn resolve(&self, styles: &StyleMap) -> Result<AttrValue, TreeError> {
        match self {
            TemplateValue::Bool(b) => Ok(AttrValue::Bool(*b)),
            TemplateValue::Number(n) => Ok(AttrValue::Number(*n)),
            TemplateValue::Str(s) => Ok(AttrValue::Str(s.clone())),
            TemplateValue::Style(StyleRef { style }) => {
                let id = styles.get(style).ok_or_else(|| TreeError::UnknownStyle {
                    key: style.clone(),
                })?;
                log::trace!("resolved style `{style}` to `{id}`");
                Ok(AttrValue::Str(id.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn warning_styles() -> StyleMap {
        vec![("warning", "_warning_1x2y")].into_iter().collect()
    }

    fn build(source: &str, styles: &StyleMap) -> Vec<Node> {
        Template::from_json(source).unwrap().instantiate(styles).unwrap()
    }

    // =========================================================================
    // Shapes
    // =========================================================================

    #[test]
    fn test_text_node() {
        let nodes = build(r#""hello""#, &StyleMap::new());
        assert_eq!(nodes, vec![Node::text("hello")]);
    }

    #[test]
    fn test_bare_element() {
        let nodes = build(r#"{ "tag": "div" }"#, &StyleMap::new());
        assert_eq!(nodes, vec![Node::from(Element::new("div"))]);
    }

    #[test]
    fn test_nested_children() {
        let nodes = build(
            r#"{ "tag": "div", "children": [{ "tag": "span", "children": ["A & B"] }, "tail"] }"#,
            &StyleMap::new(),
        );
        let expected: Node = Element::new("div")
            .child(Element::new("span").text("A & B"))
            .text("tail")
            .into();
        assert_eq!(nodes, vec![expected]);
    }

    #[test]
    fn test_fragment() {
        let nodes = build(r#"[{ "tag": "br" }, "x"]"#, &StyleMap::new());
        assert_eq!(
            nodes,
            vec![Node::from(Element::new("br")), Node::text("x")]
        );
    }

    #[test]
    fn test_unknown_element_field_rejected() {
        let err = Template::from_json(r#"{ "tag": "div", "kids": [] }"#).unwrap_err();
        assert!(matches!(err, TreeError::InvalidTemplate(_)));
    }

    // =========================================================================
    // Shape errors
    // =========================================================================

    fn shape_error(source: &str) -> serde_json::Error {
        match Template::from_json(source).unwrap_err() {
            TreeError::InvalidTemplate(e) => e,
            other => panic!("expected a template shape error, got {other:?}"),
        }
    }

    #[test]
    fn test_misspelled_field_named_with_position() {
        let source = "{\"tag\": \"div\", \"children\": [\n  {\"tag\": \"p\", \"children\": [\"ok\", {\"tga\": \"span\"}]}\n]}";
        let err = shape_error(source);
        assert!(err.to_string().contains("unknown field `tga`"), "{err}");
        assert_eq!(err.line(), 2);
        assert!(err.column() > 0);
    }

    #[test]
    fn test_missing_tag_named() {
        let err = shape_error(r#"{ "children": [] }"#);
        assert!(err.to_string().contains("missing field `tag`"), "{err}");
    }

    #[test]
    fn test_null_attribute_value_reported() {
        let err = shape_error(r#"{ "tag": "a", "attributes": { "href": null } }"#);
        let message = err.to_string();
        assert!(message.contains("invalid type: null"), "{message}");
        assert!(err.column() > 0);
    }

    #[test]
    fn test_extra_style_reference_key_named() {
        let err = shape_error(
            r#"{ "tag": "a", "attributes": { "class": { "style": "nav", "extra": 1 } } }"#,
        );
        assert!(err.to_string().contains("unknown field `extra`"), "{err}");
    }

    #[test]
    fn test_number_node_rejected() {
        let err = Template::from_json("[1]").unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Invalid template: invalid type: integer `1`"));
    }

    #[test]
    fn test_malformed_json_is_syntax_error() {
        let err = Template::from_json(r#"{ "tag": "div""#).unwrap_err();
        assert!(matches!(err, TreeError::Json(_)));
        assert!(err.to_string().starts_with("Invalid JSON: "));
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    #[test]
    fn test_attribute_value_kinds() {
        let nodes = build(
            r#"{ "tag": "input", "attributes": { "type": "checkbox", "checked": true, "disabled": false, "tabindex": 2 } }"#,
            &StyleMap::new(),
        );
        let expected: Node = Element::new("input")
            .attr("type", "checkbox")
            .attr("checked", true)
            .attr("disabled", false)
            .attr("tabindex", 2)
            .into();
        assert_eq!(nodes, vec![expected]);
    }

    #[test]
    fn test_attribute_document_order() {
        let nodes = build(
            r#"{ "tag": "a", "attributes": { "z": "1", "a": "2", "m": "3" } }"#,
            &StyleMap::new(),
        );
        let Node::Element(el) = &nodes[0] else {
            panic!("expected element");
        };
        let keys: Vec<_> = el.attributes.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_duplicate_attribute_last_value_first_position() {
        let nodes = build(
            r#"{ "tag": "a", "attributes": { "id": "one", "href": "/", "id": "two" } }"#,
            &StyleMap::new(),
        );
        let expected: Node = Element::new("a").attr("id", "two").attr("href", "/").into();
        assert_eq!(nodes, vec![expected]);
    }

    // =========================================================================
    // Style references
    // =========================================================================

    #[test]
    fn test_style_reference_resolved() {
        let nodes = build(
            r#"{ "tag": "div", "attributes": { "id": { "style": "warning" } } }"#,
            &warning_styles(),
        );
        let expected: Node = Element::new("div").attr("id", "_warning_1x2y").into();
        assert_eq!(nodes, vec![expected]);
    }

    #[test]
    fn test_style_reference_in_nested_child() {
        let nodes = build(
            r#"{ "tag": "p", "children": [{ "tag": "em", "attributes": { "class": { "style": "warning" } } }] }"#,
            &warning_styles(),
        );
        let expected: Node = Element::new("p")
            .child(Element::new("em").attr("class", "_warning_1x2y"))
            .into();
        assert_eq!(nodes, vec![expected]);
    }

    #[test]
    fn test_unknown_style() {
        let template =
            Template::from_json(r#"{ "tag": "div", "attributes": { "id": { "style": "error" } } }"#)
                .unwrap();
        let err = template.instantiate(&warning_styles()).unwrap_err();
        assert!(matches!(err, TreeError::UnknownStyle { ref key } if key == "error"));
        assert_eq!(err.to_string(), "Unknown style `error`");
    }
}
