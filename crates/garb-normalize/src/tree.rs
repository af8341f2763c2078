//! Decoded document tree shared by both supplier formats.
//!
//! Upstream payloads arrive as SOAP/XML or JSON; both decode into
//! [`RawNode`] so the locator and mapper run on one representation.
//!
//! XML quirks observed across the SanMar WSDL revisions, and how the
//! decoder handles them:
//!
//! - Namespace prefixes change between revisions (`soapenv:`, `S:`,
//!   `ns2:`). Element names are reduced to their local part, so
//!   `<S:Body>` and `<soapenv:Body>` both decode to the key `Body`.
//! - Repeated same-name children (`<Product>` ×N) collapse into a single
//!   `Seq` entry under that key at element close, preserving document
//!   order. A lone child stays a plain entry.
//! - Attributes carry encoding/namespace noise, never product data, and
//!   are dropped.
//! - Self-closing elements (`<size/>`) decode to [`RawNode::Null`].
//! - Mixed content is not a thing in these feeds; when an element has
//!   both text and children, the children win and the stray text is
//!   dropped.

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("document holds no root element")]
    NoRootElement,
}

/// One node of a decoded supplier document.
///
/// `Map` entries preserve decode order and may in principle hold duplicate
/// keys (JSON input); [`RawNode::get`] returns the first match, the same
/// way the upstream feeds are read by their own consumers.
#[derive(Debug, Clone, PartialEq)]
pub enum RawNode {
    Map(Vec<(String, RawNode)>),
    Seq(Vec<RawNode>),
    Text(String),
    Number(f64),
    Null,
}

impl RawNode {
    /// First value under `key`, when this node is a mapping.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&RawNode> {
        match self {
            RawNode::Map(entries) => entries
                .iter()
                .find(|(entry_key, _)| entry_key == key)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawNode::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawNode::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_map(&self) -> bool {
        matches!(self, RawNode::Map(_))
    }

    /// Mapping entries in decode order, when this node is a mapping.
    #[must_use]
    pub fn entries(&self) -> Option<&[(String, RawNode)]> {
        match self {
            RawNode::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Sequence elements in decode order, when this node is a sequence.
    #[must_use]
    pub fn elements(&self) -> Option<&[RawNode]> {
        match self {
            RawNode::Seq(elements) => Some(elements),
            _ => None,
        }
    }

    /// Decode a `serde_json::Value`. Total: every JSON document has a tree.
    ///
    /// Booleans become the text `"true"`/`"false"` — the feeds use them as
    /// display values, never as numbers.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> RawNode {
        match value {
            serde_json::Value::Null => RawNode::Null,
            serde_json::Value::Bool(b) => RawNode::Text(b.to_string()),
            serde_json::Value::Number(n) => RawNode::Number(n.as_f64().unwrap_or(0.0)),
            serde_json::Value::String(s) => RawNode::Text(s.clone()),
            serde_json::Value::Array(items) => {
                RawNode::Seq(items.iter().map(RawNode::from_json).collect())
            }
            serde_json::Value::Object(map) => RawNode::Map(
                map.iter()
                    .map(|(key, value)| (key.clone(), RawNode::from_json(value)))
                    .collect(),
            ),
        }
    }

    /// Decode an XML document. The result is a mapping holding the root
    /// element under its (prefix-stripped) name, so a SOAP response decodes
    /// to `{Envelope: {Body: ...}}` and dot paths start from `Envelope`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Xml`] when the payload is not well-formed XML,
    /// and [`TreeError::NoRootElement`] when it contains no element at all
    /// (quick-xml reads free-standing text — a JSON body, an empty string —
    /// without complaint; this is where such payloads get rejected).
    pub fn from_xml_str(xml: &str) -> Result<RawNode, TreeError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        // Open elements: (name, children-so-far, accumulated text).
        let mut stack: Vec<(String, Vec<(String, RawNode)>, String)> = Vec::new();
        let mut root: Vec<(String, RawNode)> = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    stack.push((name, Vec::new(), String::new()));
                }
                Ok(Event::Empty(e)) => {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    attach(&mut stack, &mut root, name, RawNode::Null);
                }
                Ok(Event::End(_)) => {
                    let Some((name, children, text)) = stack.pop() else {
                        continue;
                    };
                    attach(&mut stack, &mut root, name, close_element(children, &text));
                }
                Ok(Event::Text(e)) => {
                    if let Some((_, _, text)) = stack.last_mut() {
                        text.push_str(&e.unescape().unwrap_or_default());
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some((_, _, text)) = stack.last_mut() {
                        text.push_str(&String::from_utf8_lossy(e.as_ref()));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(TreeError::Xml(e)),
                _ => {}
            }
        }

        if root.is_empty() {
            return Err(TreeError::NoRootElement);
        }
        Ok(RawNode::Map(collapse_repeats(root)))
    }
}

fn attach(
    stack: &mut [(String, Vec<(String, RawNode)>, String)],
    root: &mut Vec<(String, RawNode)>,
    name: String,
    node: RawNode,
) {
    if let Some((_, children, _)) = stack.last_mut() {
        children.push((name, node));
    } else {
        root.push((name, node));
    }
}

fn close_element(children: Vec<(String, RawNode)>, text: &str) -> RawNode {
    if children.is_empty() {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            RawNode::Null
        } else {
            RawNode::Text(trimmed.to_string())
        }
    } else {
        RawNode::Map(collapse_repeats(children))
    }
}

/// Merge repeated child names into one `Seq` entry at the first
/// occurrence's position, preserving element order inside each group.
fn collapse_repeats(children: Vec<(String, RawNode)>) -> Vec<(String, RawNode)> {
    use std::collections::HashMap;

    let mut order: Vec<String> = Vec::new();
    let mut buckets: HashMap<String, Vec<RawNode>> = HashMap::new();
    for (key, node) in children {
        if !buckets.contains_key(&key) {
            order.push(key.clone());
        }
        buckets.entry(key).or_default().push(node);
    }

    order
        .into_iter()
        .map(|key| {
            let mut nodes = buckets.remove(&key).unwrap_or_default();
            let node = if nodes.len() == 1 {
                nodes.pop().unwrap_or(RawNode::Null)
            } else {
                RawNode::Seq(nodes)
            };
            (key, node)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn from_json_maps_scalars() {
        let node = RawNode::from_json(&json!({
            "name": "PC61",
            "price": 4.42,
            "active": true,
            "notes": null
        }));
        assert_eq!(node.get("name").and_then(RawNode::as_text), Some("PC61"));
        assert_eq!(node.get("price").and_then(RawNode::as_number), Some(4.42));
        assert_eq!(node.get("active").and_then(RawNode::as_text), Some("true"));
        assert_eq!(node.get("notes"), Some(&RawNode::Null));
    }

    #[test]
    fn from_json_nests_arrays_and_objects() {
        let node = RawNode::from_json(&json!({
            "products": [{"sku": "A"}, {"sku": "B"}]
        }));
        let products = node.get("products").and_then(RawNode::elements).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].get("sku").and_then(RawNode::as_text), Some("B"));
    }

    #[test]
    fn xml_root_element_keyed_under_its_name() {
        let tree = RawNode::from_xml_str("<catalog><style>PC61</style></catalog>").unwrap();
        let catalog = tree.get("catalog").expect("root element");
        assert_eq!(catalog.get("style").and_then(RawNode::as_text), Some("PC61"));
    }

    #[test]
    fn xml_namespace_prefixes_are_stripped() {
        let xml = r#"
            <soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/">
              <soapenv:Body>
                <ns2:reply xmlns:ns2="http://impl.sanmar.com/">ok</ns2:reply>
              </soapenv:Body>
            </soapenv:Envelope>
        "#;
        let tree = RawNode::from_xml_str(xml).unwrap();
        let reply = tree
            .get("Envelope")
            .and_then(|e| e.get("Body"))
            .and_then(|b| b.get("reply"));
        assert_eq!(reply.and_then(RawNode::as_text), Some("ok"));
    }

    #[test]
    fn xml_repeated_children_collapse_into_seq() {
        let xml = "<Products><Product><Sku>1</Sku></Product><Product><Sku>2</Sku></Product></Products>";
        let tree = RawNode::from_xml_str(xml).unwrap();
        let product = tree
            .get("Products")
            .and_then(|p| p.get("Product"))
            .expect("Product entry");
        let elements = product.elements().expect("collapsed into a sequence");
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].get("Sku").and_then(RawNode::as_text), Some("1"));
        assert_eq!(elements[1].get("Sku").and_then(RawNode::as_text), Some("2"));
    }

    #[test]
    fn xml_single_child_stays_plain() {
        let xml = "<Products><Product><Sku>1</Sku></Product></Products>";
        let tree = RawNode::from_xml_str(xml).unwrap();
        let product = tree.get("Products").and_then(|p| p.get("Product")).unwrap();
        assert!(product.is_map(), "lone child must not become a sequence");
    }

    #[test]
    fn xml_attributes_are_dropped() {
        let xml = r#"<item id="42" xsi:type="ns:Product"><Sku>A</Sku></item>"#;
        let tree = RawNode::from_xml_str(xml).unwrap();
        let item = tree.get("item").unwrap();
        assert_eq!(item.get("Sku").and_then(RawNode::as_text), Some("A"));
        assert!(item.get("id").is_none());
    }

    #[test]
    fn xml_self_closing_element_is_null() {
        let tree = RawNode::from_xml_str("<req><size/><color></color></req>").unwrap();
        let req = tree.get("req").unwrap();
        assert_eq!(req.get("size"), Some(&RawNode::Null));
        assert_eq!(req.get("color"), Some(&RawNode::Null));
    }

    #[test]
    fn xml_text_is_trimmed_and_unescaped() {
        let tree = RawNode::from_xml_str("<name>  Port &amp; Company  </name>").unwrap();
        assert_eq!(
            tree.get("name").and_then(RawNode::as_text),
            Some("Port & Company")
        );
    }

    #[test]
    fn xml_cdata_is_kept() {
        let tree = RawNode::from_xml_str("<desc><![CDATA[50/50 <blend>]]></desc>").unwrap();
        assert_eq!(
            tree.get("desc").and_then(RawNode::as_text),
            Some("50/50 <blend>")
        );
    }

    #[test]
    fn xml_malformed_is_an_error() {
        let result = RawNode::from_xml_str("<a><b>unclosed</a>");
        assert!(result.is_err(), "mismatched tags must fail: {result:?}");
    }

    #[test]
    fn xml_without_a_root_element_is_an_error() {
        assert!(matches!(
            RawNode::from_xml_str("{\"not\": \"xml\"}"),
            Err(TreeError::NoRootElement)
        ));
        assert!(matches!(
            RawNode::from_xml_str(""),
            Err(TreeError::NoRootElement)
        ));
    }

    #[test]
    fn get_returns_first_duplicate() {
        let node = RawNode::Map(vec![
            ("k".to_string(), RawNode::Text("first".to_string())),
            ("k".to_string(), RawNode::Text("second".to_string())),
        ]);
        assert_eq!(node.get("k").and_then(RawNode::as_text), Some("first"));
    }

    #[test]
    fn get_on_non_map_is_none() {
        assert!(RawNode::Text("x".to_string()).get("k").is_none());
        assert!(RawNode::Null.get("k").is_none());
    }
}
