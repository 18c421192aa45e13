//! XML response decoding
//!
//! Turns a registrar's XML document into a `serde_json::Value` tree:
//! - an element with child elements becomes an object keyed by child name
//! - repeated sibling elements become an array, in document order
//! - an element without children becomes its unescaped text, kept as sent;
//!   whitespace-only text becomes an empty string
//!
//! Attributes are ignored. The root element's name is dropped; only its content is returned.
//! A single child therefore stays a scalar/object, which is why consumers normalize
//! with `one_or_many` before iterating.

use quick_xml::Reader;
use quick_xml::events::Event;
use serde_json::{Map, Value};

struct Frame {
    name: String,
    children: Map<String, Value>,
    text: String,
}

impl Frame {
    fn new(name: String) -> Self {
        Self {
            name,
            children: Map::new(),
            text: String::new(),
        }
    }

    fn into_value(self) -> (String, Value) {
        let value = if self.children.is_empty() {
            if self.text.trim().is_empty() {
                Value::String(String::new())
            } else {
                Value::String(self.text)
            }
        } else {
            Value::Object(self.children)
        };
        (self.name, value)
    }
}

fn insert_child(parent: &mut Map<String, Value>, name: String, value: Value) {
    match parent.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            parent.insert(name, value);
        }
    }
}

/// Decode an XML document into the content tree of its root element.
///
/// Returns `Ok(None)` when the document has no root element (empty body).
pub fn decode_document(xml: &str) -> Result<Option<Value>, String> {
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<Frame> = Vec::new();

    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(start) => {
                let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                stack.push(Frame::new(name));
            }
            Event::Empty(start) => {
                let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                match stack.last_mut() {
                    Some(parent) => {
                        insert_child(&mut parent.children, name, Value::String(String::new()));
                    }
                    None => return Ok(Some(Value::String(String::new()))),
                }
            }
            Event::Text(text) => {
                if let Some(frame) = stack.last_mut() {
                    let text = text.unescape().map_err(|e| e.to_string())?;
                    frame.text.push_str(&text);
                }
            }
            Event::CData(data) => {
                if let Some(frame) = stack.last_mut() {
                    frame
                        .text
                        .push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::End(_) => {
                let Some(frame) = stack.pop() else {
                    return Err("unexpected closing tag".to_string());
                };
                let (name, value) = frame.into_value();
                match stack.last_mut() {
                    Some(parent) => insert_child(&mut parent.children, name, value),
                    None => return Ok(Some(value)),
                }
            }
            Event::Eof => {
                return if stack.is_empty() {
                    Ok(None)
                } else {
                    Err("unexpected end of document".to_string())
                };
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_body_has_no_root() {
        assert_eq!(decode_document(""), Ok(None));
        assert_eq!(
            decode_document("<?xml version=\"1.0\" encoding=\"utf-8\"?>"),
            Ok(None)
        );
    }

    #[test]
    fn nested_elements_become_objects() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
            <interface-response>
                <ParseDomain><SLD>example</SLD><TLD>co.uk</TLD></ParseDomain>
                <ErrCount>0</ErrCount>
            </interface-response>"#;
        assert_eq!(
            decode_document(xml),
            Ok(Some(json!({
                "ParseDomain": {"SLD": "example", "TLD": "co.uk"},
                "ErrCount": "0"
            })))
        );
    }

    #[test]
    fn repeated_siblings_become_arrays() {
        let xml = "<r><dns>ns1.example.com</dns><dns>ns2.example.com</dns><dns>ns3.example.com</dns></r>";
        assert_eq!(
            decode_document(xml),
            Ok(Some(json!({
                "dns": ["ns1.example.com", "ns2.example.com", "ns3.example.com"]
            })))
        );
    }

    #[test]
    fn single_child_stays_scalar() {
        let xml = "<r><dns>ns1.example.com</dns></r>";
        assert_eq!(
            decode_document(xml),
            Ok(Some(json!({"dns": "ns1.example.com"})))
        );
    }

    #[test]
    fn self_closing_and_escaped_text() {
        let xml = "<r><Attributes/><RRPText>Command &amp; completed</RRPText></r>";
        assert_eq!(
            decode_document(xml),
            Ok(Some(json!({"Attributes": "", "RRPText": "Command & completed"})))
        );
    }

    #[test]
    fn cdata_is_kept_verbatim() {
        let xml = "<r><Description><![CDATA[<b>bold</b>]]></Description></r>";
        assert_eq!(
            decode_document(xml),
            Ok(Some(json!({"Description": "<b>bold</b>"})))
        );
    }

    #[test]
    fn leaf_text_keeps_surrounding_spaces() {
        let xml = "<r>\n  <City>  Miami </City>\n  <Fax>   </Fax>\n</r>";
        assert_eq!(
            decode_document(xml),
            Ok(Some(json!({"City": "  Miami ", "Fax": ""})))
        );
    }

    #[test]
    fn truncated_document_is_an_error() {
        assert!(decode_document("<r><ErrCount>0</ErrCount>").is_err());
    }
}
