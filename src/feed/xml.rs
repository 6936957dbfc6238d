//! XML feed parsing.
//!
//! Event-driven reader over the `<disclaimers>` document: each
//! `<disclaimer>` element's children (`id`, `index`, `title`, `text`,
//! `div`, `startDate`, `endDate`, repeated `url`) are mapped onto the same
//! canonical record shape the JSON parser produces. Absent `div` defaults
//! to "ALL"; empty `<url>` text is dropped.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::{Map, Value};

/// Fields copied verbatim from child-element text into the record.
const SCALAR_FIELDS: [&str; 7] = [
    "id", "index", "title", "text", "div", "startDate", "endDate",
];

/// Outcome of an XML parse attempt. Distinguishing a syntax failure from
/// a well-formed document with the wrong structure lets the loader fall
/// back to JSON only when the content was not XML at all.
#[derive(Debug)]
pub(crate) enum XmlOutcome {
    /// Canonical records, in document order.
    Records(Vec<Value>),
    /// Well-formed XML without a `<disclaimers>` root.
    MissingDisclaimers,
    /// Not parseable as XML.
    NotXml(String),
}

/// Parse an XML feed body into canonical records.
pub(crate) fn parse_xml_feed(xml: &str) -> XmlOutcome {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    let mut saw_root = false;
    let mut in_disclaimer = false;
    let mut current_tag = String::new();
    let mut fields: Map<String, Value> = Map::new();
    let mut urls: Vec<Value> = Vec::new();
    let mut records = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                match name.as_str() {
                    "disclaimers" => saw_root = true,
                    "disclaimer" if saw_root => {
                        in_disclaimer = true;
                        fields.clear();
                        urls.clear();
                        current_tag.clear();
                    }
                    _ => current_tag = name,
                }
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                if name == "disclaimer" && in_disclaimer {
                    if !fields.contains_key("div") {
                        fields.insert("div".to_string(), Value::String("ALL".to_string()));
                    }
                    fields.insert("urls".to_string(), Value::Array(urls.clone()));
                    records.push(Value::Object(fields.clone()));
                    in_disclaimer = false;
                } else {
                    current_tag.clear();
                }
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().unwrap_or_default().trim().to_string();
                if in_disclaimer && !text.is_empty() {
                    if current_tag == "url" {
                        urls.push(Value::String(text));
                    } else if SCALAR_FIELDS.contains(&current_tag.as_str()) {
                        fields.insert(current_tag.clone(), Value::String(text));
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return XmlOutcome::NotXml(e.to_string()),
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        return XmlOutcome::MissingDisclaimers;
    }
    XmlOutcome::Records(records)
}
