//! Typed accessor over the CMS custom-field bag
//!
//! The CMS stores every custom field as loosely-typed JSON: text may arrive
//! as a number, booleans as `"1"`/`"true"` strings, multi-selects as
//! `{key: "true"|"false"}` maps and repeated groups as either arrays or
//! id-keyed maps. `MetaBag` decodes each shape once so nothing past the
//! normalizer sees a `serde_json::Value`.

use serde_json::{Map, Value};

use crate::models::SelectionSet;

/// Borrowed view of a meta object
///
/// A bag built from anything other than a JSON object behaves as empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetaBag<'a> {
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> MetaBag<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self {
            fields: value.as_object(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.map_or(true, Map::is_empty)
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.fields.and_then(|f| f.get(key))
    }

    /// String verbatim, number in decimal form, anything else `""`
    pub fn text(&self, key: &str) -> String {
        match self.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    }

    /// Attachment id, or 0 when absent or not a positive integer
    pub fn media_id(&self, key: &str) -> u64 {
        match self.get(key) {
            Some(Value::Number(n)) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 1.0).map(|f| f as u64))
                .unwrap_or(0),
            Some(Value::String(s)) => parse_leading_int(s).unwrap_or(0),
            _ => 0,
        }
    }

    /// List of attachment ids from an array or a comma-separated string
    pub fn id_list(&self, key: &str) -> Vec<u64> {
        match self.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| match item {
                    Value::Number(n) => n.as_u64(),
                    Value::String(s) => parse_leading_int(s),
                    _ => None,
                })
                .collect(),
            Some(Value::String(s)) => s.split(',').filter_map(parse_leading_int).collect(),
            _ => Vec::new(),
        }
    }

    /// `"true"`, `"1"` and native `true` are set; everything else is unset
    pub fn flag(&self, key: &str) -> bool {
        match self.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s == "true" || s == "1",
            _ => false,
        }
    }

    /// Keys whose value is exactly `"true"`, in enumeration order
    pub fn encoded_set(&self, key: &str) -> SelectionSet {
        match self.get(key) {
            Some(Value::Object(map)) => map
                .iter()
                .filter(|(_, v)| v.as_str() == Some("true"))
                .map(|(k, _)| k.as_str())
                .collect(),
            _ => SelectionSet::new(),
        }
    }

    /// Rows of a repeated group, from an array or an id-keyed map
    ///
    /// Non-object rows are skipped.
    pub fn repeater(&self, key: &str) -> Vec<MetaBag<'a>> {
        let rows: Box<dyn Iterator<Item = &'a Value> + 'a> = match self.get(key) {
            Some(Value::Array(items)) => Box::new(items.iter()),
            Some(Value::Object(map)) => Box::new(map.values()),
            _ => return Vec::new(),
        };

        rows.filter(|row| row.is_object()).map(MetaBag::new).collect()
    }
}

/// Encode a flag the way the CMS stores it
pub fn encode_flag(value: bool) -> Value {
    Value::String(if value { "true" } else { "false" }.to_string())
}

/// Leading integer of `s`, ignoring surrounding whitespace and a `+` sign
fn parse_leading_int(s: &str) -> Option<u64> {
    let s = s.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().ok()
}
