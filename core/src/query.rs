//! Query-string encoding with bracket notation for nested values.
//!
//! `{"filter": {"role": "admin", "include": [1, 2]}}` encodes as
//! `filter%5Brole%5D=admin&filter%5Binclude%5D%5B0%5D=1&filter%5Binclude%5D%5B1%5D=2`.
//! Booleans become `1`/`0`. `null` and empty containers contribute no pairs.

use serde_json::Value;
use url::form_urlencoded;

/// Flatten `params` into `key=value` pairs and URL-encode them.
///
/// Returns an empty string when nothing is left to encode.
pub fn encode_query(params: &[(String, Value)]) -> String {
    let mut pairs = Vec::new();
    for (key, value) in params {
        flatten(key, value, &mut pairs);
    }
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in &pairs {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// Join `base` and an encoded query, omitting `?` for an empty query.
pub fn append_query(base: &str, query: &str) -> String {
    if query.is_empty() {
        base.to_string()
    } else {
        format!("{base}?{query}")
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::Bool(b) => out.push((prefix.to_string(), if *b { "1" } else { "0" }.to_string())),
        Value::Number(n) => out.push((prefix.to_string(), n.to_string())),
        Value::String(s) => out.push((prefix.to_string(), s.clone())),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten(&format!("{prefix}[{i}]"), item, out);
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                flatten(&format!("{prefix}[{key}]"), item, out);
            }
        }
    }
}
