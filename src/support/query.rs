//! Query string encoding for builder filters.

use serde_json::Value as Json;
use url::form_urlencoded;

/// Ordered filter list. Setting an existing name overwrites it in place.
pub type Filters = Vec<(String, Json)>;

pub(crate) fn set_filter(filters: &mut Filters, name: String, value: Json) {
    match filters.iter_mut().find(|(existing, _)| *existing == name) {
        Some((_, slot)) => *slot = value,
        None => filters.push((name, value)),
    }
}

/// Encode filters the way the API's form decoder expects.
///
/// Booleans become `1`/`0`, sequences `name[0]=..&name[1]=..`, maps
/// `name[key]=..`; nulls are left out.
pub fn encode(filters: &[(String, Json)]) -> String {
    let mut pairs = Vec::new();
    for (name, value) in filters {
        flatten(name.clone(), value, &mut pairs);
    }

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (name, value) in &pairs {
        serializer.append_pair(name, value);
    }
    serializer.finish()
}

fn flatten(prefix: String, value: &Json, pairs: &mut Vec<(String, String)>) {
    match value {
        Json::Null => {}
        Json::Bool(b) => pairs.push((prefix, if *b { "1" } else { "0" }.to_string())),
        Json::Number(n) => pairs.push((prefix, n.to_string())),
        Json::String(s) => pairs.push((prefix, s.clone())),
        Json::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten(format!("{prefix}[{i}]"), item, pairs);
            }
        }
        Json::Object(map) => {
            for (key, item) in map {
                flatten(format!("{prefix}[{key}]"), item, pairs);
            }
        }
    }
}
