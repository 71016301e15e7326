use serde_json::{Map, Value};

/// Turn a field key into a display label: split on underscores, uppercase
/// each word's first character, rejoin with single spaces.
pub fn prettify(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Render a response record as display text: one `Label: value` line per
/// key, in record order, joined with newlines.
pub fn render_record(record: &Map<String, Value>) -> String {
    record
        .iter()
        .map(|(key, value)| format!("{}: {}", prettify(key), display_value(value)))
        .collect::<Vec<_>>()
        .join("\n")
}
