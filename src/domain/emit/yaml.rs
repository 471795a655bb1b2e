//! Hand-rolled YAML writer over the shared document.
//!
//! Unlike the JSON form, the YAML form omits empty strings, empty arrays
//! and empty maps entirely, so the output reads as a compact worksheet
//! rather than a full schema dump.

use serde_json::Value;

pub fn render(document: &Value) -> String {
    let mut out = String::new();
    if let Value::Object(map) = document {
        for (key, value) in map {
            write_entry(&mut out, key, value, 0);
        }
    }
    out
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.iter().all(is_empty),
        Value::Object(map) => map.values().all(is_empty),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

fn write_entry(out: &mut String, key: &str, value: &Value, indent: usize) {
    if is_empty(value) {
        return;
    }
    let pad = "  ".repeat(indent);
    match value {
        Value::Object(map) => {
            out.push_str(&format!("{pad}{key}:\n"));
            for (inner_key, inner) in map {
                write_entry(out, inner_key, inner, indent + 1);
            }
        }
        Value::Array(items) => {
            out.push_str(&format!("{pad}{key}:\n"));
            for item in items {
                write_item(out, item, indent + 1);
            }
        }
        _ => {
            out.push_str(&format!("{pad}{key}: {}\n", scalar(value)));
        }
    }
}

fn write_item(out: &mut String, item: &Value, indent: usize) {
    if is_empty(item) {
        return;
    }
    let pad = "  ".repeat(indent);
    match item {
        Value::Object(map) => {
            let mut first = true;
            for (key, value) in map {
                if is_empty(value) {
                    continue;
                }
                if first {
                    match value {
                        Value::Object(_) | Value::Array(_) => {
                            out.push_str(&format!("{pad}- {key}:\n"));
                            write_nested(out, value, indent + 2);
                        }
                        _ => out.push_str(&format!("{pad}- {key}: {}\n", scalar(value))),
                    }
                    first = false;
                } else {
                    write_entry(out, key, value, indent + 1);
                }
            }
        }
        Value::Array(items) => {
            out.push_str(&format!("{pad}-\n"));
            for inner in items {
                write_item(out, inner, indent + 1);
            }
        }
        _ => {
            out.push_str(&format!("{pad}- {}\n", scalar(item)));
        }
    }
}

fn write_nested(out: &mut String, value: &Value, indent: usize) {
    match value {
        Value::Object(map) => {
            for (key, inner) in map {
                write_entry(out, key, inner, indent);
            }
        }
        Value::Array(items) => {
            for item in items {
                write_item(out, item, indent);
            }
        }
        _ => {}
    }
}

/// Quote a scalar when plain style would change its meaning.
fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => {
            if needs_quoting(s) {
                let escaped = s.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n");
                format!("\"{escaped}\"")
            } else {
                s.clone()
            }
        }
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

fn needs_quoting(s: &str) -> bool {
    s.contains(": ")
        || s.ends_with(':')
        || s.starts_with(['#', '[', ']', '{', '}', '*', '!', '&', '-', '?', '\'', '"', ' '])
        || s.contains(['\n', '"', '\''])
        || s.contains(" #")
        || s.contains(',')
}
