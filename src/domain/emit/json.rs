use serde_json::Value;

/// Pretty-print the shared document. The document is built from plain
/// strings, arrays and maps, so serialization cannot fail.
pub fn render(document: &Value) -> String {
    serde_json::to_string_pretty(document).expect("document is always serializable")
}
