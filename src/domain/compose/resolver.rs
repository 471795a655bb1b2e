//! Localization resolver: raw catalog values to display terms.
//!
//! English is the canonical form and resolves by identity. Other languages
//! derive the term from the bracket-free portion of the option label, and
//! degrade to raw-value echo when the lookup misses. This function never
//! fails.

use crate::domain::category::CategoryId;
use crate::domain::output::Language;
use crate::domain::subject::FieldRef;
use crate::ports::CategoryCatalog;

/// Values carrying this prefix stand for a pending random selection.
pub const RANDOM_MARKER: &str = "random ";

/// Fixed placeholder shown for random-marker values in non-English output.
const RANDOM_PLACEHOLDER_ZH: &str = "隨機 (Random)";

/// The localized gloss of a catalog label: everything before the first
/// opening bracket, trimmed. Labels without brackets are used whole.
pub fn localized_label(label: &str) -> &str {
    label.split('(').next().unwrap_or(label).trim()
}

/// Resolve one raw value to its display term.
pub fn resolve_term(
    catalog: &dyn CategoryCatalog,
    id: CategoryId,
    value: &str,
    language: Language,
) -> String {
    if value.is_empty() {
        return String::new();
    }
    if language == Language::En {
        return value.to_string();
    }
    if value.starts_with(RANDOM_MARKER) {
        return RANDOM_PLACEHOLDER_ZH.to_string();
    }
    match catalog.option(id, value) {
        Some(option) => localized_label(&option.label).to_string(),
        None => value.to_string(),
    }
}

/// Resolve a whole field: element-wise resolution, empties dropped, joined
/// once per field with the language separator.
pub fn resolve_field(
    catalog: &dyn CategoryCatalog,
    id: CategoryId,
    field: FieldRef<'_>,
    language: Language,
) -> String {
    match field {
        FieldRef::Single(value) => resolve_term(catalog, id, value, language),
        FieldRef::Multi(values) => values
            .iter()
            .map(|value| resolve_term(catalog, id, value, language))
            .filter(|term| !term.is_empty())
            .collect::<Vec<_>>()
            .join(language.separator()),
    }
}
