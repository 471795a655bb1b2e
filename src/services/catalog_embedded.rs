//! Category catalog service - loads option tables from embedded assets.

use include_dir::{Dir, include_dir};

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::Deserialize;

use crate::domain::category::{CategoryEntry, CategoryId, OptionRecord};
use crate::domain::error::AppError;
use crate::ports::CategoryCatalog;

/// Embedded catalog directory, one YAML file per category.
static CATALOG_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/src/assets/catalog");

#[derive(Debug, Deserialize)]
struct CatalogFile {
    options: Vec<OptionRecord>,
}

/// Catalog backed by the option tables compiled into the binary.
pub struct EmbeddedCategoryCatalog {
    entries: BTreeMap<CategoryId, CategoryEntry>,
}

impl EmbeddedCategoryCatalog {
    /// Load every embedded category file. Each file stem must name a known
    /// category id.
    pub fn new() -> Result<Self, AppError> {
        let mut entries = BTreeMap::new();

        for file in CATALOG_DIR.files() {
            let file_name =
                file.path().file_name().and_then(|n| n.to_str()).unwrap_or("").to_string();
            let stem = file.path().file_stem().and_then(|n| n.to_str()).unwrap_or("");

            let id = CategoryId::ALL
                .into_iter()
                .find(|id| id.as_str() == stem)
                .ok_or_else(|| AppError::InvalidCatalogAsset {
                    file: file_name.clone(),
                    reason: format!("'{stem}' is not a known category id"),
                })?;

            let content =
                file.contents_utf8().ok_or_else(|| AppError::InvalidCatalogAsset {
                    file: file_name.clone(),
                    reason: "file is not valid UTF-8".to_string(),
                })?;

            let parsed: CatalogFile =
                serde_yaml::from_str(content).map_err(|e| AppError::InvalidCatalogAsset {
                    file: file_name.clone(),
                    reason: e.to_string(),
                })?;

            for option in &parsed.options {
                if option.value.trim().is_empty() {
                    return Err(AppError::InvalidCatalogAsset {
                        file: file_name.clone(),
                        reason: "option with empty value".to_string(),
                    });
                }
            }

            entries.insert(id, CategoryEntry { id, options: parsed.options });
        }

        Ok(Self { entries })
    }

    /// The process-wide catalog instance. Embedded assets are validated at
    /// build time by the test suite, so failure here is a packaging bug.
    pub fn shared() -> &'static Self {
        static CATALOG: OnceLock<EmbeddedCategoryCatalog> = OnceLock::new();
        CATALOG.get_or_init(|| {
            EmbeddedCategoryCatalog::new().expect("embedded catalog assets are valid")
        })
    }
}

impl CategoryCatalog for EmbeddedCategoryCatalog {
    fn entry(&self, id: CategoryId) -> Option<&CategoryEntry> {
        self.entries.get(&id)
    }
}
