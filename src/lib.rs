//! promptloom: compose localized, task-mode-aware prompts for image and
//! video generation from structured attribute selections.
//!
//! The engine is a pure function from a [`Session`] snapshot (subjects
//! plus global settings) to a [`PromptResult`] in one of four output
//! formats. Attribute vocabularies live in embedded catalog assets;
//! persistence and UI concerns stay behind the [`ports`] traits.

pub mod domain;
pub mod ports;
pub mod services;

pub use domain::{
    AppError, CategoryId, EditIntent, Format, Gender, GlobalConfig, Language, PromptResult,
    ReferenceImage, Section, SectionKind, Session, SubjectConfig, SubjectType, TaskMode, Theme,
};
pub use ports::{CategoryCatalog, SessionStore, SnapshotInfo};
pub use services::{EmbeddedCategoryCatalog, MemorySessionStore};

/// Compose a prompt from a session snapshot using the embedded catalog.
pub fn generate(session: &Session, language: Language, format: Format) -> PromptResult {
    domain::compose::generate(
        EmbeddedCategoryCatalog::shared(),
        &session.subjects,
        &session.global,
        language,
        format,
    )
}
