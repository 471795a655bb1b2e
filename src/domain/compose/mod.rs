//! The composition pipeline: resolve, compose, arbitrate, emit.
//!
//! Everything is re-derived from scratch on every call; the pipeline owns
//! no state and is a referentially transparent function of its inputs.

pub mod arbiter;
pub mod composer;
pub mod resolver;

pub use arbiter::{InstructionSet, build_instructions};
pub use composer::{
    Composition, ResolvedScene, ResolvedSubject, Slot, category_in_mode, compose, sequence,
};
pub use resolver::{RANDOM_MARKER, localized_label, resolve_field, resolve_term};

use crate::domain::emit;
use crate::domain::global::{GlobalConfig, TaskMode};
use crate::domain::output::{Format, Language, PromptResult, Section, SectionKind};
use crate::domain::subject::SubjectConfig;
use crate::ports::CategoryCatalog;

/// Run the full pipeline for one snapshot of the selection state.
pub fn generate(
    catalog: &dyn CategoryCatalog,
    subjects: &[SubjectConfig],
    global: &GlobalConfig,
    language: Language,
    format: Format,
) -> PromptResult {
    let composition = compose(catalog, subjects, global, language);
    let instructions = (global.task_mode == TaskMode::Editing).then(|| {
        build_instructions(catalog, &composition.subjects, &composition.scene, global, language)
    });

    let sections = build_sections(&composition, instructions.as_ref(), global, language);

    let full_text = match format {
        Format::Text => emit::text::render(&composition, instructions.as_ref(), global, language),
        Format::Markdown => emit::markdown::render(&sections),
        Format::Json => {
            let doc = emit::build_document(catalog, &composition, instructions.as_ref(), global, language);
            emit::json::render(&doc)
        }
        Format::Yaml => {
            let doc = emit::build_document(catalog, &composition, instructions.as_ref(), global, language);
            emit::yaml::render(&doc)
        }
    };

    PromptResult { full_text, sections }
}

fn build_sections(
    composition: &Composition,
    instructions: Option<&InstructionSet>,
    global: &GlobalConfig,
    language: Language,
) -> Vec<Section> {
    let mut sections = Vec::new();

    match instructions {
        Some(set) => {
            // Editing: composition-wide sentences lead, then per-subject
            // edits, mirroring the arbiter's emission order.
            if !set.global.is_empty() {
                sections.push(Section {
                    id: "global".to_string(),
                    kind: SectionKind::Global,
                    label: instructions_label(language).to_string(),
                    content: set.global.join(" "),
                });
            }
            for (index, (id, sentences)) in set.per_subject.iter().enumerate() {
                if !sentences.is_empty() {
                    sections.push(Section {
                        id: id.clone(),
                        kind: SectionKind::Subject,
                        label: subject_label(index + 1, language),
                        content: sentences.join(" "),
                    });
                }
            }
        }
        None => {
            for (index, subject) in composition.subjects.iter().enumerate() {
                if !subject.block.is_empty() {
                    sections.push(Section {
                        id: subject.id.clone(),
                        kind: SectionKind::Subject,
                        label: subject_label(index + 1, language),
                        content: subject.block.clone(),
                    });
                }
            }
            let mut scene_content = composition.scene.tail.clone();
            if !composition.interaction.is_empty() && !scene_content.is_empty() {
                scene_content =
                    format!("{}{}{}", composition.interaction, language.separator(), scene_content);
            } else if !composition.interaction.is_empty() {
                scene_content = composition.interaction.clone();
            }
            if !scene_content.is_empty() {
                sections.push(Section {
                    id: "global".to_string(),
                    kind: SectionKind::Global,
                    label: scene_label(language).to_string(),
                    content: scene_content,
                });
            }
        }
    }

    let negative = global.effective_negative();
    if !negative.is_empty() {
        sections.push(Section {
            id: "negative".to_string(),
            kind: SectionKind::Negative,
            label: negative_label(language).to_string(),
            content: negative.to_string(),
        });
    }

    if !global.reference_images.is_empty() && global.task_mode != TaskMode::VideoGeneration {
        let content = global
            .reference_images
            .iter()
            .map(|image| format!("- {} ({})", image.url, image.intent.as_str()))
            .collect::<Vec<_>>()
            .join("\n");
        sections.push(Section {
            id: "references".to_string(),
            kind: SectionKind::Reference,
            label: reference_label(global.task_mode, language).to_string(),
            content,
        });
    }

    sections
}

fn subject_label(ordinal: usize, language: Language) -> String {
    match language {
        Language::En => format!("Subject {ordinal}"),
        Language::Zh => format!("主體 {ordinal}"),
    }
}

fn scene_label(language: Language) -> &'static str {
    match language {
        Language::En => "Scene & Style",
        Language::Zh => "場景與風格",
    }
}

fn instructions_label(language: Language) -> &'static str {
    match language {
        Language::En => "Instructions",
        Language::Zh => "編輯指令",
    }
}

fn negative_label(language: Language) -> &'static str {
    match language {
        Language::En => "Negative Prompt",
        Language::Zh => "負面提示詞",
    }
}

fn reference_label(mode: TaskMode, language: Language) -> &'static str {
    match (mode, language) {
        (TaskMode::Editing, Language::En) => "Input Images",
        (TaskMode::Editing, Language::Zh) => "輸入圖片",
        (_, Language::En) => "References",
        (_, Language::Zh) => "參考圖片",
    }
}
