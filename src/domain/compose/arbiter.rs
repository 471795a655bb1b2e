//! Conflict arbiter for editing mode: turns the resolved field set plus
//! preservation flags and reference-image intents into an ordered list of
//! imperative instructions.
//!
//! Preservation is a positive constraint: instructions that contradict a
//! preserved aspect are silently suppressed, never rejected with an error.

use crate::domain::category::{CategoryId, PreservationFlag};
use crate::domain::global::{EditIntent, GlobalConfig};
use crate::domain::output::Language;
use crate::ports::CategoryCatalog;

use super::composer::{ResolvedScene, ResolvedSubject};
use super::resolver::resolve_field;
use crate::domain::subject::FieldRef;

/// Instructions split into composition-wide sentences (reference intents,
/// the preservation sentence) and per-subject change sentences.
#[derive(Debug, Clone)]
pub struct InstructionSet {
    pub global: Vec<String>,
    pub per_subject: Vec<(String, Vec<String>)>,
}

impl InstructionSet {
    /// All sentences in emission order.
    pub fn flat(&self) -> Vec<String> {
        let mut all = self.global.clone();
        for (_, sentences) in &self.per_subject {
            all.extend(sentences.iter().cloned());
        }
        all
    }

    /// The final instruction block: sentences joined with single spaces.
    pub fn block(&self) -> String {
        self.flat().join(" ")
    }
}

/// Build the editing-mode instruction list in fixed order: reference
/// intents, the consolidated preservation sentence, then per-subject
/// change instructions gated by the preservation table.
pub fn build_instructions(
    catalog: &dyn CategoryCatalog,
    subjects: &[ResolvedSubject],
    scene: &ResolvedScene,
    global: &GlobalConfig,
    language: Language,
) -> InstructionSet {
    let mut global_sentences = Vec::new();

    for image in &global.reference_images {
        if let Some(sentence) = intent_sentence(image.intent, language) {
            global_sentences.push(sentence.to_string());
        }
    }

    let preserved = resolve_field(
        catalog,
        CategoryId::Preservation,
        FieldRef::Multi(&global.preservation),
        language,
    );
    if !preserved.is_empty() {
        global_sentences.push(match language {
            Language::En => format!("Ensure the {preserved} remain unchanged."),
            Language::Zh => format!("確保{preserved}保持不變。"),
        });
    }

    let per_subject = subjects
        .iter()
        .map(|subject| (subject.id.clone(), subject_instructions(subject, scene, global, language)))
        .collect();

    InstructionSet { global: global_sentences, per_subject }
}

fn intent_sentence(intent: EditIntent, language: Language) -> Option<&'static str> {
    match (intent, language) {
        (EditIntent::General, _) => None,
        (EditIntent::HighDenoising, Language::En) => Some("Completely reimagine the image."),
        (EditIntent::HighDenoising, Language::Zh) => Some("完全重新構想這張圖片。"),
        (EditIntent::KeepSubject, Language::En) => Some("Keep the facial features unchanged."),
        (EditIntent::KeepSubject, Language::Zh) => Some("保持臉部特徵不變。"),
        (EditIntent::KeepComposition, Language::En) => {
            Some("Retain the original composition and pose.")
        }
        (EditIntent::KeepComposition, Language::Zh) => Some("保留原始構圖與姿勢。"),
    }
}

fn subject_instructions(
    subject: &ResolvedSubject,
    scene: &ResolvedScene,
    global: &GlobalConfig,
    language: Language,
) -> Vec<String> {
    let mut sentences = Vec::new();
    let value = |id: CategoryId| subject.values.get(&id).cloned().unwrap_or_default();
    let scene_value = |id: CategoryId| scene.values.get(&id).cloned().unwrap_or_default();
    let joined = |parts: &[String]| {
        parts.iter().filter(|p| !p.is_empty()).cloned().collect::<Vec<_>>().join(" ")
    };

    // Demographic identity, gated by facial-features preservation: these
    // instructions fundamentally change who the person is.
    if !global.is_preserved(PreservationFlag::FacialFeatures) {
        let desc = joined(&[
            value(CategoryId::Nationality),
            value(CategoryId::Age),
            subject.gender_term.clone(),
            value(CategoryId::FaceShape),
            value(CategoryId::BodyType),
        ]);
        if !desc.is_empty() {
            sentences.push(match language {
                Language::En => format!("Change the character's appearance to be {desc}."),
                Language::Zh => format!("將角色外觀改為{desc}。"),
            });
        }
    }

    // Roles are costume, not identity: never gated.
    let role = value(CategoryId::Role);
    if !role.is_empty() {
        sentences.push(match language {
            Language::En => format!("Change the role to a {role}."),
            Language::Zh => format!("將角色改為{role}。"),
        });
    }

    let hair = joined(&[value(CategoryId::HairColor), value(CategoryId::HairStyle)]);
    if !hair.is_empty() && !global.is_preserved(PreservationFlag::HairStyle) {
        sentences.push(match language {
            Language::En => format!("Change hair to {hair}."),
            Language::Zh => format!("將髮型改為{hair}。"),
        });
    }

    let outfit = joined(&[value(CategoryId::Clothing), value(CategoryId::ClothingDetail)]);
    if !outfit.is_empty() && !global.is_preserved(PreservationFlag::Clothing) {
        sentences.push(match language {
            Language::En => format!("Change the outfit to {outfit}."),
            Language::Zh => format!("將服裝更換為{outfit}。"),
        });
    }

    // Accessories are additive: safe even when clothing is preserved.
    let accessories = value(CategoryId::Accessories);
    if !accessories.is_empty() {
        sentences.push(match language {
            Language::En => format!("Add {accessories} to the character."),
            Language::Zh => format!("為角色添加{accessories}。"),
        });
    }

    let action = value(CategoryId::Action);
    if !action.is_empty() && !global.is_preserved(PreservationFlag::ImageComposition) {
        sentences.push(match language {
            Language::En => format!("Change pose to {action}."),
            Language::Zh => format!("將姿勢改為{action}。"),
        });
    }

    let hands = value(CategoryId::Hands);
    if !hands.is_empty() {
        sentences.push(match language {
            Language::En => format!("Character is {hands}."),
            Language::Zh => format!("角色{hands}。"),
        });
    }

    let background = joined(&[scene_value(CategoryId::Environment), scene_value(CategoryId::Era)]);
    if !background.is_empty() && !global.is_preserved(PreservationFlag::BackgroundEnvironment) {
        sentences.push(match language {
            Language::En => format!("Change the background to {background}."),
            Language::Zh => format!("將背景改為{background}。"),
        });
    }

    let framing = joined(&[
        scene_value(CategoryId::Composition),
        scene_value(CategoryId::Camera),
        scene_value(CategoryId::AspectRatio),
    ]);
    if !framing.is_empty() && !global.is_preserved(PreservationFlag::ImageComposition) {
        sentences.push(match language {
            Language::En => format!("Adjust composition to {framing}."),
            Language::Zh => format!("將構圖調整為{framing}。"),
        });
    }

    // Art style, mood, and hand interaction above are never gated.
    let style = scene_value(CategoryId::ArtStyle);
    if !style.is_empty() {
        sentences.push(match language {
            Language::En => format!("Transform the style to {style}."),
            Language::Zh => format!("將風格轉換為{style}。"),
        });
    }

    let mood = value(CategoryId::Mood);
    if !mood.is_empty() {
        sentences.push(match language {
            Language::En => format!("Make the character look {mood}."),
            Language::Zh => format!("讓角色看起來{mood}。"),
        });
    }

    let lighting = scene_value(CategoryId::Lighting);
    if !lighting.is_empty() && !global.is_preserved(PreservationFlag::LightingConditions) {
        sentences.push(match language {
            Language::En => format!("Apply {lighting}."),
            Language::Zh => format!("應用{lighting}。"),
        });
    }

    let palette = scene_value(CategoryId::ColorPalette);
    if !palette.is_empty() && !global.is_preserved(PreservationFlag::ColorPalette) {
        sentences.push(match language {
            Language::En => format!("Use a {palette}."),
            Language::Zh => format!("使用{palette}。"),
        });
    }

    sentences
}
