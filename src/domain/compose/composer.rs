//! Field composer: resolves every meaningful slot for each subject and for
//! the scene, builds subject headlines, and lays the slots out in the
//! hand-tuned per-mode order.
//!
//! Ordering is deliberate, not alphabetical: the target generative systems
//! weight earlier tokens more heavily, so identity leads and technical
//! constraints trail.

use std::collections::BTreeMap;

use crate::domain::category::{
    allowed_subject_categories, CategoryId, SCENERY_CAMERA_BLACKLIST,
    SCENERY_COMPOSITION_BLACKLIST, SCENERY_MOOD_BLACKLIST,
};
use crate::domain::global::{GlobalConfig, TaskMode};
use crate::domain::output::Language;
use crate::domain::subject::{FieldRef, Gender, SubjectConfig, SubjectType};
use crate::ports::CategoryCatalog;

use super::resolver::{resolve_field, resolve_term};

/// One position in a mode's slot sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// The subject phrase (or the joined multi-subject block).
    Headline,
    /// A subject-scope category, resolved per subject.
    Subject(CategoryId),
    /// A global-scope category, resolved once per composition.
    Scene(CategoryId),
}

/// Descriptive slot order for image generation. Aspect ratio is last on
/// purpose: it is a technical constraint, not descriptive content.
const GENERATION_SEQUENCE: &[Slot] = &[
    Slot::Headline,
    Slot::Subject(CategoryId::Action),
    Slot::Scene(CategoryId::Environment),
    Slot::Subject(CategoryId::Clothing),
    Slot::Subject(CategoryId::ClothingDetail),
    Slot::Subject(CategoryId::Appearance),
    Slot::Subject(CategoryId::Accessories),
    Slot::Subject(CategoryId::BodyType),
    Slot::Subject(CategoryId::FaceShape),
    Slot::Subject(CategoryId::HairColor),
    Slot::Subject(CategoryId::HairStyle),
    Slot::Subject(CategoryId::EyeGaze),
    Slot::Subject(CategoryId::Hands),
    Slot::Scene(CategoryId::Composition),
    Slot::Scene(CategoryId::Camera),
    Slot::Scene(CategoryId::Lighting),
    Slot::Scene(CategoryId::Era),
    Slot::Scene(CategoryId::ArtStyle),
    Slot::Subject(CategoryId::Mood),
    Slot::Scene(CategoryId::ColorPalette),
    Slot::Scene(CategoryId::Quality),
    Slot::Scene(CategoryId::AspectRatio),
];

/// Slot order for video generation: camera movement opens, aspect ratio is
/// excluded entirely.
const VIDEO_SEQUENCE: &[Slot] = &[
    Slot::Scene(CategoryId::CameraMovement),
    Slot::Headline,
    Slot::Scene(CategoryId::Environment),
    Slot::Subject(CategoryId::Action),
    Slot::Scene(CategoryId::MotionStrength),
    Slot::Subject(CategoryId::Clothing),
    Slot::Subject(CategoryId::ClothingDetail),
    Slot::Subject(CategoryId::Appearance),
    Slot::Subject(CategoryId::HairColor),
    Slot::Subject(CategoryId::HairStyle),
    Slot::Subject(CategoryId::EyeGaze),
    Slot::Scene(CategoryId::Composition),
    Slot::Scene(CategoryId::Camera),
    Slot::Scene(CategoryId::Lighting),
    Slot::Scene(CategoryId::Era),
    Slot::Scene(CategoryId::ArtStyle),
    Slot::Subject(CategoryId::Mood),
    Slot::Scene(CategoryId::ColorPalette),
    Slot::Scene(CategoryId::Quality),
];

/// The slot sequence for a task mode. Editing mode shares the generation
/// layout for its descriptive sections; its text output comes from the
/// arbiter instead.
pub fn sequence(mode: TaskMode) -> &'static [Slot] {
    match mode {
        TaskMode::Generation | TaskMode::Editing => GENERATION_SEQUENCE,
        TaskMode::VideoGeneration => VIDEO_SEQUENCE,
    }
}

/// One subject after resolution: localized values keyed by category, the
/// headline phrase, and the subject's own joined block.
#[derive(Debug, Clone)]
pub struct ResolvedSubject {
    pub id: String,
    pub subject_type: SubjectType,
    pub headline: String,
    /// Localized gender term, empty when no gender is set.
    pub gender_term: String,
    /// Non-empty resolved values for allowed subject-scope categories.
    pub values: BTreeMap<CategoryId, String>,
    /// Headline plus this subject's slots in sequence order.
    pub block: String,
}

/// The scene after resolution: localized global values plus the ordered
/// scene tail for the active mode.
#[derive(Debug, Clone)]
pub struct ResolvedScene {
    pub values: BTreeMap<CategoryId, String>,
    pub tail: String,
}

/// A fully composed composition, shared by all emitters.
#[derive(Debug, Clone)]
pub struct Composition {
    /// Every ordered non-empty part, ready to join for text output.
    pub parts: Vec<String>,
    pub subjects: Vec<ResolvedSubject>,
    pub scene: ResolvedScene,
    /// Interaction free text, meaningful only with more than one subject.
    pub interaction: String,
}

/// Resolve and order everything. Pure; re-derived from scratch on every
/// call.
pub fn compose(
    catalog: &dyn CategoryCatalog,
    subjects: &[SubjectConfig],
    global: &GlobalConfig,
    language: Language,
) -> Composition {
    let mode = global.task_mode;
    let seq = sequence(mode);
    let scenery_only =
        !subjects.is_empty() && subjects.iter().all(|s| s.subject_type == SubjectType::Scenery);

    let resolved_subjects: Vec<ResolvedSubject> =
        subjects.iter().map(|s| resolve_subject(catalog, s, seq, language)).collect();
    let scene = resolve_scene(catalog, global, scenery_only, seq, language);

    let interaction = if subjects.len() > 1 { global.interaction.trim().to_string() } else { String::new() };

    let mut parts = Vec::new();
    if !interaction.is_empty() {
        parts.push(interaction.clone());
    }
    for slot in seq {
        match slot {
            Slot::Headline => {
                if resolved_subjects.len() == 1 {
                    push_nonempty(&mut parts, resolved_subjects[0].headline.clone());
                } else {
                    let joined = resolved_subjects
                        .iter()
                        .map(|s| s.block.clone())
                        .filter(|b| !b.is_empty())
                        .collect::<Vec<_>>()
                        .join(language.conjunction());
                    push_nonempty(&mut parts, joined);
                }
            }
            Slot::Subject(id) => {
                // With several subjects these already live in the blocks.
                if let [only] = resolved_subjects.as_slice() {
                    push_nonempty(&mut parts, only.values.get(id).cloned().unwrap_or_default());
                }
            }
            Slot::Scene(id) => {
                push_nonempty(&mut parts, scene.values.get(id).cloned().unwrap_or_default());
            }
        }
    }

    Composition { parts, subjects: resolved_subjects, scene, interaction }
}

fn push_nonempty(parts: &mut Vec<String>, part: String) {
    if !part.is_empty() {
        parts.push(part);
    }
}

fn resolve_subject(
    catalog: &dyn CategoryCatalog,
    subject: &SubjectConfig,
    seq: &[Slot],
    language: Language,
) -> ResolvedSubject {
    let mut values = BTreeMap::new();
    for id in allowed_subject_categories(subject.subject_type) {
        let resolved = subject_field_resolved(catalog, subject, *id, language);
        if !resolved.is_empty() {
            values.insert(*id, resolved);
        }
    }

    let gender_term = gender_term(subject.gender, language);
    let headline = headline(catalog, subject, &gender_term, language);

    let mut block_parts = Vec::new();
    if !headline.is_empty() {
        block_parts.push(headline.clone());
    }
    for slot in seq {
        if let Slot::Subject(id) = slot
            && let Some(value) = values.get(id)
        {
            block_parts.push(value.clone());
        }
    }
    let block = block_parts.join(language.separator());

    ResolvedSubject {
        id: subject.id.clone(),
        subject_type: subject.subject_type,
        headline,
        gender_term,
        values,
        block,
    }
}

fn resolve_scene(
    catalog: &dyn CategoryCatalog,
    global: &GlobalConfig,
    scenery_only: bool,
    seq: &[Slot],
    language: Language,
) -> ResolvedScene {
    let mut values = BTreeMap::new();
    for id in CategoryId::ALL {
        if global.field(id).is_none() || !category_in_mode(id, global.task_mode) {
            continue;
        }
        let resolved = scene_field_resolved(catalog, global, scenery_only, id, language);
        if !resolved.is_empty() {
            values.insert(id, resolved);
        }
    }

    let tail = seq
        .iter()
        .filter_map(|slot| match slot {
            Slot::Scene(id) => values.get(id).cloned(),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(language.separator());

    ResolvedScene { values, tail }
}

/// Mode exclusivity: camera movement and motion strength exist only in
/// video generation; aspect ratio never does.
pub fn category_in_mode(id: CategoryId, mode: TaskMode) -> bool {
    match id {
        CategoryId::CameraMovement | CategoryId::MotionStrength => {
            mode == TaskMode::VideoGeneration
        }
        CategoryId::AspectRatio => mode != TaskMode::VideoGeneration,
        _ => true,
    }
}

/// Resolve one subject field with all defensive filters applied: the
/// allowed-category set, gender constraints, and the scenery mood
/// blacklist. Upstream state is never trusted to have filtered already.
pub fn subject_field_resolved(
    catalog: &dyn CategoryCatalog,
    subject: &SubjectConfig,
    id: CategoryId,
    language: Language,
) -> String {
    if !allowed_subject_categories(subject.subject_type).contains(&id) {
        return String::new();
    }
    let Some(field) = subject.field(id) else {
        return String::new();
    };
    match field {
        FieldRef::Single(value) => {
            if subject_value_allowed(catalog, subject, id, value) {
                resolve_term(catalog, id, value, language)
            } else {
                String::new()
            }
        }
        FieldRef::Multi(values) => values
            .iter()
            .filter(|value| subject_value_allowed(catalog, subject, id, value))
            .map(|value| resolve_term(catalog, id, value, language))
            .filter(|term| !term.is_empty())
            .collect::<Vec<_>>()
            .join(language.separator()),
    }
}

fn subject_value_allowed(
    catalog: &dyn CategoryCatalog,
    subject: &SubjectConfig,
    id: CategoryId,
    value: &str,
) -> bool {
    if value.is_empty() {
        return false;
    }
    if subject.subject_type == SubjectType::Scenery
        && id == CategoryId::Mood
        && SCENERY_MOOD_BLACKLIST.contains(&value)
    {
        return false;
    }
    // Gender-constrained options pass when they match or when the subject
    // has no gender set.
    if let Some(option) = catalog.option(id, value)
        && let Some(constraint) = option.gender
        && let Some(gender) = subject.gender
        && constraint != gender
    {
        return false;
    }
    true
}

fn scene_field_resolved(
    catalog: &dyn CategoryCatalog,
    global: &GlobalConfig,
    scenery_only: bool,
    id: CategoryId,
    language: Language,
) -> String {
    let Some(field) = global.field(id) else {
        return String::new();
    };
    let blocked = |value: &str| {
        scenery_only
            && ((id == CategoryId::Composition && SCENERY_COMPOSITION_BLACKLIST.contains(&value))
                || (id == CategoryId::Camera && SCENERY_CAMERA_BLACKLIST.contains(&value)))
    };
    match field {
        FieldRef::Single(value) => {
            if blocked(value) {
                String::new()
            } else {
                resolve_term(catalog, id, value, language)
            }
        }
        FieldRef::Multi(values) => {
            let kept: Vec<String> =
                values.iter().filter(|v| !blocked(v)).cloned().collect();
            resolve_field(catalog, id, FieldRef::Multi(&kept), language)
        }
    }
}

fn gender_term(gender: Option<Gender>, language: Language) -> String {
    match (gender, language) {
        (Some(Gender::Female), Language::En) => "woman",
        (Some(Gender::Male), Language::En) => "man",
        (Some(Gender::Female), Language::Zh) => "女性",
        (Some(Gender::Male), Language::Zh) => "男性",
        (None, _) => "",
    }
    .to_string()
}

/// Build the short subject phrase from the type-specific identity fields,
/// prefixed by the language's indefinite-article template.
pub fn headline(
    catalog: &dyn CategoryCatalog,
    subject: &SubjectConfig,
    gender_term: &str,
    language: Language,
) -> String {
    let resolved = |id| subject_field_resolved(catalog, subject, id, language);

    let (parts, fallback_en, fallback_zh): (Vec<String>, &str, &str) = match subject.subject_type {
        SubjectType::Human => (
            vec![
                resolved(CategoryId::Nationality),
                resolved(CategoryId::Age),
                gender_term.to_string(),
                resolved(CategoryId::Role),
            ],
            "person",
            "人物",
        ),
        SubjectType::Animal => (
            vec![resolved(CategoryId::AnimalFur), resolved(CategoryId::AnimalSpecies)],
            "animal",
            "動物",
        ),
        SubjectType::Vehicle => (
            vec![resolved(CategoryId::VehicleColor), resolved(CategoryId::VehicleType)],
            "vehicle",
            "車輛",
        ),
        SubjectType::Scenery => (Vec::new(), "landscape", "風景"),
        SubjectType::Infographic => {
            let mut parts =
                vec![resolved(CategoryId::InfographicStyle), resolved(CategoryId::ChartType)];
            let topic = subject.content.trim();
            if !topic.is_empty() {
                parts.push(match language {
                    Language::En => format!("about {topic}"),
                    Language::Zh => format!("關於{topic}"),
                });
            }
            (parts, "infographic", "資訊圖表")
        }
    };

    let nonempty: Vec<String> = parts.into_iter().filter(|p| !p.is_empty()).collect();
    match language {
        Language::En => {
            let phrase =
                if nonempty.is_empty() { fallback_en.to_string() } else { nonempty.join(" ") };
            format!("{} {}", article(&phrase), phrase)
        }
        Language::Zh => {
            let phrase =
                if nonempty.is_empty() { fallback_zh.to_string() } else { nonempty.concat() };
            format!("一個{phrase}")
        }
    }
}

fn article(phrase: &str) -> &'static str {
    match phrase.chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "An",
        _ => "A",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::EmbeddedCategoryCatalog;

    fn catalog() -> &'static EmbeddedCategoryCatalog {
        EmbeddedCategoryCatalog::shared()
    }

    fn human() -> SubjectConfig {
        let mut subject = SubjectConfig::new("s1", SubjectType::Human);
        subject.gender = Some(Gender::Female);
        subject
    }

    #[test]
    fn human_headline_orders_identity_fields() {
        let mut subject = human();
        subject.nationality = vec!["Taiwanese".to_string()];
        subject.age = vec!["20 years old".to_string()];

        let h = headline(catalog(), &subject, "woman", Language::En);
        assert_eq!(h, "A Taiwanese 20 years old woman");

        let h = headline(catalog(), &subject, "女性", Language::Zh);
        assert_eq!(h, "一個台灣20歲女性");
    }

    #[test]
    fn empty_human_headline_falls_back_to_person() {
        let subject = SubjectConfig::new("s1", SubjectType::Human);
        assert_eq!(headline(catalog(), &subject, "", Language::En), "A person");
        assert_eq!(headline(catalog(), &subject, "", Language::Zh), "一個人物");
    }

    #[test]
    fn animal_and_vehicle_headlines() {
        let mut animal = SubjectConfig::new("a1", SubjectType::Animal);
        animal.animal_fur = vec!["golden fur".to_string()];
        animal.animal_species = "dog".to_string();
        assert_eq!(headline(catalog(), &animal, "", Language::En), "A golden fur dog");

        let mut vehicle = SubjectConfig::new("v1", SubjectType::Vehicle);
        vehicle.vehicle_color = "matte black finish".to_string();
        vehicle.vehicle_type = "sports car".to_string();
        assert_eq!(
            headline(catalog(), &vehicle, "", Language::En),
            "A matte black finish sports car"
        );
    }

    #[test]
    fn scenery_headline_is_fixed() {
        let subject = SubjectConfig::new("s1", SubjectType::Scenery);
        assert_eq!(headline(catalog(), &subject, "", Language::En), "A landscape");
        assert_eq!(headline(catalog(), &subject, "", Language::Zh), "一個風景");
    }

    #[test]
    fn infographic_headline_includes_topic() {
        let mut subject = SubjectConfig::new("i1", SubjectType::Infographic);
        subject.infographic_style = "flat design".to_string();
        subject.chart_type = "pie chart".to_string();
        subject.content = "quarterly sales".to_string();
        assert_eq!(
            headline(catalog(), &subject, "", Language::En),
            "A flat design pie chart about quarterly sales"
        );
    }

    #[test]
    fn fields_outside_allowed_set_are_ignored() {
        let mut subject = SubjectConfig::new("v1", SubjectType::Vehicle);
        // Stale human data left behind by a subject-type switch.
        subject.hair_color = vec!["pink hair".to_string()];
        subject.action = "sitting".to_string();

        assert_eq!(
            subject_field_resolved(catalog(), &subject, CategoryId::HairColor, Language::En),
            ""
        );
        assert_eq!(
            subject_field_resolved(catalog(), &subject, CategoryId::Action, Language::En),
            ""
        );
    }

    #[test]
    fn gender_constrained_values_are_refiltered() {
        let mut subject = human();
        subject.gender = Some(Gender::Male);
        subject.body_type = vec!["broad shoulders".to_string(), "curvy body, voluptuous".to_string()];

        assert_eq!(
            subject_field_resolved(catalog(), &subject, CategoryId::BodyType, Language::En),
            "broad shoulders"
        );

        // No gender set: everything passes.
        subject.gender = None;
        assert_eq!(
            subject_field_resolved(catalog(), &subject, CategoryId::BodyType, Language::En),
            "broad shoulders, curvy body, voluptuous"
        );
    }

    #[test]
    fn scenery_suppresses_expression_moods() {
        let mut subject = SubjectConfig::new("s1", SubjectType::Scenery);
        subject.mood = vec!["happy, smiling".to_string(), "mysterious".to_string()];
        assert_eq!(
            subject_field_resolved(catalog(), &subject, CategoryId::Mood, Language::En),
            "mysterious"
        );
    }

    #[test]
    fn scenery_only_composition_filters_portrait_framings() {
        let subjects = vec![SubjectConfig::new("s1", SubjectType::Scenery)];
        let mut global = GlobalConfig::default();
        global.composition = "close-up portrait".to_string();
        global.camera = "85mm lens".to_string();

        let composed = compose(catalog(), &subjects, &global, Language::En);
        assert!(composed.scene.values.get(&CategoryId::Composition).is_none());
        assert!(composed.scene.values.get(&CategoryId::Camera).is_none());

        // A human subject alongside clears the suppression.
        let subjects = vec![
            SubjectConfig::new("s1", SubjectType::Scenery),
            SubjectConfig::new("s2", SubjectType::Human),
        ];
        let composed = compose(catalog(), &subjects, &global, Language::En);
        assert_eq!(
            composed.scene.values.get(&CategoryId::Composition).map(String::as_str),
            Some("close-up portrait")
        );
    }

    #[test]
    fn video_mode_excludes_aspect_ratio_and_owns_motion() {
        let mut global = GlobalConfig::default();
        global.task_mode = TaskMode::VideoGeneration;
        global.aspect_ratio = "aspect ratio 16:9".to_string();
        global.camera_movement = "camera dolly in".to_string();
        global.motion_strength = "slow motion".to_string();

        let subjects = vec![human()];
        let composed = compose(catalog(), &subjects, &global, Language::En);
        assert!(composed.scene.values.get(&CategoryId::AspectRatio).is_none());
        assert_eq!(composed.parts[0], "camera dolly in");
        assert!(composed.parts.contains(&"slow motion".to_string()));

        // And the other way around in generation mode.
        global.task_mode = TaskMode::Generation;
        let composed = compose(catalog(), &subjects, &global, Language::En);
        assert!(composed.scene.values.get(&CategoryId::CameraMovement).is_none());
        assert!(composed.scene.values.get(&CategoryId::MotionStrength).is_none());
        assert_eq!(
            composed.scene.values.get(&CategoryId::AspectRatio).map(String::as_str),
            Some("aspect ratio 16:9")
        );
    }

    #[test]
    fn single_subject_keeps_the_interleaved_order() {
        let mut subject = human();
        subject.nationality = vec!["Japanese".to_string()];
        subject.action = "sitting".to_string();
        subject.clothing = vec!["traditional kimono".to_string()];
        let mut global = GlobalConfig::default();
        global.quality.clear();
        global.environment = "coffee shop".to_string();

        let composed = compose(catalog(), &[subject], &global, Language::En);
        assert_eq!(
            composed.parts,
            vec![
                "A Japanese woman".to_string(),
                "sitting".to_string(),
                "coffee shop".to_string(),
                "traditional kimono".to_string(),
            ]
        );
    }

    #[test]
    fn multiple_subjects_join_blocks_and_prepend_interaction() {
        let mut first = human();
        first.nationality = vec!["Taiwanese".to_string()];
        let mut second = SubjectConfig::new("s2", SubjectType::Human);
        second.gender = Some(Gender::Male);
        second.role = vec!["doctor".to_string()];

        let mut global = GlobalConfig::default();
        global.quality.clear();
        global.interaction = "walking side by side".to_string();
        global.environment = "city street at night".to_string();

        let composed = compose(catalog(), &[first, second], &global, Language::En);
        assert_eq!(composed.parts[0], "walking side by side");
        assert_eq!(composed.parts[1], "A Taiwanese woman AND A man doctor");
        assert_eq!(composed.parts[2], "city street at night");
    }
}
