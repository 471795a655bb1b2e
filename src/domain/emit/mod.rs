//! Format emitters. All four consume the same composed field set; the
//! structured formats additionally share one insertion-ordered document
//! graph so their key names and nesting can never drift apart.

pub mod json;
pub mod markdown;
pub mod text;
pub mod yaml;

use serde_json::{Map, Value, json};

use crate::domain::category::CategoryId;
use crate::domain::compose::arbiter::InstructionSet;
use crate::domain::compose::composer::{Composition, ResolvedSubject};
use crate::domain::compose::resolver::resolve_term;
use crate::domain::global::{GlobalConfig, TaskMode};
use crate::domain::output::Language;
use crate::ports::CategoryCatalog;

/// Build the shared document graph for JSON and YAML output.
///
/// Key names and ordering are stable for a given task mode: JSON renders
/// every key including empty values, YAML omits the empty ones.
pub fn build_document(
    catalog: &dyn CategoryCatalog,
    composition: &Composition,
    instructions: Option<&InstructionSet>,
    global: &GlobalConfig,
    language: Language,
) -> Value {
    let video = global.task_mode == TaskMode::VideoGeneration;
    let engine = if video { "veo" } else { "gemini_nano_banana_pro" };

    let mut doc = Map::new();
    doc.insert(
        "meta".to_string(),
        json!({
            "mode": global.task_mode.as_str(),
            "language": language.as_str(),
            "engine": engine,
        }),
    );
    doc.insert(
        "input_images".to_string(),
        Value::Array(
            global
                .reference_images
                .iter()
                .map(|image| json!({ "url": image.url, "intent": image.intent.as_str() }))
                .collect(),
        ),
    );
    doc.insert(
        "subjects".to_string(),
        Value::Array(composition.subjects.iter().map(subject_value).collect()),
    );
    doc.insert(
        "global".to_string(),
        Value::Object(global_value(catalog, composition, global, language)),
    );
    if let Some(set) = instructions {
        doc.insert(
            "instructions".to_string(),
            Value::Array(set.flat().into_iter().map(Value::String).collect()),
        );
    }
    doc.insert(
        "negative_prompt".to_string(),
        Value::String(global.effective_negative().to_string()),
    );

    Value::Object(doc)
}

fn subject_value(subject: &ResolvedSubject) -> Value {
    let value = |id: CategoryId| subject.values.get(&id).cloned().unwrap_or_default();
    let join = |parts: &[String], sep: &str| {
        parts.iter().filter(|p| !p.is_empty()).cloned().collect::<Vec<_>>().join(sep)
    };

    let mut map = Map::new();
    map.insert("id".to_string(), Value::String(subject.id.clone()));
    map.insert("type".to_string(), Value::String(subject.subject_type.as_str().to_string()));
    map.insert("subject_desc".to_string(), Value::String(subject.headline.clone()));
    map.insert("body_type".to_string(), Value::String(value(CategoryId::BodyType)));
    map.insert(
        "face_features".to_string(),
        Value::String(join(&[value(CategoryId::FaceShape), value(CategoryId::EyeGaze)], ", ")),
    );
    map.insert(
        "hair".to_string(),
        Value::String(join(&[value(CategoryId::HairColor), value(CategoryId::HairStyle)], " ")),
    );
    map.insert("appearance_details".to_string(), Value::String(value(CategoryId::Appearance)));
    map.insert(
        "outfit".to_string(),
        Value::String(join(&[value(CategoryId::Clothing), value(CategoryId::ClothingDetail)], " ")),
    );
    map.insert("accessories".to_string(), Value::String(value(CategoryId::Accessories)));
    map.insert("action_pose".to_string(), Value::String(value(CategoryId::Action)));
    map.insert("hand_interaction".to_string(), Value::String(value(CategoryId::Hands)));
    map.insert("mood_emotion".to_string(), Value::String(value(CategoryId::Mood)));
    Value::Object(map)
}

fn global_value(
    catalog: &dyn CategoryCatalog,
    composition: &Composition,
    global: &GlobalConfig,
    language: Language,
) -> Map<String, Value> {
    let scene = |id: CategoryId| composition.scene.values.get(&id).cloned().unwrap_or_default();
    let terms = |id: CategoryId, values: &[String]| {
        Value::Array(
            values
                .iter()
                .map(|v| resolve_term(catalog, id, v, language))
                .filter(|t| !t.is_empty())
                .map(Value::String)
                .collect(),
        )
    };
    let video = global.task_mode == TaskMode::VideoGeneration;

    let mut map = Map::new();
    map.insert("interaction".to_string(), Value::String(composition.interaction.clone()));
    if video {
        map.insert("camera_movement".to_string(), Value::String(scene(CategoryId::CameraMovement)));
        map.insert("motion_strength".to_string(), Value::String(scene(CategoryId::MotionStrength)));
    }
    map.insert(
        "scene_environment".to_string(),
        Value::String(
            [scene(CategoryId::Environment), scene(CategoryId::Era)]
                .into_iter()
                .filter(|p| !p.is_empty())
                .collect::<Vec<_>>()
                .join(language.separator()),
        ),
    );
    map.insert("composition_angle".to_string(), Value::String(scene(CategoryId::Composition)));
    map.insert("camera_lens".to_string(), Value::String(scene(CategoryId::Camera)));
    map.insert("lighting".to_string(), Value::String(scene(CategoryId::Lighting)));
    map.insert("color_tone".to_string(), Value::String(scene(CategoryId::ColorPalette)));
    map.insert("art_style".to_string(), Value::String(scene(CategoryId::ArtStyle)));
    map.insert("preservation".to_string(), terms(CategoryId::Preservation, &global.preservation));
    map.insert("quality_tags".to_string(), terms(CategoryId::Quality, &global.quality));
    if !video {
        map.insert("aspect_ratio".to_string(), Value::String(scene(CategoryId::AspectRatio)));
    }
    map
}
