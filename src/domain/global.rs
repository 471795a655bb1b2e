//! Global state: scene-, style-, and output-level settings shared across
//! all subjects in one composition.

use serde::{Deserialize, Serialize};

use super::category::{CategoryId, CategoryScope, PreservationFlag};
use super::subject::{FieldMut, FieldRef};

/// Which composition/ordering/instruction rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskMode {
    Generation,
    Editing,
    VideoGeneration,
}

impl TaskMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskMode::Generation => "generation",
            TaskMode::Editing => "editing",
            TaskMode::VideoGeneration => "video_generation",
        }
    }
}

/// How a reference image should influence editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditIntent {
    General,
    HighDenoising,
    KeepSubject,
    KeepComposition,
}

impl EditIntent {
    pub fn as_str(self) -> &'static str {
        match self {
            EditIntent::General => "general",
            EditIntent::HighDenoising => "high_denoising",
            EditIntent::KeepSubject => "keep_subject",
            EditIntent::KeepComposition => "keep_composition",
        }
    }
}

/// An uploaded reference image with its editing intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceImage {
    pub id: String,
    pub url: String,
    pub intent: EditIntent,
}

/// Per-composition settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    pub task_mode: TaskMode,

    pub composition: String,
    pub camera: String,
    pub camera_movement: String,
    pub motion_strength: String,
    pub environment: String,
    pub era: String,
    pub lighting: Vec<String>,
    pub color_palette: String,
    pub art_style: Vec<String>,
    pub aspect_ratio: String,

    /// Quality-boosting tags.
    pub quality: Vec<String>,
    /// Category-preservation flags, editing mode only.
    pub preservation: Vec<String>,

    pub negative_prompt: String,
    /// When false the negative prompt is treated as empty everywhere; the
    /// flag overrides the text, it does not clear it.
    pub use_negative_prompt: bool,

    pub reference_images: Vec<ReferenceImage>,
    /// Free text describing how multiple subjects relate; used only when
    /// more than one subject exists.
    pub interaction: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            task_mode: TaskMode::Generation,
            composition: String::new(),
            camera: String::new(),
            camera_movement: String::new(),
            motion_strength: String::new(),
            environment: String::new(),
            era: String::new(),
            lighting: Vec::new(),
            color_palette: String::new(),
            art_style: Vec::new(),
            aspect_ratio: String::new(),
            quality: default_quality(),
            preservation: Vec::new(),
            negative_prompt: default_negative_prompt(),
            use_negative_prompt: true,
            reference_images: Vec::new(),
            interaction: String::new(),
        }
    }
}

/// Quality tags preselected for a fresh session.
pub fn default_quality() -> Vec<String> {
    ["masterpiece", "best quality", "8k", "highly detailed", "detailed face"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Negative prompt preloaded for a fresh session.
pub fn default_negative_prompt() -> String {
    "nsfw, lowres, bad anatomy, bad hands, text, error, missing fingers, extra digit, \
     fewer digits, cropped, worst quality, low quality, normal quality, jpeg artifacts, \
     signature, watermark, username, blur"
        .to_string()
}

impl GlobalConfig {
    /// Accessor registry for global-scope categories.
    pub fn field(&self, id: CategoryId) -> Option<FieldRef<'_>> {
        if id.scope() != CategoryScope::Global {
            return None;
        }
        Some(match id {
            CategoryId::Composition => FieldRef::Single(&self.composition),
            CategoryId::Camera => FieldRef::Single(&self.camera),
            CategoryId::CameraMovement => FieldRef::Single(&self.camera_movement),
            CategoryId::MotionStrength => FieldRef::Single(&self.motion_strength),
            CategoryId::Environment => FieldRef::Single(&self.environment),
            CategoryId::Era => FieldRef::Single(&self.era),
            CategoryId::Lighting => FieldRef::Multi(&self.lighting),
            CategoryId::ColorPalette => FieldRef::Single(&self.color_palette),
            CategoryId::ArtStyle => FieldRef::Multi(&self.art_style),
            CategoryId::AspectRatio => FieldRef::Single(&self.aspect_ratio),
            CategoryId::Quality => FieldRef::Multi(&self.quality),
            CategoryId::Preservation => FieldRef::Multi(&self.preservation),
            _ => unreachable!("scope already checked"),
        })
    }

    /// Mutable counterpart of [`GlobalConfig::field`].
    pub fn field_mut(&mut self, id: CategoryId) -> Option<FieldMut<'_>> {
        if id.scope() != CategoryScope::Global {
            return None;
        }
        Some(match id {
            CategoryId::Composition => FieldMut::Single(&mut self.composition),
            CategoryId::Camera => FieldMut::Single(&mut self.camera),
            CategoryId::CameraMovement => FieldMut::Single(&mut self.camera_movement),
            CategoryId::MotionStrength => FieldMut::Single(&mut self.motion_strength),
            CategoryId::Environment => FieldMut::Single(&mut self.environment),
            CategoryId::Era => FieldMut::Single(&mut self.era),
            CategoryId::Lighting => FieldMut::Multi(&mut self.lighting),
            CategoryId::ColorPalette => FieldMut::Single(&mut self.color_palette),
            CategoryId::ArtStyle => FieldMut::Multi(&mut self.art_style),
            CategoryId::AspectRatio => FieldMut::Single(&mut self.aspect_ratio),
            CategoryId::Quality => FieldMut::Multi(&mut self.quality),
            CategoryId::Preservation => FieldMut::Multi(&mut self.preservation),
            _ => unreachable!("scope already checked"),
        })
    }

    /// Whether a preservation flag has been opted in.
    pub fn is_preserved(&self, flag: PreservationFlag) -> bool {
        self.preservation.iter().any(|p| p == flag.value())
    }

    /// The negative prompt after the `use_negative_prompt` gate.
    pub fn effective_negative(&self) -> &str {
        if self.use_negative_prompt && !self.negative_prompt.trim().is_empty() {
            &self.negative_prompt
        } else {
            ""
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_gate_overrides_text() {
        let mut global = GlobalConfig::default();
        global.negative_prompt = "blurry".to_string();
        global.use_negative_prompt = false;
        assert_eq!(global.effective_negative(), "");

        global.use_negative_prompt = true;
        assert_eq!(global.effective_negative(), "blurry");
    }

    #[test]
    fn whitespace_only_negative_is_empty() {
        let mut global = GlobalConfig::default();
        global.negative_prompt = "   ".to_string();
        assert_eq!(global.effective_negative(), "");
    }

    #[test]
    fn preservation_lookup_matches_catalog_values() {
        let mut global = GlobalConfig::default();
        global.preservation.push("facial features".to_string());
        assert!(global.is_preserved(PreservationFlag::FacialFeatures));
        assert!(!global.is_preserved(PreservationFlag::Clothing));
    }
}
