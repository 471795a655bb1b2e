//! The category registry: every selectable category, its scope, its field
//! shape, and the per-subject-type allowed sets.
//!
//! Attribute access is always keyed by [`CategoryId`]; there is no dynamic
//! string keying anywhere in the engine. Option *data* (values and
//! localized labels) lives in the embedded catalog assets; everything
//! structural about a category is static here.

use serde::{Deserialize, Serialize};

use super::subject::{Gender, SubjectType};

/// Whether a category describes one subject or the whole scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryScope {
    Subject,
    Global,
}

/// Whether a field holds a single value or an ordered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    Single,
    Multi,
}

/// Identifier for every selectable category, including the `quality` and
/// `preservation` pseudo-categories and the infographic additions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryId {
    // Subject scope
    Nationality,
    Age,
    BodyType,
    Role,
    FaceShape,
    EyeGaze,
    HairColor,
    HairStyle,
    Appearance,
    Clothing,
    ClothingDetail,
    Accessories,
    Action,
    Hands,
    Mood,
    AnimalSpecies,
    AnimalFur,
    VehicleType,
    VehicleColor,
    ChartType,
    InfographicStyle,
    // Global scope
    Composition,
    Camera,
    CameraMovement,
    MotionStrength,
    Environment,
    Era,
    Lighting,
    ColorPalette,
    ArtStyle,
    AspectRatio,
    Quality,
    Preservation,
}

impl CategoryId {
    /// Every category, in declaration order.
    pub const ALL: [CategoryId; 33] = [
        CategoryId::Nationality,
        CategoryId::Age,
        CategoryId::BodyType,
        CategoryId::Role,
        CategoryId::FaceShape,
        CategoryId::EyeGaze,
        CategoryId::HairColor,
        CategoryId::HairStyle,
        CategoryId::Appearance,
        CategoryId::Clothing,
        CategoryId::ClothingDetail,
        CategoryId::Accessories,
        CategoryId::Action,
        CategoryId::Hands,
        CategoryId::Mood,
        CategoryId::AnimalSpecies,
        CategoryId::AnimalFur,
        CategoryId::VehicleType,
        CategoryId::VehicleColor,
        CategoryId::ChartType,
        CategoryId::InfographicStyle,
        CategoryId::Composition,
        CategoryId::Camera,
        CategoryId::CameraMovement,
        CategoryId::MotionStrength,
        CategoryId::Environment,
        CategoryId::Era,
        CategoryId::Lighting,
        CategoryId::ColorPalette,
        CategoryId::ArtStyle,
        CategoryId::AspectRatio,
        CategoryId::Quality,
        CategoryId::Preservation,
    ];

    /// Stable identifier, also the embedded asset file stem.
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryId::Nationality => "nationality",
            CategoryId::Age => "age",
            CategoryId::BodyType => "body_type",
            CategoryId::Role => "role",
            CategoryId::FaceShape => "face_shape",
            CategoryId::EyeGaze => "eye_gaze",
            CategoryId::HairColor => "hair_color",
            CategoryId::HairStyle => "hair_style",
            CategoryId::Appearance => "appearance",
            CategoryId::Clothing => "clothing",
            CategoryId::ClothingDetail => "clothing_detail",
            CategoryId::Accessories => "accessories",
            CategoryId::Action => "action",
            CategoryId::Hands => "hands",
            CategoryId::Mood => "mood",
            CategoryId::AnimalSpecies => "animal_species",
            CategoryId::AnimalFur => "animal_fur",
            CategoryId::VehicleType => "vehicle_type",
            CategoryId::VehicleColor => "vehicle_color",
            CategoryId::ChartType => "chart_type",
            CategoryId::InfographicStyle => "infographic_style",
            CategoryId::Composition => "composition",
            CategoryId::Camera => "camera",
            CategoryId::CameraMovement => "camera_movement",
            CategoryId::MotionStrength => "motion_strength",
            CategoryId::Environment => "environment",
            CategoryId::Era => "era",
            CategoryId::Lighting => "lighting",
            CategoryId::ColorPalette => "color_palette",
            CategoryId::ArtStyle => "art_style",
            CategoryId::AspectRatio => "aspect_ratio",
            CategoryId::Quality => "quality",
            CategoryId::Preservation => "preservation",
        }
    }

    pub fn scope(self) -> CategoryScope {
        match self {
            CategoryId::Nationality
            | CategoryId::Age
            | CategoryId::BodyType
            | CategoryId::Role
            | CategoryId::FaceShape
            | CategoryId::EyeGaze
            | CategoryId::HairColor
            | CategoryId::HairStyle
            | CategoryId::Appearance
            | CategoryId::Clothing
            | CategoryId::ClothingDetail
            | CategoryId::Accessories
            | CategoryId::Action
            | CategoryId::Hands
            | CategoryId::Mood
            | CategoryId::AnimalSpecies
            | CategoryId::AnimalFur
            | CategoryId::VehicleType
            | CategoryId::VehicleColor
            | CategoryId::ChartType
            | CategoryId::InfographicStyle => CategoryScope::Subject,
            _ => CategoryScope::Global,
        }
    }

    /// The normative field-shape table. State structs mirror this exactly.
    pub fn shape(self) -> FieldShape {
        match self {
            CategoryId::Nationality
            | CategoryId::Age
            | CategoryId::BodyType
            | CategoryId::Role
            | CategoryId::HairColor
            | CategoryId::HairStyle
            | CategoryId::Appearance
            | CategoryId::Clothing
            | CategoryId::ClothingDetail
            | CategoryId::Accessories
            | CategoryId::Mood
            | CategoryId::AnimalFur
            | CategoryId::Lighting
            | CategoryId::ArtStyle
            | CategoryId::Quality
            | CategoryId::Preservation => FieldShape::Multi,
            _ => FieldShape::Single,
        }
    }
}

/// Subject-scope categories that are meaningful for a subject type.
/// Fields outside this set are treated as empty regardless of stored
/// content (compose-time re-filtering, not trusted from upstream state).
pub fn allowed_subject_categories(subject_type: SubjectType) -> &'static [CategoryId] {
    match subject_type {
        SubjectType::Human => &[
            CategoryId::Nationality,
            CategoryId::Age,
            CategoryId::BodyType,
            CategoryId::Role,
            CategoryId::FaceShape,
            CategoryId::EyeGaze,
            CategoryId::HairColor,
            CategoryId::HairStyle,
            CategoryId::Appearance,
            CategoryId::Clothing,
            CategoryId::ClothingDetail,
            CategoryId::Accessories,
            CategoryId::Action,
            CategoryId::Hands,
            CategoryId::Mood,
        ],
        SubjectType::Animal => &[
            CategoryId::AnimalSpecies,
            CategoryId::AnimalFur,
            CategoryId::Appearance,
            CategoryId::Clothing,
            CategoryId::Accessories,
            CategoryId::Action,
            CategoryId::Mood,
        ],
        SubjectType::Vehicle => &[CategoryId::VehicleType, CategoryId::VehicleColor],
        SubjectType::Scenery => &[CategoryId::Mood],
        SubjectType::Infographic => &[CategoryId::ChartType, CategoryId::InfographicStyle],
    }
}

/// Human-centric framings that must never appear for scenery subjects.
pub const SCENERY_COMPOSITION_BLACKLIST: &[&str] =
    &["close-up portrait", "medium shot, upper body", "selfie angle"];

/// Portrait lenses that must never appear for scenery subjects.
pub const SCENERY_CAMERA_BLACKLIST: &[&str] = &["85mm lens", "telephoto lens"];

/// Moods that presuppose a sentient expression; suppressed for scenery.
pub const SCENERY_MOOD_BLACKLIST: &[&str] = &[
    "happy, smiling",
    "sad, crying",
    "angry",
    "shy, blushing",
    "seductive",
    "surprised",
    "confident",
    "bored, gloomy",
];

/// Typed view over the preservation catalog values, used by the editing
/// arbiter's gating table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreservationFlag {
    FacialFeatures,
    HairStyle,
    Clothing,
    BackgroundEnvironment,
    ImageComposition,
    ColorPalette,
    LightingConditions,
}

impl PreservationFlag {
    /// Catalog `value` string this flag corresponds to.
    pub fn value(self) -> &'static str {
        match self {
            PreservationFlag::FacialFeatures => "facial features",
            PreservationFlag::HairStyle => "hair style",
            PreservationFlag::Clothing => "clothing",
            PreservationFlag::BackgroundEnvironment => "background environment",
            PreservationFlag::ImageComposition => "image composition",
            PreservationFlag::ColorPalette => "color palette",
            PreservationFlag::LightingConditions => "lighting conditions",
        }
    }
}

/// One option in a category: a stable value plus a label carrying the
/// localized gloss, with optional gender constraint and image hint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionRecord {
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A loaded catalog entry: a category id with its ordered option list.
#[derive(Debug, Clone)]
pub struct CategoryEntry {
    pub id: CategoryId,
    pub options: Vec<OptionRecord>,
}

impl CategoryEntry {
    pub fn option(&self, value: &str) -> Option<&OptionRecord> {
        self.options.iter().find(|o| o.value == value)
    }
}
