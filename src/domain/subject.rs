//! Subject state: one described entity contributing its own attribute set
//! to the composition.

use serde::{Deserialize, Serialize};

use super::category::{CategoryId, CategoryScope};

/// Kind of entity a subject describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectType {
    Human,
    Animal,
    Vehicle,
    Scenery,
    Infographic,
}

impl SubjectType {
    pub fn as_str(self) -> &'static str {
        match self {
            SubjectType::Human => "human",
            SubjectType::Animal => "animal",
            SubjectType::Vehicle => "vehicle",
            SubjectType::Scenery => "scenery",
            SubjectType::Infographic => "infographic",
        }
    }
}

/// Subject gender, meaningful for human subjects only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
}

/// Read-only view of one attribute field, shaped per the category table.
#[derive(Debug, Clone, Copy)]
pub enum FieldRef<'a> {
    Single(&'a str),
    Multi(&'a [String]),
}

impl FieldRef<'_> {
    pub fn is_empty(&self) -> bool {
        match self {
            FieldRef::Single(v) => v.is_empty(),
            FieldRef::Multi(vs) => vs.iter().all(|v| v.is_empty()),
        }
    }
}

/// Mutable view of one attribute field, used by the session transitions.
#[derive(Debug)]
pub enum FieldMut<'a> {
    Single(&'a mut String),
    Multi(&'a mut Vec<String>),
}

/// Configuration for one rendered subject.
///
/// Fields hold raw catalog `value` strings; `""` / `[]` mean unset. Which
/// fields are meaningful is decided by the subject type's allowed-category
/// set at compose time, never by what happens to be stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectConfig {
    /// Opaque stable identity, reused as the section id.
    pub id: String,
    pub subject_type: SubjectType,
    pub gender: Option<Gender>,

    pub nationality: Vec<String>,
    pub age: Vec<String>,
    pub body_type: Vec<String>,
    pub role: Vec<String>,
    pub face_shape: String,
    pub eye_gaze: String,
    pub hair_color: Vec<String>,
    pub hair_style: Vec<String>,
    pub appearance: Vec<String>,
    pub clothing: Vec<String>,
    pub clothing_detail: Vec<String>,
    pub accessories: Vec<String>,
    pub action: String,
    pub hands: String,
    pub mood: Vec<String>,

    pub animal_species: String,
    pub animal_fur: Vec<String>,
    pub vehicle_type: String,
    pub vehicle_color: String,
    pub chart_type: String,
    pub infographic_style: String,
    /// Free-text topic for infographic subjects ("about <content>").
    pub content: String,
}

impl SubjectConfig {
    pub fn new(id: impl Into<String>, subject_type: SubjectType) -> Self {
        Self {
            id: id.into(),
            subject_type,
            gender: None,
            nationality: Vec::new(),
            age: Vec::new(),
            body_type: Vec::new(),
            role: Vec::new(),
            face_shape: String::new(),
            eye_gaze: String::new(),
            hair_color: Vec::new(),
            hair_style: Vec::new(),
            appearance: Vec::new(),
            clothing: Vec::new(),
            clothing_detail: Vec::new(),
            accessories: Vec::new(),
            action: String::new(),
            hands: String::new(),
            mood: Vec::new(),
            animal_species: String::new(),
            animal_fur: Vec::new(),
            vehicle_type: String::new(),
            vehicle_color: String::new(),
            chart_type: String::new(),
            infographic_style: String::new(),
            content: String::new(),
        }
    }

    /// Accessor registry for subject-scope categories.
    ///
    /// Returns `None` for global-scope ids; the shape of the returned view
    /// always matches `CategoryId::shape`.
    pub fn field(&self, id: CategoryId) -> Option<FieldRef<'_>> {
        if id.scope() != CategoryScope::Subject {
            return None;
        }
        Some(match id {
            CategoryId::Nationality => FieldRef::Multi(&self.nationality),
            CategoryId::Age => FieldRef::Multi(&self.age),
            CategoryId::BodyType => FieldRef::Multi(&self.body_type),
            CategoryId::Role => FieldRef::Multi(&self.role),
            CategoryId::FaceShape => FieldRef::Single(&self.face_shape),
            CategoryId::EyeGaze => FieldRef::Single(&self.eye_gaze),
            CategoryId::HairColor => FieldRef::Multi(&self.hair_color),
            CategoryId::HairStyle => FieldRef::Multi(&self.hair_style),
            CategoryId::Appearance => FieldRef::Multi(&self.appearance),
            CategoryId::Clothing => FieldRef::Multi(&self.clothing),
            CategoryId::ClothingDetail => FieldRef::Multi(&self.clothing_detail),
            CategoryId::Accessories => FieldRef::Multi(&self.accessories),
            CategoryId::Action => FieldRef::Single(&self.action),
            CategoryId::Hands => FieldRef::Single(&self.hands),
            CategoryId::Mood => FieldRef::Multi(&self.mood),
            CategoryId::AnimalSpecies => FieldRef::Single(&self.animal_species),
            CategoryId::AnimalFur => FieldRef::Multi(&self.animal_fur),
            CategoryId::VehicleType => FieldRef::Single(&self.vehicle_type),
            CategoryId::VehicleColor => FieldRef::Single(&self.vehicle_color),
            CategoryId::ChartType => FieldRef::Single(&self.chart_type),
            CategoryId::InfographicStyle => FieldRef::Single(&self.infographic_style),
            _ => unreachable!("scope already checked"),
        })
    }

    /// Mutable counterpart of [`SubjectConfig::field`].
    pub fn field_mut(&mut self, id: CategoryId) -> Option<FieldMut<'_>> {
        if id.scope() != CategoryScope::Subject {
            return None;
        }
        Some(match id {
            CategoryId::Nationality => FieldMut::Multi(&mut self.nationality),
            CategoryId::Age => FieldMut::Multi(&mut self.age),
            CategoryId::BodyType => FieldMut::Multi(&mut self.body_type),
            CategoryId::Role => FieldMut::Multi(&mut self.role),
            CategoryId::FaceShape => FieldMut::Single(&mut self.face_shape),
            CategoryId::EyeGaze => FieldMut::Single(&mut self.eye_gaze),
            CategoryId::HairColor => FieldMut::Multi(&mut self.hair_color),
            CategoryId::HairStyle => FieldMut::Multi(&mut self.hair_style),
            CategoryId::Appearance => FieldMut::Multi(&mut self.appearance),
            CategoryId::Clothing => FieldMut::Multi(&mut self.clothing),
            CategoryId::ClothingDetail => FieldMut::Multi(&mut self.clothing_detail),
            CategoryId::Accessories => FieldMut::Multi(&mut self.accessories),
            CategoryId::Action => FieldMut::Single(&mut self.action),
            CategoryId::Hands => FieldMut::Single(&mut self.hands),
            CategoryId::Mood => FieldMut::Multi(&mut self.mood),
            CategoryId::AnimalSpecies => FieldMut::Single(&mut self.animal_species),
            CategoryId::AnimalFur => FieldMut::Multi(&mut self.animal_fur),
            CategoryId::VehicleType => FieldMut::Single(&mut self.vehicle_type),
            CategoryId::VehicleColor => FieldMut::Single(&mut self.vehicle_color),
            CategoryId::ChartType => FieldMut::Single(&mut self.chart_type),
            CategoryId::InfographicStyle => FieldMut::Single(&mut self.infographic_style),
            _ => unreachable!("scope already checked"),
        })
    }

    /// Reset every attribute field, keeping id, type, and gender.
    pub fn clear_attributes(&mut self) {
        let keep = (self.id.clone(), self.subject_type, self.gender);
        *self = Self::new(keep.0, keep.1);
        self.gender = keep.2;
    }
}
