//! Session state and its transitions.
//!
//! A [`Session`] is the full selection state the engine composes from:
//! the subject list plus the global configuration. Transitions mutate the
//! raw value strings only; all filtering (gender, subject type, task mode)
//! happens again at compose time, so stale values left behind by a
//! transition are harmless.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::category::{CategoryId, CategoryScope};
use super::compose::category_in_mode;
use super::global::{EditIntent, GlobalConfig, ReferenceImage, TaskMode};
use super::subject::{FieldMut, Gender, SubjectConfig, SubjectType};
use crate::ports::CategoryCatalog;

/// Keyword-driven theme for whole-session randomization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Cyberpunk,
    Fantasy,
    Vintage,
    Portrait,
}

impl Theme {
    /// Substrings matched case-insensitively against option values. An
    /// option matching any keyword is preferred; categories with no match
    /// fall back to the full option set.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Theme::Cyberpunk => &[
                "cyberpunk", "neon", "mechanical", "tech", "futuristic", "blue", "purple",
                "night", "city", "leather",
            ],
            Theme::Fantasy => &[
                "wizard", "elf", "magic", "wood", "forest", "robe", "medieval", "castle",
                "armor", "sword",
            ],
            Theme::Vintage => &["1920s", "1980s", "retro", "film", "grain", "sepia", "faded", "old"],
            Theme::Portrait => &["portrait", "studio", "lighting", "bokeh", "85mm", "sharp", "clean"],
        }
    }
}

/// The complete selection state for one composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub subjects: Vec<SubjectConfig>,
    pub global: GlobalConfig,
}

impl Default for Session {
    /// A fresh session: one female human subject, generation mode, the
    /// default quality tags and negative prompt preloaded.
    fn default() -> Self {
        let mut subject = SubjectConfig::new("subject-1", SubjectType::Human);
        subject.gender = Some(Gender::Female);
        Self { subjects: vec![subject], global: GlobalConfig::default() }
    }
}

impl Session {
    /// Toggle a value on a subject-scope field: selecting an already
    /// selected value deselects it. Out-of-range indexes and global-scope
    /// ids are ignored.
    pub fn toggle_subject_value(&mut self, index: usize, id: CategoryId, value: &str) {
        if let Some(subject) = self.subjects.get_mut(index)
            && let Some(field) = subject.field_mut(id)
        {
            toggle_field(field, value);
        }
    }

    /// Toggle a value on a global-scope field.
    pub fn toggle_global_value(&mut self, id: CategoryId, value: &str) {
        if let Some(field) = self.global.field_mut(id) {
            toggle_field(field, value);
        }
    }

    /// Force-set a subject field, replacing any previous selection. Multi
    /// fields collapse to the single given value.
    pub fn replace_subject_value(&mut self, index: usize, id: CategoryId, value: &str) {
        if let Some(subject) = self.subjects.get_mut(index)
            && let Some(field) = subject.field_mut(id)
        {
            replace_field(field, value);
        }
    }

    /// Force-set a global field, replacing any previous selection.
    pub fn replace_global_value(&mut self, id: CategoryId, value: &str) {
        if let Some(field) = self.global.field_mut(id) {
            replace_field(field, value);
        }
    }

    /// Switch task mode. Entering editing mode deselects every subject's
    /// gender so edit instructions stay gender-neutral by default.
    pub fn set_task_mode(&mut self, mode: TaskMode) {
        self.global.task_mode = mode;
        if mode == TaskMode::Editing {
            for subject in &mut self.subjects {
                subject.gender = None;
            }
        }
    }

    /// Toggle a subject's gender: selecting the current gender deselects
    /// it entirely.
    pub fn toggle_gender(&mut self, index: usize, gender: Gender) {
        if let Some(subject) = self.subjects.get_mut(index) {
            subject.gender = if subject.gender == Some(gender) { None } else { Some(gender) };
        }
    }

    pub fn set_interaction(&mut self, text: impl Into<String>) {
        self.global.interaction = text.into();
    }

    pub fn set_negative_prompt(&mut self, text: impl Into<String>) {
        self.global.negative_prompt = text.into();
    }

    pub fn toggle_use_negative(&mut self) {
        self.global.use_negative_prompt = !self.global.use_negative_prompt;
    }

    /// Toggle one comma-separated tag inside the free-text negative
    /// prompt, normalizing separators to `", "` as a side effect.
    pub fn toggle_negative_tag(&mut self, tag: &str) {
        let mut tags: Vec<&str> = self
            .global
            .negative_prompt
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();
        if let Some(position) = tags.iter().position(|t| *t == tag) {
            tags.remove(position);
        } else {
            tags.push(tag);
        }
        self.global.negative_prompt = tags.join(", ");
    }

    /// Prepend a reference image so the newest upload leads the list.
    pub fn add_reference_image(&mut self, image: ReferenceImage) {
        self.global.reference_images.insert(0, image);
    }

    pub fn set_reference_intent(&mut self, id: &str, intent: EditIntent) {
        if let Some(image) = self.global.reference_images.iter_mut().find(|i| i.id == id) {
            image.intent = intent;
        }
    }

    pub fn remove_reference_image(&mut self, id: &str) {
        self.global.reference_images.retain(|i| i.id != id);
    }

    /// Append a subject with a fresh `subject-N` id.
    pub fn add_subject(&mut self, subject_type: SubjectType) -> &mut SubjectConfig {
        let next = self
            .subjects
            .iter()
            .filter_map(|s| s.id.strip_prefix("subject-"))
            .filter_map(|n| n.parse::<usize>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        self.subjects.push(SubjectConfig::new(format!("subject-{next}"), subject_type));
        self.subjects.last_mut().unwrap_or_else(|| unreachable!("just pushed"))
    }

    pub fn remove_subject(&mut self, id: &str) {
        self.subjects.retain(|s| s.id != id);
    }

    /// Reset every selection while keeping task mode, subject identities,
    /// and genders. The negative prompt is emptied, not restored to the
    /// default.
    pub fn clear(&mut self) {
        for subject in &mut self.subjects {
            subject.clear_attributes();
        }
        let mode = self.global.task_mode;
        self.global = GlobalConfig::default();
        self.global.task_mode = mode;
        self.global.negative_prompt = String::new();
    }

    /// Fill every selectable field with one random catalog option,
    /// replacing current selections.
    ///
    /// A theme narrows each category to options whose value contains one
    /// of its keywords; categories with no themed option fall back to the
    /// full set. Gender-constrained options are filtered against the
    /// subject's gender, and mode-excluded categories are skipped.
    pub fn randomize_all<R: Rng + ?Sized>(
        &mut self,
        catalog: &dyn CategoryCatalog,
        theme: Option<Theme>,
        rng: &mut R,
    ) {
        let mode = self.global.task_mode;
        for id in CategoryId::ALL {
            if !category_in_mode(id, mode)
                || matches!(id, CategoryId::Quality | CategoryId::Preservation)
            {
                continue;
            }
            match id.scope() {
                CategoryScope::Subject => {
                    for index in 0..self.subjects.len() {
                        let gender = self.subjects[index].gender;
                        if let Some(value) = pick(catalog, id, gender, theme, rng) {
                            self.replace_subject_value(index, id, &value);
                        }
                    }
                }
                CategoryScope::Global => {
                    if let Some(value) = pick(catalog, id, None, theme, rng) {
                        self.replace_global_value(id, &value);
                    }
                }
            }
        }
    }
}

fn pick<R: Rng + ?Sized>(
    catalog: &dyn CategoryCatalog,
    id: CategoryId,
    gender: Option<Gender>,
    theme: Option<Theme>,
    rng: &mut R,
) -> Option<String> {
    let entry = catalog.entry(id)?;
    let valid: Vec<&str> = entry
        .options
        .iter()
        .filter(|option| match (option.gender, gender) {
            (Some(required), Some(selected)) => required == selected,
            _ => true,
        })
        .map(|option| option.value.as_str())
        .collect();

    if let Some(theme) = theme {
        let themed: Vec<&str> = valid
            .iter()
            .copied()
            .filter(|value| {
                let lowered = value.to_lowercase();
                theme.keywords().iter().any(|keyword| lowered.contains(keyword))
            })
            .collect();
        if !themed.is_empty() {
            return themed.choose(rng).map(|v| v.to_string());
        }
    }
    valid.choose(rng).map(|v| v.to_string())
}

fn toggle_field(field: FieldMut<'_>, value: &str) {
    match field {
        FieldMut::Single(slot) => {
            if slot.as_str() == value {
                slot.clear();
            } else {
                *slot = value.to_string();
            }
        }
        FieldMut::Multi(values) => {
            if let Some(position) = values.iter().position(|v| v == value) {
                values.remove(position);
            } else {
                values.push(value.to_string());
            }
        }
    }
}

fn replace_field(field: FieldMut<'_>, value: &str) {
    match field {
        FieldMut::Single(slot) => *slot = value.to_string(),
        FieldMut::Multi(values) => {
            values.clear();
            values.push(value.to_string());
        }
    }
}
