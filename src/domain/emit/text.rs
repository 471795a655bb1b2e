//! Plain-text emitter: the form pasted straight into a generative model.

use crate::domain::compose::arbiter::InstructionSet;
use crate::domain::compose::composer::Composition;
use crate::domain::global::{GlobalConfig, TaskMode};
use crate::domain::output::Language;

pub fn render(
    composition: &Composition,
    instructions: Option<&InstructionSet>,
    global: &GlobalConfig,
    language: Language,
) -> String {
    let mut out = match instructions {
        Some(set) => set.block(),
        None => composition.parts.join(language.separator()),
    };

    let urls = || {
        global
            .reference_images
            .iter()
            .map(|image| image.url.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    if !global.reference_images.is_empty() {
        match global.task_mode {
            TaskMode::Generation => {
                out.push_str(&format!("\n\n[References: {}]", urls()));
            }
            TaskMode::Editing => {
                out.push_str(&format!("\n\n[Inputs: {}]", urls()));
            }
            TaskMode::VideoGeneration => {}
        }
    }

    let negative = global.effective_negative();
    if !negative.is_empty() {
        out.push_str(&format!("\n\n--no {negative}"));
    }
    out
}
