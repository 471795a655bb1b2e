use crate::domain::output::{Section, SectionKind};

/// Render the section list as a markdown digest: bold labels followed by
/// blockquoted content, with reference lists kept as plain bullet lists.
pub fn render(sections: &[Section]) -> String {
    sections
        .iter()
        .map(|section| {
            let body = match section.kind {
                SectionKind::Reference => section.content.clone(),
                _ => section
                    .content
                    .lines()
                    .map(|line| format!("> {line}"))
                    .collect::<Vec<_>>()
                    .join("\n"),
            };
            format!("**{}**\n{}", section.label, body)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
