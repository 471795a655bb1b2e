//! Output-side vocabulary: languages, formats, and the sectioned result
//! handed to the UI shell.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::AppError;

/// Supported output languages. `En` is the canonical representation all
/// catalog values are authored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Zh,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    /// Separator between resolved terms within one prompt.
    pub fn separator(self) -> &'static str {
        match self {
            Language::En => ", ",
            Language::Zh => "，",
        }
    }

    /// Conjunction between independent subject phrases.
    pub fn conjunction(self) -> &'static str {
        match self {
            Language::En => " AND ",
            Language::Zh => "和",
        }
    }
}

impl FromStr for Language {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::En),
            "zh" => Ok(Language::Zh),
            other => Err(AppError::UnknownLanguage(other.to_string())),
        }
    }
}

/// The four serialization formats sharing one field set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Text,
    Markdown,
    Json,
    Yaml,
}

impl Format {
    pub fn as_str(self) -> &'static str {
        match self {
            Format::Text => "text",
            Format::Markdown => "markdown",
            Format::Json => "json",
            Format::Yaml => "yaml",
        }
    }
}

impl FromStr for Format {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Format::Text),
            "markdown" => Ok(Format::Markdown),
            "json" => Ok(Format::Json),
            "yaml" => Ok(Format::Yaml),
            other => Err(AppError::UnknownFormat(other.to_string())),
        }
    }
}

/// What a section of the result describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Subject,
    Global,
    Negative,
    Reference,
}

/// A labeled content fragment of the final result, used for structured
/// rendering and UI highlighting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SectionKind,
    pub label: String,
    pub content: String,
}

/// Final output of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptResult {
    pub full_text: String,
    pub sections: Vec<Section>,
}
