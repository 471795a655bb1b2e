//! Domain layer: the category vocabulary, the selection state, and the
//! pure composition pipeline over them.

pub mod category;
pub mod compose;
pub mod emit;
pub mod error;
pub mod global;
pub mod output;
pub mod session;
pub mod subject;

pub use category::{CategoryEntry, CategoryId, CategoryScope, FieldShape, OptionRecord, PreservationFlag};
pub use error::AppError;
pub use global::{EditIntent, GlobalConfig, ReferenceImage, TaskMode};
pub use output::{Format, Language, PromptResult, Section, SectionKind};
pub use session::{Session, Theme};
pub use subject::{Gender, SubjectConfig, SubjectType};
