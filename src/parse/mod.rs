pub mod classifier;
pub mod importer;

pub use classifier::{Classifier, LineAction};
pub use importer::parse_document;

/// Error type for document parsing. Every variant is fatal to the whole
/// parse attempt: no partial task list is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("document contains no tasks")]
    EmptyDocument,
    #[error("line {line}: {what} entry before any task: '{text}'")]
    OrphanContinuation {
        line: usize,
        what: &'static str,
        text: String,
    },
    #[error("line {line}: task name is empty")]
    EmptyTaskName { line: usize },
}
