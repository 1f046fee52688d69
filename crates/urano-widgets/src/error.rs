use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard is not available: {0}")]
    Unavailable(String),
    #[error("clipboard rejected the text: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    #[error("duplicate entry id `{0}`")]
    DuplicateId(String),
    #[error("entry at index {index} has an empty id")]
    EmptyId { index: usize },
}
