use thiserror::Error;

use crate::corpus::DocId;

#[derive(Error, Debug)]
pub enum ScreenError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Document not found: {0}")]
    DocumentNotFound(DocId),
}

pub type Result<T> = std::result::Result<T, ScreenError>;
