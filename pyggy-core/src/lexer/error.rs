use thiserror::Error;

use crate::utils::prelude::SrcSpan;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LexicalErrorType {
    #[error("invalid character `{tok}`")]
    InvalidCharacter { tok: char },
    #[error("number literal is too large")]
    NumberTooLarge,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("{error}")]
pub struct LexicalError {
    pub error: LexicalErrorType,
    pub location: SrcSpan
}

impl LexicalError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match self.error {
            LexicalErrorType::InvalidCharacter { tok } => {
                ("Unknown character", vec![format!("`{}` is not part of the language", tok.escape_default())])
            },
            LexicalErrorType::NumberTooLarge => {
                ("Number does not fit into a 64-bit integer", vec![])
            },
        }
    }
}
