use thiserror::Error;

use crate::{
    environment::prelude::BindingKind,
    lexer::prelude::{LexicalError, Token},
    utils::prelude::{Source, SrcSpan},
};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvalErrorType {
    #[error("{error}")]
    Lex { error: LexicalError },
    #[error("unexpected {}", .token.describe())]
    UnexpectedToken {
        token: Token,
        expected: Vec<String>,
    },
    #[error("unexpected end of input")]
    UnexpectedEof { expected: Vec<String> },
    #[error("{expected} `{name}` is not defined")]
    UndefinedName {
        name: String,
        expected: BindingKind,
    },
    #[error("function `{name}` takes {expected} argument(s) but {got} were given")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("division by zero")]
    DivisionByZero,
    #[error("expression does not produce a value")]
    NoValue,
    #[error("parameter `{name}` is declared more than once")]
    DuplicateParameter { name: String },
    #[error("`{line}` is not a number")]
    InvalidInput { line: String },
    #[error("IO operation failed: {message}")]
    Io { message: String },
}

/// A fatal error, located in the source it happened in.
///
/// Errors raised inside a function body point into the body's declaring
/// source, not the caller's.
#[derive(Debug, Error, Clone)]
#[error("{error}")]
pub struct EvalError {
    pub error: EvalErrorType,
    pub span: SrcSpan,
    pub src: Source,
}

impl EvalError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            EvalErrorType::Lex { error } => error.details(),
            EvalErrorType::UnexpectedToken { token, expected } => {
                let messages = std::iter::once(format!("Found {}, expected one of: ", token.describe()))
                    .chain(expected.iter().map(|s| format!("- {s}")))
                    .collect();

                ("Not expected this", messages)
            },
            EvalErrorType::UnexpectedEof { expected } => {
                let messages = std::iter::once("Expected one of: ".to_string())
                    .chain(expected.iter().map(|s| format!("- {s}")))
                    .collect();

                ("Unexpected end of input", messages)
            },
            EvalErrorType::UndefinedName { name, expected } => (
                "Not defined here",
                vec![format!("No {expected} named `{name}` is visible. Functions only see their own parameters.")],
            ),
            EvalErrorType::ArityMismatch { name, expected, got } => (
                "Wrong number of arguments",
                vec![format!("`{name}` expects {expected}, got {got}")],
            ),
            EvalErrorType::DivisionByZero => ("Division by zero", vec![]),
            EvalErrorType::NoValue => (
                "This has no value",
                vec!["Function declarations and calls of functions that do not produce a value cannot be used as numbers".into()],
            ),
            EvalErrorType::DuplicateParameter { name } => (
                "Duplicate parameter",
                vec![format!("`{name}` already names a parameter of this function")],
            ),
            EvalErrorType::InvalidInput { line } => (
                "Input is not a number",
                vec![format!("Read `{line}`")],
            ),
            EvalErrorType::Io { message } => ("IO failure", vec![message.clone()]),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.error {
            EvalErrorType::Lex { .. } => "Lexical error",
            EvalErrorType::UnexpectedToken { .. }
            | EvalErrorType::UnexpectedEof { .. }
            | EvalErrorType::DuplicateParameter { .. } => "Syntax error",
            EvalErrorType::UndefinedName { .. } => "Undefined name",
            EvalErrorType::ArityMismatch { .. } => "Arity mismatch",
            EvalErrorType::DivisionByZero
            | EvalErrorType::NoValue
            | EvalErrorType::InvalidInput { .. }
            | EvalErrorType::Io { .. } => "Runtime error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeWarning {
    /// An assignment replaced a function binding.
    FunctionShadowed {
        name: String,
        location: SrcSpan,
    },
    /// A function declaration replaced an existing binding.
    Redefinition {
        name: String,
        previous: BindingKind,
        location: SrcSpan,
    },
    /// Statements after a top-level `return`.
    UnreachableCode { location: SrcSpan },
}

impl RuntimeWarning {
    pub fn location(&self) -> SrcSpan {
        match self {
            RuntimeWarning::FunctionShadowed { location, .. }
            | RuntimeWarning::Redefinition { location, .. }
            | RuntimeWarning::UnreachableCode { location } => *location,
        }
    }
}
