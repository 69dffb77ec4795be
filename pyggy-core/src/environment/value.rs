use std::{fmt::{Debug, Display}, rc::Rc};

use crate::{
    interpreter::prelude::EvalErrorType,
    utils::prelude::{Source, SrcSpan},
};

use super::io::InterpreterIO;

/// The only runtime data type: a double precision number.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Value(pub f64);

impl Value {
    /// `0` and `NaN` are falsy, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        self.0 != 0.0 && !self.0.is_nan()
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self(value as f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub type NativeCallable = fn(&[Value], &dyn InterpreterIO) -> Result<Option<Value>, EvalErrorType>;

#[derive(Clone)]
pub enum FunctionBody {
    /// A single statement, re-lexed from `span` on every call.
    Source {
        source: Source,
        span: SrcSpan,
    },
    Native {
        callable: NativeCallable,
        variadic: bool,
    },
}

impl Debug for FunctionBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FunctionBody::Source { source, span } => f.debug_struct("Source")
                .field("path", &source.path())
                .field("span", span)
                .finish(),
            FunctionBody::Native { variadic, .. } => f.debug_struct("Native")
                .field("variadic", variadic)
                .finish_non_exhaustive(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<String>,
    pub body: FunctionBody,
}

impl FunctionDef {
    /// Variadic natives accept any number of arguments.
    pub fn accepts(&self, count: usize) -> bool {
        match self.body {
            FunctionBody::Native { variadic: true, .. } => true,
            _ => self.params.len() == count,
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self.body, FunctionBody::Native { .. })
    }
}

#[derive(Debug, Clone)]
pub enum Binding {
    Value(Value),
    Function(Rc<FunctionDef>),
}

impl Binding {
    pub fn kind(&self) -> BindingKind {
        match self {
            Binding::Value(_) => BindingKind::Value,
            Binding::Function(_) => BindingKind::Function,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    Value,
    Function,
}

impl Display for BindingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BindingKind::Value => write!(f, "variable"),
            BindingKind::Function => write!(f, "function"),
        }
    }
}
