use std::{collections::HashMap, rc::Rc};

use crate::interpreter::prelude::EvalErrorType;

use super::prelude::{Binding, BindingKind, FunctionBody, FunctionDef, Value};

/// A single flat namespace shared by variables and functions.
///
/// There is no parent table: every function call gets a brand new one that
/// only holds its arguments.
#[derive(Default, Debug, Clone)]
pub struct SymbolTable {
    store: HashMap<String, Binding>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            store: HashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.store.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.store.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns the binding that was replaced, if any.
    pub fn set_value(&mut self, name: impl Into<String>, value: Value) -> Option<Binding> {
        self.store.insert(name.into(), Binding::Value(value))
    }

    pub fn get_value(&self, name: &str) -> Result<Value, EvalErrorType> {
        match self.store.get(name) {
            Some(Binding::Value(value)) => Ok(*value),
            Some(Binding::Function(_)) | None => Err(EvalErrorType::UndefinedName {
                name: name.to_string(),
                expected: BindingKind::Value,
            }),
        }
    }

    /// Returns the binding that was replaced, if any.
    pub fn set_function(
        &mut self,
        name: impl Into<String>,
        params: Vec<String>,
        body: FunctionBody,
    ) -> Option<Binding> {
        let name = name.into();
        let function = FunctionDef { name: name.clone(), params, body };

        self.store.insert(name, Binding::Function(Rc::new(function)))
    }

    pub fn get_function(&self, name: &str) -> Result<Rc<FunctionDef>, EvalErrorType> {
        match self.store.get(name) {
            Some(Binding::Function(function)) => Ok(function.clone()),
            Some(Binding::Value(_)) | None => Err(EvalErrorType::UndefinedName {
                name: name.to_string(),
                expected: BindingKind::Function,
            }),
        }
    }
}
