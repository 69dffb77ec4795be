use std::{collections::HashMap, rc::Rc};

use crate::interpreter::prelude::EvalErrorType;

use super::{
    io::InterpreterIO,
    value::{FunctionBody, FunctionDef, NativeCallable, Value},
};

/// Read-only layer of native functions, consulted when a call misses the
/// current symbol table.
#[derive(Debug, Default, Clone)]
pub struct Builtins {
    functions: HashMap<String, Rc<FunctionDef>>,
}

impl Builtins {
    pub fn new() -> Self {
        Self::default()
    }

    /// `print` and `input`.
    pub fn standard() -> Self {
        let mut builtins = Self::new();

        builtins.register("print", true, print);
        builtins.register("input", false, input);

        builtins
    }

    /// Natives declare no parameters; a non-variadic native therefore only
    /// accepts zero arguments.
    pub fn register(&mut self, name: &str, variadic: bool, callable: NativeCallable) {
        let function = FunctionDef {
            name: name.to_string(),
            params: vec![],
            body: FunctionBody::Native { callable, variadic },
        };

        self.functions.insert(name.to_string(), Rc::new(function));
    }

    pub fn get(&self, name: &str) -> Option<Rc<FunctionDef>> {
        self.functions.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }
}

fn io_error(err: std::io::Error) -> EvalErrorType {
    EvalErrorType::Io { message: err.to_string() }
}

fn print(args: &[Value], io: &dyn InterpreterIO) -> Result<Option<Value>, EvalErrorType> {
    io.print(args).map_err(io_error)?;

    Ok(None)
}

fn input(_: &[Value], io: &dyn InterpreterIO) -> Result<Option<Value>, EvalErrorType> {
    let line = io.read_line().map_err(io_error)?;

    match line.trim().parse::<f64>() {
        Ok(value) => Ok(Some(Value(value))),
        Err(_) => Err(EvalErrorType::InvalidInput { line }),
    }
}
