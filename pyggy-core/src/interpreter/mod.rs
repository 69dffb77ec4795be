pub mod context;
pub mod error;
pub mod expression;
pub mod interpreter;
pub mod statement;

pub mod prelude {
    pub use super::{
        context::*,
        error::*,
        interpreter::*,
        evaluate,
        run_file,
        run_source
    };
}

#[cfg(test)]
mod tests;

use std::path::Path;

use crate::{
    environment::prelude::{SymbolTable, Value},
    utils::prelude::{Error, Source},
};
use self::{context::Context, interpreter::{EvalResult, Interpreter}};

/// Runs a whole program against `table`, which keeps its bindings afterwards.
pub fn run_source(source: Source, context: &Context, table: &mut SymbolTable) -> EvalResult<Option<Value>> {
    let mut interpreter = Interpreter::for_source(source, table, context)?;
    interpreter.interpret()
}

/// Runs `src` in a fresh global table.
pub fn evaluate(src: &str, context: &Context) -> EvalResult<Option<Value>> {
    let mut table = SymbolTable::new();

    run_source(Source::anonymous(src), context, &mut table)
}

pub fn run_file(path: &Path, context: &Context) -> Result<Option<Value>, Error> {
    let text = std::fs::read_to_string(path)
        .map_err(|err| Error::StdIo { path: path.to_path_buf(), err: err.kind() })?;

    let mut table = SymbolTable::new();

    Ok(run_source(Source::new(path, text), context, &mut table)?)
}
