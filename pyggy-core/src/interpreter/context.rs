use std::rc::Rc;

use crate::{
    environment::prelude::{Builtins, ConsoleIO, InterpreterIO},
    utils::prelude::{NullWarningEmitterIO, WarningEmitter, WarningEmitterIO},
};

/// Everything an interpreter needs besides its own symbol table.
///
/// Built once at program start and shared by reference with every interpreter
/// spawned for a function call.
pub struct Context {
    pub builtins: Builtins,
    pub io: Rc<dyn InterpreterIO>,
    pub warnings: WarningEmitter,
}

impl Context {
    pub fn new(io: Rc<dyn InterpreterIO>, warnings: Rc<dyn WarningEmitterIO>) -> Self {
        Self {
            builtins: Builtins::standard(),
            io,
            warnings: WarningEmitter::new(warnings),
        }
    }

    pub fn console(warnings: Rc<dyn WarningEmitterIO>) -> Self {
        Self::new(Rc::new(ConsoleIO), warnings)
    }

    pub fn with_io(io: Rc<dyn InterpreterIO>) -> Self {
        Self::new(io, Rc::new(NullWarningEmitterIO))
    }
}
