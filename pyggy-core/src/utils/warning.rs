use std::{rc::Rc, sync::{atomic::{AtomicUsize, Ordering}, Arc, RwLock}};

use termcolor::Buffer;

use crate::interpreter::prelude::RuntimeWarning;
use super::{
    diagnostic::{Diagnostic, Label, Level, Location},
    source::Source,
};

pub trait WarningEmitterIO {
    fn emit_warning(&self, warning: Warning);
}

#[derive(Debug, Clone, Copy)]
pub struct NullWarningEmitterIO;

impl WarningEmitterIO for NullWarningEmitterIO {
    fn emit_warning(&self, _warning: Warning) {}
}

#[derive(Debug, Default, Clone)]
pub struct VectorWarningEmitterIO {
    pub warnings: Arc<RwLock<Vec<Warning>>>
}

impl VectorWarningEmitterIO {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Warning> {
        let mut warnings = self.write_lock();
        std::mem::take(&mut *warnings)
    }

    pub fn reset(&self) {
        let mut warnings = self.write_lock();
        warnings.clear();
    }

    pub fn pop(&self) -> Option<Warning> {
        let mut warnings = self.write_lock();
        warnings.pop()
    }

    fn write_lock(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Warning>> {
        self.warnings.write().expect("Vector lock poisoned")
    }
}

impl WarningEmitterIO for VectorWarningEmitterIO {
    fn emit_warning(&self, warning: Warning) {
        let mut warnings = self.write_lock();

        warnings.push(warning);
    }
}

pub struct WarningEmitter {
    count: Arc<AtomicUsize>,
    emitter: Rc<dyn WarningEmitterIO>
}

impl WarningEmitter {
    pub fn new(emitter: Rc<dyn WarningEmitterIO>) -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
            emitter,
        }
    }

    pub fn reset_count(&self) {
        self.count.store(0, Ordering::Relaxed);
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    pub fn emit(&self, warning: Warning) {
        _ = self.count.fetch_add(1, Ordering::Relaxed);
        self.emitter.emit_warning(warning);
    }
}

#[derive(Debug, Clone)]
pub enum Warning {
    Runtime {
        source: Source,
        warning: RuntimeWarning
    }
}

impl Warning {
    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        self.pretty(&mut nocolor);
        String::from_utf8(nocolor.into_inner()).expect("Error printing produced invalid utf8")
    }

    pub fn pretty(&self, buf: &mut Buffer) {
        use std::io::Write;

        self.to_diagnostic().write(buf);
        buf.write_all(b"\n")
            .expect("error pretty buffer write space after");
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Warning::Runtime { source, warning } => {
                let (title, text, label) = match warning {
                    RuntimeWarning::FunctionShadowed { name, .. } => (
                        "Function shadowed",
                        format!("`{name}` no longer names a function after this assignment."),
                        Label::new("Replaces a function", warning.location()),
                    ),
                    RuntimeWarning::Redefinition { name, previous, .. } => (
                        "Redefinition",
                        format!("The previous {previous} `{name}` is overwritten."),
                        Label::new("Defined again here", warning.location()),
                    ),
                    RuntimeWarning::UnreachableCode { .. } => (
                        "Unreachable code",
                        "".into(),
                        Label::new("This code is never run", warning.location()),
                    ),
                };

                Diagnostic {
                    title: title.into(),
                    text,
                    level: Level::Warning,
                    location: Some(Location {
                        source,
                        label,
                        extra_labels: vec![]
                    }),
                }
            }
        }
    }
}
