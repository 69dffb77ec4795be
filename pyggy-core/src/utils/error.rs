use std::path::PathBuf;

use termcolor::Buffer;
use thiserror::Error;

use crate::interpreter::prelude::EvalError;
use super::diagnostic::{Diagnostic, Label, Level, Location};

#[derive(Debug, Error, Clone)]
pub enum Error {
    #[error("failed to run program")]
    Eval {
        error: EvalError
    },
    #[error("IO operation failed")]
    StdIo {
        path: PathBuf,
        err: std::io::ErrorKind
    }
}

impl From<EvalError> for Error {
    fn from(error: EvalError) -> Self {
        Self::Eval { error }
    }
}

impl Error {
    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        self.pretty(&mut nocolor);
        String::from_utf8(nocolor.into_inner()).expect("Error printing produced invalid utf8")
    }

    pub fn pretty(&self, buf: &mut Buffer) {
        use std::io::Write;

        for diagnostic in self.to_diagnostics() {
            diagnostic.write(buf);
            writeln!(buf).expect("write new line diagnostic");
        }
    }

    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            Error::Eval { error } => {
                let (label, extra) = error.details();

                vec![Diagnostic {
                    title: format!("{}: {}", error.title(), error.error),
                    text: extra.join("\n"),
                    level: Level::Error,
                    location: Some(Location {
                        source: &error.src,
                        label: Label::new(label, error.span),
                        extra_labels: vec![],
                    }),
                }]
            },
            Error::StdIo { path, err } => {
                vec![Diagnostic {
                    title: "Standard IO error".into(),
                    text: format!("{}: {err}", path.display()),
                    level: Level::Error,
                    location: None,
                }]
            }
        }
    }
}
