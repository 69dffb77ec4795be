mod cli;
mod repl;
mod rlpl;

use std::{path::PathBuf, process::ExitCode, rc::Rc, time::Instant};

use clap::Parser;
use cli::{print_colourful_prefix, print_error, print_failed, print_finished, print_interrupted, print_running};
use pyggy_core::{
    environment::prelude::{SymbolTable, Value},
    interpreter::prelude::{run_file, run_source, Context},
    utils::prelude::{Error, Source, Warning, WarningEmitterIO},
};
use termcolor::Color;

#[derive(Parser)]
#[command(version, about = "Interpreter for the Pyggy scripting language")]
enum Command {
    /// Runs a program file
    Run {
        /// Path of source file
        path: PathBuf,
        /// Do not print status lines
        #[arg(short, long, default_value_t = false)]
        quiet: bool,
    },
    /// Runs a program passed as an argument
    Eval {
        /// Program text
        code: String,
    },
    /// Runs Read Eval Print Loop
    Repl,
    /// Runs Read Lex Print Loop
    Rlpl,
}

fn main() -> ExitCode {
    if let Err(err) = ctrlc::set_handler(|| {
        print_interrupted();
        std::process::exit(130);
    }) {
        print_colourful_prefix("Warning", Color::Yellow, &format!("Ctrl-C handler not installed: {err}"));
    }

    let context = Context::console(Rc::new(ConsoleWarningEmitter));

    match Command::parse() {
        Command::Run { path, quiet } => {
            if !quiet {
                print_running(&path.display().to_string());
            }

            let start = Instant::now();
            let result = run_file(&path, &context);

            finish(result, start, quiet)
        },
        Command::Eval { code } => {
            let mut table = SymbolTable::new();
            let start = Instant::now();
            let result = run_source(Source::new("<eval>", code), &context, &mut table)
                .map_err(Error::from);

            finish(result, start, true)
        },
        Command::Repl => exit_code(repl::start(&context)),
        Command::Rlpl => exit_code(rlpl::start()),
    }
}

fn finish(result: Result<Option<Value>, Error>, start: Instant, quiet: bool) -> ExitCode {
    match result {
        Ok(value) => {
            if let Some(value) = value {
                println!("{value}");
            }

            if !quiet {
                print_finished(Instant::now() - start);
            }

            ExitCode::SUCCESS
        },
        Err(err) => {
            print_error(&err);

            if !quiet {
                print_failed(Instant::now() - start);
            }

            ExitCode::FAILURE
        },
    }
}

fn exit_code(result: std::io::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&Error::StdIo { path: "<stdin>".into(), err: err.kind() });
            ExitCode::FAILURE
        },
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ConsoleWarningEmitter;

impl WarningEmitterIO for ConsoleWarningEmitter {
    fn emit_warning(&self, warning: Warning) {
        let buffer_writer = crate::cli::stderr_buffer_writer();
        let mut buffer = buffer_writer.buffer();
        warning.pretty(&mut buffer);
        buffer_writer
            .print(&buffer)
            .expect("Writing warning to stderr");
    }
}
