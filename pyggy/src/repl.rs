use std::io::Write;

use pyggy_core::{
    environment::prelude::SymbolTable,
    interpreter::prelude::{run_source, Context},
    utils::prelude::{Error, Source},
};

use crate::cli::print_error;

const PROMPT: &str = ">> ";

/// Globals and functions survive from one line to the next.
pub fn start(context: &Context) -> std::io::Result<()> {
	let stdin = std::io::stdin();
	let mut table = SymbolTable::new();

	loop {
		let mut input = String::from("");

		print!("{}", PROMPT);
		std::io::stdout().flush()?;

		if stdin.read_line(&mut input)? == 0 {
			return Ok(());
		}

		if let Some('\n') = input.chars().next_back() {
			input.pop();
		}
		if let Some('\r') = input.chars().next_back() {
			input.pop();
		}

		match input.as_str() {
			"" => {},
			".exit" => return Ok(()),
			_ => {
				match run_source(Source::new("<repl>", input.clone()), context, &mut table) {
					Ok(Some(value)) => println!("{value}"),
					Ok(None) => {},
					Err(err) => print_error(&Error::from(err)),
				}
			}
		}
	}
}
