use std::{
    io::{IsTerminal, Write},
    time::Duration,
};
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

use pyggy_core::utils::prelude::Error;

pub(crate) fn print_running(text: &str) {
    print_colourful_prefix("Running", Color::Green, text)
}

pub(crate) fn print_finished(duration: Duration) {
    print_colourful_prefix("Finished", Color::Green, &format!("in {}", seconds(duration)))
}

pub(crate) fn print_failed(duration: Duration) {
    print_colourful_prefix("Failed", Color::Red, &format!("after {}", seconds(duration)))
}

pub(crate) fn print_interrupted() {
    print_colourful_prefix("Interrupted", Color::Yellow, "by user")
}

pub fn seconds(duration: Duration) -> String {
    format!("{:.2}s", duration.as_millis() as f32 / 1000.)
}

pub fn print_colourful_prefix(prefix: &str, color: Color, text: &str) {
    let buffer_writer = stderr_buffer_writer();
    let mut buffer = buffer_writer.buffer();
    buffer
        .set_color(
            ColorSpec::new()
                .set_intense(true)
                .set_bold(true)
                .set_fg(Some(color)),
        )
        .expect("print_colourful_prefix");
    write!(buffer, "{prefix: >11}").expect("print_colourful_prefix");
    buffer
        .set_color(&ColorSpec::new())
        .expect("print_colourful_prefix");
    writeln!(buffer, " {text}").expect("print_colourful_prefix");
    buffer_writer.print(&buffer).expect("print_colourful_prefix");
}

pub fn print_error(error: &Error) {
    let buffer_writer = stderr_buffer_writer();
    let mut buffer = buffer_writer.buffer();
    error.pretty(&mut buffer);
    buffer_writer
        .print(&buffer)
        .expect("Writing error to stderr");
}

pub fn stderr_buffer_writer() -> BufferWriter {
    BufferWriter::stderr(color_choice())
}

fn env_flag(name: &str) -> bool {
    if let Ok(value) = std::env::var(name) {
        !value.is_empty()
    } else {
        false
    }
}

fn color_choice() -> ColorChoice {
    if env_flag("NO_COLOR") {
        ColorChoice::Never
    } else if env_flag("FORCE_COLOR") {
        ColorChoice::Always
    } else if std::io::stderr().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}
