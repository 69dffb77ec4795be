use std::{
    collections::VecDeque,
    io::{BufRead, Write},
    sync::{Arc, RwLock, RwLockWriteGuard},
};

use super::value::Value;

/// Output and input collaborators used by the `print` and `input` built-ins.
pub trait InterpreterIO {
    fn print(&self, values: &[Value]) -> std::io::Result<()>;

    /// Reads one line, without its line terminator.
    fn read_line(&self) -> std::io::Result<String>;
}

fn join(values: &[Value]) -> String {
    values.iter()
        .map(|value| value.to_string())
        .collect::<Vec<String>>()
        .join(" ")
}

#[derive(Debug, Clone, Copy)]
pub struct ConsoleIO;

impl InterpreterIO for ConsoleIO {
    fn print(&self, values: &[Value]) -> std::io::Result<()> {
        let mut stdout = std::io::stdout().lock();

        writeln!(stdout, "{}", join(values))?;
        stdout.flush()
    }

    fn read_line(&self) -> std::io::Result<String> {
        let mut line = String::new();

        if std::io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }

        if let Some('\n') = line.chars().next_back() {
            line.pop();
        }
        if let Some('\r') = line.chars().next_back() {
            line.pop();
        }

        Ok(line)
    }
}

/// Collects printed lines and serves queued input lines.
///
/// Clones share the same buffers, so a caller can keep one handle and give the
/// other to an interpreter.
#[derive(Debug, Default, Clone)]
pub struct BufferedIO {
    pub output: Arc<RwLock<Vec<String>>>,
    pub input: Arc<RwLock<VecDeque<String>>>,
}

impl BufferedIO {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let io = Self::new();
        io.push_input(lines);
        io
    }

    pub fn push_input<I, S>(&self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut input = write_lock(&self.input);
        input.extend(lines.into_iter().map(Into::into));
    }

    pub fn take(&self) -> Vec<String> {
        let mut output = write_lock(&self.output);
        std::mem::take(&mut *output)
    }

    pub fn reset(&self) {
        write_lock(&self.output).clear();
        write_lock(&self.input).clear();
    }
}

fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().expect("Buffer lock poisoned")
}

impl InterpreterIO for BufferedIO {
    fn print(&self, values: &[Value]) -> std::io::Result<()> {
        write_lock(&self.output).push(join(values));
        Ok(())
    }

    fn read_line(&self) -> std::io::Result<String> {
        write_lock(&self.input)
            .pop_front()
            .ok_or_else(|| std::io::ErrorKind::UnexpectedEof.into())
    }
}
