pub use codespan_reporting::diagnostic::{LabelStyle, Severity};
use codespan_reporting::{diagnostic::Label as CodespanLabel, files::SimpleFile};
use termcolor::Buffer;

use super::{source::Source, src_span::SrcSpan};

pub enum Level {
    Warning,
    Error,
}

impl From<&Level> for Severity {
    fn from(level: &Level) -> Self {
        match level {
            Level::Error => Severity::Error,
            Level::Warning => Severity::Warning,
        }
    }
}

pub struct Label {
    pub text: Option<String>,
    pub span: SrcSpan
}

impl Label {
    pub fn new(text: impl Into<String>, span: SrcSpan) -> Self {
        Self { text: Some(text.into()), span }
    }

    pub fn bare(span: SrcSpan) -> Self {
        Self { text: None, span }
    }

    fn to_codespan_label(&self, style: LabelStyle, len: usize) -> CodespanLabel<()> {
        // Clamp so a stale span never makes codespan panic on a shorter text.
        let start = (self.span.start as usize).min(len);
        let end = (self.span.end as usize).clamp(start, len);
        let label = CodespanLabel::new(style, (), start..end);

        match &self.text {
            None => label,
            Some(text) => label.with_message(text.clone()),
        }
    }
}

pub struct Location<'a> {
    pub source: &'a Source,
    pub label: Label,
    pub extra_labels: Vec<Label>,
}

pub struct Diagnostic<'a> {
    pub title: String,
    pub text: String,
    pub level: Level,
    pub location: Option<Location<'a>>
}

impl<'a> Diagnostic<'a> {
    pub fn write(&self, buf: &mut Buffer) {
        use std::io::Write;

        match &self.location {
            Some(location) => self.write_span(location, buf),
            None => self.write_title(buf),
        }

        if !self.text.is_empty() {
            writeln!(buf, "{}", self.text).expect("text write")
        }
    }

    fn write_span(&self, location: &Location, buf: &mut Buffer) {
        let source = location.source;
        let file = SimpleFile::new(source.path().display().to_string(), source.text());
        let len = source.text().len();

        let labels: Vec<CodespanLabel<()>> = std::iter::once(location.label.to_codespan_label(LabelStyle::Primary, len))
            .chain(location.extra_labels.iter()
                .map(|label| label.to_codespan_label(LabelStyle::Secondary, len)))
            .collect();

        let diagnostic = codespan_reporting::diagnostic::Diagnostic::new(Severity::from(&self.level))
            .with_message(&self.title)
            .with_labels(labels);

        let config = codespan_reporting::term::Config::default();
        codespan_reporting::term::emit(buf, &config, &file, &diagnostic)
            .expect("write_diagnostic");
    }

    fn write_title(&self, buf: &mut Buffer) {
        use std::io::Write;
        use termcolor::{Color, ColorSpec, WriteColor};

        let (kind, colour) = match self.level {
            Level::Error => ("error", Color::Red),
            Level::Warning => ("warning", Color::Yellow),
        };

        buf.set_color(ColorSpec::new().set_bold(true).set_fg(Some(colour)))
            .expect("write_title_color1");
        write!(buf, "{kind}").expect("write_title_kind");

        buf.set_color(ColorSpec::new().set_bold(true))
            .expect("write_title_color2");
        write!(buf, ": {}\n\n", self.title).expect("write_title_title");

        buf.set_color(&ColorSpec::new())
            .expect("write_title_reset");
    }
}
