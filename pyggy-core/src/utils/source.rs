use std::{
    fmt::Debug,
    path::{Path, PathBuf},
    rc::Rc,
};

use super::src_span::SrcSpan;

struct SourceFile {
    path: PathBuf,
    text: String,
}

/// Shared handle to a program text.
///
/// Function bodies keep a clone of the source they were declared in, so a body
/// can be lexed again long after the statement that declared it is gone.
#[derive(Clone)]
pub struct Source(Rc<SourceFile>);

impl Source {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self(Rc::new(SourceFile {
            path: path.into(),
            text: text.into(),
        }))
    }

    pub fn anonymous(text: impl Into<String>) -> Self {
        Self::new("<input>", text)
    }

    pub fn path(&self) -> &Path {
        &self.0.path
    }

    pub fn text(&self) -> &str {
        &self.0.text
    }

    pub fn len(&self) -> u32 {
        self.0.text.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.0.text.is_empty()
    }

    pub fn span(&self) -> SrcSpan {
        SrcSpan::from(0, self.len())
    }

    pub fn slice(&self, span: SrcSpan) -> &str {
        &self.0.text[span.range()]
    }

    pub fn ptr_eq(&self, other: &Source) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Characters of `span` paired with their absolute byte offsets.
    pub fn chars(&self, span: SrcSpan) -> SourceChars {
        SourceChars {
            source: self.clone(),
            position: span.start as usize,
            end: (span.end as usize).min(self.0.text.len()),
        }
    }
}

impl Debug for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Source")
            .field("path", &self.0.path)
            .field("len", &self.0.text.len())
            .finish()
    }
}

/// Owning char iterator over a range of a [`Source`].
#[derive(Debug, Clone)]
pub struct SourceChars {
    source: Source,
    position: usize,
    end: usize,
}

impl Iterator for SourceChars {
    type Item = (u32, char);

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.end {
            return None;
        }

        let ch = self.source.text()[self.position..self.end].chars().next()?;
        let position = self.position;
        self.position += ch.len_utf8();

        Some((position as u32, ch))
    }
}
