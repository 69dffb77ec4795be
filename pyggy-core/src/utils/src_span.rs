use std::{fmt::Display, ops::Range};

/// Byte offsets into a [`Source`](super::source::Source) text.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SrcSpan {
    pub start: u32,
    pub end: u32,
}

impl SrcSpan {
	pub fn from(start: u32, end: u32) -> Self {
		Self { start, end }
	}

	pub fn point(position: u32) -> Self {
		Self { start: position, end: position }
	}

	pub fn to(self, other: SrcSpan) -> Self {
		Self { start: self.start.min(other.start), end: self.end.max(other.end) }
	}

	pub fn is_empty(&self) -> bool {
		self.start >= self.end
	}

	pub fn range(&self) -> Range<usize> {
		(self.start as usize)..(self.end as usize)
	}
}

impl Display for SrcSpan {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}..{}", self.start, self.end)
	}
}
