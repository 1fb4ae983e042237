use std::borrow::Cow;

use crate::NesfabError;
use crate::NesfabResult;

/// Read access to the lines of a text buffer.
///
/// The indentation engine only ever looks at whole lines and at the byte
/// offset where each line starts, so any host representation that can
/// answer these questions can be indented without copying.
pub trait LineSource {
	/// Number of addressable lines.
	fn line_count(&self) -> usize;

	/// The text of the line at `index`, without its `\n` terminator.
	fn line(&self, index: usize) -> Option<&str>;

	/// Byte offset of the first byte of the line at `index`, in the
	/// coordinate space the [`CommentOracle`](crate::CommentOracle) answers
	/// in.
	fn line_start(&self, index: usize) -> Option<usize>;

	/// Like [`LineSource::line`], but reports an out-of-bounds index as
	/// [`NesfabError::InvalidLineIndex`].
	fn checked_line(&self, index: usize) -> NesfabResult<&str> {
		self.line(index).ok_or(NesfabError::InvalidLineIndex {
			index,
			line_count: self.line_count(),
		})
	}
}

/// An immutable snapshot of source text split into `\n`-terminated lines.
///
/// A text that ends with a newline has a final empty line, which is where a
/// cursor sits after pressing return at the end of the buffer. A `\r` before
/// the newline stays part of the line; it is whitespace to every rule that
/// inspects lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBuffer<'a> {
	text: Cow<'a, str>,
	/// Byte offsets of the start of each line. `line_starts[0]` is always 0.
	line_starts: Vec<usize>,
}

impl<'a> SourceBuffer<'a> {
	pub fn new(text: impl Into<Cow<'a, str>>) -> Self {
		let text = text.into();
		let mut line_starts = vec![0];
		for (i, byte) in text.bytes().enumerate() {
			if byte == b'\n' {
				line_starts.push(i + 1);
			}
		}

		Self { text, line_starts }
	}

	/// Build a buffer from separate lines, joining them with `\n`.
	pub fn from_lines<I, S>(lines: I) -> SourceBuffer<'static>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let joined = lines
			.into_iter()
			.map(|line| line.as_ref().to_owned())
			.collect::<Vec<_>>()
			.join("\n");

		SourceBuffer::new(joined)
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
		(0..self.line_count()).filter_map(|index| self.line(index))
	}

	/// The index of the line containing the byte `offset`. Offsets past the
	/// end of the text resolve to the last line.
	pub fn line_of_offset(&self, offset: usize) -> usize {
		match self.line_starts.binary_search(&offset) {
			Ok(exact) => exact,
			Err(insert) => insert.saturating_sub(1),
		}
	}
}

impl LineSource for SourceBuffer<'_> {
	fn line_count(&self) -> usize {
		self.line_starts.len()
	}

	fn line(&self, index: usize) -> Option<&str> {
		let start = *self.line_starts.get(index)?;
		let end = self
			.line_starts
			.get(index + 1)
			.map_or(self.text.len(), |next| next - 1);

		self.text.get(start..end)
	}

	fn line_start(&self, index: usize) -> Option<usize> {
		self.line_starts.get(index).copied()
	}
}

/// Count the columns taken by the leading whitespace of `line`.
///
/// A tab advances to the next multiple of `tab_width`; every other
/// indentation character is one column wide. Line terminators such as a
/// kept `\r` never count.
pub fn indentation_width(line: &str, tab_width: usize) -> usize {
	let tab_width = tab_width.max(1);
	line.chars()
		.take_while(|ch| is_indentation_char(*ch))
		.fold(0, |column, ch| {
			if ch == '\t' {
				(column / tab_width + 1) * tab_width
			} else {
				column + 1
			}
		})
}

/// Byte length of the leading whitespace of `line`, stopping before any
/// line terminator.
pub(crate) fn indentation_prefix_len(line: &str) -> usize {
	line.len() - line.trim_start_matches(is_indentation_char).len()
}

fn is_indentation_char(ch: char) -> bool {
	ch.is_whitespace() && !matches!(ch, '\r' | '\n')
}
