use crate::LineSource;
use crate::NesfabResult;
use crate::buffer::indentation_width;
use crate::lexer::CommentOracle;

/// What a single line contributes to block structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
	/// Only whitespace.
	Blank,
	/// Starts with `//` or `/*`, or starts inside a comment opened on an
	/// earlier line.
	CommentOnly,
	/// Anything else.
	Source,
}

/// Stateless line-level questions about a buffer, answered with the help of
/// a [`CommentOracle`].
#[derive(Debug)]
pub struct LineClassifier<'b, B: ?Sized, O> {
	buffer: &'b B,
	oracle: O,
}

impl<'b, B, O> LineClassifier<'b, B, O>
where
	B: LineSource + ?Sized,
	O: CommentOracle,
{
	pub fn new(buffer: &'b B, oracle: O) -> Self {
		Self { buffer, oracle }
	}

	pub fn buffer(&self) -> &'b B {
		self.buffer
	}

	pub fn line_count(&self) -> usize {
		self.buffer.line_count()
	}

	pub fn classify(&self, index: usize) -> NesfabResult<LineKind> {
		let line = self.buffer.checked_line(index)?;
		let Some(column) = line.find(|ch: char| !ch.is_whitespace()) else {
			return Ok(LineKind::Blank);
		};

		let rest = &line[column..];
		if rest.starts_with("//") || rest.starts_with("/*") {
			return Ok(LineKind::CommentOnly);
		}

		let carried_comment = self
			.buffer
			.line_start(index)
			.is_some_and(|start| self.oracle.is_inside_comment(start + column));

		Ok(if carried_comment {
			LineKind::CommentOnly
		} else {
			LineKind::Source
		})
	}

	/// The maximal run of non-whitespace characters at the start of the
	/// line's content, or `""` for blank and out-of-range lines.
	pub fn first_token(&self, index: usize) -> &'b str {
		self.buffer
			.line(index)
			.and_then(|line| line.split_whitespace().next())
			.unwrap_or("")
	}

	/// Annotation lines start with `:` and attach to the enclosing block
	/// header, e.g. `: +inline` under an `fn` line.
	pub fn is_annotation_line(&self, index: usize) -> bool {
		self.buffer
			.line(index)
			.is_some_and(|line| line.trim_start().starts_with(':'))
	}

	/// Columns of leading whitespace on the line; 0 when out of range.
	pub fn indentation(&self, index: usize, tab_width: usize) -> usize {
		self.buffer
			.line(index)
			.map_or(0, |line| indentation_width(line, tab_width))
	}
}
