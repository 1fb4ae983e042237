use std::ops::Range;

use tracing::debug;
use tracing::trace;

use crate::CommentOracle;
use crate::ContinuationPolicy;
use crate::ContinuationRule;
use crate::IndentConfig;
use crate::LineClassifier;
use crate::LineSource;
use crate::NesfabError;
use crate::NesfabResult;
use crate::OpenerSet;
use crate::buffer::indentation_prefix_len;
use crate::scanner::enclosing_openers;
use crate::scanner::previous_block_opener;

/// Whether an indent request repeats the one immediately before it.
///
/// Hosts decide this themselves: a request is a repeat when the previous
/// action was an indent request on the same, unmodified line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RequestKind {
	/// Derive the indentation from block structure.
	#[default]
	Fresh,
	/// Dedent the line by one level from where it currently is.
	Repeat,
}

/// One "what indentation should this line have?" question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentRequest {
	pub line: usize,
	pub kind: RequestKind,
}

impl IndentRequest {
	pub fn fresh(line: usize) -> Self {
		Self {
			line,
			kind: RequestKind::Fresh,
		}
	}

	pub fn repeat(line: usize) -> Self {
		Self {
			line,
			kind: RequestKind::Repeat,
		}
	}
}

/// A rewrite of one line's leading whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentEdit {
	pub line: usize,
	/// Target column.
	pub column: usize,
	/// Byte range of the existing leading whitespace, in buffer coordinates.
	pub range: Range<usize>,
	/// Whitespace to put in place of `range`.
	pub replacement: String,
}

/// Line-based indentation engine for NESFab.
///
/// Each request is answered from the buffer alone: the engine scans back
/// for the nearest block opener and derives the column from it. Nothing is
/// remembered between calls.
#[derive(Debug, Clone)]
pub struct Indenter {
	indent_width: usize,
	tab_width: usize,
	use_tabs: bool,
	openers: OpenerSet,
	continuations: Vec<ContinuationRule>,
	policy: ContinuationPolicy,
}

impl Default for Indenter {
	fn default() -> Self {
		Self::from_valid_config(&IndentConfig::default())
	}
}

impl Indenter {
	pub fn new(config: &IndentConfig) -> NesfabResult<Self> {
		if config.indent_width == 0 {
			return Err(NesfabError::InvalidIndentWidth(config.indent_width));
		}

		if config.tab_width == 0 {
			return Err(NesfabError::InvalidIndentWidth(config.tab_width));
		}

		Ok(Self::from_valid_config(config))
	}

	fn from_valid_config(config: &IndentConfig) -> Self {
		Self {
			indent_width: config.indent_width,
			tab_width: config.tab_width,
			use_tabs: config.use_tabs,
			openers: config.opener_set(),
			continuations: config.continuation_rules(),
			policy: config.continuation_policy,
		}
	}

	pub fn indent_width(&self) -> usize {
		self.indent_width
	}

	pub fn tab_width(&self) -> usize {
		self.tab_width
	}

	pub fn openers(&self) -> &OpenerSet {
		&self.openers
	}

	/// The column the requested line should be indented to.
	///
	/// A fresh request derives the column from the nearest enclosing opener.
	/// A repeat request dedents the line's current indentation by one level,
	/// falling back to the fresh result once the line is already at column
	/// 0. Out-of-range lines resolve to 0.
	pub fn compute_indent<B, O>(&self, buffer: &B, oracle: O, request: IndentRequest) -> usize
	where
		B: LineSource + ?Sized,
		O: CommentOracle,
	{
		if request.line >= buffer.line_count() {
			let error = NesfabError::InvalidLineIndex {
				index: request.line,
				line_count: buffer.line_count(),
			};
			debug!(%error, "indenting out-of-range line at the root level");
			return 0;
		}

		let classifier = LineClassifier::new(buffer, oracle);

		if request.kind == RequestKind::Repeat {
			let current = classifier.indentation(request.line, self.tab_width);
			if let Some(column) = current.checked_sub(self.indent_width) {
				trace!(line = request.line, current, column, "repeat dedent");
				return column;
			}
		}

		self.base_indent(&classifier, request.line)
	}

	fn base_indent<B, O>(&self, classifier: &LineClassifier<'_, B, O>, line: usize) -> usize
	where
		B: LineSource + ?Sized,
		O: CommentOracle,
	{
		let Some(opener) = previous_block_opener(classifier, line, &self.openers) else {
			trace!(line, "root level");
			return 0;
		};

		let opener_indent = classifier.indentation(opener, self.tab_width);

		if classifier.is_annotation_line(line) {
			trace!(line, opener, column = opener_indent, "annotation aligns with opener");
			return opener_indent;
		}

		if let Some(column) = self.continuation_indent(classifier, line) {
			return column;
		}

		let column = opener_indent + self.indent_width;
		trace!(line, opener, column, "nested under opener");
		column
	}

	/// Resolve a continuation line against the chain of enclosing openers.
	/// `None` leaves the line to the nested case.
	fn continuation_indent<B, O>(&self, classifier: &LineClassifier<'_, B, O>, line: usize) -> Option<usize>
	where
		B: LineSource + ?Sized,
		O: CommentOracle,
	{
		if self.policy == ContinuationPolicy::Nest {
			return None;
		}

		let keyword = classifier.first_token(line);
		let rule = self.continuations.iter().find(|rule| rule.keyword == keyword)?;

		for opener in enclosing_openers(classifier, line, &self.openers, self.tab_width) {
			let token = classifier.first_token(opener);
			let opener_indent = classifier.indentation(opener, self.tab_width);

			if rule.peers.contains(token) {
				trace!(line, opener, keyword, column = opener_indent, "continuation aligns with peer");
				return Some(opener_indent);
			}

			if rule.containers.contains(token) {
				let column = opener_indent + self.indent_width;
				trace!(line, opener, keyword, column, "continuation nests in container");
				return Some(column);
			}
		}

		None
	}

	/// The edit that moves `line` to `column`, or `None` when its leading
	/// whitespace already has exactly that form.
	pub fn edit_for<B>(&self, buffer: &B, line: usize, column: usize) -> Option<IndentEdit>
	where
		B: LineSource + ?Sized,
	{
		let text = buffer.line(line)?;
		let start = buffer.line_start(line)?;
		let prefix_len = indentation_prefix_len(text);
		let replacement = self.whitespace_for(column);

		if text[..prefix_len] == replacement {
			return None;
		}

		Some(IndentEdit {
			line,
			column,
			range: start..start + prefix_len,
			replacement,
		})
	}

	/// Compute the indentation for a request and the edit that applies it.
	pub fn indent_line<B, O>(&self, buffer: &B, oracle: O, request: IndentRequest) -> Option<IndentEdit>
	where
		B: LineSource + ?Sized,
		O: CommentOracle,
	{
		let column = self.compute_indent(buffer, oracle, request);
		self.edit_for(buffer, request.line, column)
	}

	/// Leading whitespace reaching `column`.
	pub fn whitespace_for(&self, column: usize) -> String {
		if self.use_tabs {
			let mut whitespace = "\t".repeat(column / self.tab_width);
			whitespace.push_str(&" ".repeat(column % self.tab_width));
			whitespace
		} else {
			" ".repeat(column)
		}
	}
}
