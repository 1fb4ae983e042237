use std::collections::BTreeSet;

use derive_more::Deref;
use derive_more::DerefMut;
use serde::Deserialize;

use crate::LineClassifier;
use crate::LineKind;
use crate::LineSource;
use crate::lexer::CommentOracle;

/// Leading tokens that open an indented block.
pub const NESFAB_OPENERS: &[&str] = &[
	"asm", "case", "data", "default", "do", "else", "fn", "for", "if", "irq", "label", "mode",
	"nmi", "omni", "struct", "switch", "vars", "while",
];

/// The set of first-of-line tokens that mark a line as opening a block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, DerefMut, Deserialize)]
#[serde(transparent)]
pub struct OpenerSet(
	#[deref]
	#[deref_mut]
	BTreeSet<String>,
);

impl OpenerSet {
	/// The openers of the NESFab language.
	pub fn nesfab() -> Self {
		NESFAB_OPENERS.iter().copied().collect()
	}

	pub fn is_opener(&self, token: &str) -> bool {
		self.0.contains(token)
	}
}

impl<S: Into<String>> FromIterator<S> for OpenerSet {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		Self(iter.into_iter().map(Into::into).collect())
	}
}

impl<S: Into<String>> Extend<S> for OpenerSet {
	fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
		self.0.extend(iter.into_iter().map(Into::into));
	}
}

/// The nearest line before `from_index` that is neither blank nor
/// comment-only. Indices past the end of the buffer scan from the last line.
pub fn previous_source_line<B, O>(
	classifier: &LineClassifier<'_, B, O>,
	from_index: usize,
) -> Option<usize>
where
	B: LineSource + ?Sized,
	O: CommentOracle,
{
	let start = from_index.min(classifier.line_count());
	(0..start)
		.rev()
		.find(|&index| matches!(classifier.classify(index), Ok(LineKind::Source)))
}

/// The nearest source line before `from_index` whose first token is an
/// opener. `None` means the line sits at the top level.
pub fn previous_block_opener<B, O>(
	classifier: &LineClassifier<'_, B, O>,
	from_index: usize,
	openers: &OpenerSet,
) -> Option<usize>
where
	B: LineSource + ?Sized,
	O: CommentOracle,
{
	let mut cursor = from_index;
	while let Some(index) = previous_source_line(classifier, cursor) {
		if openers.is_opener(classifier.first_token(index)) {
			return Some(index);
		}
		cursor = index;
	}

	None
}

/// Walk the openers enclosing `from_index` from the innermost outwards.
pub fn enclosing_openers<'c, 'b, B, O>(
	classifier: &'c LineClassifier<'b, B, O>,
	from_index: usize,
	openers: &'c OpenerSet,
	tab_width: usize,
) -> EnclosingOpeners<'c, 'b, B, O>
where
	B: LineSource + ?Sized,
	O: CommentOracle,
{
	EnclosingOpeners {
		classifier,
		openers,
		tab_width,
		cursor: from_index,
		ceiling: None,
	}
}

/// Iterator returned by [`enclosing_openers`].
///
/// Yields the nearest opener first, then every earlier opener indented
/// strictly less than the one yielded before it. Openers at or beyond that
/// indentation belong to blocks that have already been closed.
#[derive(Debug)]
pub struct EnclosingOpeners<'c, 'b, B: ?Sized, O> {
	classifier: &'c LineClassifier<'b, B, O>,
	openers: &'c OpenerSet,
	tab_width: usize,
	cursor: usize,
	ceiling: Option<usize>,
}

impl<B, O> Iterator for EnclosingOpeners<'_, '_, B, O>
where
	B: LineSource + ?Sized,
	O: CommentOracle,
{
	type Item = usize;

	fn next(&mut self) -> Option<usize> {
		loop {
			if self.ceiling == Some(0) {
				return None;
			}

			let index = previous_block_opener(self.classifier, self.cursor, self.openers)?;
			self.cursor = index;

			let indentation = self.classifier.indentation(index, self.tab_width);
			if self.ceiling.is_some_and(|ceiling| indentation >= ceiling) {
				continue;
			}

			self.ceiling = Some(indentation);
			return Some(index);
		}
	}
}
