use std::ops::Range;

use crate::lexer::Lexeme;
use crate::lexer::TokenKind;
use crate::lexer::tokenize;

/// Words highlighted as keywords.
pub const KEYWORDS: &[&str] = &[
	"asm", "audio", "break", "case", "charmap", "chrrom", "continue", "ct", "data", "default",
	"do", "else", "fence", "file", "fn", "for", "goto", "if", "irq", "label", "len", "mode", "nmi",
	"omni", "pop", "push", "readonly", "ready", "return", "sizeof", "struct", "swap", "switch",
	"vars", "while",
];

/// Words highlighted as constants.
pub const CONSTANTS: &[&str] = &["false", "nullptr", "true"];

/// Display category of a highlighted span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightKind {
	Keyword,
	Type,
	Constant,
	Number,
	String,
	Comment,
	/// A group reference such as `/vars_group`. The slash must start the
	/// line or follow whitespace, so `a/b` stays a division.
	Group,
	/// A `+flag` or `-flag` on an annotation line.
	Modifier,
	Identifier,
	Operator,
	Punctuation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSpan {
	pub kind: HighlightKind,
	pub span: Range<usize>,
}

/// Classify an identifier into its display category.
pub fn classify_identifier(word: &str) -> HighlightKind {
	if KEYWORDS.contains(&word) {
		HighlightKind::Keyword
	} else if CONSTANTS.contains(&word) {
		HighlightKind::Constant
	} else if is_type_name(word) {
		HighlightKind::Type
	} else {
		HighlightKind::Identifier
	}
}

/// Type names are capitalized: the built-ins (`Void`, `Bool`, `Int`, `Real`,
/// `AA`, `PP`, `CC`, `MM`, and the numeric `[US]+F*` family like `U`, `UU` or
/// `SSF`) as well as user struct names.
fn is_type_name(word: &str) -> bool {
	word.starts_with(|ch: char| ch.is_ascii_uppercase())
}

/// Produce highlight spans for `source` in order. Whitespace and bytes the
/// lexer does not recognize are left uncolored.
pub fn highlight(source: &str) -> Vec<HighlightSpan> {
	let lexemes = tokenize(source);
	let mut spans = Vec::with_capacity(lexemes.len());
	let mut at_line_start = true;
	let mut annotation_line = false;
	let mut cursor = 0;

	while let Some(lexeme) = lexemes.get(cursor) {
		let previous = cursor.checked_sub(1).and_then(|index| lexemes.get(index));
		let next = lexemes.get(cursor + 1);
		cursor += 1;

		match lexeme.kind {
			TokenKind::Newline => {
				at_line_start = true;
				annotation_line = false;
				continue;
			}
			TokenKind::Whitespace => continue,
			_ => {}
		}

		if at_line_start {
			at_line_start = false;
			annotation_line = lexeme.kind == TokenKind::Punctuation && lexeme.text(source) == ":";
		}

		let kind = match lexeme.kind {
			TokenKind::LineComment | TokenKind::BlockComment => HighlightKind::Comment,
			TokenKind::String => HighlightKind::String,
			TokenKind::Number => HighlightKind::Number,
			TokenKind::Ident => classify_identifier(lexeme.text(source)),
			TokenKind::Punctuation => HighlightKind::Punctuation,
			TokenKind::Slash => {
				let detached = previous.is_none_or(|previous| previous.kind.is_trivia());
				if let Some(name) = adjacent_ident(lexeme, next).filter(|_| detached) {
					cursor += 1;
					spans.push(HighlightSpan {
						kind: HighlightKind::Group,
						span: lexeme.span.start..name.span.end,
					});
					continue;
				}
				HighlightKind::Operator
			}
			TokenKind::Operator => {
				let sign = matches!(lexeme.text(source), "+" | "-");
				if let Some(name) = adjacent_ident(lexeme, next).filter(|_| annotation_line && sign) {
					cursor += 1;
					spans.push(HighlightSpan {
						kind: HighlightKind::Modifier,
						span: lexeme.span.start..name.span.end,
					});
					continue;
				}
				HighlightKind::Operator
			}
			TokenKind::Whitespace | TokenKind::Newline | TokenKind::Unknown => continue,
		};

		spans.push(HighlightSpan {
			kind,
			span: lexeme.span.clone(),
		});
	}

	spans
}

/// The identifier directly following `lexeme`, with no gap between them.
fn adjacent_ident<'l>(lexeme: &Lexeme, next: Option<&'l Lexeme>) -> Option<&'l Lexeme> {
	next.filter(|next| next.kind == TokenKind::Ident && next.span.start == lexeme.span.end)
}
