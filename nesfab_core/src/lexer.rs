use std::ops::Range;

use logos::Lexer;
use logos::Logos;

/// Raw tokens produced by logos for flat tokenization of NESFab source.
///
/// Comments and string literals are matched by callbacks that consume their
/// bodies directly, so nothing inside them is ever seen as a token.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
	#[regex(r"//[^\n]*", allow_greedy = true)]
	LineComment,
	#[token("/*", nested_block_comment)]
	BlockComment,
	#[token("\"", |lex| quoted(lex, b'"'))]
	#[token("'", |lex| quoted(lex, b'\''))]
	#[token("`", |lex| quoted(lex, b'`'))]
	String,
	#[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
	Ident,
	#[regex(r"[0-9]+(\.[0-9]+)?")]
	#[regex(r"0[xX][0-9A-Fa-f]+")]
	#[regex(r"0[bB][01]+")]
	#[regex(r"\$[0-9A-Fa-f]+")]
	#[regex(r"%[01]+")]
	Number,
	#[token("/")]
	Slash,
	#[regex(r"[+\-*%&|^~!=<>?@#$]+")]
	Operator,
	#[regex(r"[(){}\[\],;:.]")]
	Punctuation,
	#[regex(r"[ \t\r\x0C]+")]
	Whitespace,
	#[token("\n")]
	Newline,
}

/// Consume a (possibly nested) block comment body after its opening `/*`.
/// An unterminated comment runs to the end of the input.
fn nested_block_comment(lex: &mut Lexer<'_, RawToken>) -> bool {
	let rest = lex.remainder().as_bytes();
	let mut depth = 1_usize;
	let mut index = 0;

	while index < rest.len() {
		match (rest[index], rest.get(index + 1)) {
			(b'/', Some(b'*')) => {
				depth += 1;
				index += 2;
			}
			(b'*', Some(b'/')) => {
				depth -= 1;
				index += 2;
				if depth == 0 {
					lex.bump(index);
					return true;
				}
			}
			_ => index += 1,
		}
	}

	lex.bump(rest.len());
	true
}

/// Consume a string literal body after its opening `delimiter`. A `\`
/// escapes the byte after it. Without a closing delimiter the opening quote
/// is rejected on its own and lexing resumes right after it.
fn quoted(lex: &mut Lexer<'_, RawToken>, delimiter: u8) -> bool {
	let rest = lex.remainder().as_bytes();
	let mut escaped = false;

	for (index, &byte) in rest.iter().enumerate() {
		if escaped {
			escaped = false;
		} else if byte == b'\\' {
			escaped = true;
		} else if byte == delimiter {
			lex.bump(index + 1);
			return true;
		}
	}

	false
}

/// The lexical class of a [`Lexeme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
	/// `// ...` up to (not including) the newline.
	LineComment,
	/// `/* ... */`, including nested comments.
	BlockComment,
	/// A `"`, `'` or `` ` `` delimited literal, delimiters included.
	String,
	Ident,
	Number,
	/// A lone `/`, which prefixes group names.
	Slash,
	Operator,
	Punctuation,
	Whitespace,
	Newline,
	/// A byte sequence no rule accepts, such as an unterminated quote.
	Unknown,
}

impl TokenKind {
	pub fn is_comment(self) -> bool {
		matches!(self, Self::LineComment | Self::BlockComment)
	}

	pub fn is_trivia(self) -> bool {
		matches!(self, Self::Whitespace | Self::Newline)
	}
}

impl From<RawToken> for TokenKind {
	fn from(raw: RawToken) -> Self {
		match raw {
			RawToken::LineComment => Self::LineComment,
			RawToken::BlockComment => Self::BlockComment,
			RawToken::String => Self::String,
			RawToken::Ident => Self::Ident,
			RawToken::Number => Self::Number,
			RawToken::Slash => Self::Slash,
			RawToken::Operator => Self::Operator,
			RawToken::Punctuation => Self::Punctuation,
			RawToken::Whitespace => Self::Whitespace,
			RawToken::Newline => Self::Newline,
		}
	}
}

/// A classified byte range of the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
	pub kind: TokenKind,
	pub span: Range<usize>,
}

impl Lexeme {
	pub fn text<'s>(&self, source: &'s str) -> &'s str {
		&source[self.span.clone()]
	}
}

/// Split `source` into lexemes covering every byte. Lexing never fails;
/// unrecognized input is reported as [`TokenKind::Unknown`].
pub fn tokenize(source: &str) -> Vec<Lexeme> {
	RawToken::lexer(source)
		.spanned()
		.map(|(result, span)| {
			let kind = result.map_or(TokenKind::Unknown, TokenKind::from);
			Lexeme { kind, span }
		})
		.collect()
}

/// Answers whether a byte position of the buffer lies inside a comment.
pub trait CommentOracle {
	fn is_inside_comment(&self, position: usize) -> bool;
}

impl<T: CommentOracle + ?Sized> CommentOracle for &T {
	fn is_inside_comment(&self, position: usize) -> bool {
		(**self).is_inside_comment(position)
	}
}

/// An oracle for buffers known to contain no comments.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoComments;

impl CommentOracle for NoComments {
	fn is_inside_comment(&self, _position: usize) -> bool {
		false
	}
}

/// The comment spans of a source text, sorted by start offset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentMap {
	spans: Vec<Range<usize>>,
}

impl CommentMap {
	pub fn new(source: &str) -> Self {
		let spans = tokenize(source)
			.into_iter()
			.filter(|lexeme| lexeme.kind.is_comment())
			.map(|lexeme| lexeme.span)
			.collect();

		Self { spans }
	}

	pub fn spans(&self) -> &[Range<usize>] {
		&self.spans
	}
}

impl CommentOracle for CommentMap {
	fn is_inside_comment(&self, position: usize) -> bool {
		// Spans never overlap, so only the last span starting at or before
		// `position` can contain it.
		let candidates = self.spans.partition_point(|span| span.start <= position);
		candidates
			.checked_sub(1)
			.and_then(|index| self.spans.get(index))
			.is_some_and(|span| position < span.end)
	}
}
