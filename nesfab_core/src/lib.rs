//! `nesfab_core` is the editor tooling core for the NESFab language. It
//! answers the two questions an editor mode asks about NESFab source: which
//! display category each piece of text belongs to, and which column a line
//! should be indented to.
//!
//! ## Processing Pipeline
//!
//! ```text
//! NESFab source text
//!   → Lexer (logos tokens, nested block comments, quoted strings)
//!   → CommentMap (comment spans, answers "is this offset inside a comment?")
//!   → Line classifier (blank / comment-only / source, first token, annotations)
//!   → Block scanner (walks backward to the nearest block opener)
//!   → Indenter (root, annotation, nested, continuation and repeat cases)
//! ```
//!
//! The indenter never builds a parse tree and keeps no state between calls.
//! Whether a request repeats the previous one is decided by the host and
//! passed in as a [`RequestKind`].
//!
//! ## Key Types
//!
//! - [`SourceBuffer`] — An immutable snapshot of text split into lines.
//! - [`CommentMap`] — The [`CommentOracle`] built from the lexer.
//! - [`LineClassifier`] — Line-level questions: [`LineKind`], first token,
//!   annotation lines, indentation.
//! - [`OpenerSet`] — The leading tokens that open an indented block.
//! - [`Indenter`] — The indentation engine, configured by [`IndentConfig`].
//! - [`HighlightSpan`] — A colorized range produced by [`highlight`].
//!
//! ## Quick Start
//!
//! ```rust
//! use nesfab_core::CommentMap;
//! use nesfab_core::IndentRequest;
//! use nesfab_core::Indenter;
//! use nesfab_core::SourceBuffer;
//!
//! let text = "fn main()\n    while true\n// tick\nfoo()";
//! let buffer = SourceBuffer::new(text);
//! let comments = CommentMap::new(text);
//! let indenter = Indenter::default();
//!
//! // Nested one level below the `while` header, skipping the comment.
//! assert_eq!(indenter.compute_indent(&buffer, &comments, IndentRequest::fresh(3)), 8);
//!
//! // A repeated request dedents from the line's current column instead.
//! assert_eq!(indenter.compute_indent(&buffer, &comments, IndentRequest::repeat(1)), 0);
//!
//! let edit = indenter.indent_line(&buffer, &comments, IndentRequest::fresh(3));
//! assert_eq!(edit.map(|edit| edit.replacement), Some("        ".to_string()));
//! ```

pub use buffer::*;
pub use classify::*;
pub use config::*;
pub use error::*;
pub use highlight::*;
pub use indent::*;
pub use lexer::*;
pub use scanner::*;

mod buffer;
mod classify;
pub mod config;
#[allow(unused_assignments)]
mod error;
pub mod highlight;
mod indent;
pub mod lexer;
pub mod scanner;

#[cfg(test)]
mod __fixtures;
