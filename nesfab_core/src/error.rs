use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum NesfabError {
	#[error(transparent)]
	#[diagnostic(code(nesfab::io_error))]
	Io(#[from] std::io::Error),

	#[error("line index {index} is out of bounds for a buffer of {line_count} line(s)")]
	#[diagnostic(
		code(nesfab::invalid_line_index),
		help("line indices are zero-based and must be less than the line count")
	)]
	InvalidLineIndex { index: usize, line_count: usize },

	#[error("indent width must be a positive number of columns, got {0}")]
	#[diagnostic(
		code(nesfab::invalid_indent_width),
		help("set `indent_width` and `tab_width` in nesfab.toml to values of at least 1")
	)]
	InvalidIndentWidth(usize),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(nesfab::config_parse),
		help("check that nesfab.toml is valid TOML with known indentation keys")
	)]
	ConfigParse(String),
}

pub type NesfabResult<T> = Result<T, NesfabError>;
