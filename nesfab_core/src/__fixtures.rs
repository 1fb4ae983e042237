use crate::CommentMap;
use crate::IndentConfig;
use crate::IndentRequest;
use crate::Indenter;
use crate::SourceBuffer;

pub(crate) fn buffer(lines: &[&str]) -> SourceBuffer<'static> {
	SourceBuffer::from_lines(lines)
}

pub(crate) fn indenter(indent_width: usize) -> Indenter {
	Indenter::new(&IndentConfig::with_indent_width(indent_width))
		.unwrap_or_else(|e| panic!("indenter: {e}"))
}

/// Indent `line` of `lines` with a comment map built from the same text.
pub(crate) fn indent_with(indenter: &Indenter, lines: &[&str], request: IndentRequest) -> usize {
	let buffer = buffer(lines);
	let comments = CommentMap::new(buffer.text());
	indenter.compute_indent(&buffer, &comments, request)
}

pub(crate) fn fresh_indent(indent_width: usize, lines: &[&str], line: usize) -> usize {
	indent_with(&indenter(indent_width), lines, IndentRequest::fresh(line))
}

pub(crate) fn repeat_indent(indent_width: usize, lines: &[&str], line: usize) -> usize {
	indent_with(&indenter(indent_width), lines, IndentRequest::repeat(line))
}

pub(crate) const SWITCH_SOURCE: &[&str] = &[
	"switch x",
	"    case 1",
	"        foo()",
	"    case 2",
	"        bar()",
	"    default",
];

pub(crate) const NESTED_SOURCE: &[&str] = &[
	"fn f()",
	"    if a",
	"        x",
	"    while b",
	"        y",
	"    z",
];
