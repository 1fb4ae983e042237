use std::collections::BTreeSet;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::NesfabError;
use crate::NesfabResult;
use crate::OpenerSet;

/// Default number of columns per nesting level.
pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// Default distance between tab stops when measuring existing indentation.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["nesfab.toml", ".nesfab.toml", ".config/nesfab.toml"];

/// How lines starting with a continuation keyword (`else`, `case`,
/// `default`) are indented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContinuationPolicy {
	/// Align with the peer header the line continues (`else` under its `if`,
	/// `case` under the previous `case`), or nest inside its container
	/// (`case` right after `switch`).
	#[default]
	AlignWithPeer,
	/// No special treatment: continuation lines nest under the nearest
	/// opener like any other line.
	Nest,
}

/// Describes a keyword that continues a block opened by a peer.
///
/// ```toml
/// [[continuations]]
/// keyword = "case"
/// peers = ["case", "default"]
/// containers = ["switch"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContinuationRule {
	/// First token of the continuing line.
	pub keyword: String,
	/// Openers the line aligns with.
	#[serde(default)]
	pub peers: BTreeSet<String>,
	/// Openers the line nests inside when reached before any peer.
	#[serde(default)]
	pub containers: BTreeSet<String>,
}

impl ContinuationRule {
	pub fn new<P, C>(keyword: &str, peers: P, containers: C) -> Self
	where
		P: IntoIterator<Item = &'static str>,
		C: IntoIterator<Item = &'static str>,
	{
		Self {
			keyword: keyword.to_string(),
			peers: peers.into_iter().map(String::from).collect(),
			containers: containers.into_iter().map(String::from).collect(),
		}
	}

	/// `else` pairs with `if`/`else`; `case` and `default` pair with each
	/// other inside a `switch`.
	pub fn nesfab() -> Vec<Self> {
		vec![
			Self::new("else", ["if", "else"], []),
			Self::new("case", ["case", "default"], ["switch"]),
			Self::new("default", ["case", "default"], ["switch"]),
		]
	}
}

/// Indentation settings, usually loaded from `nesfab.toml`.
///
/// ```toml
/// indent_width = 4
/// tab_width = 8
/// use_tabs = false
/// extra_openers = ["charmap"]
/// continuation_policy = "align-with-peer"
/// ```
///
/// Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IndentConfig {
	/// Columns added per nesting level.
	pub indent_width: usize,
	/// Tab stop distance used when measuring and writing indentation.
	pub tab_width: usize,
	/// Write indentation with tabs where possible.
	pub use_tabs: bool,
	/// Replaces the built-in opener set when present.
	pub openers: Option<OpenerSet>,
	/// Openers added on top of the effective set.
	pub extra_openers: Vec<String>,
	pub continuation_policy: ContinuationPolicy,
	/// Replaces the built-in continuation rules when present.
	pub continuations: Option<Vec<ContinuationRule>>,
}

impl Default for IndentConfig {
	fn default() -> Self {
		Self {
			indent_width: DEFAULT_INDENT_WIDTH,
			tab_width: DEFAULT_TAB_WIDTH,
			use_tabs: false,
			openers: None,
			extra_openers: Vec::new(),
			continuation_policy: ContinuationPolicy::default(),
			continuations: None,
		}
	}
}

impl IndentConfig {
	/// A default configuration with a different indent width.
	pub fn with_indent_width(indent_width: usize) -> Self {
		Self {
			indent_width,
			..Self::default()
		}
	}

	pub fn from_toml_str(content: &str) -> NesfabResult<Self> {
		toml::from_str(content).map_err(|e| NesfabError::ConfigParse(e.to_string()))
	}

	/// Resolve the config file path for `root` using the supported candidate
	/// filenames.
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> NesfabResult<Option<IndentConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		tracing::debug!(path = %config_path.display(), "loading indent config");
		let content = std::fs::read_to_string(&config_path)?;
		Self::from_toml_str(&content).map(Some)
	}

	/// The opener set after applying `openers` and `extra_openers`.
	pub fn opener_set(&self) -> OpenerSet {
		let mut openers = self.openers.clone().unwrap_or_else(OpenerSet::nesfab);
		openers.extend(self.extra_openers.iter().cloned());
		openers
	}

	/// The continuation rules after applying `continuations`.
	pub fn continuation_rules(&self) -> Vec<ContinuationRule> {
		self.continuations
			.clone()
			.unwrap_or_else(ContinuationRule::nesfab)
	}
}
