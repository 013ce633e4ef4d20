//! Label and citation search.

use crate::config::ViewConfig;
use crate::model::Node;

/// Why a node matched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchKind {
	/// The query is part of the node label.
	Node,
	/// The query is part of one of the node's citations.
	Paper,
}

impl MatchKind {
	/// Badge shown next to the result.
	pub fn title(self) -> &'static str {
		match self {
			MatchKind::Node => "Node",
			MatchKind::Paper => "Paper",
		}
	}
}

/// One search result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchHit {
	/// Index into the model's node list.
	pub node: usize,
	/// Label or citation match.
	pub kind: MatchKind,
	/// The matching citation entry, truncated; empty for label matches.
	pub snippet: String,
}

/// Search labels first, then flattened citation text, in node order.
///
/// The query is trimmed and lower-cased; a blank query matches nothing.
/// At most `config.search_limit` hits are returned.
pub fn search(nodes: &[Node], query: &str, config: &ViewConfig) -> Vec<SearchHit> {
	let query = query.trim().to_lowercase();
	if query.is_empty() {
		return Vec::new();
	}

	nodes
		.iter()
		.enumerate()
		.filter_map(|(index, node)| {
			if node.label.to_lowercase().contains(&query) {
				return Some(SearchHit {
					node: index,
					kind: MatchKind::Node,
					snippet: String::new(),
				});
			}
			if !node.search_text.to_lowercase().contains(&query) {
				return None;
			}
			let entry = node
				.search_text
				.split(config.search_separator.as_str())
				.find(|entry| entry.to_lowercase().contains(&query))
				.unwrap_or_default();
			Some(SearchHit {
				node: index,
				kind: MatchKind::Paper,
				snippet: entry.chars().take(config.snippet_chars).collect(),
			})
		})
		.take(config.search_limit)
		.collect()
}
