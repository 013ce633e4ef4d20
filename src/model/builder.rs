//! Raw attributed graph → canonical [`GraphModel`].

use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use super::apa::format_citations;
use super::attrs::{AttrBag, extract_position, parse_number, resolve};
use super::size;
use super::types::{Edge, GraphModel, Node, Position, YearRange};
use crate::GraphError;
use crate::config::Config;

/// A node as handed over by the graph decoder.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RawNode {
	/// Unique node id.
	pub id: String,
	/// Free-form attributes under whatever keys the exporting tool used.
	#[serde(default, alias = "attrs")]
	pub attributes: AttrBag,
}

/// An edge as handed over by the graph decoder. Attributes are accepted but
/// unused.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RawEdge {
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
	/// Ignored.
	#[serde(default, alias = "attrs", skip_serializing_if = "AttrBag::is_empty")]
	pub attributes: AttrBag,
}

/// Decoder output: nodes in file order plus edges.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RawGraph {
	/// Nodes in file order.
	#[serde(default)]
	pub nodes: Vec<RawNode>,
	/// Edges in file order.
	#[serde(default)]
	pub edges: Vec<RawEdge>,
}

impl RawGraph {
	/// Decode `{"nodes": [...], "edges": [...]}`.
	pub fn from_json(json: &str) -> Result<Self, GraphError> {
		serde_json::from_str(json).map_err(GraphError::Input)
	}
}

/// Normalize a single node. Never fails: every unresolvable attribute falls
/// back to its documented default.
pub fn build_node(raw: &RawNode, config: &Config) -> Node {
	let aliases = &config.attributes;
	let attrs = &raw.attributes;

	let label = resolve(attrs, &aliases.label)
		.map(|v| v.into_owned())
		.unwrap_or_else(|| raw.id.clone());
	let node_type = resolve(attrs, &aliases.node_type)
		.map(|v| v.into_owned())
		.unwrap_or_default();

	let weight = resolve(attrs, &aliases.size)
		.and_then(|v| parse_number(&v))
		.unwrap_or_else(|| {
			debug!("node {}: no size attribute, using default weight", raw.id);
			config.size.default_weight
		});
	let radius = size::radius(weight, &config.size);
	let font_size = size::font_size(radius, &config.size);

	let position = extract_position(attrs, &aliases.positions).unwrap_or_else(|| {
		debug!("node {}: no position, placing at origin", raw.id);
		Position::ORIGIN
	});

	let category = config.categories.classify(&node_type);
	let color = config.categories.color(category).to_string();

	let bibtex = resolve(attrs, &aliases.bibtex).unwrap_or_default();
	let citations = format_citations(&bibtex, &config.citations);
	let years = YearRange::from_years(&citations.years);

	Node {
		id: raw.id.clone(),
		label,
		node_type,
		x: position.x,
		y: position.y,
		radius,
		font_size,
		category,
		color,
		citations: citations.records,
		citations_html: citations.html,
		search_text: citations.search_text,
		min_year: years.map(|r| r.min),
		max_year: years.map(|r| r.max),
	}
}

/// Build the canonical model. Edges pass through unchanged; endpoints that
/// name no node are kept and later drawn at the origin.
pub fn build_model(raw: &RawGraph, config: &Config) -> GraphModel {
	let nodes: Vec<Node> = raw.nodes.iter().map(|n| build_node(n, config)).collect();

	let edges: Vec<Edge> = raw
		.edges
		.iter()
		.map(|e| Edge {
			source: e.source.clone(),
			target: e.target.clone(),
		})
		.collect();

	let ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
	let dangling = edges
		.iter()
		.filter(|e| !ids.contains(e.source.as_str()) || !ids.contains(e.target.as_str()))
		.count();
	if dangling > 0 {
		debug!("{dangling} edge(s) reference unknown nodes; they render at the origin");
	}

	let all_years: Vec<i32> = nodes
		.iter()
		.flat_map(|n| n.min_year.into_iter().chain(n.max_year))
		.collect();
	let (min_year, max_year) = match YearRange::from_years(&all_years) {
		Some(range) => (range.min, range.max),
		None => {
			let fallback = config.years.ordered();
			(fallback.min, fallback.max)
		}
	};

	let mut view = config.view.clone();
	view.search_separator = config.citations.search_separator.clone();
	view.doi_prefix = config.citations.doi_prefix.clone();

	GraphModel {
		node_count: nodes.len(),
		edge_count: edges.len(),
		nodes,
		edges,
		min_year,
		max_year,
		view,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::ColorCategory;

	fn raw_node(id: &str, attrs: &str) -> RawNode {
		RawNode {
			id: id.into(),
			attributes: serde_json::from_str(attrs).unwrap(),
		}
	}

	#[test]
	fn bare_node_gets_every_default() {
		let config = Config::default();
		let node = build_node(&raw_node("n1", "{}"), &config);
		assert_eq!(node.label, "n1");
		assert_eq!(node.node_type, "");
		assert_eq!((node.x, node.y), (0.0, 0.0));
		assert_eq!(node.radius, size::radius(10.0, &config.size));
		assert_eq!(node.category, ColorCategory::Other);
		assert_eq!(node.color, "#9E9E9E");
		assert!(node.citations.is_empty());
		assert_eq!(node.citations_html, "");
		assert_eq!(node.search_text, "");
		assert_eq!(node.min_year, None);
		assert_eq!(node.max_year, None);
	}

	#[test]
	fn resolves_tool_specific_spellings() {
		let config = Config::default();
		let node = build_node(
			&raw_node(
				"n2",
				r#"{ "Name": "Ada", "Category": "Author", "viz:size": "2,5",
				     "viz:position.x": 3, "viz:position.y": "4" }"#,
			),
			&config,
		);
		assert_eq!(node.label, "Ada");
		assert_eq!(node.node_type, "Author");
		assert_eq!(node.category, ColorCategory::Author);
		assert_eq!(node.color, "#FF7AA2");
		assert_eq!(node.radius, size::radius(2.5, &config.size));
		assert_eq!((node.x, node.y), (3.0, -4.0));
	}

	#[test]
	fn invalid_size_uses_default_weight() {
		let config = Config::default();
		let node = build_node(&raw_node("n", r#"{ "size": "huge" }"#), &config);
		assert_eq!(node.radius, size::radius(10.0, &config.size));
	}

	#[test]
	fn node_years_come_from_all_entries() {
		let config = Config::default();
		let node = build_node(
			&raw_node(
				"p",
				r#"{ "type": "subtopic",
				     "bibtex": "@a{x, year={2004}} || @b{y, year={1999}} || @c{z, year={n.d.}}" }"#,
			),
			&config,
		);
		assert_eq!(node.category, ColorCategory::Subtopic);
		assert_eq!(node.citations.len(), 3);
		assert_eq!(node.min_year, Some(1999));
		assert_eq!(node.max_year, Some(2004));
	}

	#[test]
	fn global_years_fall_back_without_any_year_data() {
		let config = Config::default();
		let raw = RawGraph {
			nodes: vec![raw_node("a", "{}"), raw_node("b", r#"{ "bibtex": "none" }"#)],
			edges: Vec::new(),
		};
		let model = build_model(&raw, &config);
		assert_eq!((model.min_year, model.max_year), (1990, 2025));
	}

	#[test]
	fn inverted_year_fallback_is_ordered() {
		let mut config = Config::default();
		config.years.min = 2030;
		let raw = RawGraph {
			nodes: vec![raw_node("a", "{}")],
			edges: Vec::new(),
		};
		let model = build_model(&raw, &config);
		assert_eq!((model.min_year, model.max_year), (2025, 2030));
	}

	#[test]
	fn blank_year_hides_a_later_date() {
		let config = Config::default();
		let node = build_node(
			&raw_node("p", r#"{ "bibtex": "@a{k, year = {}, date = {2019}}" }"#),
			&config,
		);
		assert_eq!(node.citations.len(), 1);
		assert_eq!(node.year_range(), None);
	}

	#[test]
	fn global_years_span_all_nodes() {
		let config = Config::default();
		let raw = RawGraph {
			nodes: vec![
				raw_node("a", r#"{ "bibtex": "@a{x, year={2010}}" }"#),
				raw_node("b", r#"{ "bibtex": "@a{x, year={1985}} || @a{y, year={2030}}" }"#),
				raw_node("c", "{}"),
			],
			edges: Vec::new(),
		};
		let model = build_model(&raw, &config);
		assert_eq!((model.min_year, model.max_year), (1985, 2030));
	}

	#[test]
	fn dangling_edges_pass_through_with_counts() {
		let config = Config::default();
		let raw = RawGraph::from_json(
			r#"{ "nodes": [ { "id": "a" } ],
			     "edges": [ { "source": "a", "target": "ghost" } ] }"#,
		)
		.unwrap();
		let model = build_model(&raw, &config);
		assert_eq!(model.node_count, 1);
		assert_eq!(model.edge_count, 1);
		assert_eq!(
			model.edges[0],
			Edge {
				source: "a".into(),
				target: "ghost".into()
			}
		);
	}

	#[test]
	fn malformed_input_is_an_input_error() {
		assert!(matches!(
			RawGraph::from_json("[1, 2"),
			Err(GraphError::Input(_))
		));
	}
}
