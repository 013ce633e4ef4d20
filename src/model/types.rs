//! Canonical graph model: the normalized, serializable output of the pipeline
//! and the input of the interactive client.

use serde::{Deserialize, Serialize};

use crate::config::ViewConfig;

/// Coloring/filtering category derived from a node's free-text type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorCategory {
	/// Type contains `subtopic`.
	Subtopic,
	/// Type contains `author`.
	Author,
	/// Anything else, including an empty type.
	#[default]
	Other,
}

impl ColorCategory {
	/// Every category, in filter-card order.
	pub const ALL: [ColorCategory; 3] = [
		ColorCategory::Subtopic,
		ColorCategory::Author,
		ColorCategory::Other,
	];

	/// Plural label used by the filter controls.
	pub fn title(self) -> &'static str {
		match self {
			ColorCategory::Subtopic => "Subtopics",
			ColorCategory::Author => "Authors",
			ColorCategory::Other => "Other",
		}
	}
}

/// Planar position in graph space (y already points down).
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Position {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate, growing downwards.
	pub y: f64,
}

impl Position {
	/// Fallback for nodes without coordinates and for missing edge ends.
	pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

	/// Position at `(x, y)`.
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Inclusive publication year span of a node's citations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct YearRange {
	/// Earliest year.
	pub min: i32,
	/// Latest year.
	pub max: i32,
}

impl YearRange {
	/// Span of the given years, or `None` when there are none.
	pub fn from_years(years: &[i32]) -> Option<Self> {
		let min = years.iter().copied().min()?;
		let max = years.iter().copied().max()?;
		Some(Self { min, max })
	}

	/// Whether the span overlaps `from..=to`.
	pub fn intersects(&self, from: i32, to: i32) -> bool {
		self.max >= from && self.min <= to
	}
}

/// Structured bibliographic fields of one citation entry. Every field is
/// optional and independent of the others.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CitationRecord {
	/// Raw author list, `and`-separated.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub author: Option<String>,
	/// `year` or `date`; may hold a full date.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub year: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	/// Journal, book title or series.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub venue: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub volume: Option<String>,
	/// The `number` field.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub issue: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub pages: Option<String>,
	/// Bare DOI or DOI URL.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub doi: Option<String>,
}

/// A node of the canonical model.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
	/// Unique id, as given in the input.
	pub id: String,
	/// Display name; the id when no label attribute resolves.
	pub label: String,
	/// Free-text type, possibly empty.
	#[serde(rename = "type")]
	pub node_type: String,
	/// Graph-space x.
	pub x: f64,
	/// Graph-space y, already flipped to point down.
	pub y: f64,
	/// Drawn radius at zoom 1.
	pub radius: f64,
	/// Label font size in pixels.
	pub font_size: u32,
	/// Filter and color category.
	pub category: ColorCategory,
	/// CSS fill color.
	pub color: String,
	/// Parsed bibliography entries, in input order.
	#[serde(default)]
	pub citations: Vec<CitationRecord>,
	/// Pre-rendered APA list with copy buttons.
	#[serde(default)]
	pub citations_html: String,
	/// Flattened citation text matched by search.
	#[serde(default)]
	pub search_text: String,
	/// Earliest parseable citation year.
	pub min_year: Option<i32>,
	/// Latest parseable citation year.
	pub max_year: Option<i32>,
}

impl Node {
	/// Position at load time.
	pub fn position(&self) -> Position {
		Position::new(self.x, self.y)
	}

	/// Year span, present only when both bounds are.
	pub fn year_range(&self) -> Option<YearRange> {
		match (self.min_year, self.max_year) {
			(Some(min), Some(max)) => Some(YearRange { min, max }),
			_ => None,
		}
	}
}

/// A non-owning `(source, target)` id pair. Endpoints are not validated
/// against the node set.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Edge {
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
}

/// The complete canonical model embedded in the artifact.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphModel {
	/// Nodes in input order.
	pub nodes: Vec<Node>,
	/// Edges in input order, dangling ones included.
	pub edges: Vec<Edge>,
	/// Lower bound of the year sliders.
	pub min_year: i32,
	/// Upper bound of the year sliders.
	pub max_year: i32,
	/// `nodes.len()`.
	pub node_count: usize,
	/// `edges.len()`.
	pub edge_count: usize,
	/// Parameters for the client engine.
	#[serde(default)]
	pub view: ViewConfig,
}

impl Default for GraphModel {
	fn default() -> Self {
		let years = crate::config::YearFallback::default();
		Self {
			nodes: Vec::new(),
			edges: Vec::new(),
			min_year: years.min,
			max_year: years.max,
			node_count: 0,
			edge_count: 0,
			view: ViewConfig::default(),
		}
	}
}
