//! Immutable configuration shared by the build pipeline and the client engine.
//!
//! Every knob lives here instead of in module-level constants: attribute alias
//! tables, node sizing, category rules and colors, citation delimiters, the
//! year fallback, and the interactive view parameters. All structs carry
//! `#[serde(default)]`, so a partial JSON file overrides only what it names.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::model::ColorCategory;

/// Pipeline configuration. Construct once and pass by reference.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
	/// Attribute keys each logical field is read from.
	pub attributes: AttributeAliases,
	/// Radius and font constants.
	pub size: SizeConfig,
	/// Type classification and fill colors.
	pub categories: CategoryConfig,
	/// Bibliography delimiters and DOI prefix.
	pub citations: CitationConfig,
	/// Slider bounds when no node has a year.
	pub years: YearFallback,
	/// Carried into the emitted model for the client engine.
	pub view: ViewConfig,
}

impl Config {
	/// Decode a (possibly partial) configuration from JSON.
	///
	/// Bounds given in the wrong order are swapped, see [`Config::normalized`].
	pub fn from_json(json: &str) -> Result<Self, crate::GraphError> {
		serde_json::from_str::<Self>(json)
			.map(Self::normalized)
			.map_err(crate::GraphError::Config)
	}

	/// Order every `(min, max)` pair so that `min <= max`.
	///
	/// A partial override such as `{"years": {"min": 2030}}` would otherwise
	/// leave the fallback range inverted.
	pub fn normalized(mut self) -> Self {
		self.years = self.years.ordered();
		let (lo, hi) = (self.view.min_zoom, self.view.max_zoom);
		if lo > hi {
			warn!("min_zoom {lo} exceeds max_zoom {hi}; swapping");
			(self.view.min_zoom, self.view.max_zoom) = (hi, lo);
		}
		self
	}
}

/// Candidate attribute keys, in priority order, for each logical field.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct AttributeAliases {
	/// Raw size weight.
	pub size: Vec<String>,
	/// Display name; the node id is used when none resolves.
	pub label: Vec<String>,
	/// Free-text type, classified by [`CategoryConfig`].
	pub node_type: Vec<String>,
	/// Concatenated BibTeX entries.
	pub bibtex: Vec<String>,
	/// `(x, y)` key pairs tried in order.
	pub positions: Vec<(String, String)>,
}

fn strings(items: &[&str]) -> Vec<String> {
	items.iter().map(|s| s.to_string()).collect()
}

impl Default for AttributeAliases {
	fn default() -> Self {
		Self {
			size: strings(&["SizeGephi", "size", "Size", "viz:size", "viz_size"]),
			label: strings(&["label", "Label", "name", "Name"]),
			node_type: strings(&["type", "Type", "node_type", "category"]),
			bibtex: strings(&["bibtex", "Bibtex", "BIBTEX"]),
			positions: [
				("x", "y"),
				("X", "Y"),
				("viz:position.x", "viz:position.y"),
				("pos_x", "pos_y"),
			]
			.into_iter()
			.map(|(x, y)| (x.to_string(), y.to_string()))
			.collect(),
		}
	}
}

/// Constants of the radius power law and the label font curve.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct SizeConfig {
	/// Weight assumed when no size attribute resolves to a number.
	pub default_weight: f64,
	/// Exponent applied to the weight.
	pub power: f64,
	/// Factor applied after the exponent.
	pub mult: f64,
	/// Offset added last; the radius of a zero weight.
	pub add: f64,
	/// Font size per unit of radius.
	pub label_scale: f64,
	/// Smallest label font size, in pixels.
	pub min_font: u32,
}

impl Default for SizeConfig {
	fn default() -> Self {
		Self {
			default_weight: 10.0,
			power: 1.05,
			mult: 0.8,
			add: 1.0,
			label_scale: 0.35,
			min_font: 8,
		}
	}
}

/// A case-insensitive substring rule mapping a node type to a category.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CategoryRule {
	/// Substring looked for in the lowercased type.
	pub needle: String,
	/// Category assigned on a match.
	pub category: ColorCategory,
}

/// Category rules (first match wins) and the fill color of each category.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct CategoryConfig {
	/// Tried in order.
	pub rules: Vec<CategoryRule>,
	/// Fill of [`ColorCategory::Subtopic`] nodes.
	pub subtopic_color: String,
	/// Fill of [`ColorCategory::Author`] nodes.
	pub author_color: String,
	/// Fill of every other node.
	pub other_color: String,
}

impl Default for CategoryConfig {
	fn default() -> Self {
		Self {
			rules: vec![
				CategoryRule {
					needle: "subtopic".to_string(),
					category: ColorCategory::Subtopic,
				},
				CategoryRule {
					needle: "author".to_string(),
					category: ColorCategory::Author,
				},
			],
			subtopic_color: "#3CB371".to_string(),
			author_color: "#FF7AA2".to_string(),
			other_color: "#9E9E9E".to_string(),
		}
	}
}

impl CategoryConfig {
	/// Classify a free-text node type. Falls back to [`ColorCategory::Other`].
	pub fn classify(&self, node_type: &str) -> ColorCategory {
		let lowered = node_type.to_lowercase();
		self.rules
			.iter()
			.find(|rule| lowered.contains(&rule.needle.to_lowercase()))
			.map(|rule| rule.category)
			.unwrap_or(ColorCategory::Other)
	}

	/// Fill color of `category`.
	pub fn color(&self, category: ColorCategory) -> &str {
		match category {
			ColorCategory::Subtopic => &self.subtopic_color,
			ColorCategory::Author => &self.author_color,
			ColorCategory::Other => &self.other_color,
		}
	}
}

/// Delimiters of the concatenated bibliography blob.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct CitationConfig {
	/// Separates raw entries inside one attribute value.
	pub entry_delimiter: String,
	/// Joins per-entry search strings in the flattened search text.
	pub search_separator: String,
	/// Prefix stripped from DOI values and re-prepended on output.
	pub doi_prefix: String,
}

impl Default for CitationConfig {
	fn default() -> Self {
		Self {
			entry_delimiter: " || ".to_string(),
			search_separator: " | ".to_string(),
			doi_prefix: "https://doi.org/".to_string(),
		}
	}
}

/// Year bounds used when no node carries any parseable year.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct YearFallback {
	/// Lower bound of the year sliders.
	pub min: i32,
	/// Upper bound of the year sliders.
	pub max: i32,
}

impl YearFallback {
	/// The same bounds with `min <= max`.
	pub fn ordered(self) -> Self {
		if self.min > self.max {
			warn!("year fallback {}..{} is inverted; swapping", self.min, self.max);
			Self { min: self.max, max: self.min }
		} else {
			self
		}
	}
}

impl Default for YearFallback {
	fn default() -> Self {
		Self { min: 1990, max: 2025 }
	}
}

/// Parameters of the interactive engine.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewConfig {
	/// Fraction of the viewport the fitted bounding box occupies.
	pub fit_margin: f64,
	/// Zoom level used when flying to a search result.
	pub focus_zoom: f64,
	/// Smallest zoom reachable with the wheel.
	pub min_zoom: f64,
	/// Largest zoom reachable with the wheel.
	pub max_zoom: f64,
	/// Multiplicative step of one wheel notch.
	pub wheel_step: f64,
	/// Maximum number of search results listed.
	pub search_limit: usize,
	/// Length of a citation snippet in a search result, in characters.
	pub snippet_chars: usize,
	/// Must match [`CitationConfig::search_separator`].
	pub search_separator: String,
	/// Must match [`CitationConfig::doi_prefix`].
	pub doi_prefix: String,
}

impl ViewConfig {
	/// Citation settings the client renders the detail panel with.
	pub fn citation_config(&self) -> CitationConfig {
		CitationConfig {
			search_separator: self.search_separator.clone(),
			doi_prefix: self.doi_prefix.clone(),
			..CitationConfig::default()
		}
	}
}

impl Default for ViewConfig {
	fn default() -> Self {
		Self {
			fit_margin: 0.85,
			focus_zoom: 2.5,
			min_zoom: 0.05,
			max_zoom: 8.0,
			wheel_step: 1.1,
			search_limit: 30,
			snippet_chars: 80,
			search_separator: " | ".to_string(),
			doi_prefix: "https://doi.org/".to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn classify_first_rule_wins_case_insensitively() {
		let categories = CategoryConfig::default();
		assert_eq!(categories.classify("SubTopic"), ColorCategory::Subtopic);
		assert_eq!(categories.classify("Co-Author"), ColorCategory::Author);
		assert_eq!(
			categories.classify("subtopic author"),
			ColorCategory::Subtopic
		);
		assert_eq!(categories.classify("paper"), ColorCategory::Other);
		assert_eq!(categories.classify(""), ColorCategory::Other);
	}

	#[test]
	fn partial_json_keeps_other_defaults() {
		let config =
			Config::from_json(r#"{ "size": { "min_font": 12 }, "years": { "min": 2000 } }"#)
				.unwrap();
		assert_eq!(config.size.min_font, 12);
		assert_eq!(config.size.power, 1.05);
		assert_eq!(config.years.min, 2000);
		assert_eq!(config.years.max, 2025);
		assert_eq!(config.attributes.label[0], "label");
	}

	#[test]
	fn inverted_bounds_are_swapped() {
		let config = Config::from_json(r#"{ "years": { "min": 2030 } }"#).unwrap();
		assert_eq!((config.years.min, config.years.max), (2025, 2030));

		let config = Config::from_json(r#"{ "view": { "minZoom": 9 } }"#).unwrap();
		assert_eq!((config.view.min_zoom, config.view.max_zoom), (8.0, 9.0));
	}

	#[test]
	fn malformed_json_is_a_config_error() {
		assert!(matches!(
			Config::from_json("{ nope"),
			Err(crate::GraphError::Config(_))
		));
	}
}
