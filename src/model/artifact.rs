//! The emitted document: host page with the canonical model embedded.

use super::apa::html_escape;
use super::types::GraphModel;
use crate::GraphError;

/// Where the page finds the compiled client and what it is called.
#[derive(Clone, Debug)]
pub struct ArtifactOptions {
	/// Page title.
	pub title: String,
	/// ES module produced by the WASM build (`wasm-bindgen --target web`).
	pub client_script: String,
	/// WASM binary loaded by `client_script`.
	pub client_wasm: String,
}

impl Default for ArtifactOptions {
	fn default() -> Self {
		Self {
			title: "Citation Graph".to_string(),
			client_script: "./citation-graph.js".to_string(),
			client_wasm: "./citation-graph_bg.wasm".to_string(),
		}
	}
}

/// Canonical model as pretty JSON.
pub fn render_json(model: &GraphModel) -> Result<String, GraphError> {
	serde_json::to_string_pretty(model).map_err(GraphError::Serialize)
}

/// Render the self-contained page.
///
/// `</` inside the embedded JSON is escaped so citation text can never close
/// the surrounding `<script>` element.
pub fn render_html(model: &GraphModel, options: &ArtifactOptions) -> Result<String, GraphError> {
	let json = serde_json::to_string(model)
		.map_err(GraphError::Serialize)?
		.replace("</", "<\\/");

	let template = include_str!("../../templates/index.html");
	Ok(template
		.replace("{{TITLE}}", &html_escape(&options.title))
		.replace("{{CLIENT_SCRIPT}}", &html_escape(&options.client_script))
		.replace("{{CLIENT_WASM}}", &html_escape(&options.client_wasm))
		.replace("{{NODES_COUNT}}", &model.node_count.to_string())
		.replace("{{EDGES_COUNT}}", &model.edge_count.to_string())
		.replace("{{MIN_YEAR}}", &model.min_year.to_string())
		.replace("{{MAX_YEAR}}", &model.max_year.to_string())
		.replace("{{GRAPH_JSON}}", &json))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::Config;
	use crate::model::{RawGraph, build_model};

	#[test]
	fn embeds_model_that_reads_back() {
		let raw = RawGraph::from_json(
			r#"{ "nodes": [ { "id": "a", "attributes": { "bibtex": "@a{k, title={x </script> y}}" } } ],
			     "edges": [] }"#,
		)
		.unwrap();
		let model = build_model(&raw, &Config::default());
		let html = render_html(&model, &ArtifactOptions::default()).unwrap();

		assert!(!html.contains("{{"));
		assert!(html.contains(r#"data-nodes="1""#));
		assert!(html.contains(r#"data-min-year="1990""#));
		assert_eq!(html.matches("</script>").count(), 3);

		let start = html.find(r#"type="application/json">"#).unwrap() + 24;
		let end = start + html[start..].find("</script>").unwrap();
		let decoded: GraphModel = serde_json::from_str(&html[start..end]).unwrap();
		assert_eq!(decoded.nodes[0].id, "a");
		assert_eq!(decoded.nodes[0].citations, model.nodes[0].citations);
		assert_eq!(
			decoded.nodes[0].citations[0].title.as_deref(),
			Some("x </script> y")
		);
	}
}
