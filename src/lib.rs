//! citation-graph: interactive citation network visualization.
//!
//! Two halves share this crate. The [`model`] pipeline normalizes a loosely
//! attributed graph (free-form node attributes, BibTeX blobs) into a canonical
//! model and renders it into a self-contained HTML page. The
//! [`components::citation_graph`] client is a WASM canvas app that loads that
//! model back from the page and makes it explorable.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod config;
pub mod model;

// Dependencies of the native `citation-graph-build` binary only.
#[cfg(not(target_arch = "wasm32"))]
use anyhow as _;
#[cfg(not(target_arch = "wasm32"))]
use clap as _;
#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber as _;

pub use components::citation_graph::{
	Action, CitationGraphCanvas, ClientState, CopyToast, DetailPanel, FilterCard, SearchBox,
	Tooltip,
};
pub use config::{Config, ViewConfig};
pub use model::{GraphModel, RawGraph, build_model, render_html, render_json};

/// Failures at the fallible edges of the pipeline. Normalization itself is
/// total and never produces one.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
	/// The raw graph JSON could not be decoded.
	#[error("invalid graph input: {0}")]
	Input(#[source] serde_json::Error),
	/// The configuration JSON could not be decoded.
	#[error("invalid configuration: {0}")]
	Config(#[source] serde_json::Error),
	/// The model could not be encoded for the artifact.
	#[error("failed to serialize graph model: {0}")]
	Serialize(#[source] serde_json::Error),
}

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("citation-graph: logging initialized");
}

/// Load the canonical model from the script element with id="graph-data".
fn load_graph_data() -> Option<GraphModel> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let Some(element) = document.get_element_by_id("graph-data") else {
		warn!("citation-graph: no #graph-data element");
		return None;
	};
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<GraphModel>(&json_text) {
		Ok(model) => {
			info!(
				"citation-graph: loaded {} nodes, {} edges, years {}..={}",
				model.nodes.len(),
				model.edges.len(),
				model.min_year,
				model.max_year
			);
			Some(model)
		}
		Err(e) => {
			warn!("citation-graph: failed to parse graph data: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads the model from the DOM and mounts the canvas with its overlays.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let model = load_graph_data().unwrap_or_default();
	let (width, height) = components::citation_graph::window_size();
	let state = RwSignal::new(ClientState::new(model, width, height));
	let hover = RwSignal::new(None::<components::citation_graph::Hover>);
	let (toast, set_toast) = signal(false);
	let on_copy = components::citation_graph::copy_handler(set_toast);

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<CitationGraphCanvas state hover />
		</div>
		<div id="controls">
			<SearchBox state />
			<FilterCard state />
		</div>
		<DetailPanel state on_copy />
		<Tooltip state hover />
		<CopyToast visible=toast />
	}
}
