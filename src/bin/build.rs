//! Native pipeline entrypoint: raw attributed graph in, HTML artifact out.

// Bin target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
	cli::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod cli {
	use std::fs;
	use std::path::PathBuf;

	use anyhow::{Context, Result};
	use citation_graph::model::ArtifactOptions;
	use citation_graph::{Config, RawGraph, build_model, render_html, render_json};
	use clap::Parser;
	use log::info;
	use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

	#[derive(Parser)]
	#[command(name = "citation-graph-build")]
	#[command(
		author,
		version,
		about = "Normalize an attributed citation graph and render the interactive page"
	)]
	struct Args {
		/// Raw graph JSON: `{ "nodes": [{ "id", "attributes" }], "edges": [{ "source", "target" }] }`.
		input: PathBuf,

		/// Output file.
		#[arg(short, long, default_value = "citation_graph.html")]
		output: PathBuf,

		/// JSON file overriding any subset of the pipeline configuration.
		#[arg(long)]
		config: Option<PathBuf>,

		/// Write the canonical model as JSON instead of the HTML page.
		#[arg(long)]
		json: bool,

		/// Page title.
		#[arg(long)]
		title: Option<String>,

		/// URL of the client's ES module, relative to the page.
		#[arg(long)]
		client_script: Option<String>,

		/// URL of the client's WASM binary, relative to the page.
		#[arg(long)]
		client_wasm: Option<String>,
	}

	pub fn run() -> Result<()> {
		// stdout may carry the artifact, keep logs on stderr
		tracing_subscriber::registry()
			.with(
				tracing_subscriber::fmt::layer()
					.with_writer(std::io::stderr)
					.with_ansi(false),
			)
			.with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
			.init();

		let args = Args::parse();

		let config = match &args.config {
			Some(path) => {
				let text = fs::read_to_string(path)
					.with_context(|| format!("reading config {}", path.display()))?;
				Config::from_json(&text)
					.with_context(|| format!("parsing config {}", path.display()))?
			}
			None => Config::default(),
		};

		let input = fs::read_to_string(&args.input)
			.with_context(|| format!("reading graph {}", args.input.display()))?;
		let raw = RawGraph::from_json(&input)
			.with_context(|| format!("decoding graph {}", args.input.display()))?;
		let model = build_model(&raw, &config);
		info!(
			"built model: {} nodes, {} edges, years {}..={}",
			model.node_count, model.edge_count, model.min_year, model.max_year
		);

		let rendered = if args.json {
			render_json(&model)?
		} else {
			let defaults = ArtifactOptions::default();
			let options = ArtifactOptions {
				title: args.title.unwrap_or(defaults.title),
				client_script: args.client_script.unwrap_or(defaults.client_script),
				client_wasm: args.client_wasm.unwrap_or(defaults.client_wasm),
			};
			render_html(&model, &options)?
		};

		fs::write(&args.output, rendered)
			.with_context(|| format!("writing {}", args.output.display()))?;
		info!("wrote {}", args.output.display());
		Ok(())
	}
}
