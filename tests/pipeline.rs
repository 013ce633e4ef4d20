//! Raw attributed graph through the pipeline into the interactive state.

use citation_graph::model::{ArtifactOptions, ColorCategory, Position};
use citation_graph::{Action, ClientState, Config, GraphModel, RawGraph, build_model, render_html};

const GRAPH: &str = r#"{
	"nodes": [
		{ "id": "t1", "attributes": { "label": "Graph Theory", "type": "Subtopic", "x": 0, "y": 0, "size": 20 } },
		{ "id": "a1", "attributes": {
			"Label": "Jane Smith", "node_type": "Author", "x": "100,0", "y": "50", "SizeGephi": 4,
			"bibtex": "@article{s15, author={Smith, J.}, year={2015}, title={Spectral {Methods}}, journal={Networks}, volume={3}, doi={10.1/abc}} || @inproceedings{s18, author={Smith, J.}, year={2018}, title={Random Walks}, booktitle={Proc. Graphs}}"
		} },
		{ "id": "p1", "attrs": { "name": "Early Survey", "category": "paper", "X": 200, "Y": -100,
			"Bibtex": "@book{e05, author = \"Doe, A.\", date = \"2005-03-01\", title = \"A Survey\"}" } },
		{ "id": "bare" }
	],
	"edges": [
		{ "source": "t1", "target": "a1" },
		{ "source": "a1", "target": "p1", "attributes": { "weight": 2 } },
		{ "source": "p1", "target": "ghost" }
	]
}"#;

fn model() -> GraphModel {
	let raw = RawGraph::from_json(GRAPH).unwrap();
	build_model(&raw, &Config::default())
}

#[test]
fn pipeline_normalizes_every_node() {
	let model = model();
	assert_eq!(model.node_count, 4);
	assert_eq!(model.edge_count, 3);
	assert_eq!((model.min_year, model.max_year), (2005, 2018));

	let ids: Vec<&str> = model.nodes.iter().map(|n| n.id.as_str()).collect();
	assert_eq!(ids, ["t1", "a1", "p1", "bare"]);

	let a1 = &model.nodes[1];
	assert_eq!(a1.label, "Jane Smith");
	assert_eq!(a1.category, ColorCategory::Author);
	assert_eq!(a1.position(), Position::new(100.0, -50.0));
	assert_eq!(a1.citations.len(), 2);
	assert_eq!(a1.citations[0].title.as_deref(), Some("Spectral Methods"));
	assert_eq!(a1.citations[1].venue.as_deref(), Some("Proc. Graphs"));
	assert_eq!((a1.min_year, a1.max_year), (Some(2015), Some(2018)));
	assert!(a1.citations_html.contains("https://doi.org/10.1/abc"));

	let p1 = &model.nodes[2];
	assert_eq!(p1.label, "Early Survey");
	assert_eq!(p1.category, ColorCategory::Other);
	assert_eq!(p1.position(), Position::new(200.0, 100.0));
	assert_eq!(p1.min_year, Some(2005));

	let bare = &model.nodes[3];
	assert_eq!(bare.label, "bare");
	assert_eq!(bare.position(), Position::ORIGIN);
	assert!(bare.citations.is_empty());
	assert_eq!(bare.year_range(), None);
	assert!(model.nodes.iter().all(|n| n.radius >= 0.0 && n.font_size >= 8));
}

#[test]
fn dangling_edge_is_kept_resolves_to_origin_and_stays_hidden() {
	let state = ClientState::new(model(), 800.0, 600.0);
	assert_eq!(state.edges().len(), 3);

	let (source, target) = state.edge_endpoints(2);
	assert_eq!(source, Position::new(200.0, 100.0));
	assert_eq!(target, Position::ORIGIN);
	// A missing endpoint is never a visible one.
	assert!(!state.is_edge_visible(2));
	assert!(state.is_edge_visible(0));
	assert!(state.neighbors("ghost").is_some_and(|n| n.contains("p1")));
}

#[test]
fn filters_search_and_selection_work_end_to_end() {
	let mut state = ClientState::new(model(), 800.0, 600.0);
	assert_eq!(state.visible_count(), 4);

	state.dispatch(Action::SetYearTo(2010));
	// a1 spans 2015..=2018; undated nodes stay.
	assert_eq!(state.visible_count(), 3);
	assert!(!state.is_node_visible(1));
	assert!(!state.is_edge_visible(0));

	let hits = state.search("random walks");
	assert_eq!(hits.len(), 1);
	assert_eq!(state.nodes()[hits[0].node].id, "a1");

	state.dispatch(Action::SetNeighborMode(true));
	state.dispatch(Action::Focus(hits[0].node));
	assert_eq!(state.selected_node().map(|n| n.id.as_str()), Some("a1"));
	// Selecting never lifts a filter.
	assert!(!state.is_node_visible(1));
	assert!(!state.is_node_dimmed(0));
	assert!(!state.is_node_dimmed(2));
	assert!(state.is_node_dimmed(3));

	state.dispatch(Action::ResetView);
	assert_eq!(state.transform(), state.initial_transform());
}

#[test]
fn artifact_embeds_model_the_client_can_load() {
	let model = model();
	let html = render_html(&model, &ArtifactOptions::default()).unwrap();
	let start = html.find(r#"<script id="graph-data" type="application/json">"#).unwrap();
	let body = &html[start..];
	let open = body.find('>').unwrap() + 1;
	let close = body.find("</script>").unwrap();
	let loaded: GraphModel = serde_json::from_str(&body[open..close]).unwrap();

	assert_eq!(loaded.node_count, model.node_count);
	assert_eq!(loaded.view.search_limit, model.view.search_limit);
	assert_eq!(loaded.view.doi_prefix, "https://doi.org/");
	let state = ClientState::new(loaded, 1024.0, 768.0);
	assert_eq!(state.search("survey").len(), 1);
}
