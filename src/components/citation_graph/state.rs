//! Interactive view state and its transitions.
//!
//! `ClientState` owns the canonical model plus everything derived from user
//! interaction: type and year filters, the selection, the neighbor overlay,
//! and the pan/zoom transform. All mutation goes through [`Action`]s applied by
//! [`ClientState::dispatch`], so a sequence of events can be replayed without a
//! rendering surface.
//!
//! Visibility and dimming are separate layers. Filters decide which nodes and
//! edges are drawn at all; the neighbor overlay only lowers the opacity of
//! drawn elements and never brings a hidden one back.

use std::collections::{HashMap, HashSet};

use log::debug;

use super::scale::{ScaleConfig, ScaledValues};
use super::search::{SearchHit, search};
use super::viewport::ViewTransform;
use crate::config::ViewConfig;
use crate::model::{ColorCategory, Edge, GraphModel, Node, Position};

/// Which color categories are shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeFilters {
	/// Show [`ColorCategory::Subtopic`] nodes.
	pub subtopic: bool,
	/// Show [`ColorCategory::Author`] nodes.
	pub author: bool,
	/// Show every other node.
	pub other: bool,
}

impl Default for TypeFilters {
	fn default() -> Self {
		Self {
			subtopic: true,
			author: true,
			other: true,
		}
	}
}

impl TypeFilters {
	/// Whether nodes of `category` are shown.
	pub fn enabled(&self, category: ColorCategory) -> bool {
		match category {
			ColorCategory::Subtopic => self.subtopic,
			ColorCategory::Author => self.author,
			ColorCategory::Other => self.other,
		}
	}

	/// Show or hide nodes of `category`.
	pub fn set(&mut self, category: ColorCategory, enabled: bool) {
		match category {
			ColorCategory::Subtopic => self.subtopic = enabled,
			ColorCategory::Author => self.author = enabled,
			ColorCategory::Other => self.other = enabled,
		}
	}
}

/// A user-driven state transition.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
	/// Show or hide one color category.
	SetTypeFilter(ColorCategory, bool),
	/// Move the lower year handle; the upper one follows if crossed.
	SetYearFrom(i32),
	/// Move the upper year handle; the lower one follows if crossed.
	SetYearTo(i32),
	/// Click on a node (by index).
	Select(usize),
	/// Click on empty background.
	ClearSelection,
	/// Turn the neighbor overlay on or off.
	SetNeighborMode(bool),
	ToggleNeighborMode,
	/// Fly to a node at the focus zoom and select it.
	Focus(usize),
	/// Pan by a screen-space delta.
	Pan {
		/// Horizontal delta in pixels.
		dx: f64,
		/// Vertical delta in pixels.
		dy: f64,
	},
	/// Zoom by `factor` about the screen point `(sx, sy)`.
	Zoom {
		/// Multiplier applied to the current zoom.
		factor: f64,
		/// Anchor x in screen pixels.
		sx: f64,
		/// Anchor y in screen pixels.
		sy: f64,
	},
	/// Restore the transform computed at load.
	ResetView,
	/// Drag a node to a graph-space position.
	MoveNode {
		/// Node index.
		node: usize,
		/// New graph-space position.
		to: Position,
	},
	/// The viewport changed size. The transform is left alone.
	Resize {
		/// Viewport width in pixels.
		width: f64,
		/// Viewport height in pixels.
		height: f64,
	},
}

/// Interactive state over an immutable node/edge set.
#[derive(Clone, Debug)]
pub struct ClientState {
	model: GraphModel,
	config: ViewConfig,
	index: HashMap<String, usize>,
	/// Resolved node indices of each edge's `(source, target)`.
	endpoints: Vec<(Option<usize>, Option<usize>)>,
	adjacency: HashMap<String, HashSet<String>>,
	positions: Vec<Position>,

	selection: Option<usize>,
	neighbor_mode: bool,
	filters: TypeFilters,
	year_from: i32,
	year_to: i32,

	transform: ViewTransform,
	initial_transform: ViewTransform,
	width: f64,
	height: f64,

	node_visible: Vec<bool>,
	edge_visible: Vec<bool>,
	node_dimmed: Vec<bool>,
	edge_dimmed: Vec<bool>,
	visible_count: usize,
}

impl ClientState {
	/// Load a model into a fresh view of `width` x `height` pixels. The
	/// viewport fit is computed here once and kept for [`Action::ResetView`].
	pub fn new(mut model: GraphModel, width: f64, height: f64) -> Self {
		if model.min_year > model.max_year {
			(model.min_year, model.max_year) = (model.max_year, model.min_year);
		}
		let config = model.view.clone();
		let index: HashMap<String, usize> = model
			.nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.clone(), i))
			.collect();
		let endpoints = model
			.edges
			.iter()
			.map(|e| (index.get(&e.source).copied(), index.get(&e.target).copied()))
			.collect();
		let adjacency = adjacency(&model.edges);
		let positions: Vec<Position> = model.nodes.iter().map(Node::position).collect();
		let initial_transform =
			ViewTransform::fit(positions.iter().copied(), width, height, config.fit_margin);

		let mut state = Self {
			year_from: model.min_year,
			year_to: model.max_year,
			node_visible: vec![true; model.nodes.len()],
			edge_visible: vec![true; model.edges.len()],
			node_dimmed: vec![false; model.nodes.len()],
			edge_dimmed: vec![false; model.edges.len()],
			visible_count: model.nodes.len(),
			model,
			config,
			index,
			endpoints,
			adjacency,
			positions,
			selection: None,
			neighbor_mode: false,
			filters: TypeFilters::default(),
			transform: initial_transform,
			initial_transform,
			width,
			height,
		};
		state.refresh_visibility();
		debug!(
			"client state: {} nodes, {} edges, years {}..={}",
			state.model.nodes.len(),
			state.model.edges.len(),
			state.year_from,
			state.year_to
		);
		state
	}

	/// Apply one transition. Every handler runs to completion before the next.
	pub fn dispatch(&mut self, action: Action) {
		match action {
			Action::SetTypeFilter(category, enabled) => {
				self.filters.set(category, enabled);
				self.refresh_visibility();
			}
			Action::SetYearFrom(year) => {
				self.year_from = self.clamp_year(year);
				if self.year_from > self.year_to {
					self.year_to = self.year_from;
				}
				self.refresh_visibility();
			}
			Action::SetYearTo(year) => {
				self.year_to = self.clamp_year(year);
				if self.year_to < self.year_from {
					self.year_from = self.year_to;
				}
				self.refresh_visibility();
			}
			Action::Select(node) => {
				if node < self.model.nodes.len() {
					self.selection = Some(node);
					self.refresh_dim();
				}
			}
			Action::ClearSelection => {
				self.selection = None;
				self.refresh_dim();
			}
			Action::SetNeighborMode(on) => {
				self.neighbor_mode = on;
				self.refresh_dim();
			}
			Action::ToggleNeighborMode => {
				self.neighbor_mode = !self.neighbor_mode;
				self.refresh_dim();
			}
			Action::Focus(node) => {
				if let Some(&p) = self.positions.get(node) {
					self.transform = ViewTransform::centered_on(
						p,
						self.config.focus_zoom,
						self.width,
						self.height,
					);
					self.dispatch(Action::Select(node));
				}
			}
			Action::Pan { dx, dy } => self.transform = self.transform.panned(dx, dy),
			Action::Zoom { factor, sx, sy } => {
				self.transform = self.transform.zoomed_at(
					factor,
					sx,
					sy,
					self.config.min_zoom,
					self.config.max_zoom,
				);
			}
			Action::ResetView => self.transform = self.initial_transform,
			Action::MoveNode { node, to } => {
				if let Some(p) = self.positions.get_mut(node) {
					*p = to;
				}
			}
			Action::Resize { width, height } => {
				self.width = width;
				self.height = height;
			}
		}
	}

	fn clamp_year(&self, year: i32) -> i32 {
		year.clamp(self.model.min_year, self.model.max_year)
	}

	/// Recompute node and edge visibility from the filters.
	fn refresh_visibility(&mut self) {
		for (visible, node) in self.node_visible.iter_mut().zip(&self.model.nodes) {
			let type_ok = self.filters.enabled(node.category);
			let year_ok = node
				.year_range()
				.is_none_or(|range| range.intersects(self.year_from, self.year_to));
			*visible = type_ok && year_ok;
		}
		self.visible_count = self.node_visible.iter().filter(|v| **v).count();

		let node_visible = &self.node_visible;
		let shown = |end: Option<usize>| end.is_some_and(|i| node_visible[i]);
		for (visible, (source, target)) in self.edge_visible.iter_mut().zip(&self.endpoints) {
			*visible = shown(*source) && shown(*target);
		}
	}

	/// Recompute the neighbor overlay from the selection and mode.
	fn refresh_dim(&mut self) {
		let focus = match (self.neighbor_mode, self.selection) {
			(true, Some(selected)) => Some(self.model.nodes[selected].id.as_str()),
			_ => None,
		};
		let Some(focus) = focus else {
			self.node_dimmed.fill(false);
			self.edge_dimmed.fill(false);
			return;
		};

		let neighbors = self.adjacency.get(focus);
		for (dimmed, node) in self.node_dimmed.iter_mut().zip(&self.model.nodes) {
			let id = node.id.as_str();
			*dimmed = id != focus && !neighbors.is_some_and(|n| n.contains(id));
		}
		for (dimmed, edge) in self.edge_dimmed.iter_mut().zip(&self.model.edges) {
			*dimmed = edge.source != focus && edge.target != focus;
		}
	}

	/// The loaded model.
	pub fn model(&self) -> &GraphModel {
		&self.model
	}

	/// All nodes, in model order.
	pub fn nodes(&self) -> &[Node] {
		&self.model.nodes
	}

	/// All edges, dangling ones included.
	pub fn edges(&self) -> &[Edge] {
		&self.model.edges
	}

	/// View parameters carried by the model.
	pub fn config(&self) -> &ViewConfig {
		&self.config
	}

	/// Index of the node with `id`.
	pub fn node_index(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	/// Undirected neighbors of a node id.
	pub fn neighbors(&self, id: &str) -> Option<&HashSet<String>> {
		self.adjacency.get(id)
	}

	/// Index of the selected node.
	pub fn selection(&self) -> Option<usize> {
		self.selection
	}

	/// The selected node.
	pub fn selected_node(&self) -> Option<&Node> {
		self.selection.map(|i| &self.model.nodes[i])
	}

	/// The single highlighted node is the selected one.
	pub fn is_highlighted(&self, node: usize) -> bool {
		self.selection == Some(node)
	}

	/// Whether the neighbor overlay is on.
	pub fn neighbor_mode(&self) -> bool {
		self.neighbor_mode
	}

	/// Current type filters.
	pub fn filters(&self) -> TypeFilters {
		self.filters
	}

	/// Global `(min, max)` year of the model, the slider extent.
	pub fn year_bounds(&self) -> (i32, i32) {
		(self.model.min_year, self.model.max_year)
	}

	/// Current `(from, to)` year filter.
	pub fn year_range(&self) -> (i32, i32) {
		(self.year_from, self.year_to)
	}

	/// Current pan/zoom.
	pub fn transform(&self) -> ViewTransform {
		self.transform
	}

	/// Pan/zoom fitted at load.
	pub fn initial_transform(&self) -> ViewTransform {
		self.initial_transform
	}

	/// Viewport `(width, height)` in pixels.
	pub fn viewport(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	/// Graph-space position of a node, moved by drags.
	pub fn position(&self, node: usize) -> Position {
		self.positions.get(node).copied().unwrap_or(Position::ORIGIN)
	}

	/// Drawn endpoints of an edge. An id with no node resolves to the origin.
	pub fn edge_endpoints(&self, edge: usize) -> (Position, Position) {
		let (source, target) = self.endpoints[edge];
		let at = |end: Option<usize>| end.map_or(Position::ORIGIN, |i| self.positions[i]);
		(at(source), at(target))
	}

	/// Whether a node passes the type and year filters.
	pub fn is_node_visible(&self, node: usize) -> bool {
		self.node_visible[node]
	}

	/// Whether both endpoints of an edge exist and are visible.
	pub fn is_edge_visible(&self, edge: usize) -> bool {
		self.edge_visible[edge]
	}

	/// Whether the neighbor overlay dims a node.
	pub fn is_node_dimmed(&self, node: usize) -> bool {
		self.node_dimmed[node]
	}

	/// Whether the neighbor overlay dims an edge.
	pub fn is_edge_dimmed(&self, edge: usize) -> bool {
		self.edge_dimmed[edge]
	}

	/// Number of visible nodes.
	pub fn visible_count(&self) -> usize {
		self.visible_count
	}

	/// Search over all nodes, regardless of filters.
	pub fn search(&self, query: &str) -> Vec<SearchHit> {
		search(&self.model.nodes, query, &self.config)
	}

	/// Topmost visible node under a screen point.
	pub fn node_at_position(&self, sx: f64, sy: f64, config: &ScaleConfig) -> Option<usize> {
		let p = self.transform.to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		(0..self.model.nodes.len()).rev().find(|&i| {
			if !self.node_visible[i] {
				return false;
			}
			let q = self.positions[i];
			let (dx, dy) = (q.x - p.x, q.y - p.y);
			(dx * dx + dy * dy).sqrt() < scale.hit_radius(self.model.nodes[i].radius)
		})
	}
}

/// Symmetric id → neighbor ids map over all edges, including those whose
/// endpoints name no node.
fn adjacency(edges: &[Edge]) -> HashMap<String, HashSet<String>> {
	let mut map: HashMap<String, HashSet<String>> = HashMap::new();
	for edge in edges {
		map.entry(edge.source.clone())
			.or_default()
			.insert(edge.target.clone());
		map.entry(edge.target.clone())
			.or_default()
			.insert(edge.source.clone());
	}
	map
}
