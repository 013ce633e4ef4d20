//! Canvas rendering for the citation graph.
//!
//! Rendering uses passes for z-ordering:
//! 1. Background (screen space)
//! 2. Edge lines (world space)
//! 3. Nodes and labels, then the selected node on top with its ring

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::state::ClientState;
use super::theme::Theme;

/// Renders the complete graph to the canvas.
pub fn render(
	state: &ClientState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let transform = state.transform();
	let scale = ScaledValues::new(config, transform.k);
	let (width, height) = state.viewport();

	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, width, height);

	ctx.save();
	let _ = ctx.translate(transform.x, transform.y);
	let _ = ctx.scale(transform.k, transform.k);

	draw_edges(state, ctx, &scale, theme);

	for node in 0..state.nodes().len() {
		if state.is_node_visible(node) && !state.is_highlighted(node) {
			draw_node(state, ctx, &scale, theme, node);
		}
	}
	if let Some(selected) = state.selection() {
		if state.is_node_visible(selected) {
			draw_node(state, ctx, &scale, theme, selected);
			draw_ring(state, ctx, &scale, theme, selected);
		}
	}

	ctx.restore();
}

fn draw_edges(
	state: &ClientState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	ctx.set_line_width(scale.edge_width);
	let normal = theme.edge.to_css();
	let dimmed = theme.edge.with_alpha(theme.dim.edge_alpha).to_css();

	// Batch by style so each group is one stroke call.
	for (style, want_dimmed) in [(&dimmed, true), (&normal, false)] {
		ctx.begin_path();
		for edge in 0..state.edges().len() {
			if !state.is_edge_visible(edge) || state.is_edge_dimmed(edge) != want_dimmed {
				continue;
			}
			let (a, b) = state.edge_endpoints(edge);
			ctx.move_to(a.x, a.y);
			ctx.line_to(b.x, b.y);
		}
		ctx.set_stroke_style_str(style);
		ctx.stroke();
	}
}

fn draw_node(
	state: &ClientState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	index: usize,
) {
	let node = &state.nodes()[index];
	let p = state.position(index);
	let alpha = if state.is_node_dimmed(index) {
		theme.dim.node_alpha
	} else {
		1.0
	};

	ctx.set_global_alpha(alpha);

	ctx.begin_path();
	let _ = ctx.arc(p.x, p.y, node.radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&theme.node_fill(&node.color).to_css());
	ctx.fill();
	ctx.set_stroke_style_str(&theme.node_border.to_css());
	ctx.set_line_width(scale.node_stroke);
	ctx.stroke();

	let font_size = f64::from(node.font_size);
	if scale.shows_label(font_size) {
		ctx.set_global_alpha(alpha * scale.label_alpha);
		ctx.set_fill_style_str(&theme.label.to_css());
		ctx.set_font(&format!("{font_size}px 'Segoe UI', sans-serif"));
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		let _ = ctx.fill_text(&node.label, p.x, p.y);
	}

	ctx.set_global_alpha(1.0);
}

fn draw_ring(
	state: &ClientState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	index: usize,
) {
	let node = &state.nodes()[index];
	let p = state.position(index);
	ctx.begin_path();
	let _ = ctx.arc(p.x, p.y, node.radius + scale.ring_offset, 0.0, 2.0 * PI);
	ctx.set_stroke_style_str(&theme.highlight.to_css());
	ctx.set_line_width(scale.ring_width);
	ctx.stroke();
}
