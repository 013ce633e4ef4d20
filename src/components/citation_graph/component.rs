//! Leptos component wrapping the citation graph canvas.
//!
//! The component creates an HTML canvas element and turns mouse and wheel
//! events into [`Action`]s on the shared state. An animation loop runs via
//! `requestAnimationFrame` and redraws from the state each frame.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::controls::Hover;
use super::render;
use super::scale::ScaleConfig;
use super::state::{Action, ClientState};
use super::theme::Theme;
use crate::model::Position;

/// Pointer travel (pixels) under which a press counts as a click.
const CLICK_SLOP: f64 = 3.0;

/// What the pressed mouse button is doing.
#[derive(Clone, Copy, Debug, Default)]
enum Pointer {
	#[default]
	Idle,
	/// Dragging a node from `node_start`, pressed at `start`.
	Drag {
		node: usize,
		start: (f64, f64),
		node_start: Position,
		moved: bool,
	},
	/// Panning the background; `last` is the previous pointer position.
	Pan {
		start: (f64, f64),
		last: (f64, f64),
		moved: bool,
	},
}

fn travelled(start: (f64, f64), now: (f64, f64)) -> bool {
	let (dx, dy) = (now.0 - start.0, now.1 - start.1);
	(dx * dx + dy * dy).sqrt() >= CLICK_SLOP
}

/// Inner size of the browser window, or 800x600 outside a browser.
pub fn window_size() -> (f64, f64) {
	let Some(window) = web_sys::window() else {
		return (800.0, 600.0);
	};
	let dim = |v: Result<JsValue, JsValue>, fallback| v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback);
	(dim(window.inner_width(), 800.0), dim(window.inner_height(), 600.0))
}

fn local_position(canvas: &NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Renders the graph on a full-window canvas.
///
/// `state` is shared with the overlay controls. `hover` receives the node
/// under the pointer (in client coordinates) for the tooltip.
#[component]
pub fn CitationGraphCanvas(
	state: RwSignal<ClientState>,
	hover: RwSignal<Option<Hover>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let pointer = Rc::new(RefCell::new(Pointer::Idle));
	let scale = Rc::new(ScaleConfig::default());
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (animate_init, resize_cb_init, scale_init) =
		(animate.clone(), resize_cb.clone(), scale.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = window_size();
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		state.update(|s| s.dispatch(Action::Resize { width: w, height: h }));

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		let canvas_resize = canvas.clone();
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = window_size();
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			state.update(|s| {
				s.dispatch(Action::Resize {
					width: nw,
					height: nh,
				})
			});
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let theme = Theme::default();
		let (scale_anim, animate_inner) = (scale_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			state.with_untracked(|s| render::render(s, &ctx, &scale_anim, &theme));
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(win) = web_sys::window() {
					let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let (pointer_md, scale_md) = (pointer.clone(), scale.clone());
	let on_mousedown = move |ev: MouseEvent| {
		let Some(at) = local_position(&canvas_ref, &ev) else {
			return;
		};
		let hit = state.with_untracked(|s| {
			s.node_at_position(at.0, at.1, &scale_md)
				.map(|node| (node, s.position(node)))
		});
		*pointer_md.borrow_mut() = match hit {
			Some((node, node_start)) => Pointer::Drag {
				node,
				start: at,
				node_start,
				moved: false,
			},
			None => Pointer::Pan {
				start: at,
				last: at,
				moved: false,
			},
		};
	};

	let (pointer_mm, scale_mm) = (pointer.clone(), scale.clone());
	let on_mousemove = move |ev: MouseEvent| {
		let Some(at) = local_position(&canvas_ref, &ev) else {
			return;
		};
		let mut pointer = pointer_mm.borrow_mut();
		match *pointer {
			Pointer::Idle => {
				let under = state.with_untracked(|s| s.node_at_position(at.0, at.1, &scale_mm));
				hover.set(under.map(|node| Hover {
					node,
					x: ev.client_x() as f64,
					y: ev.client_y() as f64,
				}));
			}
			Pointer::Drag {
				node,
				start,
				node_start,
				ref mut moved,
			} => {
				*moved |= travelled(start, at);
				if *moved {
					state.update(|s| {
						let k = s.transform().k;
						let to = Position::new(
							node_start.x + (at.0 - start.0) / k,
							node_start.y + (at.1 - start.1) / k,
						);
						s.dispatch(Action::MoveNode { node, to });
					});
				}
			}
			Pointer::Pan {
				start,
				ref mut last,
				ref mut moved,
			} => {
				*moved |= travelled(start, at);
				let (dx, dy) = (at.0 - last.0, at.1 - last.1);
				*last = at;
				state.update(|s| s.dispatch(Action::Pan { dx, dy }));
			}
		}
	};

	let pointer_mu = pointer.clone();
	let on_mouseup = move |_: MouseEvent| {
		let released = std::mem::take(&mut *pointer_mu.borrow_mut());
		match released {
			Pointer::Drag {
				node, moved: false, ..
			} => state.update(|s| s.dispatch(Action::Select(node))),
			Pointer::Pan { moved: false, .. } => {
				state.update(|s| s.dispatch(Action::ClearSelection));
			}
			_ => {}
		}
	};

	let pointer_ml = pointer.clone();
	let on_mouseleave = move |_: MouseEvent| {
		*pointer_ml.borrow_mut() = Pointer::Idle;
		hover.set(None);
	};

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((sx, sy)) = local_position(&canvas_ref, &ev) else {
			return;
		};
		state.update(|s| {
			let step = s.config().wheel_step;
			let factor = if ev.delta_y() > 0.0 { 1.0 / step } else { step };
			s.dispatch(Action::Zoom { factor, sx, sy });
		});
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="citation-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
