//! Overlay controls: search, filters, detail panel, tooltip and copy toast.
//!
//! Every control reads from and dispatches into the shared
//! `RwSignal<ClientState>`; none of them keeps its own copy of view state.

use std::time::Duration;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;

use super::state::{Action, ClientState};
use crate::model::ColorCategory;
use crate::model::apa::{Fragment, SpanStyle};

/// Pointer position over a node, in client coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hover {
	/// Hovered node index.
	pub node: usize,
	/// Pointer client x.
	pub x: f64,
	/// Pointer client y.
	pub y: f64,
}

const TOAST_DURATION: Duration = Duration::from_millis(2000);

/// Free-text search over labels and citations.
///
/// Results are picked on `mousedown` so the pick lands before the input's
/// `blur` closes the list.
#[component]
pub fn SearchBox(state: RwSignal<ClientState>) -> impl IntoView {
	let query = RwSignal::new(String::new());
	let open = RwSignal::new(false);
	// The node set never changes, so only the query is tracked.
	let hits = Memo::new(move |_| query.with(|q| state.with_untracked(|s| s.search(q))));

	let results = move || {
		let hits = hits.get();
		if hits.is_empty() {
			return view! { <div class="no-results">"No results found."</div> }.into_any();
		}
		hits.into_iter()
			.map(|hit| {
				let label = state.with_untracked(|s| s.nodes()[hit.node].label.clone());
				let picked = label.clone();
				let pick = move |ev: web_sys::MouseEvent| {
					ev.prevent_default();
					state.update(|s| s.dispatch(Action::Focus(hit.node)));
					query.set(picked.clone());
					open.set(false);
				};
				view! {
					<div class="search-result-item" on:mousedown=pick>
						<div class="sr-type">{hit.kind.title()}</div>
						<div class="sr-label">{label}</div>
						{(!hit.snippet.is_empty()).then(|| view! {
							<div class="sr-sub">{hit.snippet.clone()}</div>
						})}
					</div>
				}
			})
			.collect_view()
			.into_any()
	};

	view! {
		<div id="searchbox">
			<input
				type="text"
				placeholder="Search nodes or papers..."
				autocomplete="off"
				prop:value=move || query.get()
				on:input=move |ev| {
					query.set(event_target_value(&ev));
					open.set(true);
				}
				on:focus=move |_| open.set(true)
				on:blur=move |_| open.set(false)
			/>
			<Show when=move || open.get() && query.with(|q| !q.trim().is_empty())>
				<div id="search-results">{results}</div>
			</Show>
		</div>
	}
}

/// Statistics, type toggles, year range and view buttons.
#[component]
pub fn FilterCard(state: RwSignal<ClientState>) -> impl IntoView {
	let (total_nodes, total_edges, (min_year, max_year)) = state.with_untracked(|s| {
		(s.model().node_count, s.model().edge_count, s.year_bounds())
	});
	let visible = Memo::new(move |_| state.with(|s| s.visible_count()));
	let filters = Memo::new(move |_| state.with(|s| s.filters()));
	let years = Memo::new(move |_| state.with(|s| s.year_range()));
	let neighbor_mode = Memo::new(move |_| state.with(|s| s.neighbor_mode()));

	let type_toggles = ColorCategory::ALL
		.into_iter()
		.map(|category| {
			let swatch = state.with_untracked(|s| category_swatch(s, category));
			view! {
				<label>
					<input
						type="checkbox"
						prop:checked=move || filters.get().enabled(category)
						on:change=move |ev| {
							let enabled = event_target_checked(&ev);
							state.update(|s| s.dispatch(Action::SetTypeFilter(category, enabled)));
						}
					/>
					<span style=format!("color:{swatch}")>"●"</span>
					{category.title()}
				</label>
			}
		})
		.collect_view();

	let set_year = move |ev: web_sys::Event, action: fn(i32) -> Action| {
		match event_target_value(&ev).parse::<i32>() {
			Ok(year) => state.update(|s| s.dispatch(action(year))),
			Err(e) => debug!("ignoring year input: {e}"),
		}
	};

	view! {
		<div class="ctrl-card">
			<div class="stats-row">
				<div class="stat-box">
					<div class="stat-val">{total_nodes}</div>
					<div class="stat-lbl">"Nodes"</div>
				</div>
				<div class="stat-box">
					<div class="stat-val">{total_edges}</div>
					<div class="stat-lbl">"Edges"</div>
				</div>
				<div class="stat-box">
					<div class="stat-val">{move || visible.get()}</div>
					<div class="stat-lbl">"Visible"</div>
				</div>
			</div>

			<div class="ctrl-title">"Node types"</div>
			{type_toggles}

			<div class="ctrl-title">"Publication years"</div>
			<div class="year-row">
				<span class="year-val">{move || years.get().0}</span>
				<input
					type="range"
					min=min_year.to_string()
					max=max_year.to_string()
					prop:value=move || years.get().0.to_string()
					on:input=move |ev| set_year(ev, Action::SetYearFrom)
				/>
			</div>
			<div class="year-row">
				<span class="year-val">{move || years.get().1}</span>
				<input
					type="range"
					min=min_year.to_string()
					max=max_year.to_string()
					prop:value=move || years.get().1.to_string()
					on:input=move |ev| set_year(ev, Action::SetYearTo)
				/>
			</div>

			<div class="btn-row">
				<button class="ctrl-btn" on:click=move |_| state.update(|s| s.dispatch(Action::ResetView))>
					"Reset view"
				</button>
				<button
					class="ctrl-btn"
					class:active=move || neighbor_mode.get()
					on:click=move |_| state.update(|s| s.dispatch(Action::ToggleNeighborMode))
				>
					"Neighbors"
				</button>
			</div>
		</div>
	}
}

/// Color of the first node in `category`, or a neutral gray.
fn category_swatch(state: &ClientState, category: ColorCategory) -> String {
	state
		.nodes()
		.iter()
		.find(|n| n.category == category)
		.map_or_else(|| "#9E9E9E".to_string(), |n| n.color.clone())
}

/// Details of the selected node with its formatted citations.
#[component]
pub fn DetailPanel(state: RwSignal<ClientState>, on_copy: Callback<String>) -> impl IntoView {
	let citations = state.with_untracked(|s| s.config().citation_config());
	let selected = Memo::new(move |_| state.with(|s| s.selected_node().cloned()));

	let body = move || {
		let Some(node) = selected.get() else {
			return view! {
				<h3>"Selected Node"</h3>
				<div class="hint">"Click a node to view details."</div>
			}
			.into_any();
		};
		let node_type = (!node.node_type.is_empty()).then(|| {
			view! {
				<div style="font-size:12px;color:#888;margin-bottom:8px">
					{format!("Type: {}", node.node_type)}
				</div>
			}
		});
		let entries = if node.citations.is_empty() {
			view! { <div class="hint">"No citation data available."</div> }.into_any()
		} else {
			node.citations
				.iter()
				.map(|record| citation_entry(Fragment::from_record(record, &citations), on_copy))
				.collect_view()
				.into_any()
		};
		view! {
			<h3>{node.label}</h3>
			{node_type}
			{entries}
		}
		.into_any()
	};

	view! { <div id="sidepanel">{body}</div> }
}

fn citation_entry(fragment: Fragment, on_copy: Callback<String>) -> impl IntoView {
	let Fragment { spans, copy_text } = fragment;
	let spans = spans
		.into_iter()
		.map(|span| match span.style {
			SpanStyle::Plain => span.text.into_any(),
			SpanStyle::Author | SpanStyle::Title => {
				let class = span.style.class().unwrap_or_default();
				view! { <span class=class>{span.text}</span> }.into_any()
			}
			SpanStyle::Venue => view! { <i class="apa-journal">{span.text}</i> }.into_any(),
			SpanStyle::Volume => view! { <i>{span.text}</i> }.into_any(),
			SpanStyle::Doi => {
				let href = span.text.clone();
				view! { <a href=href target="_blank" class="apa-doi">{span.text}</a> }.into_any()
			}
		})
		.collect_view();

	view! {
		<div class="apa-entry">
			{spans}
			<button class="copy-btn" on:click=move |_| on_copy.run(copy_text.clone())>
				"Copy APA"
			</button>
		</div>
	}
}

/// Label, type and year span of the hovered node.
#[component]
pub fn Tooltip(state: RwSignal<ClientState>, hover: RwSignal<Option<Hover>>) -> impl IntoView {
	move || {
		hover.get().map(|hover| {
			let node = state.with_untracked(|s| s.nodes()[hover.node].clone());
			let years = node.year_range().map(|range| {
				view! {
					<br />
					<span style="color:#aaa;font-size:11px">
						{format!("{}–{}", range.min, range.max)}
					</span>
				}
			});
			view! {
				<div
					id="tooltip"
					style=format!("left:{}px;top:{}px", hover.x + 14.0, hover.y - 10.0)
				>
					<b>{node.label}</b>
					<br />
					<span style="color:#888;font-size:11px">{node.node_type}</span>
					{years}
				</div>
			}
		})
	}
}

/// Transient confirmation shown after a copy.
#[component]
pub fn CopyToast(visible: ReadSignal<bool>) -> impl IntoView {
	view! { <div class="copy-toast" class:visible=move || visible.get()>"Citation copied!"</div> }
}

/// Generation counter behind the copy toast. Every show starts a new
/// generation, and a scheduled hide only applies to the one it was
/// scheduled for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ToastClock {
	generation: u64,
}

impl ToastClock {
	/// Start a new generation and return it.
	pub fn show(&mut self) -> u64 {
		self.generation += 1;
		self.generation
	}

	/// Whether the hide scheduled by show `shown` is still current.
	pub fn expires(&self, shown: u64) -> bool {
		self.generation == shown
	}
}

/// Copy handler for the detail panel. The toast appears once the clipboard
/// write succeeds; a failed write shows nothing. Overlapping copies extend
/// the toast instead of cutting it short.
pub fn copy_handler(set_visible: WriteSignal<bool>) -> Callback<String> {
	let clock = StoredValue::new(ToastClock::default());
	Callback::new(move |text: String| {
		write_clipboard(&text, move || {
			clock.update_value(|c| {
				c.show();
			});
			let shown = clock.get_value().generation;
			set_visible.set(true);
			set_timeout(
				move || {
					if clock.get_value().expires(shown) {
						set_visible.set(false);
					}
				},
				TOAST_DURATION,
			);
		});
	})
}

/// `navigator.clipboard.writeText(text)`, running `on_written` once the
/// promise fulfils. Rejections and a missing clipboard are logged.
fn write_clipboard(text: &str, on_written: impl FnOnce() + 'static) {
	let Some(window) = web_sys::window() else {
		return;
	};
	let clipboard = window.navigator().clipboard();
	// Absent outside secure contexts.
	if clipboard.is_undefined() {
		warn!("clipboard API unavailable");
		return;
	}
	let on_fulfilled = Closure::once(move |_: JsValue| on_written());
	let on_rejected = Closure::once(move |err: JsValue| {
		warn!("clipboard write rejected: {err:?}");
	});
	let promise: js_sys::Promise = clipboard.write_text(text);
	let _ = promise.then2(&on_fulfilled, &on_rejected);
	debug!("clipboard write requested ({} chars)", text.chars().count());
	on_fulfilled.forget();
	on_rejected.forget();
}
