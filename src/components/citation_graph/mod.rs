//! Interactive citation graph client.
//!
//! Renders the canonical model on an HTML canvas with:
//! - Type and publication-year filters
//! - Label and citation search with fly-to
//! - A neighbor overlay dimming everything outside a node's neighborhood
//! - Pan, zoom, node dragging and a detail panel with copyable citations
//!
//! Everything except `render`, `component` and `controls` is plain Rust
//! with no web types, so the interaction logic is testable off the browser.
//!
//! # Example
//!
//! ```ignore
//! let state = RwSignal::new(ClientState::new(model, 1280.0, 800.0));
//! let hover = RwSignal::new(None);
//!
//! view! { <CitationGraphCanvas state hover /> }
//! ```

mod component;
pub mod controls;
mod render;
pub mod scale;
pub mod search;
pub mod state;
pub mod theme;
pub mod viewport;

pub use component::{CitationGraphCanvas, window_size};
pub use controls::{CopyToast, DetailPanel, FilterCard, Hover, SearchBox, ToastClock, Tooltip, copy_handler};
pub use search::{MatchKind, SearchHit};
pub use state::{Action, ClientState, TypeFilters};
pub use viewport::ViewTransform;
