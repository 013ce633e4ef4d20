//! Normalization pipeline: raw attributed graph in, canonical model out.
//!
//! Every stage is total. Missing or malformed attributes degrade to defaults
//! (label → id, size → default weight, position → origin, unparsable year →
//! excluded) and never abort the rest of the graph.

pub mod apa;
pub mod artifact;
pub mod attrs;
pub mod bibtex;
pub mod builder;
pub mod size;
mod types;

pub use artifact::{ArtifactOptions, render_html, render_json};
pub use attrs::{AttrBag, AttrValue};
pub use builder::{RawEdge, RawGraph, RawNode, build_model, build_node};
pub use types::{CitationRecord, ColorCategory, Edge, GraphModel, Node, Position, YearRange};
