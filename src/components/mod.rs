//! UI components.

pub mod citation_graph;
