//! Output formats for the command line.
//!
//! This is a read-only view of a compiled graph; image rendering lives
//! elsewhere.

pub mod json;
pub mod text;

pub use json::render_json;
pub use text::{render_edges, render_order, render_summary};
