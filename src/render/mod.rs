//! Render Layer - Display-ready Projection of Store State
//!
//! Pure projections from store state into strings: the markets table
//! with its count badge, and the analytics metric tiles. Nothing here
//! touches I/O; `main` decides where the strings go.

pub mod metrics;
pub mod table;

pub use metrics::{analytics_tiles, MetricTile};
pub use table::{render_table, DisplayTable};
