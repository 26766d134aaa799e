//! Lane assignment for commit histories.
//!
//! A history comes in from a [`sources`] reader as a
//! [`GraphDocument`](swimlane_protocol::GraphDocument), is laid out by
//! [`lanes::assign_lanes`] into one lane per commit, and is turned into render
//! commands or terminal glyphs by [`views`].

pub mod lanes;
pub mod model;
pub mod sources;
pub mod svg;
pub mod views;

pub use lanes::assign_lanes;
pub use model::{GraphLayout, GraphSession, GraphSummary, GraphView, LaneRow, LaneTable};
pub use sources::{SourceError, parse_auto, read_path};
