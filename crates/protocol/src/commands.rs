use serde::{Deserialize, Serialize};

use crate::shared_str::SharedStr;
use crate::theme::ThemeToken;
use crate::types::Point;

/// A single, stateless render instruction.
///
/// The core emits a `Vec<RenderCommand>` for a laid-out history. Renderers
/// consume this list sequentially; each command carries all the data it needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Draw a commit node. `row` is the commit's position in the input
    /// sequence (for hit-testing / selection).
    DrawNode {
        center: Point,
        radius: f64,
        color: ThemeToken,
        row: usize,
    },

    /// Draw a line segment between two lane positions.
    DrawLine {
        from: Point,
        to: Point,
        color: ThemeToken,
        width: f64,
    },

    /// Draw a text string at a position.
    DrawText {
        position: Point,
        text: SharedStr,
        color: ThemeToken,
        font_size: f64,
        align: TextAlign,
    },

    /// Draw a decoration badge (HEAD, branch, tag) anchored at its left edge.
    DrawBadge {
        position: Point,
        text: SharedStr,
        color: ThemeToken,
    },

    /// Begin a logical group (e.g. one timeline entry).
    BeginGroup {
        id: SharedStr,
        label: Option<SharedStr>,
    },

    /// End the current group.
    EndGroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}
