//! Character-cell rendering of a laid-out history, for terminals.
//!
//! Each commit produces two rows: a node row and a connector row leading
//! into the next commit. Lane `n` lives in column `2 * n`; odd columns hold
//! diagonal connectors.

use std::cmp::Ordering;

use swimlane_protocol::ThemeToken;

use crate::model::GraphView;

pub const NODE: char = '●';
pub const VERTICAL: char = '│';
pub const HORIZONTAL: char = '─';
pub const CROSSING: char = '┼';
/// Line moving one lane to the right on its way down.
pub const DOWN_RIGHT: char = '╲';
/// Line moving one lane to the left on its way down.
pub const DOWN_LEFT: char = '╱';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub color: Option<ThemeToken>,
}

impl Glyph {
    const BLANK: Self = Self { ch: ' ', color: None };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphRow {
    pub cells: Vec<Glyph>,
    /// Index of the commit drawn on this row; `None` for connector rows.
    pub commit: Option<usize>,
}

impl GlyphRow {
    fn blank(width: usize, commit: Option<usize>) -> Self {
        Self {
            cells: vec![Glyph::BLANK; width],
            commit,
        }
    }

    fn set(&mut self, column: usize, ch: char, color: ThemeToken) {
        if column >= self.cells.len() {
            self.cells.resize(column + 1, Glyph::BLANK);
        }
        self.cells[column] = Glyph {
            ch,
            color: Some(color),
        };
    }

    /// Draw a horizontal run through `column` without erasing what is there:
    /// vertical lines become crossings, diagonals are kept.
    fn cross(&mut self, column: usize, color: ThemeToken) {
        match self.cells.get(column).map(|glyph| glyph.ch) {
            Some(VERTICAL) => self.set(column, CROSSING, color),
            None | Some(' ') => self.set(column, HORIZONTAL, color),
            Some(_) => {}
        }
    }

    /// The row as plain text, trailing blanks removed.
    pub fn text(&self) -> String {
        let line: String = self.cells.iter().map(|glyph| glyph.ch).collect();
        line.trim_end().to_owned()
    }
}

pub fn render_glyphs(view: &GraphView) -> Vec<GlyphRow> {
    let layout = &view.layout;
    let width = layout.lane_count * 2;
    let mut rows = Vec::with_capacity(layout.len() * 2);

    for (index, row) in layout.rows.iter().enumerate() {
        let mut node_row = GlyphRow::blank(width, Some(index));
        for (lane, _) in layout
            .incoming(index)
            .iter()
            .enumerate()
            .filter(|(_, occupied)| **occupied)
        {
            node_row.set(lane * 2, VERTICAL, ThemeToken::for_lane(lane));
        }
        node_row.set(row.lane * 2, NODE, ThemeToken::for_lane(row.lane));
        rows.push(node_row);

        let mut links = GlyphRow::blank(width, None);
        for lane in layout.passing(index) {
            links.set(lane * 2, VERTICAL, ThemeToken::for_lane(lane));
        }
        for &parent in &row.parent_lanes {
            let color = ThemeToken::for_lane(parent);
            match parent.cmp(&row.lane) {
                Ordering::Equal => links.set(parent * 2, VERTICAL, color),
                Ordering::Greater => {
                    for column in row.lane * 2 + 1..parent * 2 - 1 {
                        links.cross(column, color);
                    }
                    links.set(parent * 2 - 1, DOWN_RIGHT, color);
                }
                Ordering::Less => {
                    links.set(parent * 2 + 1, DOWN_LEFT, color);
                    for column in parent * 2 + 2..row.lane * 2 {
                        links.cross(column, color);
                    }
                }
            }
        }
        rows.push(links);
    }

    rows
}
