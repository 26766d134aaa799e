use swimlane_protocol::{CommitRecord, Point, RenderCommand, TextAlign, ThemeToken, Viewport};

use crate::model::GraphView;

const LINE_WIDTH: f64 = 2.0;
/// Rough advance of one character at the default font size, for badge placement.
const CHAR_WIDTH: f64 = 7.0;

/// Geometry of the rendered timeline, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineStyle {
    pub lane_width: f64,
    pub row_height: f64,
    pub node_radius: f64,
    /// Space between the graph column and the commit text.
    pub text_gap: f64,
    pub font_size: f64,
}

impl Default for TimelineStyle {
    fn default() -> Self {
        Self {
            lane_width: 26.0,
            row_height: 44.0,
            node_radius: 5.0,
            text_gap: 12.0,
            font_size: 12.0,
        }
    }
}

impl TimelineStyle {
    pub fn lane_x(&self, lane: usize) -> f64 {
        lane as f64 * self.lane_width + self.lane_width / 2.0
    }

    pub fn row_y(&self, row: usize) -> f64 {
        row as f64 * self.row_height + self.row_height / 2.0
    }

    pub fn graph_width(&self, lane_count: usize) -> f64 {
        lane_count.max(1) as f64 * self.lane_width
    }

    /// Width and height needed to show the whole of `view`.
    pub fn extent(&self, view: &GraphView) -> (f64, f64) {
        let text_columns = view
            .commits
            .iter()
            .map(text_width)
            .max()
            .unwrap_or(48);
        let width = self.graph_width(view.layout.lane_count)
            + self.text_gap * 2.0
            + text_columns as f64 * CHAR_WIDTH;
        let height = view.commits.len().max(1) as f64 * self.row_height;
        (width, height)
    }
}

/// Render a laid-out history as a vertical timeline: one row per commit,
/// nodes placed in their lanes, lines running down to each parent.
pub fn render_timeline(
    view: &GraphView,
    style: &TimelineStyle,
    viewport: &Viewport,
) -> Vec<RenderCommand> {
    let mut commands = Vec::with_capacity(view.commits.len() * 8 + 2);
    commands.push(RenderCommand::BeginGroup {
        id: "timeline".into(),
        label: Some("Commit graph".into()),
    });

    if let Some(placeholder) = view.placeholder() {
        commands.push(RenderCommand::DrawText {
            position: Point::new(style.text_gap, style.row_height / 2.0),
            text: placeholder.into(),
            color: ThemeToken::TextMuted,
            font_size: style.font_size,
            align: TextAlign::Left,
        });
        commands.push(RenderCommand::EndGroup);
        return commands;
    }

    let row_count = view.layout.len();
    let text_x = style.graph_width(view.layout.lane_count) + style.text_gap;

    for (index, (commit, row)) in view.entries().enumerate() {
        let top = index as f64 * style.row_height;
        if !viewport.intersects_rows(top, top + style.row_height) {
            continue;
        }

        let center = Point::new(style.lane_x(row.lane), style.row_y(index));
        // Lines still open after the last row run off the bottom edge.
        let next_y = if index + 1 < row_count {
            style.row_y(index + 1)
        } else {
            row_count as f64 * style.row_height
        };

        commands.push(RenderCommand::BeginGroup {
            id: commit.display_id().into(),
            label: Some(title(commit).into()),
        });

        for lane in view.layout.passing(index) {
            let x = style.lane_x(lane);
            commands.push(RenderCommand::DrawLine {
                from: Point::new(x, center.y),
                to: Point::new(x, next_y),
                color: ThemeToken::for_lane(lane),
                width: LINE_WIDTH,
            });
        }
        for &parent_lane in &row.parent_lanes {
            commands.push(RenderCommand::DrawLine {
                from: center,
                to: Point::new(style.lane_x(parent_lane), next_y),
                color: ThemeToken::for_lane(parent_lane),
                width: LINE_WIDTH,
            });
        }

        commands.push(RenderCommand::DrawNode {
            center,
            radius: style.node_radius,
            color: ThemeToken::for_lane(row.lane),
            row: index,
        });

        let title = title(commit);
        commands.push(RenderCommand::DrawText {
            position: Point::new(text_x, center.y - 4.0),
            text: title.into(),
            color: ThemeToken::TextPrimary,
            font_size: style.font_size,
            align: TextAlign::Left,
        });
        commands.push(RenderCommand::DrawText {
            position: Point::new(text_x, center.y + 12.0),
            text: meta(commit).into(),
            color: ThemeToken::TextSecondary,
            font_size: style.font_size - 1.0,
            align: TextAlign::Left,
        });

        let mut badge_x = text_x + (title.chars().count() as f64 + 2.0) * CHAR_WIDTH;
        for (text, color) in badges(commit) {
            let advance = (text.chars().count() as f64 + 2.0) * CHAR_WIDTH;
            commands.push(RenderCommand::DrawBadge {
                position: Point::new(badge_x, center.y - 4.0),
                text: text.into(),
                color,
            });
            badge_x += advance;
        }

        commands.push(RenderCommand::EndGroup);
    }

    commands.push(RenderCommand::EndGroup);
    commands
}

fn title(commit: &CommitRecord) -> &str {
    if commit.summary.is_empty() {
        "(no message)"
    } else {
        &commit.summary
    }
}

fn meta(commit: &CommitRecord) -> String {
    let mut parts = vec![commit.display_id()];
    for part in [&commit.author, &commit.relative_time, &commit.committed_at] {
        if !part.is_empty() {
            parts.push(part);
        }
    }
    parts.join(" · ")
}

/// HEAD, local branch, and tag badges, in display order.
pub fn badges(commit: &CommitRecord) -> Vec<(String, ThemeToken)> {
    let decorations = &commit.decorations;
    let mut badges = Vec::new();
    if let Some(head) = &decorations.head {
        badges.push((format!("HEAD → {head}"), ThemeToken::BadgeHead));
    }
    badges.extend(
        decorations
            .local_branches
            .iter()
            .map(|branch| (branch.clone(), ThemeToken::BadgeBranch)),
    );
    badges.extend(
        decorations
            .tags
            .iter()
            .map(|tag| (tag.clone(), ThemeToken::BadgeTag)),
    );
    badges
}

fn text_width(commit: &CommitRecord) -> usize {
    let badges: usize = badges(commit)
        .iter()
        .map(|(text, _)| text.chars().count() + 2)
        .sum();
    (title(commit).chars().count() + 2 + badges).max(meta(commit).chars().count())
}
