use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    // Lane palette, cycled by lane index.
    LaneBlue,
    LaneOrange,
    LaneGreen,
    LaneYellow,
    LanePurple,

    BadgeHead,
    BadgeBranch,
    BadgeTag,

    TextPrimary,
    TextSecondary,
    TextMuted,

    Background,
}

impl ThemeToken {
    pub const LANE_PALETTE: [ThemeToken; 5] = [
        ThemeToken::LaneBlue,
        ThemeToken::LaneOrange,
        ThemeToken::LaneGreen,
        ThemeToken::LaneYellow,
        ThemeToken::LanePurple,
    ];

    /// Color of the node and lines drawn in `lane`.
    pub fn for_lane(lane: usize) -> Self {
        Self::LANE_PALETTE[lane % Self::LANE_PALETTE.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lane_colors_cycle() {
        assert_eq!(ThemeToken::for_lane(0), ThemeToken::LaneBlue);
        assert_eq!(ThemeToken::for_lane(4), ThemeToken::LanePurple);
        assert_eq!(ThemeToken::for_lane(5), ThemeToken::LaneBlue);
        assert_eq!(ThemeToken::for_lane(12), ThemeToken::LaneGreen);
    }
}
