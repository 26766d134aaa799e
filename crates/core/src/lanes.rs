//! Lane assignment.
//!
//! Commits are consumed newest-first, one at a time, against a [`LaneTable`]
//! that remembers which commit each open lane is waiting for:
//!
//! ```text
//!   commit ──▶ resolve_lane ──▶ update_lanes ──▶ LaneRow
//!                  │                 │
//!                  └──── LaneTable ◀─┘   (claim, hand over to parents, trim)
//! ```
//!
//! A parent id is never expected by two lanes at once. When a commit's parent
//! already has a lane waiting for it, the commit's line joins that lane
//! instead of opening a second one.

use smallvec::SmallVec;
use swimlane_protocol::CommitRecord;

use crate::model::{GraphLayout, LaneRow, LaneTable};

/// Lay out `commits` (topologically ordered, newest first) with a fresh table.
pub fn assign_lanes(commits: &[CommitRecord]) -> GraphLayout {
    let mut table = LaneTable::new();
    let mut rows = Vec::with_capacity(commits.len());
    let mut lane_count = 0;

    for commit in commits {
        let lane = resolve_lane(commit, &mut table);
        let row = update_lanes(commit, lane, &mut table);
        lane_count = lane_count.max(row.width()).max(lane + 1);
        rows.push(row);
    }

    log::debug!(
        "assigned {} commits to {} lanes ({} still open)",
        rows.len(),
        lane_count,
        table.len()
    );

    GraphLayout {
        rows,
        lane_count,
        final_width: table.len(),
    }
}

/// Pick the lane `commit` is drawn in.
///
/// A lane already waiting for the commit wins; otherwise the lowest vacant
/// lane is claimed for the commit's primary parent, appending one if needed.
pub fn resolve_lane<'a>(commit: &'a CommitRecord, table: &mut LaneTable<'a>) -> usize {
    if let Some(lane) = table.position(&commit.id) {
        return lane;
    }
    let expected = unclaimed(table, commit.primary_parent());
    table.reserve(expected)
}

/// Hand the commit's lane over to its parents and trim trailing vacancies.
pub fn update_lanes<'a>(commit: &'a CommitRecord, lane: usize, table: &mut LaneTable<'a>) -> LaneRow {
    if let Some(owned) = table.position(&commit.id) {
        table.assign(owned, None);
        let expected = unclaimed(table, commit.primary_parent());
        table.assign(owned, expected);
    }

    for parent in commit.secondary_parents() {
        if !table.is_expected(parent) {
            table.reserve(Some(parent));
        }
    }

    table.trim();

    let parent_lanes: SmallVec<[usize; 2]> = commit
        .parents
        .iter()
        .enumerate()
        .filter(|(i, parent)| !commit.parents[..*i].contains(parent))
        .filter_map(|(_, parent)| table.position(parent))
        .collect();

    LaneRow {
        lane,
        parent_lanes,
        occupancy: table.occupancy(),
    }
}

/// `parent`, unless some lane is already waiting for it.
fn unclaimed<'a>(table: &LaneTable<'a>, parent: Option<&'a str>) -> Option<&'a str> {
    parent.filter(|id| !table.is_expected(id))
}
