use serde::Serialize;
use smallvec::SmallVec;

/// Lane placement of one commit and the lanes left open after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaneRow {
    /// Column the commit is drawn in.
    pub lane: usize,
    /// For each distinct parent, in parent order, the lane its line continues in.
    pub parent_lanes: SmallVec<[usize; 2]>,
    /// Which lanes carry a line into the next row.
    pub occupancy: Vec<bool>,
}

impl LaneRow {
    /// Width of the lane table once this commit was processed.
    pub fn width(&self) -> usize {
        self.occupancy.len()
    }

    /// Lanes carrying a line into the next row.
    pub fn open_lanes(&self) -> impl Iterator<Item = usize> + '_ {
        self.occupancy
            .iter()
            .enumerate()
            .filter_map(|(lane, occupied)| occupied.then_some(lane))
    }

    pub fn is_merge(&self) -> bool {
        self.parent_lanes.len() > 1
    }
}

/// Lane assignment for a whole commit sequence, rows in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphLayout {
    pub rows: Vec<LaneRow>,
    /// Widest the lane table got during the traversal.
    pub lane_count: usize,
    /// Lane table length after the last commit.
    pub final_width: usize,
}

impl GraphLayout {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn lane_of(&self, row: usize) -> Option<usize> {
        self.rows.get(row).map(|r| r.lane)
    }

    pub fn lanes(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().map(|r| r.lane)
    }

    /// Lanes with a line running into `row` from above.
    pub fn incoming(&self, row: usize) -> &[bool] {
        match row.checked_sub(1).and_then(|prev| self.rows.get(prev)) {
            Some(prev) => &prev.occupancy,
            None => &[],
        }
    }

    /// Lanes whose line runs straight past `row` without touching its commit.
    pub fn passing(&self, row: usize) -> impl Iterator<Item = usize> + '_ {
        let incoming = self.incoming(row);
        self.rows.get(row).into_iter().flat_map(move |current| {
            current.open_lanes().filter(move |&lane| {
                lane != current.lane && incoming.get(lane).copied().unwrap_or(false)
            })
        })
    }
}
