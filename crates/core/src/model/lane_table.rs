use smallvec::SmallVec;

/// The lanes open at one point of a traversal.
///
/// Each slot is either vacant or holds the id of the commit expected to show
/// up next in that lane. Slot index = visual column. Ids are borrowed from the
/// commit sequence being laid out, so a table never outlives its traversal.
#[derive(Debug, Clone, Default)]
pub struct LaneTable<'a> {
    slots: SmallVec<[Option<&'a str>; 8]>,
}

impl<'a> LaneTable<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The id expected in `lane`, or `None` when the lane is vacant or out of range.
    pub fn expected(&self, lane: usize) -> Option<&'a str> {
        self.slots.get(lane).copied().flatten()
    }

    /// The lane waiting for `id`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.slots.iter().position(|slot| *slot == Some(id))
    }

    pub fn is_expected(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Lowest vacant lane.
    pub fn first_vacant(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Write `expected` into the first vacant lane, appending one if none is
    /// free. Returns the lane used.
    pub fn reserve(&mut self, expected: Option<&'a str>) -> usize {
        match self.first_vacant() {
            Some(lane) => {
                self.slots[lane] = expected;
                lane
            }
            None => {
                self.slots.push(expected);
                self.slots.len() - 1
            }
        }
    }

    /// Overwrite one lane. Out-of-range lanes are ignored.
    pub fn assign(&mut self, lane: usize, expected: Option<&'a str>) {
        if let Some(slot) = self.slots.get_mut(lane) {
            *slot = expected;
        }
    }

    /// Drop vacant lanes from the end until the last one is occupied.
    pub fn trim(&mut self) {
        while self.slots.last().is_some_and(Option::is_none) {
            self.slots.pop();
        }
    }

    /// Per-lane occupied flags.
    pub fn occupancy(&self) -> Vec<bool> {
        self.slots.iter().map(Option::is_some).collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&'a str>> + '_ {
        self.slots.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reserve_prefers_lowest_vacancy() {
        let mut table = LaneTable::new();
        assert_eq!(table.reserve(Some("a")), 0);
        assert_eq!(table.reserve(Some("b")), 1);
        assert_eq!(table.reserve(Some("c")), 2);
        table.assign(0, None);
        table.assign(1, None);
        assert_eq!(table.first_vacant(), Some(0));
        assert_eq!(table.reserve(Some("d")), 0);
        assert_eq!(table.reserve(Some("e")), 1);
        assert_eq!(table.reserve(Some("f")), 3);
        assert_eq!(
            table.iter().collect::<Vec<_>>(),
            vec![Some("d"), Some("e"), Some("c"), Some("f")]
        );
    }

    #[test]
    fn trim_only_removes_trailing_vacancies() {
        let mut table = LaneTable::new();
        table.reserve(Some("a"));
        table.reserve(Some("b"));
        table.reserve(Some("c"));
        table.reserve(Some("d"));
        table.assign(0, None);
        table.assign(2, None);
        table.assign(3, None);
        table.trim();
        assert_eq!(table.len(), 2);
        assert_eq!(table.occupancy(), vec![false, true]);
        assert_eq!(table.occupied_count(), 1);

        table.assign(1, None);
        table.trim();
        assert!(table.is_empty());
    }

    #[test]
    fn position_finds_expected_id() {
        let mut table = LaneTable::new();
        table.reserve(Some("a"));
        table.reserve(Some("b"));
        assert_eq!(table.position("b"), Some(1));
        assert_eq!(table.position("z"), None);
        assert_eq!(table.expected(0), Some("a"));
        assert_eq!(table.expected(7), None);
        assert!(table.is_expected("a"));
    }
}
