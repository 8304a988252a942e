//! Worker-private best-match table and its reduction.

use crate::divider::Divider;
use crate::note::Match;

/// One `Option<Match>` per note, owned by a single worker.
///
/// Workers fill their own table without synchronization; tables are then
/// combined pairwise with [`BestTable::merge`]. Both operations use the
/// ordering defined by [`Match::beats`], so the reduced result does not
/// depend on how the divider range was split across workers.
#[derive(Debug, Clone, PartialEq)]
pub struct BestTable {
    slots: Vec<Option<Match>>,
}

impl BestTable {
    /// Table of `len` sentinel slots.
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    /// Number of note slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the table has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Current best for note `index`.
    pub fn get(&self, index: usize) -> Option<&Match> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Offers a candidate for note `index`; keeps it if it beats the slot.
    #[inline]
    pub fn offer(
        &mut self,
        index: usize,
        divider: Divider,
        top: u16,
        achieved_hz: f64,
        error_hz: f64,
    ) {
        let slot = &mut self.slots[index];
        if let Some(current) = slot {
            if error_hz > current.error_hz {
                return;
            }
        }
        let candidate = Match {
            divider,
            top,
            achieved_hz,
            error_hz,
        };
        if candidate.beats(slot.as_ref()) {
            *slot = Some(candidate);
        }
    }

    /// Per-note minimum of two tables.
    pub fn merge(mut self, other: BestTable) -> BestTable {
        debug_assert_eq!(self.slots.len(), other.slots.len());
        for (mine, theirs) in self.slots.iter_mut().zip(other.slots) {
            if let Some(candidate) = theirs {
                if candidate.beats(mine.as_ref()) {
                    *mine = Some(candidate);
                }
            }
        }
        self
    }

    /// Consumes the table, yielding the slots in note order.
    pub fn into_slots(self) -> Vec<Option<Match>> {
        self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn div(raw: u16) -> Divider {
        Divider::from_raw(raw)
    }

    #[test]
    fn test_offer_keeps_smaller_error() {
        let mut table = BestTable::new(1);
        table.offer(0, div(16), 5, 100.0, 2.0);
        table.offer(0, div(17), 5, 101.0, 1.0);
        table.offer(0, div(18), 5, 99.0, 3.0);
        let best = table.get(0).unwrap();
        assert_eq!(best.divider, div(17));
        assert_eq!(best.error_hz, 1.0);
    }

    #[test]
    fn test_offer_ignores_infinite_error() {
        let mut table = BestTable::new(1);
        table.offer(0, div(16), 0, 280_000_000.0, f64::INFINITY);
        assert!(table.get(0).is_none());
    }

    #[test]
    fn test_merge_is_order_independent() {
        let mut a = BestTable::new(2);
        a.offer(0, div(40), 3, 10.0, 0.5);
        a.offer(1, div(40), 3, 10.0, 0.1);
        let mut b = BestTable::new(2);
        b.offer(0, div(20), 9, 10.0, 0.5);
        b.offer(1, div(20), 9, 10.0, 0.2);

        let ab = a.clone().merge(b.clone());
        let ba = b.merge(a);
        assert_eq!(ab, ba);
        assert_eq!(ab.get(0).unwrap().divider, div(20));
        assert_eq!(ab.get(1).unwrap().divider, div(40));
    }

    #[test]
    fn test_merge_with_empty_keeps_values() {
        let mut a = BestTable::new(1);
        a.offer(0, div(16), 0, 1.0, 0.0);
        let merged = BestTable::new(1).merge(a.clone());
        assert_eq!(merged, a);
        assert!(BestTable::new(1).merge(BestTable::new(1)).get(0).is_none());
    }
}
