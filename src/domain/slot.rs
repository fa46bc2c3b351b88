use std::cmp::Ordering;

use crate::domain::utils::{
    headcount::Headcount,
    id::{BookingId, SheetName, SlotId},
};
use crate::loader::table::Cell;

/// Slots never hold more than this many bookings.
pub const MAX_BOOKINGS_PER_SLOT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillStatus {
    Unfilled,
    Allocated,
}

/// How the committed headcount compares to the slot's target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Headcount equals the target.
    Exact,

    /// Headcount is the target plus one.
    Overfill,

    /// Headcount is `target - shortfall`, with the smallest shortfall the pool allowed.
    Underfill { shortfall: Headcount },
}

impl MatchKind {
    /// Classifies a committed `total` against `target`.
    ///
    /// `None` when either is zero or `total` exceeds the target by more than one.
    pub fn classify(target: Headcount, total: Headcount) -> Option<MatchKind> {
        if target == 0 || total == 0 {
            return None;
        }
        match total.cmp(&target) {
            Ordering::Equal => Some(MatchKind::Exact),
            Ordering::Less => Some(MatchKind::Underfill { shortfall: target - total }),
            Ordering::Greater if total - target == 1 => Some(MatchKind::Overfill),
            Ordering::Greater => None,
        }
    }
}

/// A booking committed to a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRef {
    pub booking_id: BookingId,
    /// Source row of the booking, see `Booking::row`.
    pub booking_row: usize,
    pub person_count: Headcount,
}

/// One allotment line awaiting fill.
#[derive(Debug, Clone)]
pub struct Slot {
    pub sheet_name: SheetName,

    /// 0-based data-row position within its sheet.
    pub row: usize,

    pub slot_id: SlotId,
    /// Slot-id cell as read, written back unchanged. `Cell::Empty` when the id was generated.
    pub source_id: Cell,
    pub target: Headcount,

    /// Filled bookings in commit order ("Booking 1", "Booking 2").
    pub booking_refs: Vec<BookingRef>,
    pub fill_status: FillStatus,
    pub match_kind: Option<MatchKind>,
}

impl Slot {
    pub fn new(sheet_name: SheetName, row: usize, slot_id: SlotId, target: Headcount) -> Self {
        Self {
            sheet_name,
            row,
            slot_id,
            source_id: Cell::Empty,
            target,
            booking_refs: Vec::with_capacity(MAX_BOOKINGS_PER_SLOT),
            fill_status: FillStatus::Unfilled,
            match_kind: None,
        }
    }

    pub fn with_source_id(mut self, cell: Cell) -> Self {
        self.source_id = cell;
        self
    }

    /// Slots with a zero target are never matched.
    pub fn is_fillable(&self) -> bool {
        self.target > 0
    }

    pub fn is_filled(&self) -> bool {
        self.fill_status == FillStatus::Allocated
    }

    pub fn filled_headcount(&self) -> Headcount {
        self.booking_refs.iter().map(|r| r.person_count).sum()
    }

    pub(crate) fn record_fill(&mut self, refs: Vec<BookingRef>, kind: MatchKind) {
        debug_assert!(!refs.is_empty() && refs.len() <= MAX_BOOKINGS_PER_SLOT);
        self.booking_refs = refs;
        self.fill_status = FillStatus::Allocated;
        self.match_kind = Some(kind);
    }
}

/// Named group of slots, processed in row order.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: SheetName,
    pub slots: Vec<Slot>,
}

impl Sheet {
    pub fn new(name: SheetName) -> Self {
        Self { name, slots: Vec::new() }
    }

    /// Appends a slot at the next row position.
    pub fn push_slot(&mut self, slot_id: SlotId, target: Headcount) {
        let row = self.slots.len();
        self.slots.push(Slot::new(self.name.clone(), row, slot_id, target));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_are_classified_against_the_target() {
        assert_eq!(MatchKind::classify(8, 8), Some(MatchKind::Exact));
        assert_eq!(MatchKind::classify(8, 9), Some(MatchKind::Overfill));
        assert_eq!(MatchKind::classify(8, 5), Some(MatchKind::Underfill { shortfall: 3 }));
        assert_eq!(MatchKind::classify(8, 10), None);
        assert_eq!(MatchKind::classify(8, 0), None);
        assert_eq!(MatchKind::classify(0, 1), None);
    }
}
