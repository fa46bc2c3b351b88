use serde::Serialize;

use crate::domain::allocation::allocation_driver::Allocation;
use crate::domain::slot::{MatchKind, Sheet};

/// Per-sheet counters of one allocation run. Field order is the csv column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SheetSummary {
    pub sheet: String,
    pub slots: usize,
    pub skipped: usize,
    pub exact: usize,
    pub overfill: usize,
    pub underfill: usize,
    pub unfilled: usize,
    /// Sum of targets over fillable slots.
    pub people_required: u64,
    /// Sum of committed headcounts.
    pub people_placed: u64,
}

impl SheetSummary {
    pub fn from_sheet(sheet: &Sheet) -> Self {
        let mut summary = SheetSummary { sheet: sheet.name.to_string(), slots: sheet.slots.len(), ..Default::default() };

        for slot in &sheet.slots {
            if !slot.is_fillable() {
                summary.skipped += 1;
                continue;
            }
            summary.people_required += u64::from(slot.target);

            match slot.match_kind {
                Some(MatchKind::Exact) => summary.exact += 1,
                Some(MatchKind::Overfill) => summary.overfill += 1,
                Some(MatchKind::Underfill { .. }) => summary.underfill += 1,
                None => summary.unfilled += 1,
            }
            summary.people_placed += u64::from(slot.filled_headcount());
        }

        summary
    }

    pub fn filled(&self) -> usize {
        self.exact + self.overfill + self.underfill
    }
}

/// Totals of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllocationSummary {
    pub sheets: Vec<SheetSummary>,
    pub bookings_total: usize,
    pub bookings_allocated: usize,
}

impl AllocationSummary {
    pub fn from_allocation(allocation: &Allocation) -> Self {
        Self {
            sheets: allocation.sheets.iter().map(SheetSummary::from_sheet).collect(),
            bookings_total: allocation.bookings.len(),
            bookings_allocated: allocation.bookings.iter().filter(|b| b.is_allocated()).count(),
        }
    }

    pub fn bookings_not_allocated(&self) -> usize {
        self.bookings_total - self.bookings_allocated
    }

    pub fn slots_filled(&self) -> usize {
        self.sheets.iter().map(SheetSummary::filled).sum()
    }

    pub fn slots_unfilled(&self) -> usize {
        self.sheets.iter().map(|s| s.unfilled).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::allocation::allocate;
    use crate::domain::booking::Booking;
    use crate::domain::utils::id::{BookingId, SheetName, SlotId};

    #[test]
    fn counts_every_kind_of_outcome() {
        let bookings = vec![
            Booking::new(BookingId::new("A"), 0, 4),
            Booking::new(BookingId::new("B"), 1, 6),
            Booking::new(BookingId::new("C"), 2, 2),
        ];
        let mut sheet = Sheet::new(SheetName::new("Main"));
        sheet.push_slot(SlotId::new("1"), 4); // A exact
        sheet.push_slot(SlotId::new("2"), 5); // B overfill
        sheet.push_slot(SlotId::new("3"), 0); // skipped
        sheet.push_slot(SlotId::new("4"), 3); // C underfill
        sheet.push_slot(SlotId::new("5"), 3); // nothing left

        let summary = AllocationSummary::from_allocation(&allocate(bookings, vec![sheet]));
        let main = &summary.sheets[0];

        assert_eq!((main.slots, main.skipped, main.exact, main.overfill, main.underfill, main.unfilled), (5, 1, 1, 1, 1, 1));
        assert_eq!(main.people_required, 15);
        assert_eq!(main.people_placed, 12);
        assert_eq!(summary.bookings_allocated, 3);
        assert_eq!(summary.bookings_not_allocated(), 0);
        assert_eq!(summary.slots_filled(), 3);
        assert_eq!(summary.slots_unfilled(), 1);
    }
}
