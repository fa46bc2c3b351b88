use crate::domain::allocation::allocation_listener::{AllocationListener, NoopListener, SlotOutcome, SlotProgress};
use crate::domain::allocation::combination_finder::find_combination;
use crate::domain::booking::Booking;
use crate::domain::booking_store::{BookingKey, BookingStore};
use crate::domain::slot::{BookingRef, MatchKind, Sheet, Slot};
use crate::domain::utils::headcount::Headcount;

/// Final state of a run: every booking and every sheet, in input order.
#[derive(Debug, Clone)]
pub struct Allocation {
    pub bookings: Vec<Booking>,
    pub sheets: Vec<Sheet>,
}

/// Allocates `bookings` to the slots of `sheets` without progress reporting.
pub fn allocate(bookings: Vec<Booking>, sheets: Vec<Sheet>) -> Allocation {
    AllocationDriver::new(bookings).run(sheets)
}

/// Greedy slot-by-slot allocator.
///
/// Sheets are processed in order, slots in row order. For each fillable slot
/// the current pool (bookings not yet allocated, in input order) is handed to
/// [`find_combination`] and any match is committed immediately: the bookings
/// leave the pool before the next slot is looked at. Earlier slots are never
/// revisited.
pub struct AllocationDriver {
    store: BookingStore,
    listener: Box<dyn AllocationListener>,
}

impl AllocationDriver {
    pub fn new(bookings: Vec<Booking>) -> Self {
        Self { store: BookingStore::from_bookings(bookings), listener: Box::new(NoopListener) }
    }

    pub fn with_listener(mut self, listener: Box<dyn AllocationListener>) -> Self {
        self.listener = listener;
        self
    }

    pub fn store(&self) -> &BookingStore {
        &self.store
    }

    /// Processes every sheet and returns the final bookings and sheets.
    pub fn run(mut self, mut sheets: Vec<Sheet>) -> Allocation {
        if self.store.is_empty() {
            log::warn!("No bookings to allocate; every slot will be left unfilled.");
        }
        log::info!("Allocating {} bookings across {} sheet(s).", self.store.len(), sheets.len());

        let sheet_count = sheets.len();
        for (sheet_index, sheet) in sheets.iter_mut().enumerate() {
            self.allocate_sheet(sheet, sheet_index, sheet_count);
        }

        let bookings = self.store.into_bookings();
        let allocated = bookings.iter().filter(|b| b.is_allocated()).count();
        log::info!("Allocation finished: {}/{} bookings allocated.", allocated, bookings.len());

        Allocation { bookings, sheets }
    }

    /// Processes the slots of one sheet in row order.
    pub fn allocate_sheet(&mut self, sheet: &mut Sheet, sheet_index: usize, sheet_count: usize) {
        let row_count = sheet.slots.len();
        let (mut filled, mut unfilled, mut skipped) = (0usize, 0usize, 0usize);

        for (row, slot) in sheet.slots.iter_mut().enumerate() {
            let outcome = self.allocate_slot(slot);
            match outcome {
                SlotOutcome::Filled { .. } => filled += 1,
                SlotOutcome::Unfilled => unfilled += 1,
                SlotOutcome::Skipped => skipped += 1,
            }

            self.listener.on_slot_processed(&SlotProgress {
                sheet_name: &sheet.name,
                sheet_index,
                sheet_count,
                row,
                row_count,
                slot_id: &slot.slot_id,
                outcome,
            });
        }

        log::info!(
            "Sheet '{}': {} filled, {} unfilled, {} skipped, {} bookings left in pool.",
            sheet.name,
            filled,
            unfilled,
            skipped,
            self.store.unassigned().len()
        );
    }

    /// Searches and commits a single slot.
    pub fn allocate_slot(&mut self, slot: &mut Slot) -> SlotOutcome {
        if !slot.is_fillable() {
            return SlotOutcome::Skipped;
        }

        // Only store keys leave the search so the pool borrow ends before committing.
        let keys: Option<Vec<BookingKey>> = {
            let (keys, pool): (Vec<BookingKey>, Vec<&Booking>) = self.store.unassigned().into_iter().unzip();
            find_combination(slot.target, &pool).map(|m| m.combination.positions().into_iter().map(|p| keys[p]).collect())
        };

        let Some(keys) = keys else {
            log::debug!("Slot {} (target {}) in '{}' left unfilled.", slot.slot_id, slot.target, slot.sheet_name);
            return SlotOutcome::Unfilled;
        };

        let mut refs = Vec::with_capacity(keys.len());
        for key in keys {
            match self.store.commit(key, slot.slot_id.clone()) {
                Some(booking) => refs.push(BookingRef {
                    booking_id: booking.id.clone(),
                    booking_row: booking.row,
                    person_count: booking.person_count,
                }),
                None => log::error!("Booking {:?} could not be committed to slot {}.", key, slot.slot_id),
            }
        }

        Self::record(slot, refs)
    }

    /// Records `refs` on `slot`, classifying the fill by what was actually committed.
    fn record(slot: &mut Slot, refs: Vec<BookingRef>) -> SlotOutcome {
        let total: Headcount = refs.iter().map(|r| r.person_count).sum();
        let Some(kind) = MatchKind::classify(slot.target, total) else {
            if !refs.is_empty() {
                log::error!("Slot {} (target {}) cannot take a headcount of {}; left unfilled.", slot.slot_id, slot.target, total);
            }
            return SlotOutcome::Unfilled;
        };

        log::debug!(
            "Slot {} (target {}) in '{}' filled with {:?} = {} ({:?}).",
            slot.slot_id,
            slot.target,
            slot.sheet_name,
            refs.iter().map(|r| r.booking_id.as_str()).collect::<Vec<_>>(),
            total,
            kind
        );
        slot.record_fill(refs, kind);

        SlotOutcome::Filled { total, kind }
    }
}
