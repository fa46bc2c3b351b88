use crate::domain::slot::MatchKind;
use crate::domain::utils::{
    headcount::Headcount,
    id::{SheetName, SlotId},
};

/// What happened to a single slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotOutcome {
    /// Target was zero, the slot was not searched.
    Skipped,

    Filled { total: Headcount, kind: MatchKind },

    /// No combination of the remaining bookings fits.
    Unfilled,
}

/// Position of a processed slot within the whole run.
#[derive(Debug, Clone)]
pub struct SlotProgress<'a> {
    pub sheet_name: &'a SheetName,
    pub sheet_index: usize,
    pub sheet_count: usize,
    pub row: usize,
    pub row_count: usize,
    pub slot_id: &'a SlotId,
    pub outcome: SlotOutcome,
}

impl SlotProgress<'_> {
    /// Completion of the run in `[0.0, 1.0]`, assuming equally weighted sheets.
    pub fn fraction(&self) -> f64 {
        if self.sheet_count == 0 || self.row_count == 0 {
            return 1.0;
        }
        let sheets = self.sheet_count as f64;
        let done = self.sheet_index as f64 / sheets + (self.row + 1) as f64 / self.row_count as f64 / sheets;
        done.min(1.0)
    }

    pub fn is_last_in_sheet(&self) -> bool {
        self.row + 1 == self.row_count
    }
}

/// Observer notified by the allocation driver after every slot.
///
/// Listeners only observe; the allocation result is the same with or without one.
pub trait AllocationListener {
    fn on_slot_processed(&self, progress: &SlotProgress<'_>);
}

/// Default listener, ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListener;

impl AllocationListener for NoopListener {
    fn on_slot_processed(&self, _progress: &SlotProgress<'_>) {}
}

/// Reports progress through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogListener;

impl AllocationListener for LogListener {
    fn on_slot_processed(&self, progress: &SlotProgress<'_>) {
        log::trace!(
            "[{:>5.1}%] sheet '{}' row {} slot {}: {:?}",
            progress.fraction() * 100.0,
            progress.sheet_name,
            progress.row + 1,
            progress.slot_id,
            progress.outcome
        );

        if progress.is_last_in_sheet() {
            log::info!(
                "Progress {:.0}% (sheet {}/{} '{}' done).",
                progress.fraction() * 100.0,
                progress.sheet_index + 1,
                progress.sheet_count,
                progress.sheet_name
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress<'a>(sheet: &'a SheetName, slot: &'a SlotId, sheet_index: usize, row: usize) -> SlotProgress<'a> {
        SlotProgress { sheet_name: sheet, sheet_index, sheet_count: 2, row, row_count: 4, slot_id: slot, outcome: SlotOutcome::Unfilled }
    }

    #[test]
    fn fraction_spans_sheets_evenly() {
        let sheet = SheetName::new("S");
        let slot = SlotId::new("1");

        assert!((progress(&sheet, &slot, 0, 0).fraction() - 0.125).abs() < 1e-9);
        assert!((progress(&sheet, &slot, 0, 3).fraction() - 0.5).abs() < 1e-9);
        assert!((progress(&sheet, &slot, 1, 3).fraction() - 1.0).abs() < 1e-9);
        assert!(progress(&sheet, &slot, 1, 3).is_last_in_sheet());
    }
}
