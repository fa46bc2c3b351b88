use crate::domain::utils::{
    headcount::Headcount,
    id::{BookingId, SlotId},
};
use crate::loader::table::Cell;

/// Lifecycle of a booking during one allocation run.
///
/// A booking starts `NotAllocated` and moves to `Allocated` at most once,
/// when the allocation driver commits it to a slot. It never moves back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationStatus {
    NotAllocated,
    Allocated,
}

impl AllocationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AllocationStatus::NotAllocated => "Not Allocated",
            AllocationStatus::Allocated => "Allocated",
        }
    }
}

/// One party's reservation, as read from the bookings table.
#[derive(Debug, Clone)]
pub struct Booking {
    /// Identifier shown to users. Not required to be unique.
    pub id: BookingId,

    /// Id cell as read, written back unchanged. `Cell::Empty` when the id was generated.
    pub source_id: Cell,

    /// 0-based position of the booking's data row in the source table.
    pub row: usize,

    pub person_count: Headcount,

    pub admin_name: String,
    pub age: String,
    pub whatsapp_no: String,

    pub allocation_status: AllocationStatus,
    pub allotted_slot_id: Option<SlotId>,
}

impl Booking {
    pub fn new(id: BookingId, row: usize, person_count: Headcount) -> Self {
        Self {
            id,
            source_id: Cell::Empty,
            row,
            person_count,
            admin_name: String::new(),
            age: String::new(),
            whatsapp_no: String::new(),
            allocation_status: AllocationStatus::NotAllocated,
            allotted_slot_id: None,
        }
    }

    pub fn with_details(mut self, admin_name: impl Into<String>, age: impl Into<String>, whatsapp_no: impl Into<String>) -> Self {
        self.admin_name = admin_name.into();
        self.age = age.into();
        self.whatsapp_no = whatsapp_no.into();
        self
    }

    pub fn with_source_id(mut self, cell: Cell) -> Self {
        self.source_id = cell;
        self
    }

    pub fn is_allocated(&self) -> bool {
        self.allocation_status == AllocationStatus::Allocated
    }

    /// Marks the booking as consumed by `slot_id`.
    ///
    /// Returns `false` and leaves the booking untouched if it was already allocated.
    pub fn allocate_to(&mut self, slot_id: SlotId) -> bool {
        if self.is_allocated() {
            log::error!("Booking {:?} (row {}) is already allocated to {:?}.", self.id, self.row, self.allotted_slot_id);
            return false;
        }
        self.allocation_status = AllocationStatus::Allocated;
        self.allotted_slot_id = Some(slot_id);
        true
    }
}
