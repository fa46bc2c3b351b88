//! Conversion between raw tables and the allocation domain.
//!
//! Loading turns the bookings table into [`Booking`]s and each allotment
//! table into a [`Sheet`] (numeric fields are coerced exactly once, here).
//! Write-back augments the same tables with the allocation result so the
//! output keeps every input column and row.

use std::collections::HashMap;
use std::fmt;

use crate::config::ColumnLayout;
use crate::domain::booking::Booking;
use crate::domain::slot::{MAX_BOOKINGS_PER_SLOT, Sheet, Slot};
use crate::domain::utils::id::{BookingId, SheetName, SlotId};
use crate::error::{Error, Result};
use crate::loader::table::{Cell, Table};

/// Non-fatal problem found while mapping an allotment sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetWarning {
    pub sheet: String,
    pub message: String,
}

impl fmt::Display for SheetWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sheet '{}': {}", self.sheet, self.message)
    }
}

/// Builds the bookings of a run from the bookings table.
///
/// The headcount column is required. Display columns that are missing give
/// empty strings; a row without an id gets `row-<n>` (1-based data row).
pub fn bookings_from_table(table: &Table, layout: &ColumnLayout) -> Result<Vec<Booking>> {
    let count_col = table
        .column(&layout.person_count)
        .ok_or_else(|| Error::MissingColumn { table: table.name.clone(), column: layout.person_count.clone() })?;

    let id_col = table.column(&layout.booking_id);
    if id_col.is_none() {
        log::warn!("Bookings table '{}' has no '{}' column; row numbers are used as ids.", table.name, layout.booking_id);
    }
    let name_col = table.column(&layout.admin_name);
    let age_col = table.column(&layout.age);
    let whatsapp_col = table.column(&layout.whatsapp_no);

    let bookings: Vec<Booking> = (0..table.row_count())
        .map(|row| {
            let (id, source_id) = id_or_fallback(table, row, id_col, || format!("row-{}", row + 1));

            Booking::new(BookingId::new(id), row, table.get(row, count_col).to_headcount())
                .with_source_id(source_id)
                .with_details(table.text(row, name_col), table.text(row, age_col), table.text(row, whatsapp_col))
        })
        .collect();

    let empty = bookings.iter().filter(|b| b.person_count == 0).count();
    if empty > 0 {
        log::warn!("{} of {} bookings have no usable '{}' value and will never be allocated.", empty, bookings.len(), layout.person_count);
    }
    log::info!("Loaded {} bookings from '{}'.", bookings.len(), table.name);

    Ok(bookings)
}

/// Builds the slots of one allotment table.
///
/// Returns `None` (and records a warning) when the table has no target column;
/// such a sheet is written back untouched. A missing slot-id column is not
/// fatal: slots are then named `<sheet>#<n>` (1-based data row).
pub fn sheet_from_table(table: &Table, layout: &ColumnLayout, warnings: &mut Vec<SheetWarning>) -> Option<Sheet> {
    let Some(target_col) = table.column(&layout.target) else {
        let warning = SheetWarning { sheet: table.name.clone(), message: format!("no '{}' column, sheet left unchanged", layout.target) };
        log::warn!("{}", warning);
        warnings.push(warning);
        return None;
    };

    let slot_col = table.column(&layout.slot_id);
    if slot_col.is_none() {
        let warning = SheetWarning { sheet: table.name.clone(), message: format!("no '{}' column, row numbers are used as slot ids", layout.slot_id) };
        log::warn!("{}", warning);
        warnings.push(warning);
    }

    let sheet_name = SheetName::new(table.name.clone());
    let mut sheet = Sheet::new(sheet_name.clone());
    for row in 0..table.row_count() {
        let (slot_id, source_id) = id_or_fallback(table, row, slot_col, || format!("{}#{}", table.name, row + 1));
        let target = table.get(row, target_col).to_headcount();
        sheet.slots.push(Slot::new(sheet_name.clone(), row, SlotId::new(slot_id), target).with_source_id(source_id));
    }

    log::info!("Loaded {} slots from sheet '{}'.", sheet.slots.len(), table.name);
    Some(sheet)
}

/// Writes allocation status and allotted slot onto the bookings table.
///
/// The headcount column is rewritten with the coerced values the run used.
/// The allotted slot is written as the slot-id cell read from `sheets`.
pub fn write_back_bookings(table: &mut Table, bookings: &[Booking], sheets: &[Sheet], layout: &ColumnLayout) {
    let slot_by_booking: HashMap<usize, &Slot> =
        sheets.iter().flat_map(|sheet| &sheet.slots).flat_map(|slot| slot.booking_refs.iter().map(move |r| (r.booking_row, slot))).collect();

    let count_col = table.ensure_column(&layout.person_count);
    let status_col = table.ensure_column(&layout.allocation_status);
    let slot_col = table.ensure_column(&layout.allotted_slot);

    for booking in bookings {
        table.set(booking.row, count_col, Cell::Int(i64::from(booking.person_count)));
        table.set(booking.row, status_col, Cell::Text(booking.allocation_status.label().to_string()));
        let slot = match (&booking.allotted_slot_id, slot_by_booking.get(&booking.row)) {
            (Some(_), Some(slot)) => source_or_text(&slot.source_id, slot.slot_id.as_str()),
            (Some(slot_id), None) => Cell::Text(slot_id.to_string()),
            (None, _) => Cell::Empty,
        };
        table.set(booking.row, slot_col, slot);
    }
}

/// Writes the filled bookings of every slot onto its allotment table.
///
/// Adds `Booking N Id` / `Booking N Persons` columns, and for filled slots
/// replaces the id, admin name, age and WhatsApp cells with the matched
/// bookings' values joined by `", "` and marks the status column `Allocated`.
pub fn write_back_sheet(table: &mut Table, sheet: &Sheet, bookings: &[Booking], layout: &ColumnLayout) {
    let by_row: HashMap<usize, &Booking> = bookings.iter().map(|b| (b.row, b)).collect();

    let target_col = table.ensure_column(&layout.target);
    let ref_cols: Vec<(usize, usize)> = (1..=MAX_BOOKINGS_PER_SLOT)
        .map(|n| (table.ensure_column(&ColumnLayout::booking_id_column(n)), table.ensure_column(&ColumnLayout::booking_persons_column(n))))
        .collect();
    let id_col = table.ensure_column(&layout.booking_id);
    let name_col = table.ensure_column(&layout.admin_name);
    let age_col = table.ensure_column(&layout.age);
    let whatsapp_col = table.ensure_column(&layout.whatsapp_no);
    let status_col = table.ensure_column(&layout.slot_status);

    for slot in &sheet.slots {
        table.set(slot.row, target_col, Cell::Int(i64::from(slot.target)));

        if !slot.is_filled() {
            continue;
        }

        for (booking_ref, (ref_id_col, ref_persons_col)) in slot.booking_refs.iter().zip(&ref_cols) {
            let id = match by_row.get(&booking_ref.booking_row) {
                Some(booking) => source_or_text(&booking.source_id, booking.id.as_str()),
                None => Cell::Text(booking_ref.booking_id.to_string()),
            };
            table.set(slot.row, *ref_id_col, id);
            table.set(slot.row, *ref_persons_col, Cell::Int(i64::from(booking_ref.person_count)));
        }

        let matched: Vec<&Booking> = slot.booking_refs.iter().filter_map(|r| by_row.get(&r.booking_row).copied()).collect();
        table.set(slot.row, id_col, Cell::Text(join_field(&matched, |b| b.id.as_str())));
        table.set(slot.row, name_col, Cell::Text(join_field(&matched, |b| b.admin_name.as_str())));
        table.set(slot.row, age_col, Cell::Text(join_field(&matched, |b| b.age.as_str())));
        table.set(slot.row, whatsapp_col, Cell::Text(join_field(&matched, |b| b.whatsapp_no.as_str())));
        table.set(slot.row, status_col, Cell::Text("Allocated".to_string()));
    }
}

/// Id text of `row` and its source cell, or `fallback()` and an empty cell when the id is blank.
fn id_or_fallback(table: &Table, row: usize, col: Option<usize>, fallback: impl FnOnce() -> String) -> (String, Cell) {
    let id = table.text(row, col);
    match col {
        Some(col) if !id.trim().is_empty() => (id, table.get(row, col).clone()),
        _ => (fallback(), Cell::Empty),
    }
}

fn source_or_text(source: &Cell, id: &str) -> Cell {
    if source.is_empty() { Cell::Text(id.to_string()) } else { source.clone() }
}

fn join_field(bookings: &[&Booking], field: impl Fn(&Booking) -> &str) -> String {
    bookings.iter().map(|b| field(*b)).collect::<Vec<_>>().join(", ")
}
