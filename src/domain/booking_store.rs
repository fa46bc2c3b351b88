use slotmap::{SlotMap, new_key_type};

use crate::domain::booking::Booking;
use crate::domain::utils::id::{BookingId, SlotId};

new_key_type! {
    pub struct BookingKey;
}

/// Owns every booking of a run, in input order.
///
/// The allocation driver is the only writer. Every added booking gets its own
/// `BookingKey`, so bookings sharing a row number or a display id are all kept.
#[derive(Debug, Default)]
pub struct BookingStore {
    /// Booking storage.
    slots: SlotMap<BookingKey, Booking>,

    /// Input order of the bookings; the pool is always built in this order.
    order: Vec<BookingKey>,
}

impl BookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bookings(bookings: Vec<Booking>) -> Self {
        let mut store = Self::new();
        for booking in bookings {
            store.add(booking);
        }
        store
    }

    pub fn add(&mut self, booking: Booking) -> BookingKey {
        let key = self.slots.insert(booking);
        self.order.push(key);
        key
    }

    pub fn get(&self, key: BookingKey) -> Option<&Booking> {
        self.slots.get(key)
    }

    /// First booking (in input order) carrying `id`.
    pub fn get_by_id(&self, id: &BookingId) -> Option<&Booking> {
        self.iter().find(|b| &b.id == id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// All bookings in input order.
    pub fn iter(&self) -> impl Iterator<Item = &Booking> {
        self.order.iter().filter_map(|key| self.slots.get(*key))
    }

    /// Snapshot of the current pool: every booking not yet allocated, in input
    /// order, with the key to commit it by.
    pub fn unassigned(&self) -> Vec<(BookingKey, &Booking)> {
        self.order
            .iter()
            .filter_map(|key| self.slots.get(*key).map(|booking| (*key, booking)))
            .filter(|(_, booking)| !booking.is_allocated())
            .collect()
    }

    /// Marks the booking under `key` as allocated to `slot_id`.
    ///
    /// # Returns
    /// The updated booking, or `None` if the key is unknown or the booking was
    /// already allocated.
    pub fn commit(&mut self, key: BookingKey, slot_id: SlotId) -> Option<&Booking> {
        let booking = self.slots.get_mut(key)?;
        if booking.allocate_to(slot_id) { Some(&*booking) } else { None }
    }

    /// Consumes the store, returning the bookings in input order.
    pub fn into_bookings(mut self) -> Vec<Booking> {
        self.order.iter().filter_map(|key| self.slots.remove(*key)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::AllocationStatus;

    fn booking(id: &str, row: usize, count: u32) -> Booking {
        Booking::new(BookingId::new(id), row, count)
    }

    fn pool_ids(store: &BookingStore) -> Vec<&str> {
        store.unassigned().into_iter().map(|(_, b)| b.id.as_str()).collect()
    }

    #[test]
    fn pool_keeps_input_order_and_drops_committed() {
        let mut store = BookingStore::new();
        store.add(booking("A", 0, 5));
        let b = store.add(booking("B", 1, 3));
        store.add(booking("C", 2, 3));

        assert!(store.commit(b, SlotId::new("7")).is_some());

        assert_eq!(pool_ids(&store), vec!["A", "C"]);
        assert_eq!(store.get(b).unwrap().allocation_status, AllocationStatus::Allocated);
    }

    #[test]
    fn commit_is_only_possible_once() {
        let mut store = BookingStore::new();
        let a = store.add(booking("A", 0, 5));

        assert!(store.commit(a, SlotId::new("1")).is_some());
        assert!(store.commit(a, SlotId::new("2")).is_none());
        assert_eq!(store.get(a).unwrap().allotted_slot_id, Some(SlotId::new("1")));
    }

    #[test]
    fn bookings_sharing_a_row_are_all_kept() {
        let mut store = BookingStore::new();
        assert!(store.is_empty());

        let a = store.add(booking("A", 0, 5));
        let b = store.add(booking("B", 0, 2));

        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
        assert!(store.commit(b, SlotId::new("1")).is_some());
        assert_eq!(pool_ids(&store), vec!["A"]);
        assert!(!store.get(a).unwrap().is_allocated());
    }

    #[test]
    fn into_bookings_preserves_order() {
        let store = BookingStore::from_bookings(vec![booking("X", 4, 1), booking("Y", 2, 1), booking("Z", 9, 1)]);
        let ids: Vec<String> = store.into_bookings().into_iter().map(|b| b.id.into()).collect();
        assert_eq!(ids, vec!["X", "Y", "Z"]);
    }

    #[test]
    fn lookup_by_display_id_returns_first_match() {
        let store = BookingStore::from_bookings(vec![booking("dup", 0, 1), booking("dup", 1, 2)]);
        assert_eq!(store.get_by_id(&BookingId::new("dup")).unwrap().row, 0);
    }
}
