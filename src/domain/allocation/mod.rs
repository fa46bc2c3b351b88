pub mod allocation_driver;
pub mod allocation_listener;
pub mod combination_finder;
pub mod summary;

pub use allocation_driver::{Allocation, AllocationDriver, allocate};
pub use allocation_listener::{AllocationListener, LogListener, NoopListener, SlotOutcome, SlotProgress};
pub use combination_finder::{Combination, CombinationMatch, Pick, find_combination};
