pub mod allocation;
pub mod booking;
pub mod booking_store;
pub mod slot;
pub mod utils;
