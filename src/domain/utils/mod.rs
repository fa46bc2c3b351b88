pub mod headcount;
pub mod id;
