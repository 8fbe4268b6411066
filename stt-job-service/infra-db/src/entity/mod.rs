pub mod job;
pub mod segment;
