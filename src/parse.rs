pub mod records;
pub mod segment;
