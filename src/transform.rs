pub mod car;
pub mod coe;
