pub mod config;
pub mod db;
pub mod error;
pub mod parse;
pub mod pipeline;
pub mod transform;
pub mod utils;
