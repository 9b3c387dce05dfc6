pub mod config;
pub mod error;
pub mod outcome;
pub mod types;
