//! Diesel models and configuration structures.

pub mod client;
#[cfg(feature = "server")]
pub mod config;
pub mod employee;
pub mod job;
pub mod material;
pub mod quote;
