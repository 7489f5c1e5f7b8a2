//! Domain aggregates exposed by the portal service layer.

pub mod client;
pub mod employee;
pub mod job;
pub mod material;
pub mod quote;
pub mod types;
