//! Core domain types and the allocation decision.

pub mod records;
pub mod fundamental_data;
pub mod interval;
pub mod screen;
pub mod allocation;
pub mod strategy;
pub mod universe;
pub mod config_validation;
pub mod error;
