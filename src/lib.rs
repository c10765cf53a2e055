//! Fundamental quality screen with equal-weight allocation.
//!
//! Hexagonal architecture: the pure decision lives in [`domain`], port traits
//! in [`ports`], concrete data/config/report implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
