//! Diesel efficiency evaluation and fleet aggregation.
//!
//! Each fill record is evaluated against the per-vehicle consumption norm,
//! classified, and reconciled against the tank probe where one is fitted;
//! the evaluated records then fold into a fleet-wide summary.

pub mod aggregate;
pub mod classify;
pub mod evaluate;
pub mod filter;
pub mod norms;
