//! Domain services with no storage access.
//!
//! - `streaks`: streak calculation and period aggregation over completion
//!   dates

pub mod streaks;
