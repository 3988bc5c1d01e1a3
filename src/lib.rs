//! Habit-tracking backend.
//!
//! Categories group habits; habits (daily or weekly) own their completion
//! log; read responses carry streak and period totals computed by the pure
//! engine in [`services::streaks`].

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
