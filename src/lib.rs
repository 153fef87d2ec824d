//! habitrack - Monthly Habit Tracker Library
//!
//! Habits are grouped by month and persisted to a JSON document keyed by
//! `"year-month"`. The terminal front-end lives in `presentation`.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
