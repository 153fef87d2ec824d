//! Application layer managing state and business workflows.
//!
//! This module coordinates between the domain layer and presentation layer,
//! managing application state, user interactions, and autosave.

pub mod state;
pub mod config;

pub use state::*;
pub use config::*;
