//! Infrastructure layer providing external service integrations.
//!
//! This module contains the JSON habit file, CSV export and the
//! file logging bootstrap.

pub mod persistence;
pub mod export;
pub mod logging;

pub use persistence::*;
pub use export::*;
pub use logging::*;
