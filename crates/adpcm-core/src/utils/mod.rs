//! Utility functions for codec operations

pub mod validation;
pub mod volume;

pub use validation::*;
pub use volume::{maximise_volume, CLICK_WINDOW, DEFAULT_HEADROOM};
