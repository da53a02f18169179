//! Foundation: math aliases, frame timing and logger setup

pub mod logging;
pub mod math;
pub mod time;
