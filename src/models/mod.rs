//! Data models for the quiz application.

mod quiz;

pub use quiz::*;
