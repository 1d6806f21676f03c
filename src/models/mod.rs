//! Data models

pub mod input;

pub use input::*;
