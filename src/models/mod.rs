//! Data models

pub mod threat;

pub use threat::*;
