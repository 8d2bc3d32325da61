//! Controller layer: console input parsing and command orchestration.

pub mod events;
pub mod orchestration;
