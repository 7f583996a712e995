//! Controller layer: dialog modeling and action orchestration around the form reducer.

pub mod events;
pub mod orchestration;
