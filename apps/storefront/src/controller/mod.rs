//! Controller layer: order panel commands, reducer, and user-facing status text.

pub mod events;
pub mod reducer;
