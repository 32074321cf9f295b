//! Common, shared types.

pub mod clock;
pub mod config;
pub mod events;
pub mod layers;
pub mod sets;
pub mod state;

#[cfg(test)]
pub mod test_utils;
