//! Orbitdrift library
//!
//! A planetary orbit simulation engine: bodies circling a fixed central mass
//! under a built-in or user-supplied force law, with bounded trails. The
//! engine itself is plain Rust; the plugins wrap it for a Bevy app.

pub mod cli;
pub mod config;
pub mod events;
pub mod frame_clock;
pub mod physics;
pub mod plugins;
pub mod prelude;

#[cfg(test)]
pub(crate) mod test_utils;
