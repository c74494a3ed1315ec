//! Configuration, playback and console plumbing around `robot-arm-core`.

pub mod config;
pub mod console;
pub mod playback;
