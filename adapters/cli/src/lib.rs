#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Headless frontend for the Lastlight run engine.
//!
//! Wires the authoritative world, the pure systems, and the HUD projection
//! into a fixed-order tick loop, loads tuning and progression from TOML
//! files, and scripts a simple patrol pilot so a run can play out without
//! interactive input.

pub mod config;
pub mod progression;
pub mod runner;
