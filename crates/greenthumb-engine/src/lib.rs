//! Greenthumb Engine - headless driver for the watering simulation.
//!
//! This crate provides the pieces the `greenthumb` binary wires together:
//! configuration loading, the fixed-step clock, logging views, and scripted
//! watering sessions.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod scenario;
pub mod timing;
pub mod views;
