//! Automated players: shared board heuristics, three difficulty tiers, the
//! per-seat turn controller and a driver that plays whole games.

mod config;
mod controller;
mod driver;
mod error;
mod hard;
pub mod heuristics;
mod medium;
mod strategy;

pub use config::*;
pub use controller::*;
pub use driver::*;
pub use error::*;
pub use hard::*;
pub use medium::*;
pub use strategy::*;
