//! Rules engine for a five-in-a-row card board game. Keep this crate free of
//! IO and platform concerns.

pub mod board;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod events;
pub mod placement;
pub mod rng;
pub mod sequence;
pub mod state;
pub mod team;

pub use board::*;
pub use cards::*;
pub use config::*;
pub use deck::*;
pub use engine::*;
pub use events::*;
pub use placement::*;
pub use rng::*;
pub use sequence::*;
pub use state::*;
pub use team::*;
