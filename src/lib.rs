//! Turn-based Monopoly-style game engine.
//!
//! The engine owns all game state (players, board, properties, turn order)
//! and applies the rules for dice rolls, movement, purchase, rent, building,
//! bankruptcy, and win detection. Presentation layers drive it through the
//! command/query surface on [`engine::GameEngine`] and never mutate state
//! themselves.

pub mod board;
pub mod cards;
pub mod engine;
pub mod player;
pub mod rng;
pub mod rules;
pub mod save;
