//! # Connect N
//!
//! A two-player connect-N game engine. The board applies gravity-filled
//! moves and detects the winning run through the last move; the game
//! session alternates turns, waits on interactive players, and runs
//! computed players under a move timeout, forfeiting those that overrun.
//!
//! ## Modules
//!
//! - [`game`] — Board, win detection, participants, turn order, game session
//! - [`chooser`] — Move-chooser trait, random chooser, bounded move executor
//! - [`events`] — Events emitted to a presentation layer and commands fed back in
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod chooser;
pub mod config;
pub mod error;
pub mod events;
pub mod game;
