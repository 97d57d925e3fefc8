//! Core connect-N game logic: board and win detection, participants, turn
//! order, and the game session driving them.

mod board;
mod player;
mod scan;
mod state;
mod turn;

pub use board::{Board, Cell, Diagonal, Position};
pub use player::{Controller, Participant, Token};
pub use scan::longest_run;
pub use state::{Game, GameStatus, Step};
pub use turn::{Turn, TurnSequencer};
