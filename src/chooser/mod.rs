//! Move-chooser contract, a random chooser, and the executor that runs
//! choosers under a deadline.

mod executor;
mod random;

pub use executor::MoveExecutor;
pub use random::RandomChooser;

use crate::game::Board;

/// Universal interface for computed participants.
///
/// Choosers run on a worker thread and only ever see an owned snapshot of
/// the board, so implementations must be `Send + Sync` and keep any
/// mutable state behind their own synchronization.
pub trait MoveChooser: Send + Sync {
    /// Select a column in `0..board.ncols()`, or `None` when no legal move
    /// exists. Any other column is treated as an invalid move and the
    /// chooser is asked again.
    fn choose_column(&self, board: &Board) -> Option<usize>;

    /// Return the chooser's display name.
    fn name(&self) -> &str;
}
