use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::MoveChooser;
use crate::game::Board;

/// A chooser that selects uniformly at random from the available columns.
pub struct RandomChooser {
    rng: Mutex<StdRng>,
}

impl RandomChooser {
    pub fn new() -> Self {
        RandomChooser {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Deterministic chooser for reproducible games.
    pub fn with_seed(seed: u64) -> Self {
        RandomChooser {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomChooser {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveChooser for RandomChooser {
    fn choose_column(&self, board: &Board) -> Option<usize> {
        let columns = board.available_columns();
        if columns.is_empty() {
            return None;
        }
        // A poisoned lock only means another chooser call panicked; the rng is still usable
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        let idx = rng.random_range(0..columns.len());
        Some(columns[idx])
    }

    fn name(&self) -> &str {
        "Random"
    }
}
