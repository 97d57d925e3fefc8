use std::ops::Range;

use super::board::Cell;

/// Find the longest run of equal, non-empty cells in a sequence.
///
/// Single left-to-right sweep: a cell extends the current run when it
/// matches the cell at the run's start, otherwise it starts a new run.
/// Ties resolve to the first run encountered. Returns an empty range at
/// 0 when the sequence holds no token at all.
pub fn longest_run(cells: &[Cell]) -> Range<usize> {
    let mut best = 0..0;
    let mut start = 0;

    for (i, &cell) in cells.iter().enumerate() {
        if cell != cells[start] {
            start = i;
        }
        if cell != Cell::Empty && i + 1 - start > best.len() {
            best = start..i + 1;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell::{Empty as E, Red as R, Yellow as Y};

    #[test]
    fn test_empty_sequence() {
        assert_eq!(longest_run(&[]), 0..0);
    }

    #[test]
    fn test_all_empty() {
        assert_eq!(longest_run(&[E, E, E, E]), 0..0);
    }

    #[test]
    fn test_ignores_empty_runs() {
        // Three empties beat nothing, but only tokens count
        assert_eq!(longest_run(&[E, E, E, R, R]), 3..5);
    }

    #[test]
    fn test_single_token() {
        assert_eq!(longest_run(&[E, Y, E]), 1..2);
    }

    #[test]
    fn test_longest_run_in_middle() {
        assert_eq!(longest_run(&[R, Y, Y, Y, R, R, E]), 1..4);
    }

    #[test]
    fn test_tie_resolves_to_first() {
        assert_eq!(longest_run(&[R, R, Y, Y, E]), 0..2);
        assert_eq!(longest_run(&[E, Y, Y, R, R]), 1..3);
    }

    #[test]
    fn test_run_at_end() {
        assert_eq!(longest_run(&[R, Y, R, R, R, R]), 2..6);
    }
}
