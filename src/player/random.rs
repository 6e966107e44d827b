use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::protocol::{BoardValue, Direction, Ship, Shot};

use super::example::greedy_placement;
use super::{MatchContext, Player};

const PLACEMENT_ATTEMPTS: usize = 100;

/// Player that places ships and shoots at random untried cells.
pub struct RandomPlayer {
    rng: SmallRng,
}

impl RandomPlayer {
    pub fn new() -> Self {
        let mut seed_rng = rand::rng();
        Self {
            rng: SmallRng::from_rng(&mut seed_rng),
        }
    }

    /// Fix the RNG seed for reproducible matches.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for RandomPlayer {
    fn choose_ship_place(&mut self, ctx: &MatchContext, length: usize) -> Ship {
        let board = ctx.ship_board();
        let size = board.size();
        if length > 0 && length <= size {
            for _ in 0..PLACEMENT_ATTEMPTS {
                let direction = if self.rng.random() {
                    Direction::Horizontal
                } else {
                    Direction::Vertical
                };
                let (max_r, max_c) = match direction {
                    Direction::Horizontal => (size - 1, size - length),
                    Direction::Vertical => (size - length, size - 1),
                };
                let row = self.rng.random_range(0..=max_r);
                let col = self.rng.random_range(0..=max_c);
                let ship = Ship::new(row, col, length, direction);
                if board.check_placement(&ship).is_ok() {
                    return ship;
                }
            }
        }
        // crowded board: fall back to the first free slot
        greedy_placement(board, length)
            .unwrap_or_else(|| Ship::new(0, 0, length, Direction::Horizontal))
    }

    fn choose_shot(&mut self, ctx: &MatchContext) -> Shot {
        let board = ctx.shot_board();
        let untried: Vec<(usize, usize)> = board
            .iter()
            .filter(|&(_, _, value)| value == BoardValue::Water)
            .map(|(row, col, _)| (row, col))
            .collect();
        let (row, col) = untried
            .choose(&mut self.rng)
            .copied()
            .unwrap_or((0, 0));
        Shot::at(row, col)
    }
}
