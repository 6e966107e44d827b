use crate::board::Board;
use crate::protocol::{BoardValue, Direction, Ship, Shot};

use super::{MatchContext, Player};

/// Greedy player: first free horizontal slot for ships, first untried cell for shots.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExamplePlayer;

impl ExamplePlayer {
    pub fn new() -> Self {
        Self
    }
}

/// First placement of `length` cells that covers only water, scanning rows
/// top to bottom and left to right, horizontal slots before vertical ones.
pub fn greedy_placement(board: &Board, length: usize) -> Option<Ship> {
    let size = board.size();
    if length == 0 || length > size {
        return None;
    }
    [Direction::Horizontal, Direction::Vertical]
        .into_iter()
        .flat_map(|dir| {
            (0..size).flat_map(move |row| (0..size).map(move |col| Ship::new(row, col, length, dir)))
        })
        .find(|ship| board.check_placement(ship).is_ok())
}

/// First cell still holding water, in row-major order.
pub fn first_untried(board: &Board) -> Option<(usize, usize)> {
    board
        .iter()
        .find(|&(_, _, value)| value == BoardValue::Water)
        .map(|(row, col, _)| (row, col))
}

impl Player for ExamplePlayer {
    fn choose_ship_place(&mut self, ctx: &MatchContext, length: usize) -> Ship {
        greedy_placement(ctx.ship_board(), length)
            .unwrap_or_else(|| Ship::new(0, 0, length, Direction::Horizontal))
    }

    fn choose_shot(&mut self, ctx: &MatchContext) -> Shot {
        let (row, col) = first_untried(ctx.shot_board()).unwrap_or((0, 0));
        Shot::at(row, col)
    }
}
