//! Player trait and implementations
//!
//! A [`Player`] is the decision-making half of a client: it is told about every
//! protocol event and answers the two questions the server asks (where to
//! place a ship, where to shoot). It never touches the connection itself.
//!
//! - ExamplePlayer: greedy row-major placement and shooting
//! - RandomPlayer: seeded random placement and shooting

use crate::board::Board;
use crate::common::BoardError;
use crate::protocol::{BoardValue, GameStats, PlayerNum, Ship, Shot};
use crate::stats::MatchStats;

/// Match state the engine keeps up to date and shares with the player.
///
/// Created on `setup_match`, reset on every `start_game` and dropped when the
/// match ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchContext {
    board_size: usize,
    player_num: PlayerNum,
    ship_board: Board,
    shot_board: Board,
}

impl MatchContext {
    pub fn new(board_size: usize, player_num: PlayerNum) -> Self {
        let ship_board = Board::new(board_size);
        Self {
            board_size: ship_board.size(),
            player_num,
            shot_board: ship_board.clone(),
            ship_board,
        }
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    pub fn player_num(&self) -> PlayerNum {
        self.player_num
    }

    /// Our own ships and the opponent's shots against them.
    pub fn ship_board(&self) -> &Board {
        &self.ship_board
    }

    /// Our shots against the opponent.
    pub fn shot_board(&self) -> &Board {
        &self.shot_board
    }

    /// Clear both boards for a new game.
    pub fn reset(&mut self) {
        self.ship_board.reset();
        self.shot_board.reset();
    }

    /// Mark the cells of a ship we just placed.
    pub fn record_placement(&mut self, ship: &Ship) -> usize {
        self.ship_board.mark_ship(ship, BoardValue::Ship)
    }

    /// Store the outcome of a shot taken by `player`.
    pub fn record_shot(&mut self, player: PlayerNum, shot: &Shot) -> Result<(), BoardError> {
        let board = if player == self.player_num {
            &mut self.shot_board
        } else {
            &mut self.ship_board
        };
        board.set(shot.row, shot.col, shot.value)
    }

    /// Mark a destroyed ship that belonged to `owner`.
    pub fn record_kill(&mut self, owner: PlayerNum, ship: &Ship) -> usize {
        let board = if owner == self.player_num {
            &mut self.ship_board
        } else {
            &mut self.shot_board
        };
        board.mark_ship(ship, BoardValue::Kill)
    }
}

/// Callbacks invoked by the protocol engine.
///
/// Only the two `choose_*` methods must be provided; every notification
/// defaults to doing nothing.
pub trait Player: Send {
    /// The match was set up; `ctx` holds the board size and our seat.
    fn handle_setup_match(&mut self, _ctx: &MatchContext) {}

    /// A new game starts. Boards in `ctx` have just been cleared.
    fn handle_start_game(&mut self, _ctx: &MatchContext) {}

    /// Choose where to put a ship of `length` cells.
    fn choose_ship_place(&mut self, ctx: &MatchContext, length: usize) -> Ship;

    /// Choose the next cell to shoot at.
    fn choose_shot(&mut self, ctx: &MatchContext) -> Shot;

    /// The server reported the outcome of a shot taken by `player`.
    fn handle_shot_return(&mut self, _ctx: &MatchContext, _player: PlayerNum, _shot: &Shot) {}

    /// A ship owned by `player` was destroyed.
    fn handle_ship_dead(&mut self, _ctx: &MatchContext, _player: PlayerNum, _ship: &Ship) {}

    /// A game finished. v1 servers do not report statistics.
    fn handle_game_over(&mut self, _ctx: &MatchContext, _stats: Option<&GameStats>) {}

    /// The match is over; called once, after which the boards are released.
    fn handle_match_over(&mut self, _stats: &MatchStats) {}
}

impl<P: Player + ?Sized> Player for Box<P> {
    fn handle_setup_match(&mut self, ctx: &MatchContext) {
        (**self).handle_setup_match(ctx)
    }

    fn handle_start_game(&mut self, ctx: &MatchContext) {
        (**self).handle_start_game(ctx)
    }

    fn choose_ship_place(&mut self, ctx: &MatchContext, length: usize) -> Ship {
        (**self).choose_ship_place(ctx, length)
    }

    fn choose_shot(&mut self, ctx: &MatchContext) -> Shot {
        (**self).choose_shot(ctx)
    }

    fn handle_shot_return(&mut self, ctx: &MatchContext, player: PlayerNum, shot: &Shot) {
        (**self).handle_shot_return(ctx, player, shot)
    }

    fn handle_ship_dead(&mut self, ctx: &MatchContext, player: PlayerNum, ship: &Ship) {
        (**self).handle_ship_dead(ctx, player, ship)
    }

    fn handle_game_over(&mut self, ctx: &MatchContext, stats: Option<&GameStats>) {
        (**self).handle_game_over(ctx, stats)
    }

    fn handle_match_over(&mut self, stats: &MatchStats) {
        (**self).handle_match_over(stats)
    }
}

pub mod example;
pub use example::ExamplePlayer;

pub mod random;
pub use random::RandomPlayer;
