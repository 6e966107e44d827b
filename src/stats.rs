//! Running totals over the games of one match.

use crate::protocol::{GameResult, GameStats};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchStats {
    pub games: u32,
    pub total_num_board_shot: u32,
    pub total_hits: u32,
    pub total_misses: u32,
    pub total_duplicates: u32,
    pub total_ships_killed: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl MatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold the statistics of one finished game into the totals.
    pub fn record(&mut self, game: &GameStats) {
        self.games += 1;
        match game.result {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Tie => self.ties += 1,
        }
        self.total_num_board_shot = self.total_num_board_shot.saturating_add(game.num_board_shot);
        self.total_hits = self.total_hits.saturating_add(game.hits);
        self.total_misses = self.total_misses.saturating_add(game.misses);
        self.total_duplicates = self.total_duplicates.saturating_add(game.duplicates);
        self.total_ships_killed = self.total_ships_killed.saturating_add(game.ships_killed);
    }
}
