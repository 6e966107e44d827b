use battleship_client::player::example::greedy_placement;
use battleship_client::{
    Board, BoardError, BoardValue, Direction, MatchContext, Player, PlayerNum, RandomPlayer, Ship,
};
use proptest::prelude::*;

fn in_bounds(board: &Board, ship: &Ship) -> bool {
    ship.cells().all(|(r, c)| r < board.size() && c < board.size())
}

#[test]
fn out_of_range_cells_are_errors() {
    let mut board = Board::new(3);
    assert_eq!(
        board.set(3, 0, BoardValue::Hit),
        Err(BoardError::OutOfBounds {
            row: 3,
            col: 0,
            size: 3
        })
    );
    assert!(board.get(0, 3).is_err());
    assert_eq!(board.get(2, 2), Ok(BoardValue::Water));
}

#[test]
fn placement_checks() {
    let mut board = Board::new(4);
    let ship = Ship::new(1, 0, 3, Direction::Horizontal);
    assert_eq!(board.check_placement(&ship), Ok(()));
    assert_eq!(board.mark_ship(&ship, BoardValue::Ship), 3);

    let crossing = Ship::new(0, 1, 3, Direction::Vertical);
    assert_eq!(board.check_placement(&crossing), Err(BoardError::ShipOverlaps));

    let overhang = Ship::new(3, 2, 3, Direction::Horizontal);
    assert_eq!(board.check_placement(&overhang), Err(BoardError::ShipOutOfBounds));
    assert_eq!(board.mark_ship(&overhang, BoardValue::Kill), 2);

    let empty = Ship::new(0, 0, 0, Direction::Horizontal);
    assert_eq!(board.check_placement(&empty), Err(BoardError::ShipOutOfBounds));
}

#[test]
fn huge_ships_stop_at_the_edge() {
    let mut board = Board::new(4);
    let ship = Ship::new(2, 1, usize::MAX, Direction::Vertical);
    assert_eq!(board.check_placement(&ship), Err(BoardError::ShipOutOfBounds));
    assert_eq!(board.mark_ship(&ship, BoardValue::Kill), 2);
    assert_eq!(board.count(BoardValue::Kill), 2);
}

#[test]
fn board_size_is_clamped() {
    let board = Board::new(usize::MAX);
    assert_eq!(board.size(), battleship_client::config::MAX_BOARD_SIZE);
}

#[test]
fn display_prints_cell_codes() {
    let mut board = Board::new(3);
    board.set(0, 0, BoardValue::Ship).unwrap();
    board.set(1, 1, BoardValue::Hit).unwrap();
    board.set(2, 2, BoardValue::Miss).unwrap();
    assert_eq!(board.to_string(), "S~~\n~X~\n~~*\n");
}

#[test]
fn greedy_fills_rows_before_columns() {
    let mut board = Board::new(3);
    let mut placed = Vec::new();
    for _ in 0..3 {
        let ship = greedy_placement(&board, 3).unwrap();
        board.mark_ship(&ship, BoardValue::Ship);
        placed.push(ship);
    }
    assert_eq!(
        placed,
        vec![
            Ship::new(0, 0, 3, Direction::Horizontal),
            Ship::new(1, 0, 3, Direction::Horizontal),
            Ship::new(2, 0, 3, Direction::Horizontal),
        ]
    );
    assert_eq!(greedy_placement(&board, 1), None);
}

#[test]
fn greedy_rejects_impossible_lengths() {
    let board = Board::new(4);
    assert_eq!(greedy_placement(&board, 0), None);
    assert_eq!(greedy_placement(&board, 5), None);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn greedy_placement_fits_empty_board(size in 1usize..=20, frac in 0.0f64..1.0) {
        let length = 1 + ((size - 1) as f64 * frac) as usize;
        let board = Board::new(size);
        let ship = greedy_placement(&board, length).unwrap();
        prop_assert!(in_bounds(&board, &ship));
        prop_assert_eq!(ship, Ship::new(0, 0, length, Direction::Horizontal));
    }

    #[test]
    fn greedy_placements_never_overlap(size in 1usize..=12, lengths in prop::collection::vec(1usize..=12, 1..10)) {
        let mut board = Board::new(size);
        let mut covered = 0;
        for length in lengths {
            if let Some(ship) = greedy_placement(&board, length) {
                prop_assert!(in_bounds(&board, &ship));
                prop_assert_eq!(board.check_placement(&ship), Ok(()));
                prop_assert_eq!(board.mark_ship(&ship, BoardValue::Ship), length);
                covered += length;
            }
        }
        prop_assert_eq!(board.count(BoardValue::Ship), covered);
    }

    #[test]
    fn random_player_placements_never_overlap(seed in any::<u64>(), size in 8usize..=12) {
        let mut player = RandomPlayer::with_seed(seed);
        let mut ctx = MatchContext::new(size, PlayerNum::One);
        for length in [5usize, 4, 3, 3, 2] {
            let ship = player.choose_ship_place(&ctx, length);
            prop_assert_eq!(ctx.ship_board().check_placement(&ship), Ok(()));
            prop_assert_eq!(ctx.record_placement(&ship), length);
        }
        prop_assert_eq!(ctx.ship_board().count(BoardValue::Ship), 17);
    }

    #[test]
    fn reset_is_idempotent(size in 1usize..=10, marks in prop::collection::vec((0usize..10, 0usize..10), 0..30)) {
        let mut board = Board::new(size);
        for (r, c) in marks {
            let _ = board.set(r, c, BoardValue::Hit);
        }
        board.reset();
        let once = board.clone();
        board.reset();
        prop_assert_eq!(&board, &once);
        prop_assert_eq!(board, Board::new(size));
    }
}
