//! Property tests for `Board`: neighbor generation, distance metrics and the twin.

use proptest::prelude::*;
use slider_astar::{Board, BoardError};

fn board(size: usize) -> impl Strategy<Value = Board> {
    let tiles: Vec<u32> = (0..(size * size) as u32).collect();
    Just(tiles)
        .prop_shuffle()
        .prop_map(move |tiles| Board::from_tiles(size, tiles).unwrap())
}

fn any_board() -> impl Strategy<Value = Board> {
    prop_oneof![board(1), board(2), board(3), board(4), board(5)]
}

proptest! {
    #[test]
    fn goal_iff_manhattan_is_zero(b in any_board()) {
        prop_assert_eq!(b.is_goal(), b.manhattan_distance() == 0);
        if b.is_goal() {
            prop_assert_eq!(b.hamming_distance(), 0);
        }
    }

    #[test]
    fn neighbor_count_follows_blank_position(b in any_board()) {
        let n = b.dimension();
        let (row, col) = b.blank();
        let count = b.neighbors().count();
        if n == 1 {
            prop_assert_eq!(count, 0);
        } else {
            let edges = [row == 0, row == n - 1, col == 0, col == n - 1]
                .iter()
                .filter(|&&touching| touching)
                .count();
            prop_assert_eq!(count, 4 - edges);
        }
    }

    #[test]
    fn neighbors_differ_by_one_slide(b in any_board()) {
        for neighbor in b.neighbors() {
            let changed = b
                .tiles()
                .iter()
                .zip(neighbor.tiles())
                .filter(|(x, y)| x != y)
                .count();
            prop_assert_eq!(changed, 2);
            prop_assert!(b.move_to(&neighbor).is_some());
            prop_assert!(neighbor.neighbors().any(|back| back == b));
            // Manhattan distance changes by exactly one per slide.
            let delta = b.manhattan_distance() as isize - neighbor.manhattan_distance() as isize;
            prop_assert_eq!(delta.abs(), 1);
        }
    }

    #[test]
    fn twin_swaps_two_non_blank_tiles(b in any_board()) {
        prop_assume!(b.dimension() > 1);
        let twin = b.twin();
        let changed: Vec<usize> = (0..b.tiles().len())
            .filter(|&i| b.tiles()[i] != twin.tiles()[i])
            .collect();
        prop_assert_eq!(changed.len(), 2);
        for &i in &changed {
            prop_assert_ne!(b.tiles()[i], 0);
        }
        prop_assert_eq!(twin.blank(), b.blank());
        prop_assert_ne!(b.is_solvable_by_parity(), twin.is_solvable_by_parity());
    }

    #[test]
    fn text_form_parses_back(b in any_board()) {
        prop_assert_eq!(b.to_string().parse::<Board>(), Ok(b));
    }

    #[test]
    fn duplicate_tiles_are_rejected(b in board(3), i in 0usize..9, j in 0usize..9) {
        prop_assume!(i != j);
        let mut tiles = b.tiles().to_vec();
        tiles[j] = tiles[i];
        prop_assert_eq!(Board::from_tiles(3, tiles.clone()), Err(BoardError::DuplicateTile(tiles[i])));
    }
}
