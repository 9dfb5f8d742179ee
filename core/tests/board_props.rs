//! Property tests for board construction, reveal propagation and the action state machine.
//!
//! Every board is built from a random seed inside the default mine-ratio band and checked
//! against the brute-force reference in `support`.

mod support;

use std::collections::BTreeSet;

use proptest::prelude::*;
use sweeper_core::{ActionOutcome, TileAction, TileRef, TileStatus};
use support::*;

fn any_action() -> impl Strategy<Value = TileAction> {
    prop_oneof![
        (0usize..160).prop_map(|id| TileAction::Click(TileRef::ById(id))),
        (0usize..160).prop_map(|id| TileAction::Flag(TileRef::ById(id))),
        (0usize..160).prop_map(|id| TileAction::Press(TileRef::ById(id))),
        (0u16..14, 0u16..14).prop_map(|(row, col)| TileAction::Click(TileRef::ByRowCol(row, col))),
        Just(TileAction::Release),
    ]
}

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn setup_places_exact_mine_count((width, height, mines, seed) in board_params()) {
        let board = seeded_board(width, height, mines, seed);
        let total = usize::from(width) * usize::from(height);

        let mine_tiles = board.tiles().filter(|tile| tile.is_mine()).count();
        prop_assert_eq!(mine_tiles, mines);
        prop_assert_eq!(board.tiles().count() - mine_tiles, total - mines);
        prop_assert_eq!(board.mine_layout().len(), mines);
        prop_assert!(board.tiles().all(|tile| tile.status() == TileStatus::Unchecked));
    }

    #[test]
    fn adjacency_matches_brute_force((width, height, mines, seed) in board_params()) {
        let board = seeded_board(width, height, mines, seed);

        for tile in board.tiles().filter(|tile| !tile.is_mine()) {
            prop_assert_eq!(
                usize::from(tile.adjacent_mine_count()),
                brute_adjacent_mines(&board, tile.id()),
                "tile {}", tile.id()
            );

            let mut mapped = board.neighbors(tile.id()).unwrap().to_vec();
            let mut expected = brute_neighbors(width, height, tile.id());
            mapped.sort_unstable();
            expected.sort_unstable();
            prop_assert_eq!(mapped, expected);
        }
    }

    #[test]
    fn clicking_a_mine_only_checks_that_mine(
        (width, height, mines, seed) in board_params(),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut board = seeded_board(width, height, mines, seed);
        let mine_ids: Vec<_> = board.mine_layout().iter().collect();
        let mine = mine_ids[pick.index(mine_ids.len())];

        prop_assert_eq!(board.click(TileRef::ById(mine)).unwrap(), ActionOutcome::HitMine);
        prop_assert!(!board.is_valid());
        for tile in board.tiles() {
            let expected = if tile.id() == mine { TileStatus::Checked } else { TileStatus::Unchecked };
            prop_assert_eq!(tile.status(), expected);
        }
    }

    #[test]
    fn safe_click_reveals_exactly_the_connected_region(
        (width, height, mines, seed) in board_params(),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut board = seeded_board(width, height, mines, seed);
        let safe: Vec<_> = board.tiles().filter(|tile| !tile.is_mine()).map(|tile| tile.id()).collect();
        let origin = safe[pick.index(safe.len())];
        let expected = expected_reveal(&board, origin);

        let outcome = board.click(TileRef::ById(origin)).unwrap();

        let revealed: BTreeSet<_> = board
            .tiles()
            .filter(|tile| tile.status().is_checked())
            .map(|tile| tile.id())
            .collect();
        prop_assert_eq!(&revealed, &expected);
        prop_assert!(revealed.iter().all(|&id| !tile(&board, id).is_mine()));

        // every revealed tile next to an unrevealed one is a numbered rim tile
        for &id in &revealed {
            let touches_hidden = brute_neighbors(width, height, id)
                .into_iter()
                .any(|n| !revealed.contains(&n));
            if touches_hidden {
                prop_assert!(tile(&board, id).adjacent_mine_count() > 0, "tile {}", id);
            }
        }

        if revealed.len() == safe.len() {
            prop_assert_eq!(outcome, ActionOutcome::Won);
        } else {
            prop_assert_eq!(outcome, ActionOutcome::Revealed { count: revealed.len() });
        }
    }

    #[test]
    fn clicking_checked_tile_is_idempotent(
        (width, height, mines, seed) in board_params(),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut board = seeded_board(width, height, mines, seed);
        let safe: Vec<_> = board.tiles().filter(|tile| !tile.is_mine()).map(|tile| tile.id()).collect();
        let origin = safe[pick.index(safe.len())];
        board.click(TileRef::ById(origin)).unwrap();
        prop_assume!(!board.is_won());
        let before = statuses(&board);

        prop_assert_eq!(board.click(TileRef::ById(origin)).unwrap(), ActionOutcome::NoChange);
        prop_assert_eq!(statuses(&board), before);
    }

    #[test]
    fn flag_cycle_has_period_three(
        (width, height, mines, seed) in board_params(),
        pick in any::<prop::sample::Index>(),
        rounds in 1usize..4,
    ) {
        let mut board = seeded_board(width, height, mines, seed);
        let id = pick.index(board.total_tiles());

        for _ in 0..rounds * 3 {
            board.flag(TileRef::ById(id)).unwrap();
        }

        prop_assert_eq!(tile(&board, id).status(), TileStatus::Unchecked);
        prop_assert_eq!(board.flagged_count(), 0);
        prop_assert_eq!(board.remaining_mines(), mines as isize);
    }

    #[test]
    fn won_exactly_when_every_safe_tile_is_checked((width, height, mines, seed) in board_params()) {
        let mut board = seeded_board(width, height, mines, seed);
        let safe: Vec<_> = board.tiles().filter(|tile| !tile.is_mine()).map(|tile| tile.id()).collect();

        for id in safe {
            board.click(TileRef::ById(id)).unwrap();
            let all_checked = board
                .tiles()
                .filter(|tile| !tile.is_mine())
                .all(|tile| tile.status().is_checked());
            prop_assert_eq!(board.is_won(), all_checked);
            prop_assert!(board.is_valid());
        }
        prop_assert!(board.is_won());
    }

    #[test]
    fn finished_board_ignores_every_action(
        (width, height, mines, seed) in board_params(),
        win in any::<bool>(),
        actions in prop::collection::vec(any_action(), 1..40),
    ) {
        let mut board = seeded_board(width, height, mines, seed);
        if win {
            let safe: Vec<_> = board.tiles().filter(|tile| !tile.is_mine()).map(|tile| tile.id()).collect();
            for id in safe {
                board.click(TileRef::ById(id)).unwrap();
            }
        } else {
            let mine = board.mine_layout().iter().next().unwrap();
            board.click(TileRef::ById(mine)).unwrap();
        }
        prop_assert!(board.is_frozen());
        let before = statuses(&board);
        let outcome = board.outcome();

        for action in actions {
            let result = board.perform_action(action).unwrap();
            prop_assert!(!result.has_update() || result == ActionOutcome::Released);
        }

        prop_assert_eq!(statuses(&board), before);
        prop_assert_eq!(board.outcome(), outcome);
        prop_assert_eq!(board.pressed_tile(), None);
    }
}
