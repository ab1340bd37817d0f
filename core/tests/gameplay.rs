use daily_sweeper_core::*;

fn all_coords(game: &Game) -> Vec<Coord2> {
    game.board().iter_cells().map(|(coords, _)| coords).collect()
}

fn safe_coords(game: &Game) -> Vec<Coord2> {
    game.board()
        .iter_cells()
        .filter(|(_, cell)| !cell.is_mine())
        .map(|(coords, _)| coords)
        .collect()
}

fn mine_coords(game: &Game) -> Vec<Coord2> {
    game.board()
        .iter_cells()
        .filter(|(_, cell)| cell.is_mine())
        .map(|(coords, _)| coords)
        .collect()
}

#[test]
fn generate_is_deterministic_per_seed() {
    let first = generate(16, 16, 40, "2025-01-01").unwrap();
    let second = generate(16, 16, 40, "2025-01-01").unwrap();
    let other = generate(16, 16, 40, "2025-01-02").unwrap();

    assert_eq!(first, second);
    assert_ne!(first, other);
}

#[test]
fn game_and_generator_agree() {
    let config = GameConfig::new((10, 8), 15).unwrap();
    let game = Game::new(config, "agree").unwrap();

    assert_eq!(game.board(), &generate(10, 8, 15, "agree").unwrap());
    assert_eq!(game.mines_left(), 15);
    assert_eq!(game.state(), GameState::InPlay);
}

#[test]
fn flood_fill_never_touches_mines() {
    let config = GameConfig::new((20, 20), 30).unwrap();
    let mut game = Game::new(config, "flood").unwrap();
    let zero = game
        .board()
        .iter_cells()
        .find(|(_, cell)| !cell.is_mine() && cell.adjacent_mines() == 0)
        .map(|(coords, _)| coords)
        .unwrap();

    game.reveal(zero);

    assert!(!game.is_over());
    for (coords, cell) in game.board().iter_cells() {
        if cell.is_mine() {
            assert!(!cell.is_revealed(), "mine at {coords:?} was revealed");
        }
        // a revealed zero always has every neighbor revealed
        if cell.is_revealed() && cell.adjacent_mines() == 0 {
            for pos in game.board().iter_neighbors(coords) {
                assert!(game.cell_at(pos).unwrap().is_revealed());
            }
        }
    }
}

#[test]
fn clearing_generated_board_wins() {
    let config = GameConfig::new((9, 9), 12).unwrap();
    let mut game = Game::new(config, "clear").unwrap();

    for coords in safe_coords(&game) {
        game.reveal(coords);
    }
    assert!(!game.is_over());

    let mines = mine_coords(&game);
    let (last, rest) = mines.split_last().unwrap();
    for &coords in rest {
        assert_eq!(game.toggle_flag(coords), MarkOutcome::Changed);
    }
    assert_eq!(game.toggle_flag(*last), MarkOutcome::Won);
    assert_eq!(game.state(), GameState::Won);
    assert_eq!(game.mines_left(), 0);
}

#[test]
fn restored_game_behaves_identically() {
    let config = GameConfig::new((12, 10), 18).unwrap();
    let mut original = Game::new(config, "round-trip").unwrap();
    let safe = safe_coords(&original);
    original.reveal(safe[0]);
    original.toggle_flag(mine_coords(&original)[0]);

    let text = original.export().to_json().unwrap();
    let mut restored = GameSnapshot::restore_json(&text).unwrap();
    assert_eq!(restored, original);

    let moves = all_coords(&original);
    for (step, &coords) in moves.iter().enumerate().rev() {
        if step % 3 == 0 {
            assert_eq!(original.toggle_flag(coords), restored.toggle_flag(coords));
        } else {
            assert_eq!(original.reveal(coords), restored.reveal(coords));
        }
        assert_eq!(restored, original);
    }

    original.reset().unwrap();
    restored.reset().unwrap();
    assert_eq!(restored, original);
}

#[test]
fn game_serializes_through_snapshot() {
    let config = GameConfig::new((5, 5), 3).unwrap();
    let mut game = Game::new(config, "serde").unwrap();
    game.reveal(safe_coords(&game)[0]);

    let text = serde_json::to_string(&game).unwrap();
    let back: Game = serde_json::from_str(&text).unwrap();

    assert_eq!(back, game);
    assert_eq!(GameSnapshot::from_json(&text).unwrap(), game.export());
}

#[test]
fn reset_reproduces_layout_after_loss() {
    let config = GameConfig::new((9, 9), 12).unwrap();
    let mut game = Game::new(config, "again").unwrap();
    let layout = mine_coords(&game);

    game.reveal(layout[0]);
    assert_eq!(game.state(), GameState::Lost);
    assert_eq!(game.reveal(layout[1]), RevealOutcome::NoChange);

    game.reset().unwrap();
    assert_eq!(game.state(), GameState::InPlay);
    assert_eq!(mine_coords(&game), layout);
    assert!(
        game.board()
            .iter_cells()
            .all(|(_, cell)| !cell.is_revealed() && !cell.is_flagged())
    );
}

#[test]
fn impossible_placement_fails_construction() {
    let config = GameConfig::new((30, 30), 890).unwrap();

    assert!(matches!(
        Game::new(config, "crowded"),
        Err(GameError::PlacementStalled { .. })
    ));
}

#[test]
fn restored_game_keeps_draw_budget_for_reset() {
    let config = GameConfig::new((30, 30), 890).unwrap();
    let generator = SeededGenerator::new("crowded").with_max_draws(1_000_000);
    let mut original = Game::with_generator(config, generator).unwrap();

    let mut restored = Game::restore(original.export()).unwrap();

    assert_eq!(original.reset(), Ok(()));
    assert_eq!(restored.reset(), Ok(()));
    assert_eq!(restored, original);
}
