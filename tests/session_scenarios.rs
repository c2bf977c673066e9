//! End-to-end rounds driven through `GameSession::dispatch`
use rand::rngs::StdRng;
use rand::SeedableRng;
use schulte::*;
use std::time::{Duration, Instant};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn config_with_size(size: usize) -> GameConfig {
    let mut config = GameConfig::default();
    config.board.default_size = GridSize::new(size).unwrap();
    config
}

fn session(size: usize, seed: u64) -> GameSession<MemoryStore> {
    GameSession::with_rng(
        &config_with_size(size),
        MemoryStore::new(),
        StdRng::seed_from_u64(seed),
    )
}

#[test]
fn test_perfect_3x3_round() {
    let t0 = Instant::now();
    let mut game = session(3, 1);
    assert_eq!(game.state(), GameState::Ready);
    assert_eq!(game.dispatch(Event::Start, t0), Transition::Started);
    assert_eq!(game.state(), GameState::Playing);

    for value in 1..=8u32 {
        let transition = game.dispatch(Event::CellClicked { value }, t0 + ms(value as u64 * 250));
        assert_eq!(transition, Transition::Advanced { target: value + 1 });
        assert_eq!(game.current_target(), value + 1);
        assert_eq!(game.state(), GameState::Playing);
    }

    let transition = game.dispatch(Event::CellClicked { value: 9 }, t0 + ms(9 * 250));
    let expected = Completion {
        grid_size: GridSize::new(3).unwrap(),
        elapsed_ms: 2000,
        outcome: SaveOutcome::NewBest { previous: None },
    };
    assert_eq!(transition, Transition::Completed(expected));
    assert_eq!(game.state(), GameState::Finished);
    assert_eq!(game.current_target(), 10);
    assert_eq!(game.target_display(), "✓");
    assert_eq!(game.button_label(), "Play Again");
    assert_eq!(game.best_ms(), Some(2000));
    assert_eq!(game.best_display(), "00:02.00");
    assert_eq!(game.scores().load(GridSize::new(3).unwrap()), Some(2000));
    assert_eq!(game.board().consumed_count(), 9);
}

#[test]
fn test_wrong_clicks_never_move_target() {
    let t0 = Instant::now();
    let mut game = session(4, 2);
    game.dispatch(Event::Start, t0);

    for value in 1..=16u32 {
        // A wrong guess before every correct one
        let wrong = if value == 16 { 1 } else { value + 1 };
        let before = game.current_target();
        let transition = game.dispatch(Event::CellClicked { value: wrong }, t0);
        if value == 16 {
            // 1 is already consumed
            assert_eq!(transition, Transition::Ignored);
        } else {
            assert_eq!(transition, Transition::Missed { value: wrong });
        }
        assert_eq!(game.current_target(), before);

        game.dispatch(Event::CellClicked { value }, t0 + ms(value as u64));
        assert_eq!(game.current_target(), before + 1);
    }
    assert_eq!(game.state(), GameState::Finished);
}

#[test]
fn test_completion_time_is_last_minus_first_click() {
    let t0 = Instant::now();
    let mut game = session(2, 3);
    game.dispatch(Event::Start, t0);

    // Five seconds of study time are not counted
    let first = t0 + ms(5000);
    game.dispatch(Event::CellClicked { value: 1 }, first);
    game.dispatch(Event::Tick, first + ms(10));
    game.dispatch(Event::CellClicked { value: 2 }, first + ms(400));
    game.dispatch(Event::Tick, first + ms(420));
    game.dispatch(Event::CellClicked { value: 3 }, first + ms(801));
    // Last sample is at 420 ms; the recorded time must still be exact
    let transition = game.dispatch(Event::CellClicked { value: 4 }, first + ms(1234));

    match transition {
        Transition::Completed(completion) => assert_eq!(completion.elapsed_ms, 1234),
        other => panic!("expected completion, got {:?}", other),
    }
    assert!(!game.timer().is_running());
    assert_eq!(game.timer().next_deadline(), None);
    assert_eq!(game.timer_display(), "00:01.23");
    assert_eq!(game.dispatch(Event::Tick, first + ms(5000)), Transition::Ignored);
    assert_eq!(game.elapsed_ms(), 1234);
}

#[test]
fn test_clicks_after_finish_are_ignored() {
    let t0 = Instant::now();
    let mut game = session(2, 4);
    game.dispatch(Event::Start, t0);
    for value in 1..=4 {
        game.dispatch(Event::CellClicked { value }, t0);
    }
    assert_eq!(game.state(), GameState::Finished);
    assert_eq!(game.dispatch(Event::CellClicked { value: 1 }, t0), Transition::Ignored);
    assert_eq!(game.dispatch(Event::CellClicked { value: 3 }, t0), Transition::Ignored);
    assert_eq!(game.current_target(), 5);
}

#[test]
fn test_size_change_mid_game_resets_everything() {
    let t0 = Instant::now();
    let mut config = config_with_size(3);
    config.board.sizes = vec![3, 4, 5, 6];
    let mut store = MemoryStore::new();
    store.set("highScore_4x4", "7777".to_string());
    let mut game = GameSession::with_rng(&config, store, StdRng::seed_from_u64(5));

    game.dispatch(Event::Start, t0);
    let old_board = game.board().values();
    game.dispatch(Event::CellClicked { value: 1 }, t0);
    game.dispatch(Event::CellClicked { value: 2 }, t0 + ms(100));
    assert!(game.timer().is_running());

    let four = GridSize::new(4).unwrap();
    let transition = game.dispatch(Event::GridSizeChanged(four), t0 + ms(200));
    assert_eq!(transition, Transition::Reset { grid_size: four });
    assert_eq!(game.state(), GameState::Ready);
    assert_eq!(game.button_label(), "Start Game");
    assert_eq!(game.current_target(), 1);
    assert_eq!(game.max_number(), 16);
    assert!(!game.timer().is_running());
    assert_eq!(game.timer_display(), "00:00.00");
    assert_eq!(game.best_display(), "00:07.77");
    assert_eq!(game.board().values().len(), 16);
    assert_ne!(game.board().values().len(), old_board.len());
    assert!(is_permutation_of_size(&game.board().values(), 16));

    // Clicks are ignored until the next start
    assert_eq!(game.dispatch(Event::CellClicked { value: 1 }, t0), Transition::Ignored);
    assert_eq!(game.dispatch(Event::Tick, t0 + ms(1000)), Transition::Ignored);
}

#[test]
fn test_same_size_reselect_reshuffles() {
    let t0 = Instant::now();
    let mut game = session(5, 6);
    let before = game.board().values();
    let five = GridSize::new(5).unwrap();
    let mut reshuffled = false;
    for _ in 0..5 {
        game.dispatch(Event::GridSizeChanged(five), t0);
        if game.board().values() != before {
            reshuffled = true;
        }
    }
    assert!(reshuffled);
}

#[test]
fn test_slower_round_keeps_record() {
    let t0 = Instant::now();
    let mut game = session(2, 7);

    let play = |game: &mut GameSession<MemoryStore>, start: Instant, step: u64| {
        game.dispatch(Event::Start, start);
        let mut last = Transition::Ignored;
        for value in 1..=4u32 {
            last = game.dispatch(
                Event::CellClicked { value },
                start + ms(step * value as u64),
            );
        }
        last
    };

    let first = play(&mut game, t0, 100);
    assert!(matches!(
        first,
        Transition::Completed(Completion { elapsed_ms: 300, .. })
    ));

    let second = play(&mut game, t0, 200);
    match second {
        Transition::Completed(completion) => {
            assert_eq!(completion.elapsed_ms, 600);
            assert_eq!(completion.outcome, SaveOutcome::NotBest { best: 300 });
        }
        other => panic!("expected completion, got {:?}", other),
    }
    assert_eq!(game.best_ms(), Some(300));

    let third = play(&mut game, t0, 50);
    match third {
        Transition::Completed(completion) => assert_eq!(
            completion.outcome,
            SaveOutcome::NewBest {
                previous: Some(300)
            }
        ),
        other => panic!("expected completion, got {:?}", other),
    }
    assert_eq!(game.best_display(), "00:00.15");
}

#[test]
fn test_play_again_starts_fresh_round() {
    let t0 = Instant::now();
    let mut game = session(2, 8);
    game.dispatch(Event::Start, t0);
    for value in 1..=4 {
        game.dispatch(Event::CellClicked { value }, t0 + ms(value as u64));
    }
    assert!(game.last_completion().is_some());

    assert_eq!(game.dispatch(Event::Start, t0 + ms(50)), Transition::Started);
    assert_eq!(game.state(), GameState::Playing);
    assert_eq!(game.target_display(), "1");
    assert!(game.last_completion().is_none());
    assert_eq!(game.board().consumed_count(), 0);
}

fn is_permutation_of_size(values: &[u32], n: u32) -> bool {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    sorted == (1..=n).collect::<Vec<_>>()
}
