use proptest::prelude::*;
use sensehat_snake::game::state::STARTING_BODY;
use sensehat_snake::game::{
    Direction, Game, GameConfig, GameStatus, InputEvent, StickAction, StickDirection, Transition,
};

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

fn has_duplicates(body: &[sensehat_snake::game::Position]) -> bool {
    body.iter()
        .enumerate()
        .any(|(i, a)| body[i + 1..].contains(a))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// The heading never flips by 180 degrees in one step
    #[test]
    fn heading_never_reverses(seed in any::<u64>(), moves in prop::collection::vec(direction(), 1..60)) {
        let mut game = Game::new(GameConfig::seeded(seed));

        for requested in moves {
            let before = game.state().snake.direction();
            game.handle_input(InputEvent::pressed(requested, 0.0));
            let after = game.state().snake.direction();
            prop_assert!(!after.is_opposite(before));
        }
    }

    /// Length changes only by eating, one segment at a time, up to the cap
    #[test]
    fn length_grows_only_by_eating(seed in any::<u64>(), moves in prop::collection::vec(direction(), 1..80)) {
        let config = GameConfig::seeded(seed);
        let max_length = config.max_snake_length();
        let mut game = Game::new(config);

        for requested in moves {
            let before = game.state().snake.len();
            let score_before = game.score();
            let transition = game.handle_input(InputEvent::pressed(requested, 0.0));
            let after = game.state().snake.len();

            match transition {
                Transition::Moved { ate_apple: true } => {
                    prop_assert_eq!(game.score(), score_before + 1);
                    prop_assert!(after == before + 1 || after == before);
                    prop_assert!(after <= max_length);
                }
                _ => {
                    prop_assert_eq!(after, before);
                    prop_assert_eq!(game.score(), score_before);
                }
            }
        }
    }

    /// The apple never lies under the snake while the game is running
    #[test]
    fn apple_never_on_snake(seed in any::<u64>(), moves in prop::collection::vec(direction(), 1..80)) {
        let mut game = Game::new(GameConfig::seeded(seed));

        for requested in moves {
            game.handle_input(InputEvent::pressed(requested, 0.0));
            if game.is_over() {
                break;
            }
            let state = game.state();
            prop_assert!(!state.snake.occupies(state.apple.position()));
            prop_assert!(!has_duplicates(state.snake.body()));
        }
    }

    /// Once over, nothing but a reset changes the game
    #[test]
    fn game_over_is_frozen(seed in any::<u64>(), moves in prop::collection::vec(direction(), 1..120)) {
        let mut game = Game::new(GameConfig::seeded(seed));
        let mut frozen = None;

        for requested in moves {
            game.handle_input(InputEvent::pressed(requested, 0.0));
            match &frozen {
                None if game.is_over() => frozen = Some(game.state().clone()),
                Some(state) => prop_assert_eq!(game.state(), state),
                None => {}
            }
        }
    }

    /// Every reset lands on the same starting board
    #[test]
    fn reset_is_always_the_same_start(seed in any::<u64>(), moves in prop::collection::vec(direction(), 0..40)) {
        let mut game = Game::new(GameConfig::seeded(seed));
        for requested in moves {
            game.handle_input(InputEvent::pressed(requested, 0.0));
        }

        game.handle_input(InputEvent::new(StickDirection::Middle, StickAction::Pressed, 100.0));
        let transition = game.handle_input(InputEvent::new(StickDirection::Middle, StickAction::Released, 102.0));

        prop_assert_eq!(transition, Transition::Reset);
        let state = game.state();
        prop_assert_eq!(state.score, 0);
        prop_assert_eq!(state.status, GameStatus::Active);
        prop_assert_eq!(state.snake.body(), &STARTING_BODY[..]);
        prop_assert_eq!(state.snake.direction(), Direction::Right);
        prop_assert!(!STARTING_BODY.contains(&state.apple.position()));
    }

    /// Holds shorter than the threshold never restart
    #[test]
    fn short_hold_never_resets(seed in any::<u64>(), held_for in 0.0f64..1.99) {
        let mut game = Game::new(GameConfig::seeded(seed));

        game.handle_input(InputEvent::new(StickDirection::Middle, StickAction::Pressed, 10.0));
        let held = game.handle_input(InputEvent::new(StickDirection::Middle, StickAction::Held, 10.0 + held_for));
        let released = game.handle_input(InputEvent::new(StickDirection::Middle, StickAction::Released, 10.0 + held_for));

        prop_assert_eq!(held, Transition::Ignored);
        prop_assert_eq!(released, Transition::Ignored);
    }
}
