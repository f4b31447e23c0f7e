use snake_arcade::config::{GOLDEN_FOOD_LIFETIME_TICKS, GridSize, SessionConfig, WrapMode};
use snake_arcade::food::{Food, FoodKind};
use snake_arcade::game::{DeathReason, GameSession, TickOutcome};
use snake_arcade::grid::Position;
use snake_arcade::input::Direction;
use snake_arcade::score::HighScores;
use snake_arcade::snake::Snake;

fn session_20x20(wrap: WrapMode, seed: u64) -> GameSession {
    let config = SessionConfig {
        grid: GridSize {
            width: 20,
            height: 20,
        },
        wrap,
        initial_length: 1,
        ..SessionConfig::default()
    };
    GameSession::new_with_seed(config, HighScores::default(), seed)
}

/// Puts normal food right in front of the head.
fn place_food_ahead(session: &mut GameSession, food: fn(Position, u64) -> Food) {
    let ahead = session.snake.head().offset(session.snake.heading().delta());
    let ahead = session.grid().normalize(ahead, session.wrap());
    let tick = session.tick_count();
    session.food.place(food(ahead, tick));
}

#[test]
fn straight_run_without_wrap_hits_the_wall_on_the_tenth_tick() {
    let mut session = session_20x20(WrapMode::Off, 42);
    assert_eq!(session.snake.head(), Position::new(10, 10));
    assert_eq!(session.snake.heading(), Direction::Right);

    for step in 1..10 {
        let outcome = session.tick();
        assert!(
            !matches!(outcome, TickOutcome::GameOver(_)),
            "unexpected game over on tick {step}"
        );
        assert_eq!(session.snake.head(), Position::new(10 + step, 10));
    }

    assert_eq!(
        session.tick(),
        TickOutcome::GameOver(DeathReason::WallCollision)
    );
    assert!(session.is_over());
    assert_eq!(session.snake.head(), Position::new(19, 10));
}

#[test]
fn straight_run_with_wrap_returns_to_the_start() {
    let mut session = session_20x20(WrapMode::On, 42);

    for _ in 0..20 {
        let outcome = session.tick();
        assert!(!matches!(outcome, TickOutcome::GameOver(_)));
    }

    assert_eq!(session.snake.head(), Position::new(10, 10));
}

#[test]
fn wrap_mode_never_reports_a_wall_collision() {
    for seed in 0..10 {
        let mut session = session_20x20(WrapMode::On, seed);
        let turns = [
            Direction::Up,
            Direction::Left,
            Direction::Down,
            Direction::Right,
        ];
        for step in 0..400_usize {
            if step % 7 == 0 {
                session.snake.set_heading(turns[(step / 7) % turns.len()]);
            }
            let outcome = session.tick();
            assert_ne!(outcome, TickOutcome::GameOver(DeathReason::WallCollision));
            if session.is_over() {
                break;
            }
        }
    }
}

#[test]
fn normal_food_adds_ten_points_and_one_cell() {
    let mut session = session_20x20(WrapMode::On, 3);
    place_food_ahead(&mut session, Food::normal);

    assert_eq!(session.tick(), TickOutcome::AteFood(FoodKind::Normal));
    assert_eq!(session.scores.score(), 10);
    assert_eq!(session.snake.len(), 1);

    session.tick();
    assert_eq!(session.snake.len(), 2);
}

#[test]
fn golden_food_adds_thirty_points_and_two_cells() {
    let mut session = session_20x20(WrapMode::On, 4);
    place_food_ahead(&mut session, Food::golden);

    assert_eq!(session.tick(), TickOutcome::AteFood(FoodKind::Golden));
    assert_eq!(session.scores.score(), 30);

    session.tick();
    assert_eq!(session.snake.len(), 2);
    session.tick();
    assert_eq!(session.snake.len(), 3);
}

#[test]
fn uneaten_golden_food_expires_without_score_change() {
    let mut session = session_20x20(WrapMode::On, 5);
    for _ in 0..5 {
        session.tick();
    }
    assert_eq!(session.tick_count(), 5);

    // Off the snake's row, so it is never eaten.
    session.food.place(Food::golden(Position::new(0, 0), 5));
    let score = session.scores.score();

    while session.tick_count() < 5 + GOLDEN_FOOD_LIFETIME_TICKS {
        assert_ne!(session.tick(), TickOutcome::GoldenExpired);
        assert_eq!(
            session.food.active().map(|food| food.kind),
            Some(FoodKind::Golden)
        );
    }

    assert_eq!(session.tick(), TickOutcome::GoldenExpired);
    assert_eq!(session.tick_count(), 66);
    assert_eq!(session.scores.score(), score);
    let replacement = session.food.active().expect("normal food replaces it");
    assert_eq!(replacement.kind, FoodKind::Normal);
}

#[test]
fn snake_body_stays_distinct_while_eating() {
    let mut session = session_20x20(WrapMode::On, 6);
    let turns = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];

    for step in 0..300_usize {
        if step % 3 == 0 {
            place_food_ahead(&mut session, Food::normal);
        }
        if step % 5 == 0 {
            session.snake.set_heading(turns[(step / 5) % turns.len()]);
        }
        session.tick();

        let mut cells: Vec<_> = session.snake.segments().copied().collect();
        let len = cells.len();
        cells.sort_by_key(|p| (p.x, p.y));
        cells.dedup();
        assert_eq!(cells.len(), len);

        if session.is_over() {
            break;
        }
    }
}

#[test]
fn self_collision_ends_the_session() {
    let mut session = session_20x20(WrapMode::On, 7);
    let coiled = Snake::from_segments(
        vec![
            Position::new(2, 2),
            Position::new(1, 2),
            Position::new(1, 3),
            Position::new(2, 3),
            Position::new(3, 3),
            Position::new(3, 2),
        ],
        Direction::Right,
    )
    .expect("non-empty body");
    session.set_snake(coiled);
    session.snake.set_heading(Direction::Down);

    assert_eq!(
        session.tick(),
        TickOutcome::GameOver(DeathReason::SelfCollision)
    );
    assert_eq!(session.tick(), TickOutcome::Idle);
}
