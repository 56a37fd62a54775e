use anyhow::Result;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    action::Direction,
    config::GameConfig,
    state::{CollisionType, GameState, Position, Snake},
};

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// What ended the game, if this step ended it
    pub collision: Option<CollisionType>,
    /// Whether the game is over after this step
    pub terminated: bool,
}

/// The game engine that handles all game logic.
///
/// It owns no timers: the host decides when to call [`GameEngine::step`] and
/// [`GameEngine::tick_clock`].
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine; fails if `config` does not validate
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng: StdRng::from_entropy(),
        })
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Fresh game: single-cell snake in the middle, heading right
    pub fn reset(&mut self) -> GameState {
        let snake = Snake::new(self.config.start_position());
        let food = self.spawn_food(&snake);

        info!(
            "New game on {0}x{0} board, food at ({1}, {2})",
            self.config.board_size, food.x, food.y
        );

        GameState::new(snake, food, Direction::Right, self.config.board_size)
    }

    /// Pick a random cell for food, avoiding `occupied` on a best-effort basis.
    ///
    /// At most `food_spawn_attempts` candidates are drawn; if all of them land
    /// on the snake the last one is used anyway.
    pub fn spawn_food(&mut self, occupied: &Snake) -> Position {
        let mut candidate = self.random_cell();
        let mut attempts = 1;

        while occupied.contains(candidate) && attempts < self.config.food_spawn_attempts {
            candidate = self.random_cell();
            attempts += 1;
        }

        if occupied.contains(candidate) {
            warn!(
                "Food placed on the snake at ({}, {}) after {} attempts",
                candidate.x, candidate.y, attempts
            );
        } else {
            debug!(
                "Food spawned at ({}, {}) after {} attempt(s)",
                candidate.x, candidate.y, attempts
            );
        }

        candidate
    }

    /// Advance the snake one cell in its current direction
    pub fn step(&mut self, state: &mut GameState) -> StepResult {
        if state.game_over {
            return StepResult {
                ate_food: false,
                collision: None,
                terminated: true,
            };
        }

        let new_head = state.snake.head().moved_in_direction(state.direction);

        if let Some(collision) = self.check_collision(state, new_head) {
            state.game_over = true;
            info!(
                "Game over: {:?} moving {:?} into ({}, {}), length {}",
                collision,
                state.direction,
                new_head.x,
                new_head.y,
                state.snake.len()
            );

            return StepResult {
                ate_food: false,
                collision: Some(collision),
                terminated: true,
            };
        }

        let ate_food = new_head == state.food;
        state.snake.advance(new_head, ate_food);

        if ate_food {
            state.food = self.spawn_food(&state.snake);
            state.high_score = state.high_score.max(state.snake.len());
            debug!(
                "Ate food, length {} (high score {})",
                state.snake.len(),
                state.high_score
            );
        }

        StepResult {
            ate_food,
            collision: None,
            terminated: false,
        }
    }

    /// Turn the snake unless `requested` is a reversal. Returns whether the
    /// direction changed.
    pub fn set_direction(&self, state: &mut GameState, requested: Direction) -> bool {
        if state.direction.is_opposite(requested) {
            return false;
        }
        state.direction = requested;
        true
    }

    /// One elapsed-time tick
    pub fn tick_clock(&self, state: &mut GameState) {
        if !state.game_over {
            state.time_played += 1;
        }
    }

    /// The whole pre-move body counts, including the tail cell that a
    /// non-growing move is about to vacate.
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if state.snake.contains(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    fn random_cell(&mut self) -> Position {
        let x = self.rng.gen_range(0..self.config.board_size) as i32;
        let y = self.rng.gen_range(0..self.config.board_size) as i32;
        Position::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::Phase;
    use std::collections::HashSet;

    fn engine() -> GameEngine {
        GameEngine::with_seed(GameConfig::default(), 7).unwrap()
    }

    fn snake(cells: &[(i32, i32)]) -> Snake {
        Snake::from_cells(cells.iter().map(|&(x, y)| Position::new(x, y))).unwrap()
    }

    fn cells(state: &GameState) -> Vec<(i32, i32)> {
        state.snake.cells().map(|p| (p.x, p.y)).collect()
    }

    fn state_with(cells: &[(i32, i32)], food: (i32, i32), direction: Direction) -> GameState {
        GameState::new(snake(cells), Position::new(food.0, food.1), direction, 15)
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        assert!(GameEngine::new(GameConfig::new(0)).is_err());
        assert!(GameEngine::with_seed(GameConfig::new(0), 1).is_err());
        assert!(GameEngine::new(GameConfig::default()).is_ok());
    }

    #[test]
    fn test_reset() {
        let mut engine = engine();
        let state = engine.reset();

        assert_eq!(state.phase(), Phase::Running);
        assert_eq!(cells(&state), vec![(7, 7)]);
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.high_score, 0);
        assert_eq!(state.time_played, 0);
        assert_ne!(state.food, Position::new(7, 7));
        assert!(state.is_in_bounds(state.food));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut engine = engine();
        let first = engine.reset();
        let second = engine.reset();

        assert_eq!(first.snake, second.snake);
        assert_eq!(first.direction, second.direction);
        assert_eq!(first.game_over, second.game_over);
        assert_eq!(first.high_score, second.high_score);
        assert_eq!(first.time_played, second.time_played);
        assert!(!first.snake.contains(first.food));
        assert!(!second.snake.contains(second.food));
    }

    #[test]
    fn test_single_cell_move_without_food() {
        let mut engine = engine();
        let mut state = state_with(&[(7, 7)], (0, 0), Direction::Right);

        let result = engine.step(&mut state);

        assert!(!result.terminated);
        assert!(!result.ate_food);
        assert_eq!(cells(&state), vec![(8, 7)]);
        assert_eq!(state.food, Position::new(0, 0));
        assert_eq!(state.high_score, 0);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = engine();
        let mut state = state_with(&[(5, 5)], (6, 5), Direction::Right);

        let result = engine.step(&mut state);

        assert!(result.ate_food);
        assert_eq!(cells(&state), vec![(5, 5), (6, 5)]);
        assert_eq!(state.high_score, 2);
        assert!(!state.snake.contains(state.food));
        assert!(state.is_in_bounds(state.food));
    }

    #[test]
    fn test_high_score_never_decreases() {
        let mut engine = engine();
        let mut state = state_with(&[(5, 5)], (6, 5), Direction::Right);
        state.high_score = 9;

        engine.step(&mut state);

        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.high_score, 9);
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = engine();
        let mut state = state_with(&[(0, 5)], (9, 9), Direction::Left);
        let before = state.clone();

        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert_eq!(result.collision, Some(CollisionType::Wall));
        assert!(state.game_over);
        assert_eq!(state.phase(), Phase::GameOver);
        assert_eq!(state.snake, before.snake);
        assert_eq!(state.food, before.food);
    }

    #[test]
    fn test_far_walls() {
        let mut engine = engine();

        let mut state = state_with(&[(14, 3)], (0, 0), Direction::Right);
        assert_eq!(engine.step(&mut state).collision, Some(CollisionType::Wall));

        let mut state = state_with(&[(3, 14)], (0, 0), Direction::Down);
        assert_eq!(engine.step(&mut state).collision, Some(CollisionType::Wall));

        let mut state = state_with(&[(3, 0)], (0, 1), Direction::Up);
        assert_eq!(engine.step(&mut state).collision, Some(CollisionType::Wall));
    }

    #[test]
    fn test_turn_beside_tail_succeeds() {
        let mut engine = engine();
        let mut state = state_with(&[(5, 5), (6, 5), (6, 6)], (0, 0), Direction::Down);

        let result = engine.step(&mut state);

        assert!(!result.terminated);
        assert_eq!(cells(&state), vec![(6, 5), (6, 6), (6, 7)]);
    }

    #[test]
    fn test_moving_into_vacating_tail_is_fatal() {
        let mut engine = engine();
        // Head at (5, 6) moving up lands on the tail at (5, 5)
        let mut state = state_with(&[(5, 5), (6, 5), (6, 6), (5, 6)], (0, 0), Direction::Up);

        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert_eq!(result.collision, Some(CollisionType::SelfCollision));
        assert_eq!(state.snake.len(), 4);
    }

    #[test]
    fn test_self_collision() {
        let mut engine = engine();
        let mut state = state_with(
            &[(4, 5), (5, 5), (6, 5), (6, 6), (5, 6)],
            (0, 0),
            Direction::Up,
        );

        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert_eq!(result.collision, Some(CollisionType::SelfCollision));
    }

    #[test]
    fn test_reversal_rejected_for_all_pairs() {
        let engine = engine();

        for dir in Direction::ALL {
            let mut state = state_with(&[(7, 7)], (0, 0), dir);
            assert!(!engine.set_direction(&mut state, dir.opposite()));
            assert_eq!(state.direction, dir);
        }
    }

    #[test]
    fn test_perpendicular_turn_accepted() {
        let engine = engine();
        let mut state = state_with(&[(7, 7)], (0, 0), Direction::Up);

        assert!(!engine.set_direction(&mut state, Direction::Down));
        assert_eq!(state.direction, Direction::Up);

        assert!(engine.set_direction(&mut state, Direction::Left));
        assert_eq!(state.direction, Direction::Left);
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = engine();
        let mut state = state_with(&[(0, 5)], (9, 9), Direction::Left);
        engine.step(&mut state);
        let frozen = state.clone();

        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert_eq!(result.collision, None);
        assert_eq!(state, frozen);
    }

    #[test]
    fn test_clock_stops_after_game_over() {
        let mut engine = engine();
        let mut state = state_with(&[(0, 5)], (9, 9), Direction::Left);

        engine.tick_clock(&mut state);
        engine.tick_clock(&mut state);
        assert_eq!(state.time_played, 2);

        engine.step(&mut state);
        engine.tick_clock(&mut state);
        assert_eq!(state.time_played, 2);
    }

    #[test]
    fn test_spawn_finds_last_free_cell() {
        let config = GameConfig {
            board_size: 3,
            food_spawn_attempts: 1000,
            ..Default::default()
        };
        let mut engine = GameEngine::with_seed(config, 42).unwrap();
        let occupied = snake(&[
            (0, 0),
            (1, 0),
            (2, 0),
            (2, 1),
            (1, 1),
            (0, 1),
            (0, 2),
            (1, 2),
        ]);

        assert_eq!(engine.spawn_food(&occupied), Position::new(2, 2));
    }

    #[test]
    fn test_spawn_falls_back_when_board_is_full() {
        let config = GameConfig::new(2);
        let mut engine = GameEngine::with_seed(config, 3).unwrap();
        let occupied = snake(&[(0, 0), (1, 0), (1, 1), (0, 1)]);

        let food = engine.spawn_food(&occupied);

        assert!(occupied.contains(food));
    }

    #[test]
    fn test_random_play_keeps_invariants() {
        let mut chooser = StdRng::seed_from_u64(99);

        for seed in 0..20 {
            let mut engine = GameEngine::with_seed(GameConfig::default(), seed).unwrap();
            let mut state = engine.reset();

            for _ in 0..500 {
                let requested = Direction::ALL[chooser.gen_range(0..4)];
                engine.set_direction(&mut state, requested);

                let before = state.snake.len();
                let result = engine.step(&mut state);

                if result.terminated {
                    assert!(state.game_over);
                    assert_eq!(state.snake.len(), before);
                    state = engine.reset();
                    continue;
                }

                if result.ate_food {
                    assert_eq!(state.snake.len(), before + 1);
                    assert!(!state.snake.contains(state.food));
                } else {
                    assert_eq!(state.snake.len(), before);
                }

                let unique: HashSet<Position> = state.snake.cells().collect();
                assert_eq!(unique.len(), state.snake.len());
                assert!(state.snake.cells().all(|p| state.is_in_bounds(p)));
                assert!(state.is_in_bounds(state.food));
                if state.snake.len() > 1 {
                    assert!(state.high_score >= state.snake.len());
                }
            }
        }
    }
}
