use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{
    action::{Action, Direction},
    config::{Difficulty, GameConfig},
    error::GameError,
    spawn,
    state::{CollisionType, GameState, Obstacle, Position, Snake},
};

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn running(ate_food: bool) -> Self {
        Self {
            terminated: false,
            info: StepInfo {
                ate_food,
                collision_type: None,
            },
        }
    }

    fn collided(collision_type: Option<CollisionType>) -> Self {
        Self {
            terminated: true,
            info: StepInfo {
                ate_food: false,
                collision_type,
            },
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine whose food and obstacle placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a fresh game.
    ///
    /// The snake is a single segment at the grid center heading up. Food is
    /// placed against that snake alone, then `difficulty * obstacles_per_level`
    /// obstacles are placed one by one, each avoiding the snake, the food and
    /// every obstacle placed before it.
    pub fn new_game(&mut self, difficulty: Difficulty) -> Result<GameState, GameError> {
        let width = self.config.grid_width;
        let height = self.config.grid_height;
        let attempts = self.config.placement_attempts;

        let center = Position::new((width / 2) as i32, (height / 2) as i32);
        let snake = Snake::new(center, Direction::Up);

        let food = spawn::relocate_food(&mut self.rng, width, height, attempts, &snake.body, &[])?;

        let count = self.config.obstacle_count(difficulty);
        let mut placed: Vec<Position> = Vec::with_capacity(count);
        for _ in 0..count {
            let pos = spawn::place_obstacle(
                &mut self.rng,
                width,
                height,
                attempts,
                &snake.body,
                food,
                &placed,
            )?;
            placed.push(pos);
        }

        let obstacles = placed
            .into_iter()
            .map(|position| Obstacle { position })
            .collect();

        Ok(GameState::new(snake, food, obstacles, difficulty, width, height))
    }

    /// Execute one tick: turn, advance, then resolve collisions.
    ///
    /// Collisions are checked in a fixed order, stopping at the first hit:
    /// wall, self, food (grows and relocates, not terminal), obstacle.
    /// An error means the board has no room left for new food.
    pub fn step(&mut self, state: &mut GameState, action: Action) -> Result<StepResult, GameError> {
        if !state.is_alive {
            return Ok(StepResult::collided(None));
        }

        if let Action::Move(direction) = action {
            state.snake.change_direction(direction);
        }

        state.snake.move_forward();
        state.steps += 1;

        let head = state.snake.head();

        if !state.is_in_bounds(head) {
            state.is_alive = false;
            return Ok(StepResult::collided(Some(CollisionType::Wall)));
        }

        if state.snake.collides_with_body(head) {
            state.is_alive = false;
            return Ok(StepResult::collided(Some(CollisionType::SelfCollision)));
        }

        let ate_food = head == state.food.position;
        if ate_food {
            state.snake.grow();
            match self.relocate_food(state) {
                Ok(position) => state.food.position = position,
                Err(err) => {
                    state.is_alive = false;
                    return Err(err);
                }
            }
        }

        if state.is_obstacle(head) {
            state.is_alive = false;
            return Ok(StepResult::collided(Some(CollisionType::Obstacle)));
        }

        Ok(StepResult::running(ate_food))
    }

    fn relocate_food(&mut self, state: &GameState) -> Result<Position, GameError> {
        spawn::relocate_food(
            &mut self.rng,
            state.grid_width,
            state.grid_height,
            self.config.placement_attempts,
            &state.snake.body,
            &state.obstacle_positions(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::error::PlacedItem;

    fn level(n: u8) -> Difficulty {
        Difficulty::new(n).unwrap()
    }

    fn state_with(body: &[(i32, i32)], direction: Direction, food: (i32, i32)) -> GameState {
        let body = body.iter().map(|&(x, y)| Position::new(x, y)).collect();
        GameState::new(
            Snake::from_body(body, direction).unwrap(),
            Position::new(food.0, food.1),
            Vec::new(),
            level(1),
            10,
            10,
        )
    }

    #[test]
    fn test_new_game_layout() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 42);
        let state = engine.new_game(level(1)).unwrap();

        assert!(state.is_alive);
        assert_eq!(state.steps, 0);
        assert_eq!(state.snake.body, vec![Position::new(20, 15)]);
        assert_eq!(state.snake.direction, Direction::Up);
        assert_eq!(state.obstacles.len(), 5);
    }

    #[test]
    fn test_new_game_placements_are_disjoint() {
        for seed in 0..20 {
            let mut engine = GameEngine::with_seed(GameConfig::default(), seed);
            let state = engine.new_game(level(5)).unwrap();
            let obstacles = state.obstacle_positions();
            let food = state.food.position;

            assert_eq!(obstacles.len(), 25);
            assert!(!state.is_occupied_by_snake(food));
            assert!(!obstacles.contains(&food));
            for (i, pos) in obstacles.iter().enumerate() {
                assert!(!state.is_occupied_by_snake(*pos));
                assert!(!obstacles[i + 1..].contains(pos), "duplicate obstacle {:?}", pos);
            }
        }
    }

    #[test]
    fn test_new_game_too_crowded() {
        // center (1, 1) is the only interior cell of a 3x3 grid and the snake sits on it
        let mut engine = GameEngine::with_seed(GameConfig::new(3, 3), 1);
        let err = engine.new_game(level(2)).unwrap_err();
        assert_eq!(
            err,
            GameError::PlacementExhausted {
                item: PlacedItem::Food,
                attempts: 10_000
            }
        );
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 1);
        let mut state = state_with(&[(5, 5), (5, 6), (5, 7)], Direction::Up, (8, 8));

        let result = engine.step(&mut state, Action::Continue).unwrap();

        assert!(!result.terminated);
        assert!(!result.info.ate_food);
        assert_eq!(state.steps, 1);
        assert_eq!(
            state.snake.body,
            vec![Position::new(5, 4), Position::new(5, 5), Position::new(5, 6)]
        );
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 1);
        let mut state = state_with(&[(5, 5), (5, 6)], Direction::Up, (5, 4));

        let result = engine.step(&mut state, Action::Continue).unwrap();

        assert!(result.info.ate_food);
        assert!(!result.terminated);
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.food_eaten(), 2);
        assert_ne!(state.food.position, Position::new(5, 4));
        assert!(!state.is_occupied_by_snake(state.food.position));

        // grown segment trails on the following tick
        state.food.position = Position::new(8, 8);
        engine.step(&mut state, Action::Continue).unwrap();
        assert_eq!(
            state.snake.body,
            vec![Position::new(5, 3), Position::new(5, 4), Position::new(5, 5)]
        );
    }

    #[test]
    fn test_food_relocates_around_obstacles() {
        // 5x5 grid; after eating at (2, 1) only (2, 2) and (3, 3) are free inside
        let mut engine = GameEngine::with_seed(GameConfig::new(5, 5), 4);
        let open = [Position::new(2, 1), Position::new(2, 2), Position::new(3, 3)];
        let obstacles: Vec<Obstacle> = (1..=3)
            .flat_map(|y| (1..=3).map(move |x| Position::new(x, y)))
            .filter(|p| !open.contains(p))
            .map(|position| Obstacle { position })
            .collect();
        let mut state = GameState::new(
            Snake::new(Position::new(2, 2), Direction::Up),
            Position::new(2, 1),
            obstacles,
            level(1),
            5,
            5,
        );

        let result = engine.step(&mut state, Action::Continue).unwrap();

        assert!(result.info.ate_food);
        assert!(!result.terminated);
        assert_eq!(state.snake.len(), 2);
        assert!(!state.is_obstacle(state.food.position));
        assert!(!state.is_occupied_by_snake(state.food.position));
        assert!([Position::new(2, 2), Position::new(3, 3)].contains(&state.food.position));
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 1);

        let mut state = state_with(&[(0, 5)], Direction::Left, (5, 5));
        let result = engine.step(&mut state, Action::Continue).unwrap();
        assert!(result.terminated);
        assert!(!state.is_alive);
        assert_eq!(result.info.collision_type, Some(CollisionType::Wall));

        let mut state = state_with(&[(9, 5)], Direction::Right, (5, 5));
        let result = engine.step(&mut state, Action::Continue).unwrap();
        assert_eq!(result.info.collision_type, Some(CollisionType::Wall));
    }

    #[test]
    fn test_self_collision() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 1);

        // Head at (5,5) going Right, body wraps around below
        let mut state = state_with(
            &[(5, 5), (4, 5), (4, 6), (5, 6), (6, 6), (6, 7), (6, 8)],
            Direction::Right,
            (8, 8),
        );

        engine.step(&mut state, Action::Continue).unwrap();
        // Down into (6,6), still occupied by the body after the tail moved
        let result = engine.step(&mut state, Action::Move(Direction::Down)).unwrap();

        assert!(result.terminated);
        assert_eq!(
            result.info.collision_type,
            Some(CollisionType::SelfCollision)
        );
    }

    #[test]
    fn test_obstacle_collision() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 1);
        let mut state = state_with(&[(5, 5)], Direction::Up, (8, 8));
        state.obstacles.push(Obstacle {
            position: Position::new(5, 4),
        });

        let result = engine.step(&mut state, Action::Continue).unwrap();

        assert!(result.terminated);
        assert_eq!(result.info.collision_type, Some(CollisionType::Obstacle));
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 1);
        let mut state = state_with(&[(5, 5), (5, 6)], Direction::Up, (8, 8));

        engine.step(&mut state, Action::Move(Direction::Down)).unwrap();

        assert_eq!(state.snake.direction, Direction::Up);
        assert_eq!(state.snake.head(), Position::new(5, 4));
    }

    #[test]
    fn test_board_full_ends_game() {
        // 3x3 grid: the only interior cell is (1, 1), eating there leaves no room
        let mut engine = GameEngine::with_seed(GameConfig::new(3, 3), 1);
        let mut state = GameState::new(
            Snake::new(Position::new(1, 2), Direction::Up),
            Position::new(1, 1),
            Vec::new(),
            level(1),
            3,
            3,
        );

        let err = engine.step(&mut state, Action::Continue).unwrap_err();
        assert!(matches!(err, GameError::PlacementExhausted { .. }));
        assert!(!state.is_alive);
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 1);
        let mut state = state_with(&[(5, 5)], Direction::Up, (8, 8));
        state.is_alive = false;
        let steps_before = state.steps;

        let result = engine.step(&mut state, Action::Continue).unwrap();

        assert!(result.terminated);
        assert_eq!(state.steps, steps_before); // Should not increment
    }
}
