use super::action::Direction;
use super::config::Difficulty;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// An RGB color handed to whatever draws the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Segment colors, cycled from the head backwards
pub const SNAKE_PALETTE: [Rgb; 4] = [
    Rgb::new(0, 255, 0),
    Rgb::new(0, 128, 255),
    Rgb::new(255, 255, 0),
    Rgb::new(255, 0, 128),
];

pub const FOOD_COLOR: Rgb = Rgb::new(255, 0, 0);
pub const OBSTACLE_COLOR: Rgb = Rgb::new(128, 128, 128);

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a single-segment snake
    pub fn new(head: Position, direction: Direction) -> Self {
        Self {
            body: vec![head],
            direction,
        }
    }

    /// Create a snake from explicit segments, head first
    ///
    /// Returns `None` for an empty body.
    pub fn from_body(body: Vec<Position>, direction: Direction) -> Option<Self> {
        if body.is_empty() {
            return None;
        }
        Some(Self { body, direction })
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Shift the whole body one cell along the current heading.
    ///
    /// Length is unchanged. Bounds and self-intersection are left to the caller.
    pub fn move_forward(&mut self) {
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.insert(0, new_head);
        self.body.pop();
    }

    /// Append a copy of the tail; the copy stays put for one move before trailing
    pub fn grow(&mut self) {
        let tail = self.tail();
        self.body.push(tail);
    }

    /// Turn to `direction` unless it reverses the current heading
    pub fn change_direction(&mut self, direction: Direction) {
        if !self.direction.is_opposite(direction) {
            self.direction = direction;
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Palette color for the segment at `index`
    pub fn segment_color(index: usize) -> Rgb {
        SNAKE_PALETTE[index % SNAKE_PALETTE.len()]
    }

    /// Segments paired with their draw color, head first
    pub fn colored_segments(&self) -> impl Iterator<Item = (Position, Rgb)> + '_ {
        self.body
            .iter()
            .enumerate()
            .map(|(i, pos)| (*pos, Self::segment_color(i)))
    }
}

/// The single piece of food on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
}

/// A static blocked cell; never moves during a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Obstacle {
    pub position: Position,
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// Snake ran into an obstacle
    Obstacle,
}

impl std::fmt::Display for CollisionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollisionType::Wall => write!(f, "wall"),
            CollisionType::SelfCollision => write!(f, "self"),
            CollisionType::Obstacle => write!(f, "obstacle"),
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub obstacles: Vec<Obstacle>,
    pub difficulty: Difficulty,
    pub grid_width: usize,
    pub grid_height: usize,
    pub steps: u32,
    pub is_alive: bool,
}

impl GameState {
    /// Create a new game state
    pub fn new(
        snake: Snake,
        food: Position,
        obstacles: Vec<Obstacle>,
        difficulty: Difficulty,
        grid_width: usize,
        grid_height: usize,
    ) -> Self {
        Self {
            snake,
            food: Food { position: food },
            obstacles,
            difficulty,
            grid_width,
            grid_height,
            steps: 0,
            is_alive: true,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.body.contains(&pos)
    }

    pub fn is_obstacle(&self, pos: Position) -> bool {
        self.obstacles.iter().any(|o| o.position == pos)
    }

    pub fn obstacle_positions(&self) -> Vec<Position> {
        self.obstacles.iter().map(|o| o.position).collect()
    }

    /// Food eaten so far; the snake starts with a single segment
    pub fn food_eaten(&self) -> u32 {
        self.snake.len().saturating_sub(1) as u32
    }
}
