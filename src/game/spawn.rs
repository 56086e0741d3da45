//! Random placement of food and obstacles.
//!
//! Both placements sample uniformly until they hit a free cell. The sampling
//! is capped; once the budget runs out the candidate region is scanned and a
//! free cell is picked from what is left, so a crowded board still gets a
//! placement and a full one reports [`GameError::PlacementExhausted`].

use rand::seq::SliceRandom;
use rand::Rng;

use super::error::{GameError, PlacedItem};
use super::state::Position;

/// Inclusive rectangle of cells a placement may pick from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl Region {
    /// Every cell of the grid, edges included
    pub fn full(width: usize, height: usize) -> Self {
        Self {
            min_x: 0,
            max_x: width as i32 - 1,
            min_y: 0,
            max_y: height as i32 - 1,
        }
    }

    /// The grid minus its outermost ring
    pub fn interior(width: usize, height: usize) -> Self {
        Self {
            min_x: 1,
            max_x: width as i32 - 2,
            min_y: 1,
            max_y: height as i32 - 2,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn contains(&self, pos: Position) -> bool {
        (self.min_x..=self.max_x).contains(&pos.x) && (self.min_y..=self.max_y).contains(&pos.y)
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> Position {
        Position::new(
            rng.gen_range(self.min_x..=self.max_x),
            rng.gen_range(self.min_y..=self.max_y),
        )
    }

    fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (self.min_y..=self.max_y)
            .flat_map(move |y| (self.min_x..=self.max_x).map(move |x| Position::new(x, y)))
    }
}

/// Pick a cell in `region` for which `is_blocked` is false
pub fn place<R, F>(
    rng: &mut R,
    region: Region,
    attempts: u32,
    item: PlacedItem,
    is_blocked: F,
) -> Result<Position, GameError>
where
    R: Rng,
    F: Fn(Position) -> bool,
{
    if !region.is_empty() {
        for _ in 0..attempts {
            let pos = region.sample(rng);
            if !is_blocked(pos) {
                return Ok(pos);
            }
        }

        let free: Vec<Position> = region.cells().filter(|&pos| !is_blocked(pos)).collect();
        if let Some(&pos) = free.choose(rng) {
            log::debug!("{} placed by scan after {} misses", item, attempts);
            return Ok(pos);
        }
    }

    Err(GameError::PlacementExhausted { item, attempts })
}

/// Choose a food cell inside the interior, avoiding snake and obstacles
pub fn relocate_food<R: Rng>(
    rng: &mut R,
    grid_width: usize,
    grid_height: usize,
    attempts: u32,
    snake_body: &[Position],
    obstacles: &[Position],
) -> Result<Position, GameError> {
    place(
        rng,
        Region::interior(grid_width, grid_height),
        attempts,
        PlacedItem::Food,
        |pos| snake_body.contains(&pos) || obstacles.contains(&pos),
    )
}

/// Choose an obstacle cell anywhere on the grid, avoiding snake, food and earlier obstacles
pub fn place_obstacle<R: Rng>(
    rng: &mut R,
    grid_width: usize,
    grid_height: usize,
    attempts: u32,
    snake_body: &[Position],
    food: Position,
    obstacles: &[Position],
) -> Result<Position, GameError> {
    place(
        rng,
        Region::full(grid_width, grid_height),
        attempts,
        PlacedItem::Obstacle,
        |pos| pos == food || snake_body.contains(&pos) || obstacles.contains(&pos),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_food_stays_off_the_outer_ring() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = vec![Position::new(2, 2)];
        for _ in 0..500 {
            let pos = relocate_food(&mut rng, 6, 5, 100, &snake, &[]).unwrap();
            assert!(pos.x >= 1 && pos.x <= 4, "x out of interior: {:?}", pos);
            assert!(pos.y >= 1 && pos.y <= 3, "y out of interior: {:?}", pos);
            assert_ne!(pos, snake[0]);
        }
    }

    #[test]
    fn test_food_finds_last_free_cell_by_scan() {
        // 5x5 grid: interior is the 3x3 block, all but (3, 3) taken
        let mut rng = StdRng::seed_from_u64(1);
        let snake: Vec<Position> = (1..=3)
            .flat_map(|y| (1..=3).map(move |x| Position::new(x, y)))
            .filter(|&p| p != Position::new(3, 3))
            .collect();

        let pos = relocate_food(&mut rng, 5, 5, 1, &snake, &[]).unwrap();
        assert_eq!(pos, Position::new(3, 3));
    }

    #[test]
    fn test_food_avoids_obstacles() {
        // 5x5 grid: obstacles cover the 3x3 interior except two corners
        let mut rng = StdRng::seed_from_u64(21);
        let free = [Position::new(1, 1), Position::new(3, 3)];
        let obstacles: Vec<Position> = (1..=3)
            .flat_map(|y| (1..=3).map(move |x| Position::new(x, y)))
            .filter(|p| !free.contains(p))
            .collect();
        let snake = vec![Position::new(0, 0)];

        for _ in 0..200 {
            let pos = relocate_food(&mut rng, 5, 5, 3, &snake, &obstacles).unwrap();
            assert!(!obstacles.contains(&pos), "food on obstacle {:?}", pos);
            assert!(free.contains(&pos));
        }
    }

    #[test]
    fn test_food_exhausted_on_full_interior() {
        let mut rng = StdRng::seed_from_u64(1);
        let snake = vec![Position::new(1, 1)];
        let err = relocate_food(&mut rng, 3, 3, 10, &snake, &[]).unwrap_err();
        assert_eq!(
            err,
            GameError::PlacementExhausted {
                item: PlacedItem::Food,
                attempts: 10
            }
        );
    }

    #[test]
    fn test_obstacle_avoids_everything_and_may_use_edges() {
        let mut rng = StdRng::seed_from_u64(3);
        let snake = vec![Position::new(1, 1)];
        let food = Position::new(1, 0);
        let mut obstacles = Vec::new();

        // 3x3 grid has 9 cells, 2 are taken
        for _ in 0..7 {
            let pos = place_obstacle(&mut rng, 3, 3, 50, &snake, food, &obstacles).unwrap();
            assert_ne!(pos, food);
            assert!(!snake.contains(&pos));
            assert!(!obstacles.contains(&pos));
            obstacles.push(pos);
        }

        let err = place_obstacle(&mut rng, 3, 3, 50, &snake, food, &obstacles).unwrap_err();
        assert!(matches!(
            err,
            GameError::PlacementExhausted {
                item: PlacedItem::Obstacle,
                ..
            }
        ));
    }

    #[test]
    fn test_region_shapes() {
        let interior = Region::interior(40, 30);
        assert!(interior.contains(Position::new(1, 1)));
        assert!(interior.contains(Position::new(38, 28)));
        assert!(!interior.contains(Position::new(0, 5)));
        assert!(!interior.contains(Position::new(39, 5)));
        assert!(Region::interior(2, 2).is_empty());
        assert_eq!(Region::full(4, 3).cells().count(), 12);
    }
}
