use rand::{Rng, SeedableRng, rngs::StdRng};

use super::{grid::Half, state::Position};

/// Rolls food positions inside a half
///
/// Positions are uniform over the half and take no notice of the snakes, so
/// food can land on a body segment.
#[derive(Debug, Clone)]
pub struct FoodSpawner {
    rng: StdRng,
}

impl FoodSpawner {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic spawner for tests and reproducible matches
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn spawn(&mut self, half: Half) -> Position {
        let x = self.rng.gen_range(half.left..half.right);
        let y = self.rng.gen_range(0..half.height);
        Position::new(x, y)
    }
}

impl Default for FoodSpawner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{action::Player, grid::Grid, state::Snake};

    #[test]
    fn test_spawn_stays_inside_half() {
        let grid = Grid::new(50, 30);
        let mut spawner = FoodSpawner::seeded(7);

        for player in Player::BOTH {
            let half = grid.half(player);
            for _ in 0..500 {
                assert!(half.contains(spawner.spawn(half)));
            }
        }
    }

    #[test]
    fn test_seeded_spawner_is_reproducible() {
        let half = Grid::new(50, 30).half(Player::Two);
        let mut a = FoodSpawner::seeded(42);
        let mut b = FoodSpawner::seeded(42);
        for _ in 0..20 {
            assert_eq!(a.spawn(half), b.spawn(half));
        }
    }

    #[test]
    fn test_food_may_land_on_a_snake() {
        // A 2x1 half fully covered by the snake: every roll hits the body.
        let grid = Grid::new(4, 1);
        let half = grid.half(Player::One);
        let snake = Snake::new(Position::new(1, 0), 2, half);
        let mut spawner = FoodSpawner::seeded(1);

        for _ in 0..10 {
            assert!(snake.occupies(spawner.spawn(half)));
        }
    }
}
