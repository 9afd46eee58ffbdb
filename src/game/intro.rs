use super::{
    action::{Direction, Player},
    config::GameConfig,
    grid::Grid,
    state::{Position, Snake},
};

/// Two idle snakes pacing back and forth on the title screen
///
/// Purely decorative: they never eat, score or crash. When the next step
/// would leave its half a dancer turns around and leads with its tail.
#[derive(Debug, Clone, PartialEq)]
pub struct IntroDance {
    dancers: [Snake; 2],
}

impl IntroDance {
    pub fn new(config: &GameConfig) -> Self {
        let grid = Grid::new(config.grid_width, config.grid_height);
        let rows = config.grid_height as i32;
        let offset = config.spawn_offset as i32;
        let dancers = Player::BOTH.map(|player| {
            let half = grid.half(player);
            let (x, y) = match player {
                Player::One => (half.left + offset, rows / 2 - 4),
                Player::Two => (half.right - 1 - offset, rows / 2 + 4),
            };
            let head = Position::new(x, y.clamp(0, (rows - 1).max(0)));
            let mut snake = Snake::new(head, config.initial_snake_length, half);
            snake.set_direction(Direction::Right);
            if player == Player::Two {
                snake.turn_around();
            }
            snake
        });

        Self { dancers }
    }

    pub fn step(&mut self) {
        for snake in &mut self.dancers {
            let Some(direction) = snake.direction() else {
                continue;
            };
            if !snake.half().contains(snake.head().moved_in_direction(direction)) {
                snake.turn_around();
            }
            snake.move_snake();
        }
    }

    pub fn snakes(&self) -> &[Snake; 2] {
        &self.dancers
    }
}
