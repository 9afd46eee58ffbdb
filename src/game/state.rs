use std::collections::VecDeque;
use std::time::{Duration, Instant};

use super::{action::Direction, grid::Half};

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

/// One player's snake, confined to its half of the grid
///
/// A fresh snake has no direction and stays put until its player steers it.
/// The body is never empty: it starts with at least one segment and a move
/// pushes a head before it drops a tail.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front
    body: VecDeque<Position>,
    direction: Option<Direction>,
    half: Half,
    score: u32,
    growing: bool,
    started_at: Instant,
    last_food_at: Option<Instant>,
    died_at: Option<Instant>,
}

impl Snake {
    /// Create a snake with its body trailing to the left of `head`
    pub fn new(head: Position, length: usize, half: Half) -> Self {
        Self::new_at(head, length, half, Instant::now())
    }

    /// Like [`Snake::new`], with an explicit play-time origin
    pub fn new_at(head: Position, length: usize, half: Half, started_at: Instant) -> Self {
        let body = (0..length.max(1) as i32)
            .map(|i| head.moved_by(-i, 0))
            .collect();

        Self {
            body,
            direction: None,
            half,
            score: 0,
            growing: false,
            started_at,
            last_food_at: None,
            died_at: None,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Segments from head to tail
    pub fn body(&self) -> impl DoubleEndedIterator<Item = &Position> + ExactSizeIterator + '_ {
        self.body.iter()
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body.iter().skip(1).any(|&segment| segment == pos)
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Current heading, `None` until the player first steers
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Heading as a unit vector, `(0, 0)` when not yet moving
    pub fn velocity(&self) -> (i32, i32) {
        self.direction.map_or((0, 0), |d| d.delta())
    }

    pub fn half(&self) -> Half {
        self.half
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Food eaten most recently, if any
    pub fn last_food_at(&self) -> Option<Instant> {
        self.last_food_at
    }

    pub fn is_growing(&self) -> bool {
        self.growing
    }

    /// Steer the snake. A 180-degree turn is ignored.
    ///
    /// Returns whether the heading was accepted.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self
            .direction
            .is_some_and(|current| current.is_opposite(direction))
        {
            return false;
        }
        self.direction = Some(direction);
        true
    }

    /// Advance one cell. Keeps the tail once after [`Snake::grow`].
    pub fn move_snake(&mut self) {
        let Some(direction) = self.direction else {
            return;
        };

        let new_head = self.head().moved_in_direction(direction);
        self.body.push_front(new_head);

        if self.growing {
            self.growing = false;
        } else {
            self.body.pop_back();
        }
    }

    /// Score a food and lengthen on the next move
    pub fn grow(&mut self) {
        self.grow_at(Instant::now());
    }

    pub fn grow_at(&mut self, now: Instant) {
        self.score += 1;
        self.growing = true;
        self.last_food_at = Some(now);
    }

    /// True if the head left the snake's half or overlaps its own body
    pub fn collision(&self) -> bool {
        let head = self.head();
        !self.half.contains(head) || self.collides_with_body(head)
    }

    /// Freeze the play-time clock. Later calls keep the first timestamp.
    pub fn stop_time(&mut self) {
        self.stop_time_at(Instant::now());
    }

    pub fn stop_time_at(&mut self, now: Instant) {
        self.died_at.get_or_insert(now);
    }

    pub fn died_at(&self) -> Option<Instant> {
        self.died_at
    }

    /// Time survived: up to death if dead, otherwise up to now
    pub fn play_time(&self) -> Duration {
        self.play_time_at(Instant::now())
    }

    pub fn play_time_at(&self, now: Instant) -> Duration {
        self.died_at
            .unwrap_or(now)
            .saturating_duration_since(self.started_at)
    }

    /// Reverse the body in place so the tail leads. Used by the intro dancers,
    /// which bounce off the walls of their half.
    pub(crate) fn turn_around(&mut self) {
        self.body.make_contiguous().reverse();
        if let (Some(head), Some(neck)) = (self.body.front(), self.body.get(1)) {
            self.direction = Direction::from_delta(head.x - neck.x, head.y - neck.y);
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{action::Player, grid::Grid};

    fn left_half() -> Half {
        Grid::new(20, 10).half(Player::One)
    }

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_by(0, 1), Position::new(5, 6));
        assert_eq!(pos.moved_by(0, -1), Position::new(5, 4));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(4, 5), 4, left_half());
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Position::new(4, 5));
        let body: Vec<_> = snake.body().copied().collect();
        assert_eq!(
            body,
            vec![
                Position::new(4, 5),
                Position::new(3, 5),
                Position::new(2, 5),
                Position::new(1, 5)
            ]
        );
        assert_eq!(snake.direction(), None);
        assert_eq!(snake.velocity(), (0, 0));
        assert_eq!(snake.score(), 0);
    }

    #[test]
    fn test_unsteered_snake_stays_put() {
        let mut snake = Snake::new(Position::new(4, 5), 4, left_half());
        let before = snake.clone();
        snake.move_snake();
        assert_eq!(snake, before);
    }

    #[test]
    fn test_snake_movement() {
        let mut snake = Snake::new(Position::new(4, 5), 4, left_half());
        snake.set_direction(Direction::Right);

        snake.move_snake();
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Position::new(5, 5));

        snake.set_direction(Direction::Down);
        snake.move_snake();
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Position::new(5, 6));
    }

    #[test]
    fn test_grow_adds_exactly_one_segment_on_next_move() {
        let mut snake = Snake::new(Position::new(4, 5), 4, left_half());
        snake.set_direction(Direction::Right);

        snake.grow();
        assert_eq!(snake.score(), 1);
        assert!(snake.is_growing());
        assert!(snake.last_food_at().is_some());
        assert_eq!(snake.len(), 4);

        snake.move_snake();
        assert_eq!(snake.len(), 5);
        assert!(!snake.is_growing());

        snake.move_snake();
        assert_eq!(snake.len(), 5);
    }

    #[test]
    fn test_reverse_turn_is_rejected() {
        let mut snake = Snake::new(Position::new(4, 5), 4, left_half());
        assert!(snake.set_direction(Direction::Right));
        assert!(!snake.set_direction(Direction::Left));
        assert_eq!(snake.direction(), Some(Direction::Right));

        assert!(snake.set_direction(Direction::Up));
        assert_eq!(snake.direction(), Some(Direction::Up));
    }

    #[test]
    fn test_any_first_heading_is_accepted() {
        // Even one pointing into the neck; the next move then self-collides.
        let mut snake = Snake::new(Position::new(4, 5), 4, left_half());
        assert!(snake.set_direction(Direction::Left));
        snake.move_snake();
        assert!(snake.collision());
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::new(Position::new(5, 5), 4, left_half());
        assert!(!snake.collision());
        assert!(!snake.collides_with_body(Position::new(5, 5))); // head
        assert!(snake.collides_with_body(Position::new(4, 5))); // body
        assert!(!snake.collides_with_body(Position::new(9, 9))); // empty
    }

    #[test]
    fn test_leaving_half_is_a_collision() {
        // Divider of a 20-wide grid sits at x = 10.
        let mut snake = Snake::new(Position::new(9, 5), 4, left_half());
        snake.set_direction(Direction::Right);
        snake.move_snake();
        assert_eq!(snake.head(), Position::new(10, 5));
        assert!(snake.collision());

        let mut snake = Snake::new(Position::new(5, 0), 4, left_half());
        snake.set_direction(Direction::Up);
        snake.move_snake();
        assert!(snake.collision());
    }

    #[test]
    fn test_self_collision() {
        let mut snake = Snake::new(Position::new(5, 5), 5, left_half());
        snake.set_direction(Direction::Down);
        snake.move_snake();
        snake.set_direction(Direction::Left);
        snake.move_snake();
        assert!(!snake.collision());
        snake.set_direction(Direction::Up);
        snake.move_snake();
        assert!(snake.collision());
    }

    #[test]
    fn test_stop_time_is_idempotent() {
        let start = Instant::now();
        let mut snake = Snake::new_at(Position::new(4, 5), 4, left_half(), start);

        let death = start + Duration::from_secs(7);
        snake.stop_time_at(death);
        snake.stop_time_at(death + Duration::from_secs(3));

        assert_eq!(snake.died_at(), Some(death));
        assert_eq!(snake.play_time_at(death + Duration::from_secs(60)), Duration::from_secs(7));
    }

    #[test]
    fn test_food_does_not_stop_the_clock() {
        let start = Instant::now();
        let mut snake = Snake::new_at(Position::new(4, 5), 4, left_half(), start);

        snake.grow_at(start + Duration::from_secs(2));
        assert_eq!(snake.died_at(), None);
        assert_eq!(snake.play_time_at(start + Duration::from_secs(5)), Duration::from_secs(5));
    }

    #[test]
    fn test_turn_around_leads_with_tail() {
        let mut snake = Snake::new(Position::new(4, 5), 4, left_half());
        snake.set_direction(Direction::Right);
        snake.turn_around();
        assert_eq!(snake.head(), Position::new(1, 5));
        assert_eq!(snake.direction(), Some(Direction::Left));
    }
}
