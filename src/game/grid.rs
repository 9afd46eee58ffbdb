use super::{action::Player, state::Position};

/// A player's exclusive column range `[left, right)` spanning every row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Half {
    pub left: i32,
    pub right: i32,
    pub height: i32,
}

impl Half {
    /// Check if a position lies inside this half
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.left && pos.x < self.right && pos.y >= 0 && pos.y < self.height
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }
}

/// The shared play area, split down the middle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Column where the right half begins
    pub fn divider(&self) -> i32 {
        (self.width / 2) as i32
    }

    /// The half owned by `player`. The two halves are disjoint and cover the grid.
    pub fn half(&self, player: Player) -> Half {
        let (left, right) = match player {
            Player::One => (0, self.divider()),
            Player::Two => (self.divider(), self.width as i32),
        };
        Half {
            left,
            right,
            height: self.height as i32,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width as i32 && pos.y >= 0 && pos.y < self.height as i32
    }
}
