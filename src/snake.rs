use Direction::*;

/// A point on the playfield, in logical units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    pub fn translated(&self, by: Velocity) -> Self {
        Position { x: self.x + by.dx, y: self.y + by.dy }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Velocity {
    pub dx: i32,
    pub dy: i32,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// One grid step along a single axis.
    pub fn velocity(&self, step: i32) -> Velocity {
        let (dx, dy) = match self {
            Up => (0, -step),
            Down => (0, step),
            Left => (-step, 0),
            Right => (step, 0),
        };
        Velocity { dx, dy }
    }
}

pub struct Snake {
    head: Position,
    velocity: Velocity,
    // Oldest segment first, the newest one is the head
    trail: Vec<Position>,
    target_len: usize,
}

impl Snake {
    /// A one-segment snake sitting still at `pos`.
    pub fn new(pos: Position) -> Self {
        Snake { head: pos, velocity: Velocity::default(), trail: vec![], target_len: 1 }
    }

    pub fn head(&self) -> Position {
        self.head
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn body(&self) -> &[Position] {
        &self.trail
    }

    pub fn target_len(&self) -> usize {
        self.target_len
    }

    pub fn score(&self) -> usize {
        self.target_len - 1
    }

    /// Reversing straight into the neck is allowed, it only flips the velocity.
    pub fn set_direction(&mut self, direction: Direction, step: i32) {
        self.velocity = direction.velocity(step);
    }

    pub fn is_out_of_bounds(&self, width: i32, height: i32) -> bool {
        let Position { x, y } = self.head;
        x < 0 || x >= width || y < 0 || y >= height
    }

    pub fn advance(&mut self) {
        self.head = self.head.translated(self.velocity);
    }

    /// Pushes the head onto the trail and drops the oldest segment once the
    /// trail is longer than the target length.
    pub fn record_head(&mut self) {
        self.trail.push(self.head);

        if self.trail.len() > self.target_len {
            self.trail.drain(0..1);
        }
    }

    pub fn grow(&mut self) {
        self.target_len += 1;
    }
}
