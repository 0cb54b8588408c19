//! Triangle bounce animation.
//!
//! The triangle walks clockwise around the inside of a fixed rectangle. Each
//! frame it moves one step in the current [`Direction`]; when that move would
//! leave the rectangle the step is refused and the direction rotates.

use std::fmt;

/// Distance the triangle travels per successful step.
pub const STEP: f32 = 0.2;

/// Tolerance for `f32` drift in the bound checks. Must stay well below [`STEP`].
const EPSILON: f32 = 1e-4;

/// Movement direction, cycling Right → Down → Left → Up.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    /// The direction taken after this one is blocked.
    pub fn next(self) -> Self {
        match self {
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
            Self::Up => Self::Right,
        }
    }

    /// Look-ahead applied to vertex 0 before a move is accepted.
    ///
    /// Horizontal moves look 0.1 ahead, downward moves 0.2 and upward moves
    /// none at all. With the default triangle this keeps every vertex on or
    /// inside the bounds.
    pub fn margin(self) -> f32 {
        match self {
            Self::Right | Self::Left => 0.1,
            Self::Down => 0.2,
            Self::Up => 0.0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Right => "right",
            Self::Down => "down",
            Self::Left => "left",
            Self::Up => "up",
        };
        f.write_str(name)
    }
}

/// Rectangle the triangle has to stay inside, in normalized device
/// coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bounds {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            top: 0.6,
            bottom: -0.6,
            left: -0.6,
            right: 0.6,
        }
    }
}

impl Bounds {
    /// Whether the point lies inside the closed rectangle.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left - EPSILON
            && x <= self.right + EPSILON
            && y >= self.bottom - EPSILON
            && y <= self.top + EPSILON
    }
}

/// Three 2D vertices laid out as `[x0, y0, x1, y1, x2, y2]`, ready to be
/// handed to `glVertexAttribPointer` with two components per vertex.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Triangle {
    vertices: [f32; 6],
}

impl Default for Triangle {
    fn default() -> Self {
        Self::new([-0.5, 0.6, -0.6, 0.4, -0.4, 0.4])
    }
}

impl Triangle {
    pub fn new(vertices: [f32; 6]) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> &[f32; 6] {
        &self.vertices
    }

    /// Vertex 0, the apex the bound checks are made against.
    pub fn apex(&self) -> (f32, f32) {
        (self.vertices[0], self.vertices[1])
    }

    pub fn points(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.vertices.chunks_exact(2).map(|point| (point[0], point[1]))
    }

    fn translated(&self, dx: f32, dy: f32) -> Self {
        let mut moved = *self;
        for point in moved.vertices.chunks_exact_mut(2) {
            point[0] += dx;
            point[1] += dy;
        }
        moved
    }
}

/// Owns the triangle and the direction it is currently travelling in.
#[derive(Debug, Clone)]
pub struct Animator {
    triangle: Triangle,
    bounds: Bounds,
    direction: Direction,
    step: f32,
}

impl Default for Animator {
    fn default() -> Self {
        Self::new(Triangle::default(), Bounds::default())
    }
}

impl Animator {
    pub fn new(triangle: Triangle, bounds: Bounds) -> Self {
        Self {
            triangle,
            bounds,
            direction: Direction::default(),
            step: STEP,
        }
    }

    pub fn triangle(&self) -> &Triangle {
        &self.triangle
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Tries to move the triangle one step towards `direction`.
    ///
    /// Returns `true` when the move was blocked by a bound, in which case the
    /// triangle is left untouched. A move that would carry any vertex outside
    /// the bounds is blocked even when the look-ahead on the apex allows it.
    pub fn advance(&mut self, direction: Direction) -> bool {
        let (x, y) = self.triangle.apex();
        let margin = direction.margin();
        let bounds = &self.bounds;

        let blocked = match direction {
            Direction::Right => x + margin >= bounds.right - EPSILON,
            Direction::Down => y - margin <= bounds.bottom + EPSILON,
            Direction::Left => x - margin <= bounds.left + EPSILON,
            Direction::Up => y + margin >= bounds.top - EPSILON,
        };
        if blocked {
            return true;
        }

        let (dx, dy) = match direction {
            Direction::Right => (self.step, 0.0),
            Direction::Down => (0.0, -self.step),
            Direction::Left => (-self.step, 0.0),
            Direction::Up => (0.0, self.step),
        };
        let moved = self.triangle.translated(dx, dy);
        if !moved.points().all(|(x, y)| self.bounds.contains(x, y)) {
            return true;
        }

        self.triangle = moved;
        false
    }

    /// Advances in the current direction and rotates to the next one if the
    /// move was blocked. Returns whether this frame was blocked.
    pub fn step(&mut self) -> bool {
        let blocked = self.advance(self.direction);
        if blocked {
            tracing::debug!(from = %self.direction, to = %self.direction.next(), "direction blocked");
            self.direction = self.direction.next();
        }
        blocked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-5,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn direction_cycles_clockwise() {
        let mut direction = Direction::Right;
        let mut seen = Vec::new();
        for _ in 0..8 {
            seen.push(direction);
            direction = direction.next();
        }
        assert_eq!(
            seen,
            [
                Direction::Right,
                Direction::Down,
                Direction::Left,
                Direction::Up,
                Direction::Right,
                Direction::Down,
                Direction::Left,
                Direction::Up,
            ]
        );
    }

    #[test]
    fn moving_right_stops_at_half() {
        let mut animator = Animator::default();
        let mut xs = vec![animator.triangle().apex().0];
        while !animator.advance(Direction::Right) {
            xs.push(animator.triangle().apex().0);
        }

        let expected = [-0.5, -0.3, -0.1, 0.1, 0.3, 0.5];
        assert_eq!(xs.len(), expected.len());
        for (x, want) in xs.iter().zip(expected) {
            assert_close(*x, want);
        }
    }

    #[test]
    fn blocked_advance_leaves_triangle_untouched() {
        let mut animator = Animator::default();
        // The apex starts on the top bound.
        let before = *animator.triangle();
        assert!(animator.advance(Direction::Up));
        assert_eq!(*animator.triangle(), before);
    }

    #[test]
    fn advance_moves_every_vertex() {
        let mut animator = Animator::default();
        assert!(!animator.advance(Direction::Down));
        let expected = [-0.5, 0.4, -0.6, 0.2, -0.4, 0.2];
        for (got, want) in animator.triangle().vertices().iter().zip(expected) {
            assert_close(*got, want);
        }
    }

    #[test]
    fn advance_is_deterministic() {
        let mut first = Animator::default();
        let mut second = Animator::default();
        for direction in [Direction::Right, Direction::Down, Direction::Right] {
            assert_eq!(first.advance(direction), second.advance(direction));
            assert_eq!(first.triangle(), second.triangle());
        }
    }

    #[test]
    fn block_rotates_to_next_direction() {
        let mut animator = Animator::default();
        let mut previous = animator.direction();
        for _ in 0..200 {
            let blocked = animator.step();
            if blocked {
                assert_eq!(animator.direction(), previous.next());
            } else {
                assert_eq!(animator.direction(), previous);
            }
            previous = animator.direction();
        }
    }

    #[test]
    fn triangle_never_leaves_bounds() {
        let mut animator = Animator::default();
        let bounds = *animator.bounds();
        for _ in 0..500 {
            animator.step();
            for (x, y) in animator.triangle().points() {
                assert!(bounds.contains(x, y), "({x}, {y}) escaped {bounds:?}");
            }
        }
    }

    #[test]
    fn narrow_bounds_block_trailing_vertices() {
        let bounds = Bounds {
            right: 0.65,
            ..Bounds::default()
        };
        let mut animator = Animator::new(Triangle::default(), bounds);
        while !animator.advance(Direction::Right) {}

        for (x, y) in animator.triangle().points() {
            assert!(bounds.contains(x, y), "({x}, {y}) escaped {bounds:?}");
        }
        // Rightmost vertex sits one step short of 0.65.
        assert_close(animator.triangle().vertices()[4], 0.6);
    }

    #[test]
    fn custom_geometry_stays_inside_over_many_laps() {
        let bounds = Bounds {
            top: 0.9,
            bottom: -0.35,
            left: -0.8,
            right: 0.45,
        };
        let triangle = Triangle::new([0.0, 0.3, -0.1, 0.1, 0.1, 0.1]);
        let mut animator = Animator::new(triangle, bounds);
        for _ in 0..500 {
            animator.step();
            for (x, y) in animator.triangle().points() {
                assert!(bounds.contains(x, y), "({x}, {y}) escaped {bounds:?}");
            }
        }
    }

    #[test]
    fn full_lap_takes_twenty_four_frames() {
        let mut animator = Animator::default();
        let start = *animator.triangle();
        let blocked: Vec<usize> = (1..=24).filter(|_| animator.step()).collect();

        assert_eq!(blocked, [6, 12, 18, 24]);
        assert_eq!(animator.direction(), Direction::Right);
        for (got, want) in animator.triangle().vertices().iter().zip(start.vertices()) {
            assert_close(*got, *want);
        }
    }
}
