//! Geometry primitives for dungeon layout
//!
//! Points, segments, axis-aligned bounds and cardinal directions shared by
//! the growth engine and the collision model. Structural coordinates are
//! pixels; room corners always land on multiples of the grid size.

/// A point in pixel coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared distance to another point
    pub fn distance_squared(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// A straight line segment between two points
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_squared(&self.end).sqrt()
    }
}

/// Axis-aligned bounding box for a room or corridor
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Grow the box by `padding` on every side
    pub fn expanded(&self, padding: f64) -> Bounds {
        Bounds::new(
            self.x - padding,
            self.y - padding,
            self.width + padding * 2.0,
            self.height + padding * 2.0,
        )
    }

    /// Strict overlap test; boxes that merely touch do not intersect
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Midpoint of the edge facing `direction`
    pub fn edge_midpoint(&self, direction: Direction) -> Point {
        let center = self.center();
        match direction {
            Direction::North => Point::new(center.x, self.y),
            Direction::South => Point::new(center.x, self.bottom()),
            Direction::East => Point::new(self.right(), center.y),
            Direction::West => Point::new(self.x, center.y),
        }
    }
}

/// Cardinal direction (screen coordinates, y grows downward)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const CARDINALS: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Get the opposite direction
    pub fn opposite(&self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Stable index for per-direction array storage
    pub fn index(&self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
        }
    }

    /// Unit offset (dx, dy)
    pub fn offset(&self) -> (f64, f64) {
        match self {
            Direction::North => (0.0, -1.0),
            Direction::South => (0.0, 1.0),
            Direction::East => (1.0, 0.0),
            Direction::West => (-1.0, 0.0),
        }
    }

    /// Walls on the north/south edges run along the X axis
    pub fn is_horizontal_wall(&self) -> bool {
        matches!(self, Direction::North | Direction::South)
    }
}

/// Round a coordinate to the nearest multiple of the grid size
pub fn snap_to_grid(value: f64, grid_size: f64) -> f64 {
    (value / grid_size).round() * grid_size
}
