//! Dungeon piece and output record types
//!
//! Pieces are the intermediate representation used while the layout grows;
//! drawings and doors are the flat records handed to the application state
//! store once generation finishes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{Bounds, Direction, Point, Segment};

/// What a piece is; corridors are never grown from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PieceKind {
    Room,
    Corridor,
}

/// Wall state for one edge of a piece
///
/// `Open` is an open connection (no wall), `Solid` an unbroken wall, and
/// `Split` a wall with a one-cell doorway gap carved out of it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WallSegment {
    Open,
    Solid(Segment),
    Split(Segment, Segment),
}

/// A room or corridor with per-direction wall state
#[derive(Clone, Debug)]
pub struct DungeonPiece {
    pub kind: PieceKind,
    pub bounds: Bounds,
    /// One wall per cardinal direction, indexed by `Direction::index()`
    pub walls: [WallSegment; 4],
}

impl DungeonPiece {
    pub fn new(kind: PieceKind, bounds: Bounds, walls: [WallSegment; 4]) -> Self {
        Self { kind, bounds, walls }
    }

    pub fn wall(&self, direction: Direction) -> &WallSegment {
        &self.walls[direction.index()]
    }

    pub fn wall_mut(&mut self, direction: Direction) -> &mut WallSegment {
        &mut self.walls[direction.index()]
    }

    pub fn is_room(&self) -> bool {
        self.kind == PieceKind::Room
    }

    /// Move the piece to a new top-left corner and rebuild all four walls as
    /// solid edges of the new bounds
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.bounds.x = x;
        self.bounds.y = y;
        self.walls = solid_walls(&self.bounds);
    }
}

/// Four solid walls, each spanning one full edge of the bounds
pub fn solid_walls(bounds: &Bounds) -> [WallSegment; 4] {
    let top_left = Point::new(bounds.x, bounds.y);
    let top_right = Point::new(bounds.right(), bounds.y);
    let bottom_left = Point::new(bounds.x, bounds.bottom());
    let bottom_right = Point::new(bounds.right(), bounds.bottom());

    // Indexed by Direction: North, South, East, West
    [
        WallSegment::Solid(Segment::new(top_left, top_right)),
        WallSegment::Solid(Segment::new(bottom_left, bottom_right)),
        WallSegment::Solid(Segment::new(top_right, bottom_right)),
        WallSegment::Solid(Segment::new(top_left, bottom_left)),
    ]
}

/// Door orientation, derived from the axis of the wall it was carved into
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorOrientation {
    Horizontal,
    Vertical,
}

/// Which way a door swings when opened; purely cosmetic for the renderer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwingDirection {
    Inward,
    Outward,
}

/// Output record for one carved doorway
///
/// `is_open` and `is_locked` are orthogonal: a closed-and-locked door blocks
/// vision and movement exactly like a closed-unlocked one. Only `is_open`
/// controls blocking.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Door {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub orientation: DoorOrientation,
    pub is_open: bool,
    pub is_locked: bool,
    pub size: f64,
    pub thickness: f64,
    pub swing_direction: SwingDirection,
}

impl Door {
    /// A closed, unlocked door centered on a doorway; size and thickness are
    /// derived from the grid cell size
    pub fn at_doorway(center: Point, orientation: DoorOrientation, grid_size: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            x: center.x,
            y: center.y,
            orientation,
            is_open: false,
            is_locked: false,
            size: grid_size,
            thickness: grid_size / 5.0,
            swing_direction: SwingDirection::Inward,
        }
    }
}

/// Tool tag carried by every wall drawing
pub const WALL_TOOL: &str = "wall";

/// Output record for one surviving wall sub-segment
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Drawing {
    pub id: String,
    pub tool: String,
    /// Flat coordinate list: [x1, y1, x2, y2, ...]
    pub points: Vec<f64>,
    pub color: String,
    pub size: f64,
}

impl Drawing {
    pub fn wall(segment: &Segment, color: &str, size: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tool: WALL_TOOL.to_string(),
            points: vec![
                segment.start.x,
                segment.start.y,
                segment.end.x,
                segment.end.y,
            ],
            color: color.to_string(),
            size,
        }
    }
}

/// Everything a `generate()` call produces; ownership passes to the caller
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DungeonLayout {
    pub drawings: Vec<Drawing>,
    pub doors: Vec<Door>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_walls_span_full_edges() {
        let bounds = Bounds::new(100.0, 200.0, 150.0, 250.0);
        let walls = solid_walls(&bounds);

        match walls[Direction::North.index()] {
            WallSegment::Solid(seg) => {
                assert_eq!(seg.start, Point::new(100.0, 200.0));
                assert_eq!(seg.end, Point::new(250.0, 200.0));
            }
            _ => panic!("north wall should be solid"),
        }
        match walls[Direction::West.index()] {
            WallSegment::Solid(seg) => {
                assert_eq!(seg.start, Point::new(100.0, 200.0));
                assert_eq!(seg.end, Point::new(100.0, 450.0));
            }
            _ => panic!("west wall should be solid"),
        }
    }

    #[test]
    fn test_move_to_rebuilds_walls() {
        let bounds = Bounds::new(0.0, 0.0, 100.0, 100.0);
        let mut piece = DungeonPiece::new(PieceKind::Room, bounds, solid_walls(&bounds));
        piece.move_to(300.0, 400.0);

        assert_eq!(piece.bounds.x, 300.0);
        match piece.wall(Direction::South) {
            WallSegment::Solid(seg) => {
                assert_eq!(seg.start, Point::new(300.0, 500.0));
                assert_eq!(seg.end, Point::new(400.0, 500.0));
            }
            _ => panic!("south wall should be solid after move"),
        }
    }

    #[test]
    fn test_door_at_doorway_defaults() {
        let door = Door::at_doorway(Point::new(100.0, 200.0), DoorOrientation::Horizontal, 50.0);
        assert!(!door.is_open);
        assert!(!door.is_locked);
        assert_eq!(door.size, 50.0);
        assert_eq!(door.thickness, 10.0);
        assert_eq!(door.swing_direction, SwingDirection::Inward);
    }

    #[test]
    fn test_door_serializes_camel_case() {
        let door = Door::at_doorway(Point::new(50.0, 50.0), DoorOrientation::Vertical, 50.0);
        let json = serde_json::to_string(&door).unwrap();
        assert!(json.contains("\"isOpen\":false"));
        assert!(json.contains("\"swingDirection\":\"inward\""));
        assert!(json.contains("\"orientation\":\"vertical\""));
    }
}
