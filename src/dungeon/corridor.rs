//! Corridor and connection building
//!
//! Builds a corridor piece out from an existing room's edge, snaps a freshly
//! generated room flush against its far end, checks both against every other
//! placed piece, and carves a doorway on each side of the new connection.

use rand_chacha::ChaCha8Rng;

use crate::dungeon::templates::TemplateRegistry;
use crate::dungeon::types::{Door, DoorOrientation, DungeonPiece, PieceKind, WallSegment};
use crate::dungeon::walls::carve_doorway;
use crate::geometry::{snap_to_grid, Bounds, Direction, Point};

/// Fixed corridor dimensions for one generator instance
///
/// The default four-cell length keeps a new room clear of its grandparent
/// pieces, and the one-cell width matches the doorway carved at each end.
#[derive(Clone, Copy, Debug)]
pub struct CorridorSpec {
    pub length_cells: u32,
    pub width_cells: u32,
}

impl Default for CorridorSpec {
    fn default() -> Self {
        Self { length_cells: 4, width_cells: 1 }
    }
}

impl CorridorSpec {
    pub fn length_px(&self, grid_size: f64) -> f64 {
        self.length_cells as f64 * grid_size
    }

    pub fn width_px(&self, grid_size: f64) -> f64 {
        self.width_cells as f64 * grid_size
    }
}

/// A successful placement: the corridor, the new room, and the two doors
/// carved where the corridor meets each room
#[derive(Clone, Debug)]
pub struct Placement {
    pub corridor: DungeonPiece,
    pub room: DungeonPiece,
    pub doors: Vec<Door>,
}

/// Grid-snapped connection point on the source's edge facing `direction`
pub fn connection_point(bounds: &Bounds, direction: Direction, grid_size: f64) -> Point {
    let midpoint = bounds.edge_midpoint(direction);
    if direction.is_horizontal_wall() {
        Point::new(snap_to_grid(midpoint.x, grid_size), midpoint.y)
    } else {
        Point::new(midpoint.x, snap_to_grid(midpoint.y, grid_size))
    }
}

/// Corridor piece extending from `connection` in `direction`, centered on the
/// connection point across the travel axis. Side walls are solid; the end
/// walls facing source and destination are open.
pub fn build_corridor(
    connection: Point,
    direction: Direction,
    spec: &CorridorSpec,
    grid_size: f64,
) -> DungeonPiece {
    let length = spec.length_px(grid_size);
    let width = spec.width_px(grid_size);

    let bounds = match direction {
        Direction::North => Bounds::new(connection.x - width / 2.0, connection.y - length, width, length),
        Direction::South => Bounds::new(connection.x - width / 2.0, connection.y, width, length),
        Direction::East => Bounds::new(connection.x, connection.y - width / 2.0, length, width),
        Direction::West => Bounds::new(connection.x - length, connection.y - width / 2.0, length, width),
    };

    let mut walls = crate::dungeon::types::solid_walls(&bounds);
    walls[direction.index()] = WallSegment::Open;
    walls[direction.opposite().index()] = WallSegment::Open;

    DungeonPiece::new(PieceKind::Corridor, bounds, walls)
}

/// The point where the corridor's far end meets the new room
fn corridor_far_end(connection: Point, direction: Direction, spec: &CorridorSpec, grid_size: f64) -> Point {
    let (dx, dy) = direction.offset();
    let length = spec.length_px(grid_size);
    Point::new(connection.x + dx * length, connection.y + dy * length)
}

/// Snap the room so the edge facing back toward the corridor sits flush with
/// the corridor's far end, with the perpendicular position grid-snapped
fn position_room(room: &mut DungeonPiece, far_end: Point, direction: Direction, grid_size: f64) {
    let width = room.bounds.width;
    let height = room.bounds.height;

    let (x, y) = match direction {
        Direction::North => (snap_to_grid(far_end.x - width / 2.0, grid_size), far_end.y - height),
        Direction::South => (snap_to_grid(far_end.x - width / 2.0, grid_size), far_end.y),
        Direction::East => (far_end.x, snap_to_grid(far_end.y - height / 2.0, grid_size)),
        Direction::West => (far_end.x - width, snap_to_grid(far_end.y - height / 2.0, grid_size)),
    };

    room.move_to(x, y);
}

/// Doorway center on the new room's wall facing back toward the corridor,
/// recomputed from the room's final snapped bounds
fn room_side_doorway(room: &Bounds, far_end: Point, direction: Direction) -> Point {
    match direction {
        // Room sits above the corridor's far end; doorway is on its south edge
        Direction::North => Point::new(far_end.x, room.bottom()),
        Direction::South => Point::new(far_end.x, room.y),
        Direction::East => Point::new(room.x, far_end.y),
        Direction::West => Point::new(room.right(), far_end.y),
    }
}

fn doorway_orientation(direction: Direction) -> DoorOrientation {
    if direction.is_horizontal_wall() {
        DoorOrientation::Horizontal
    } else {
        DoorOrientation::Vertical
    }
}

/// Attempt to grow a corridor and a new room from `source` in `direction`
///
/// `obstacles` holds the bounds of every placed piece except the source
/// itself. Returns `None` without touching the source when either the
/// corridor or the room would land within one grid cell of an obstacle; on
/// success the source wall is carved and the corridor, room, and both doors
/// are returned.
pub fn try_add_piece_in_direction(
    source: &mut DungeonPiece,
    direction: Direction,
    obstacles: &[Bounds],
    registry: &TemplateRegistry,
    spec: &CorridorSpec,
    grid_size: f64,
    rng: &mut ChaCha8Rng,
) -> Option<Placement> {
    let connection = connection_point(&source.bounds, direction, grid_size);
    let corridor = build_corridor(connection, direction, spec, grid_size);
    let far_end = corridor_far_end(connection, direction, spec, grid_size);

    let mut room = registry.create_room(0.0, 0.0, grid_size, rng);
    position_room(&mut room, far_end, direction, grid_size);

    let corridor_padded = corridor.bounds.expanded(grid_size);
    let room_padded = room.bounds.expanded(grid_size);
    for obstacle in obstacles {
        if corridor_padded.intersects(obstacle) || room_padded.intersects(obstacle) {
            return None;
        }
    }

    // Placement accepted: carve a doorway on each side of the corridor, with
    // each center recomputed from the final snapped positions
    let room_doorway = room_side_doorway(&room.bounds, far_end, direction);
    carve_doorway(source, direction, connection, grid_size);
    carve_doorway(&mut room, direction.opposite(), room_doorway, grid_size);

    let orientation = doorway_orientation(direction);
    let doors = vec![
        Door::at_doorway(connection, orientation, grid_size),
        Door::at_doorway(room_doorway, orientation, grid_size),
    ];

    Some(Placement { corridor, room, doors })
}
