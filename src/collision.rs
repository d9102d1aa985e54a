//! Wall and door collision model
//!
//! Circle-vs-segment tests used both for generation-time checks and at
//! runtime for token movement blocking. The closed-door projection here is
//! the single source of truth for vision blocking: the fog-of-war raycaster
//! consumes the same segments, so movement and vision always agree.

use crate::dungeon::types::{Door, DoorOrientation, Drawing, WALL_TOOL};
use crate::geometry::{Point, Segment};

/// Spiral search ring spacing in pixels
const SEARCH_STEP: f64 = 5.0;

/// Default spiral search radius in pixels
pub const DEFAULT_SEARCH_RADIUS: f64 = 100.0;

/// True iff the circle touches the segment
///
/// Projects the center onto the segment, clamps to the endpoints, and
/// compares squared distances. Zero-length segments degrade to a point test.
pub fn circle_segment_collision(center: Point, radius: f64, segment: &Segment) -> bool {
    let dx = segment.end.x - segment.start.x;
    let dy = segment.end.y - segment.start.y;
    let length_squared = dx * dx + dy * dy;

    let closest = if length_squared == 0.0 {
        segment.start
    } else {
        let t = ((center.x - segment.start.x) * dx + (center.y - segment.start.y) * dy)
            / length_squared;
        let t = t.clamp(0.0, 1.0);
        Point::new(segment.start.x + t * dx, segment.start.y + t * dy)
    };

    center.distance_squared(&closest) <= radius * radius
}

/// Collision segment for a door, if it blocks
///
/// A closed door (locked or not) blocks with one segment of length
/// `door.size` centered on the door position and oriented along the door's
/// axis; an open door blocks nothing.
pub fn door_blocking_segment(door: &Door) -> Option<Segment> {
    if door.is_open {
        return None;
    }
    let half = door.size / 2.0;
    let segment = match door.orientation {
        DoorOrientation::Horizontal => Segment::new(
            Point::new(door.x - half, door.y),
            Point::new(door.x + half, door.y),
        ),
        DoorOrientation::Vertical => Segment::new(
            Point::new(door.x, door.y - half),
            Point::new(door.x, door.y + half),
        ),
    };
    Some(segment)
}

/// True iff a token of diameter `size` at (x, y) touches any wall drawing or
/// any closed door
pub fn check_wall_collision(
    x: f64,
    y: f64,
    size: f64,
    drawings: &[Drawing],
    doors: &[Door],
) -> bool {
    let center = Point::new(x, y);
    let radius = size / 2.0;

    for drawing in drawings {
        if drawing.tool != WALL_TOOL {
            continue;
        }
        let points = &drawing.points;
        if points.len() < 4 {
            continue;
        }
        for pair in points.windows(4).step_by(2) {
            let segment = Segment::new(
                Point::new(pair[0], pair[1]),
                Point::new(pair[2], pair[3]),
            );
            if circle_segment_collision(center, radius, &segment) {
                return true;
            }
        }
    }

    for door in doors {
        if let Some(segment) = door_blocking_segment(door) {
            if circle_segment_collision(center, radius, &segment) {
                return true;
            }
        }
    }

    false
}

/// Best-effort search for a collision-free position near the target
///
/// Returns the target itself when it is already free; otherwise spirals
/// outward in fixed rings, sampling more angles on larger rings, and returns
/// the first free sample. Falls back to the original (possibly colliding)
/// target when the search radius is exhausted, so callers needing a
/// guarantee must re-check the result.
pub fn find_nearest_valid_position(
    target_x: f64,
    target_y: f64,
    size: f64,
    drawings: &[Drawing],
    doors: &[Door],
    max_radius: f64,
) -> (f64, f64) {
    if !check_wall_collision(target_x, target_y, size, drawings, doors) {
        return (target_x, target_y);
    }

    let mut radius = SEARCH_STEP;
    while radius <= max_radius {
        let samples = ((std::f64::consts::TAU * radius / SEARCH_STEP).ceil() as usize).max(8);
        for i in 0..samples {
            let angle = std::f64::consts::TAU * i as f64 / samples as f64;
            let x = target_x + radius * angle.cos();
            let y = target_y + radius * angle.sin();
            if !check_wall_collision(x, y, size, drawings, doors) {
                return (x, y);
            }
        }
        radius += SEARCH_STEP;
    }

    (target_x, target_y)
}
