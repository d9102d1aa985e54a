//! Doorway carving
//!
//! Removes a one-cell-wide gap from a solid wall, keeping the sub-segments
//! on either side only when they are long enough to be worth drawing.

use crate::dungeon::types::{DungeonPiece, WallSegment};
use crate::geometry::{Direction, Point, Segment};

/// Shortest wall sub-segment worth keeping, as a fraction of the grid size
fn min_meaningful_length(grid_size: f64) -> f64 {
    grid_size / 4.0
}

/// Carve a one-cell doorway out of the piece's wall facing `direction`
///
/// The doorway spans `center ± grid_size/2` along the wall's axis. Walls that
/// are too short to leave a meaningful segment on either side become fully
/// open. Open and already-split walls are left untouched, so re-carving the
/// same doorway is a no-op.
pub fn carve_doorway(piece: &mut DungeonPiece, direction: Direction, center: Point, grid_size: f64) {
    let segment = match piece.wall(direction) {
        WallSegment::Solid(segment) => *segment,
        WallSegment::Open | WallSegment::Split(_, _) => return,
    };

    let horizontal = direction.is_horizontal_wall();
    let (lo, hi, cross, doorway) = if horizontal {
        (
            segment.start.x.min(segment.end.x),
            segment.start.x.max(segment.end.x),
            segment.start.y,
            center.x,
        )
    } else {
        (
            segment.start.y.min(segment.end.y),
            segment.start.y.max(segment.end.y),
            segment.start.x,
            center.y,
        )
    };

    let min_length = min_meaningful_length(grid_size);
    if hi - lo <= grid_size + min_length {
        *piece.wall_mut(direction) = WallSegment::Open;
        return;
    }

    let near_edge = doorway - grid_size / 2.0;
    let far_edge = doorway + grid_size / 2.0;
    let keep_near = near_edge - lo > min_length;
    let keep_far = hi - far_edge > min_length;

    let span = |a: f64, b: f64| {
        if horizontal {
            Segment::new(Point::new(a, cross), Point::new(b, cross))
        } else {
            Segment::new(Point::new(cross, a), Point::new(cross, b))
        }
    };

    *piece.wall_mut(direction) = match (keep_near, keep_far) {
        (true, true) => WallSegment::Split(span(lo, near_edge), span(far_edge, hi)),
        (true, false) => WallSegment::Solid(span(lo, near_edge)),
        (false, true) => WallSegment::Solid(span(far_edge, hi)),
        (false, false) => WallSegment::Open,
    };
}
