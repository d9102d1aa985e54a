//! Flattening accepted pieces into drawing records
//!
//! Every surviving wall sub-segment becomes one polyline drawing; open walls
//! emit nothing and split walls emit one drawing per side of the doorway.

use crate::dungeon::types::{Drawing, DungeonPiece, WallSegment};
use crate::geometry::Direction;

/// Flatten pieces into wall drawings with fresh ids
pub fn pieces_to_drawings<'a>(
    pieces: impl Iterator<Item = &'a DungeonPiece>,
    wall_color: &str,
    wall_size: f64,
) -> Vec<Drawing> {
    let mut drawings = Vec::new();
    for piece in pieces {
        for direction in Direction::CARDINALS {
            match piece.wall(direction) {
                WallSegment::Open => {}
                WallSegment::Solid(segment) => {
                    drawings.push(Drawing::wall(segment, wall_color, wall_size));
                }
                WallSegment::Split(near, far) => {
                    drawings.push(Drawing::wall(near, wall_color, wall_size));
                    drawings.push(Drawing::wall(far, wall_color, wall_size));
                }
            }
        }
    }
    drawings
}
