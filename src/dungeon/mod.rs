//! Procedural dungeon layout generation
//!
//! The growth engine seeds one room at the canvas center and grows outward
//! organically: pick a room, pick an unused direction, attach a corridor and
//! a new room, carve a doorway at each end of the corridor. The accepted
//! pieces are flattened into flat wall-drawing and door records whose
//! ownership passes to the application state store.

pub mod corridor;
pub mod generator;
pub mod output;
pub mod templates;
pub mod types;
pub mod walls;

pub use corridor::CorridorSpec;
pub use generator::{ConfigError, DungeonGenerator, GeneratorConfig, GrownDungeon, PieceArena};
pub use templates::{RoomTemplate, TemplateRegistry};
pub use types::{
    Door, DoorOrientation, Drawing, DungeonLayout, DungeonPiece, PieceKind, SwingDirection,
    WallSegment, WALL_TOOL,
};
pub use walls::carve_doorway;
