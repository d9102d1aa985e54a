//! Procedural dungeon layout generation for a virtual tabletop
//!
//! Grows a dungeon outward from a seed room one corridor-and-room at a time,
//! then flattens it into wall drawings and door records for the canvas
//! layer. Also hosts the circle-vs-segment collision model shared by token
//! movement and fog-of-war vision blocking.

pub mod collision;
pub mod dungeon;
pub mod geometry;

pub use dungeon::{DungeonGenerator, DungeonLayout, GeneratorConfig};
