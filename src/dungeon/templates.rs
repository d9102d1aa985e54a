//! Room template registry
//!
//! Templates are pluggable factories registered once at generator
//! construction. The registry picks a template uniformly at random and draws
//! the room's cell dimensions from the template's inclusive range.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::dungeon::types::{solid_walls, DungeonPiece, PieceKind};
use crate::geometry::Bounds;

/// Builds a room piece from a top-left corner and cell dimensions
pub type RoomFactory = fn(x: f64, y: f64, width_cells: u32, height_cells: u32, grid_size: f64) -> DungeonPiece;

/// A registered room shape
#[derive(Clone, Copy, Debug)]
pub struct RoomTemplate {
    pub id: &'static str,
    pub min_cells: u32,
    pub max_cells: u32,
    pub factory: RoomFactory,
}

/// Static set of room templates chosen from during growth
#[derive(Clone, Debug)]
pub struct TemplateRegistry {
    templates: Vec<RoomTemplate>,
}

impl TemplateRegistry {
    /// Registry with the single built-in rectangular template
    pub fn new(min_cells: u32, max_cells: u32) -> Self {
        Self {
            templates: vec![RoomTemplate {
                id: "rectangular",
                min_cells,
                max_cells,
                factory: rectangular_room,
            }],
        }
    }

    /// Registry with caller-supplied templates; must not be empty
    pub fn with_templates(templates: Vec<RoomTemplate>) -> Self {
        assert!(!templates.is_empty(), "template registry needs at least one template");
        Self { templates }
    }

    /// Build a room at the given corner with randomly drawn dimensions
    pub fn create_room(&self, x: f64, y: f64, grid_size: f64, rng: &mut ChaCha8Rng) -> DungeonPiece {
        let template = &self.templates[rng.gen_range(0..self.templates.len())];
        let width_cells = rng.gen_range(template.min_cells..=template.max_cells);
        let height_cells = rng.gen_range(template.min_cells..=template.max_cells);
        (template.factory)(x, y, width_cells, height_cells, grid_size)
    }
}

/// The built-in template: a rectangle with four solid walls
pub fn rectangular_room(
    x: f64,
    y: f64,
    width_cells: u32,
    height_cells: u32,
    grid_size: f64,
) -> DungeonPiece {
    let bounds = Bounds::new(
        x,
        y,
        width_cells as f64 * grid_size,
        height_cells as f64 * grid_size,
    );
    DungeonPiece::new(PieceKind::Room, bounds, solid_walls(&bounds))
}
