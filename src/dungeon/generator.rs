//! Organic dungeon growth engine
//!
//! Seeds one room at the canvas center, then repeatedly picks an existing
//! room and an unused direction and tries to attach a corridor plus a new
//! room there. Growth is best-effort: when the retry budget runs out the
//! engine returns whatever it managed to place.

use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::dungeon::corridor::{try_add_piece_in_direction, CorridorSpec};
use crate::dungeon::output::pieces_to_drawings;
use crate::dungeon::templates::TemplateRegistry;
use crate::dungeon::types::{Door, DungeonLayout, DungeonPiece};
use crate::geometry::{snap_to_grid, Bounds, Direction};

/// Generator construction parameters
///
/// Everything except `num_rooms` has a sensible default. Sizes are in grid
/// cells, canvas and grid dimensions in pixels.
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// Target room count, best-effort (the seed room counts toward it)
    pub num_rooms: u32,
    pub min_room_size: u32,
    pub max_room_size: u32,
    pub grid_size: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub wall_color: String,
    pub wall_size: f64,
    /// Failed placement attempts allowed per requested room
    pub retries_per_room: u32,
    pub corridor: CorridorSpec,
}

impl GeneratorConfig {
    pub fn new(num_rooms: u32) -> Self {
        Self {
            num_rooms,
            min_room_size: 3,
            max_room_size: 8,
            grid_size: 50.0,
            canvas_width: 1920.0,
            canvas_height: 1080.0,
            wall_color: "#ff0000".to_string(),
            wall_size: 8.0,
            retries_per_room: 10,
            corridor: CorridorSpec::default(),
        }
    }

    /// Total failed attempts tolerated before generation stops
    pub fn retry_budget(&self) -> u32 {
        self.num_rooms * self.retries_per_room
    }

    /// Consecutive failures without progress that end generation early
    pub fn stall_limit(&self) -> u32 {
        self.retry_budget() / 2
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_rooms == 0 {
            return Err(ConfigError::NoRooms);
        }
        if self.min_room_size > self.max_room_size {
            return Err(ConfigError::RoomSizeRange {
                min: self.min_room_size,
                max: self.max_room_size,
            });
        }
        if self.min_room_size == 0 {
            return Err(ConfigError::ZeroRoomSize);
        }
        if !(self.grid_size > 0.0) {
            return Err(ConfigError::NonPositiveGrid(self.grid_size));
        }
        if self.corridor.length_cells == 0 || self.corridor.width_cells == 0 {
            return Err(ConfigError::EmptyCorridor);
        }
        Ok(())
    }
}

/// Rejected generator configuration
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("num_rooms must be at least 1")]
    NoRooms,
    #[error("min_room_size {min} exceeds max_room_size {max}")]
    RoomSizeRange { min: u32, max: u32 },
    #[error("min_room_size must be at least one cell")]
    ZeroRoomSize,
    #[error("grid_size must be positive, got {0}")]
    NonPositiveGrid(f64),
    #[error("corridor must be at least one cell long and one cell wide")]
    EmptyCorridor,
}

/// Per-direction used flags, indexed by `Direction::index()`
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectionSet([bool; 4]);

impl DirectionSet {
    pub fn insert(&mut self, direction: Direction) {
        self.0[direction.index()] = true;
    }

    pub fn contains(&self, direction: Direction) -> bool {
        self.0[direction.index()]
    }

    pub fn unused(&self) -> Vec<Direction> {
        Direction::CARDINALS
            .into_iter()
            .filter(|dir| !self.contains(*dir))
            .collect()
    }
}

/// An accepted piece plus its growth bookkeeping
#[derive(Clone, Debug)]
pub struct PlacedPiece {
    pub piece: DungeonPiece,
    /// Directions already grown from (rooms) or attached through (both)
    pub used: DirectionSet,
    /// Arena index of the piece this one was attached to; `None` for the
    /// seed room. Corridors point at their source room, rooms at their
    /// corridor, so the arena forms a tree.
    pub parent: Option<usize>,
}

/// Arena of accepted pieces addressed by integer index
#[derive(Clone, Debug, Default)]
pub struct PieceArena {
    entries: Vec<PlacedPiece>,
}

impl PieceArena {
    pub fn push(&mut self, piece: DungeonPiece, parent: Option<usize>) -> usize {
        self.entries.push(PlacedPiece {
            piece,
            used: DirectionSet::default(),
            parent,
        });
        self.entries.len() - 1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> &PlacedPiece {
        &self.entries[index]
    }

    pub fn entries(&self) -> &[PlacedPiece] {
        &self.entries
    }

    pub fn pieces(&self) -> impl Iterator<Item = &DungeonPiece> {
        self.entries.iter().map(|entry| &entry.piece)
    }

    /// Indices of room pieces (growth sources; corridors are skipped)
    pub fn room_indices(&self) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.piece.is_room())
            .map(|(index, _)| index)
            .collect()
    }

    /// Bounds of every piece except the one at `skip`, for overlap checks
    pub fn bounds_excluding(&self, skip: usize) -> Vec<Bounds> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != skip)
            .map(|(_, entry)| entry.piece.bounds)
            .collect()
    }
}

/// Piece-level result of a growth run, before flattening to output records
#[derive(Clone, Debug)]
pub struct GrownDungeon {
    pub arena: PieceArena,
    pub doors: Vec<Door>,
    /// Rooms actually placed, seed included; may be below the target
    pub rooms_added: u32,
}

/// The generator: validated configuration plus a template registry
#[derive(Clone, Debug)]
pub struct DungeonGenerator {
    config: GeneratorConfig,
    registry: TemplateRegistry,
}

impl DungeonGenerator {
    /// Build a generator with the default rectangular room template
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let registry = TemplateRegistry::new(config.min_room_size, config.max_room_size);
        Ok(Self { config, registry })
    }

    /// Build a generator with a caller-supplied template registry
    pub fn with_registry(
        config: GeneratorConfig,
        registry: TemplateRegistry,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, registry })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run growth and flatten the result into drawings and doors
    pub fn generate(&self, rng: &mut ChaCha8Rng) -> DungeonLayout {
        let grown = self.grow(rng);
        DungeonLayout {
            drawings: pieces_to_drawings(
                grown.arena.pieces(),
                &self.config.wall_color,
                self.config.wall_size,
            ),
            doors: grown.doors,
        }
    }

    /// Run growth and return the piece-level result
    pub fn grow(&self, rng: &mut ChaCha8Rng) -> GrownDungeon {
        let grid = self.config.grid_size;

        // Seed room centered on the canvas with its corner grid-snapped
        let mut seed = self.registry.create_room(0.0, 0.0, grid, rng);
        let x = snap_to_grid(self.config.canvas_width / 2.0 - seed.bounds.width / 2.0, grid);
        let y = snap_to_grid(self.config.canvas_height / 2.0 - seed.bounds.height / 2.0, grid);
        seed.move_to(x, y);

        let mut arena = PieceArena::default();
        arena.push(seed, None);

        let mut doors = Vec::new();
        let mut rooms_added = 1u32;
        let mut retries = 0u32;
        let budget = self.config.retry_budget();
        let stall_limit = self.config.stall_limit();

        while rooms_added < self.config.num_rooms && retries < budget {
            let rooms = arena.room_indices();
            let source_index = rooms[rng.gen_range(0..rooms.len())];
            let mut directions = arena.entries[source_index].used.unused();
            directions.shuffle(rng);

            let mut placed = false;
            for direction in directions {
                let obstacles = arena.bounds_excluding(source_index);
                let attempt = try_add_piece_in_direction(
                    &mut arena.entries[source_index].piece,
                    direction,
                    &obstacles,
                    &self.registry,
                    &self.config.corridor,
                    grid,
                    rng,
                );

                if let Some(placement) = attempt {
                    let corridor_index = arena.push(placement.corridor, Some(source_index));
                    let room_index = arena.push(placement.room, Some(corridor_index));
                    arena.entries[source_index].used.insert(direction);
                    arena.entries[room_index].used.insert(direction.opposite());
                    doors.extend(placement.doors);
                    rooms_added += 1;
                    retries = 0;
                    placed = true;
                    break;
                }
            }

            if !placed {
                retries += 1;
                if retries > stall_limit {
                    break;
                }
            }
        }

        GrownDungeon { arena, doors, rooms_added }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::types::{PieceKind, WALL_TOOL};
    use rand::SeedableRng;

    #[test]
    fn test_config_validation() {
        assert_eq!(GeneratorConfig::new(0).validate(), Err(ConfigError::NoRooms));

        let mut config = GeneratorConfig::new(3);
        config.min_room_size = 9;
        assert_eq!(
            config.validate(),
            Err(ConfigError::RoomSizeRange { min: 9, max: 8 })
        );

        let mut config = GeneratorConfig::new(3);
        config.grid_size = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveGrid(0.0)));

        let mut config = GeneratorConfig::new(3);
        config.corridor.width_cells = 0;
        assert_eq!(config.validate(), Err(ConfigError::EmptyCorridor));

        assert!(GeneratorConfig::new(1).validate().is_ok());
    }

    #[test]
    fn test_retry_budget_named_limits() {
        let config = GeneratorConfig::new(6);
        assert_eq!(config.retry_budget(), 60);
        assert_eq!(config.stall_limit(), 30);
    }

    #[test]
    fn test_single_room_layout() {
        let generator = DungeonGenerator::new(GeneratorConfig::new(1)).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let layout = generator.generate(&mut rng);

        // One room, four solid walls, no doorways
        assert_eq!(layout.drawings.len(), 4);
        assert!(layout.doors.is_empty());
    }

    #[test]
    fn test_generate_five_rooms_scenario() {
        let generator = DungeonGenerator::new(GeneratorConfig::new(5)).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let layout = generator.generate(&mut rng);

        assert!(!layout.doors.is_empty());
        // One door per corridor-to-room junction, two junctions per corridor
        assert!(layout.doors.len() <= 2 * 4);
        assert_eq!(layout.doors.len() % 2, 0);
        for door in &layout.doors {
            assert_eq!(door.x % 50.0, 0.0, "door x off grid: {}", door.x);
            assert_eq!(door.y % 50.0, 0.0, "door y off grid: {}", door.y);
            assert!(!door.is_open);
            assert!(!door.is_locked);
        }
        for drawing in &layout.drawings {
            assert_eq!(drawing.tool, WALL_TOOL);
            assert_eq!(drawing.color, "#ff0000");
            assert_eq!(drawing.size, 8.0);
        }
    }

    #[test]
    fn test_room_corners_grid_aligned() {
        let generator = DungeonGenerator::new(GeneratorConfig::new(8)).unwrap();
        for seed in [1u64, 2, 3, 42, 1337] {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let grown = generator.grow(&mut rng);

            for entry in grown.arena.entries() {
                if entry.piece.is_room() {
                    let b = entry.piece.bounds;
                    assert_eq!(b.x % 50.0, 0.0);
                    assert_eq!(b.y % 50.0, 0.0);
                    assert_eq!(b.width % 50.0, 0.0);
                    assert_eq!(b.height % 50.0, 0.0);
                }
            }
        }
    }

    #[test]
    fn test_drawings_on_half_grid() {
        let generator = DungeonGenerator::new(GeneratorConfig::new(6)).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let layout = generator.generate(&mut rng);

        // Doorway edges and corridor side walls sit on half-cell lines;
        // everything else is on the grid itself
        for drawing in &layout.drawings {
            for coord in &drawing.points {
                assert_eq!(coord % 25.0, 0.0, "coordinate off half-grid: {coord}");
            }
        }
    }

    #[test]
    fn test_no_padded_overlap_between_non_adjacent_pieces() {
        let generator = DungeonGenerator::new(GeneratorConfig::new(10)).unwrap();
        for seed in [7u64, 21, 99] {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let grown = generator.grow(&mut rng);
            let entries = grown.arena.entries();

            for i in 0..entries.len() {
                for j in (i + 1)..entries.len() {
                    let adjacent = entries[i].parent == Some(j) || entries[j].parent == Some(i);
                    if adjacent {
                        continue;
                    }
                    assert!(
                        !entries[i].piece.bounds.expanded(50.0).intersects(&entries[j].piece.bounds),
                        "pieces {i} and {j} closer than one cell (seed {seed})"
                    );
                }
            }
        }
    }

    #[test]
    fn test_piece_graph_is_a_tree() {
        let generator = DungeonGenerator::new(GeneratorConfig::new(8)).unwrap();
        for seed in [4u64, 13, 64] {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let grown = generator.grow(&mut rng);
            let entries = grown.arena.entries();

            let rooms = entries.iter().filter(|e| e.piece.is_room()).count();
            let corridors = entries.iter().filter(|e| e.piece.kind == PieceKind::Corridor).count();
            assert_eq!(rooms as u32, grown.rooms_added);
            assert_eq!(corridors, rooms - 1, "one new corridor per new room");

            // Every piece but the seed has a parent earlier in the arena, so
            // the graph is connected and acyclic
            for (index, entry) in entries.iter().enumerate() {
                match entry.parent {
                    None => assert_eq!(index, 0, "only the seed room lacks a parent"),
                    Some(parent) => {
                        assert!(parent < index);
                        // Rooms attach to corridors, corridors to rooms
                        assert_ne!(entries[parent].piece.kind, entry.piece.kind);
                    }
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let generator = DungeonGenerator::new(GeneratorConfig::new(6)).unwrap();

        let mut rng_a = ChaCha8Rng::seed_from_u64(77);
        let mut rng_b = ChaCha8Rng::seed_from_u64(77);
        let a = generator.generate(&mut rng_a);
        let b = generator.generate(&mut rng_b);

        // Ids are fresh uuids, but the geometry must be identical
        let points_a: Vec<_> = a.drawings.iter().map(|d| d.points.clone()).collect();
        let points_b: Vec<_> = b.drawings.iter().map(|d| d.points.clone()).collect();
        assert_eq!(points_a, points_b);

        let doors_a: Vec<_> = a.doors.iter().map(|d| (d.x, d.y, d.orientation)).collect();
        let doors_b: Vec<_> = b.doors.iter().map(|d| (d.x, d.y, d.orientation)).collect();
        assert_eq!(doors_a, doors_b);
    }

    #[test]
    fn test_growth_is_best_effort() {
        // Dense target: some placement attempts will collide with earlier
        // pieces, but the run must still end with a consistent arena and
        // never exceed the target
        let mut config = GeneratorConfig::new(40);
        config.min_room_size = 8;
        config.max_room_size = 8;
        let generator = DungeonGenerator::new(config).unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let grown = generator.grow(&mut rng);
        assert!(grown.rooms_added >= 1);
        assert!(grown.rooms_added <= 40);
        let rooms = grown.arena.entries().iter().filter(|e| e.piece.is_room()).count();
        assert_eq!(rooms as u32, grown.rooms_added);
    }
}
