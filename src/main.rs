use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use dungeon_generator::{DungeonGenerator, GeneratorConfig};

#[derive(Parser, Debug)]
#[command(name = "dungeon_generator")]
#[command(about = "Generate a procedural dungeon layout and print it as JSON")]
struct Args {
    /// Target number of rooms (best-effort)
    #[arg(short, long, default_value = "6")]
    rooms: u32,

    /// Random seed (uses a random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Grid cell size in pixels
    #[arg(short, long, default_value = "50")]
    grid_size: f64,

    /// Minimum room size in cells
    #[arg(long, default_value = "3")]
    min_room_size: u32,

    /// Maximum room size in cells
    #[arg(long, default_value = "8")]
    max_room_size: u32,

    /// Canvas width in pixels (seeds the first room's position)
    #[arg(long, default_value = "1920")]
    canvas_width: f64,

    /// Canvas height in pixels
    #[arg(long, default_value = "1080")]
    canvas_height: f64,

    /// Wall stroke color
    #[arg(long, default_value = "#ff0000")]
    wall_color: String,

    /// Wall stroke width in pixels
    #[arg(long, default_value = "8")]
    wall_size: f64,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() {
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(|| rand::random());
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut config = GeneratorConfig::new(args.rooms);
    config.min_room_size = args.min_room_size;
    config.max_room_size = args.max_room_size;
    config.grid_size = args.grid_size;
    config.canvas_width = args.canvas_width;
    config.canvas_height = args.canvas_height;
    config.wall_color = args.wall_color;
    config.wall_size = args.wall_size;

    let generator = match DungeonGenerator::new(config) {
        Ok(generator) => generator,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            std::process::exit(1);
        }
    };

    let layout = generator.generate(&mut rng);
    eprintln!(
        "Generated {} wall drawings and {} doors (seed {})",
        layout.drawings.len(),
        layout.doors.len(),
        seed
    );

    let json = if args.pretty {
        serde_json::to_string_pretty(&layout)
    } else {
        serde_json::to_string(&layout)
    }
    .expect("layout serializes to JSON");
    println!("{json}");
}
