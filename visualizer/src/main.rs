//! Terminal A* visualizer using crossterm.
//!
//! Run: cargo run -- --size 20 --wall-probability 0.35

use astarviz::{Visualizer, VisualizerConfig};
use astarviz_core::app::{App, AppConfig};
use astarviz_crossterm::CrosstermDriver;
use astarviz_search::{DEFAULT_SIZE, DEFAULT_WALL_PROBABILITY};
use clap::Parser;

/// Watch A* search a grid you draw.
#[derive(Parser, Debug)]
#[command(name = "astarviz", version, about)]
struct Args {
    /// Side length of the square grid (5 to 50)
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    size: i32,

    /// Chance that a cell becomes a wall when randomizing
    #[arg(long, default_value_t = DEFAULT_WALL_PROBABILITY)]
    wall_probability: f64,

    /// Search steps per second
    #[arg(long, default_value_t = astarviz::config::DEFAULT_FPS)]
    fps: u32,

    /// Disable mouse capture
    #[arg(long)]
    no_mouse: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = VisualizerConfig {
        size: args.size,
        wall_probability: args.wall_probability,
        fps: args.fps,
    }
    .validated();

    let (width, height) = CrosstermDriver::size()?;
    let mut app = App::new(AppConfig {
        model: Visualizer::new(config),
        driver: CrosstermDriver::new().with_mouse(!args.no_mouse),
        width,
        height,
        frame_interval: config.frame_interval(),
    });
    app.run()
}
