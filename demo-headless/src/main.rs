use clap::Parser;
use forest_fire_core::{CellState, FireRules, Simulation, SimulationConfig};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Forest fire simulation demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "forest-fire-demo")]
#[command(about = "Headless forest fire cellular automaton with wind and particles", long_about = None)]
struct Args {
    /// Grid width in cells
    #[arg(long, default_value_t = 80)]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value_t = 80)]
    height: usize,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Wind direction in degrees (0=up, 90=right)
    #[arg(long, default_value_t = 90.0)]
    wind_direction: f32,

    /// Wind strength (0-10)
    #[arg(short, long, default_value_t = 3.0)]
    wind_strength: f32,

    /// Degrees the wind turns every tick
    #[arg(long, default_value_t = 0.0)]
    wind_rotation: f32,

    /// Random ignition attempts before the first tick
    #[arg(short = 'i', long, default_value_t = 3)]
    ignite_count: u32,

    /// Per-tick chance an empty cell grows a tree
    #[arg(long)]
    growth: Option<f32>,

    /// Per-tick chance a tree is struck by lightning
    #[arg(long)]
    lightning: Option<f32>,

    /// Base per-tick chance fire spreads to a neighbouring tree
    #[arg(long)]
    spread: Option<f32>,

    /// Ticks between reports
    #[arg(short, long, default_value_t = 50)]
    report_interval: u64,

    /// Print an ASCII frame of the grid with every report
    #[arg(long)]
    render: bool,
}

impl Args {
    fn config(&self) -> SimulationConfig {
        let defaults = FireRules::default();
        SimulationConfig {
            width: self.width,
            height: self.height,
            seed: self.seed,
            fire: FireRules {
                growth_probability: self.growth.unwrap_or(defaults.growth_probability),
                lightning_probability: self.lightning.unwrap_or(defaults.lightning_probability),
                fire_spread_probability: self.spread.unwrap_or(defaults.fire_spread_probability),
                ..defaults
            },
            ..SimulationConfig::default()
        }
    }
}

fn cell_glyph(state: CellState) -> char {
    match state {
        CellState::Empty => ' ',
        CellState::Tree => 'T',
        CellState::Burning => '*',
        CellState::Burnt => '.',
    }
}

fn render(sim: &Simulation) {
    let cells = sim.cells();
    for row in cells.states().chunks(cells.width()) {
        let line: String = row.iter().copied().map(cell_glyph).collect();
        println!("|{line}|");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    println!("=== Forest Fire Simulation Demo ===\n");

    let mut sim = match Simulation::new(args.config()) {
        Ok(sim) => sim,
        Err(err) => {
            eprintln!("Invalid configuration: {err}");
            std::process::exit(2);
        }
    };

    let stats = sim.stats();
    println!(
        "Created {}x{} forest: {} trees ({:.0}% cover)",
        sim.width(),
        sim.height(),
        stats.trees,
        stats.forest_cover() * 100.0
    );
    match args.seed {
        Some(seed) => println!("Seed: {seed}"),
        None => println!("Seed: random"),
    }

    let mut ignited = 0;
    for _ in 0..args.ignite_count {
        if let Some((x, y)) = sim.ignite_random() {
            println!("Ignited tree at ({x}, {y})");
            ignited += 1;
        }
    }
    if ignited == 0 {
        warn!("No ignition attempt hit a tree; only lightning can start a fire");
    }

    println!(
        "\nWind: {:.1}° at {:.1}, turning {:.1}°/tick\n",
        args.wind_direction, args.wind_strength, args.wind_rotation
    );
    println!("  Tick | Trees | Burning | Burnt | Ignitions | Flames | Smoke | Wind");
    println!("-------|-------|---------|-------|-----------|--------|-------|--------");

    let report_interval = args.report_interval.max(1);
    let mut direction = args.wind_direction;
    let mut total_ignitions = 0usize;
    let mut peak_burning = 0usize;
    let mut peak_particles = 0usize;

    for _ in 0..args.ticks {
        let report = sim.tick(direction, args.wind_strength).report;
        direction = (direction + args.wind_rotation).rem_euclid(360.0);
        total_ignitions += report.ignitions();

        let stats = sim.stats();
        peak_burning = peak_burning.max(stats.burning);
        peak_particles = peak_particles.max(stats.total_particles());

        if report.tick % report_interval == 0 {
            println!(
                "{:6} | {:5} | {:7} | {:5} | {:9} | {:6} | {:5} | {}",
                stats.tick,
                stats.trees,
                stats.burning,
                stats.burnt,
                report.ignitions(),
                stats.flame_particles,
                stats.smoke_particles,
                sim.wind().direction()
            );
            if args.render {
                render(&sim);
            }
        }
    }

    let stats = sim.stats();
    println!("\n=== Simulation Complete ===");
    println!("Ticks run: {}", stats.tick);
    println!("Total ignitions: {total_ignitions}");
    println!("Peak burning cells: {peak_burning}");
    println!("Peak live particles: {peak_particles}");
    println!(
        "Final forest cover: {:.1}% ({} trees, {} burning, {} ash)",
        stats.forest_cover() * 100.0,
        stats.trees,
        stats.burning,
        stats.burnt
    );
}
