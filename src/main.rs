use std::{error::Error, process::exit, time::Duration};

use clap::Parser;
use torus_life::{Config, Simulation};
use tracing::info;
use tracing_subscriber::EnvFilter;

use runner::Runner;
mod runner;

use view::{Palette, View};
mod view;

/// Conway's game of life on a torus, drawn in the terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Number of rows
    #[arg(long, default_value_t = 100)]
    rows: usize,

    /// Number of columns
    #[arg(long, default_value_t = 100)]
    cols: usize,

    /// Chance of each cell starting alive
    #[arg(short, long, default_value_t = 0.2)]
    probability: f64,

    /// Seed of the initial population, random when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Milliseconds between two generations, ignored in headless mode
    #[arg(short, long, default_value_t = 200)]
    tick_ms: u64,

    /// Run without the terminal view and print a summary
    #[arg(long)]
    headless: bool,

    /// Generations to run in headless mode
    #[arg(short, long, default_value_t = 100)]
    generations: u64,

    /// Character drawn for alive cells
    #[arg(long, default_value_t = '#')]
    alive_char: char,

    /// Character drawn for dead cells
    #[arg(long, default_value_t = ' ')]
    dead_char: char,
}

impl Args {
    fn config(&self) -> Config {
        Config::new(self.rows, self.cols)
            .set_alive_probability(self.probability)
            .set_seed(self.seed)
            .set_tick_interval(Duration::from_millis(self.tick_ms))
    }

    fn palette(&self) -> Palette {
        Palette {
            alive: self.alive_char,
            dead: self.dead_char,
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = args.config();
    if !args.headless {
        config.validate()?;
    }
    let mut simulation = Simulation::from_config(&config)?;
    info!(
        rows = config.rows,
        cols = config.cols,
        probability = config.alive_probability,
        seed = ?config.seed,
        "starting"
    );

    if args.headless {
        for _ in 0..args.generations {
            simulation.step();
        }
        let fingerprint = simulation.grid().fingerprint();
        info!(
            generation = simulation.generation(),
            population = simulation.population(),
            fingerprint,
            "finished"
        );
        println!(
            "generation {} population {} fingerprint {fingerprint:016x}",
            simulation.generation(),
            simulation.population()
        );
        return Ok(());
    }

    let runner = Runner::spawn(simulation, config.tick_interval);
    let view = View::spawn(runner.handle(), args.palette());

    view.join();
    runner.join();
    Ok(())
}

pub fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(Args::parse()) {
        eprintln!("[error] {err}");
        exit(1);
    }
}
