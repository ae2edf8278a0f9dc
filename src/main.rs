use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use tabula::{
    error::Result,
    problems::{circuit_board, map_colouring},
    solver::{
        assignment::Assignment,
        engine::SolverConfig,
        stats::{render_comparison_table, SearchStats},
    },
};

/// Demo runner for the tabula CSP engine.
#[derive(Parser)]
#[command(name = "tabula", about = "Solve the bundled demo CSP instances")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Colour the Australian states map.
    Map(RunArgs),
    /// Pack the sample circuit board.
    Board(RunArgs),
}

#[derive(clap::Args)]
struct RunArgs {
    /// Enable minimum-remaining-values variable ordering.
    #[arg(long)]
    mrv: bool,
    /// Enable least-constraining-value value ordering.
    #[arg(long)]
    lcv: bool,
    /// Enable AC-3 preprocessing.
    #[arg(long)]
    ac3: bool,
    /// Run all eight flag combinations and print a comparison table.
    #[arg(long, conflicts_with_all = ["mrv", "lcv", "ac3"])]
    compare: bool,
    /// Emit the result as JSON instead of text.
    #[arg(long)]
    json: bool,
}

impl RunArgs {
    fn config(&self) -> SolverConfig {
        SolverConfig {
            mrv: self.mrv,
            lcv: self.lcv,
            ac3: self.ac3,
        }
    }
}

#[derive(Serialize)]
struct JsonReport {
    config: SolverConfig,
    feasible: bool,
    assignment: Option<Assignment>,
    stats: SearchStats,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Map(args) => {
            let map = map_colouring::australia()?;
            run(&args, |config| map.solve(config), |a| map.render(a))
        }
        Command::Board(args) => {
            let board = circuit_board::sample_board()?;
            run(&args, |config| board.solve(config), |a| board.render(a))
        }
    }
}

fn run(
    args: &RunArgs,
    solve: impl Fn(SolverConfig) -> Result<(Option<Assignment>, SearchStats)>,
    render: impl Fn(&Assignment) -> String,
) -> Result<()> {
    if args.compare {
        let mut rows = Vec::new();
        for config in SolverConfig::grid() {
            let (solution, stats) = solve(config)?;
            rows.push((config, solution.is_some(), stats));
        }
        print!("{}", render_comparison_table(&rows));
        return Ok(());
    }

    let config = args.config();
    let (solution, stats) = solve(config)?;

    if args.json {
        let report = JsonReport {
            config,
            feasible: solution.is_some(),
            assignment: solution,
            stats,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&report).expect("report serializes")
        );
        return Ok(());
    }

    match solution {
        Some(assignment) => {
            println!("Solution found:");
            print!("{}", render(&assignment));
        }
        None => println!("No assignment can satisfy the constraints."),
    }
    println!(
        "Nodes visited: {}, elapsed: {:.2}ms",
        stats.nodes_visited,
        stats.elapsed.as_secs_f64() * 1000.0
    );
    Ok(())
}
