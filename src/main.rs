//! genopt: real-valued genetic algorithm optimizer (command-line edition).
//!
//! `genopt run` optimizes one of the registered target functions and prints
//! a summary; `genopt targets` lists what is available. See `--help`.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::Level;
use u_genopt::cli::{self, Cli, Command};
use u_genopt::ga::GeneticAlgorithm;
use u_genopt::history::GenerationHistory;
use u_genopt::target::TargetRegistry;

fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let registry = TargetRegistry::with_defaults();
    match cli.command {
        Command::Targets => {
            for line in cli::list_targets(&registry) {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Command::Run(args) => {
            let ga = GeneticAlgorithm::new();
            ga.add_observer(Arc::new(|history: Arc<GenerationHistory>| {
                print!("{}", cli::report(&history));
            }));
            match cli::execute(&args, &registry, &ga) {
                Ok(_) => ExitCode::SUCCESS,
                Err(err) => {
                    eprintln!("error: {err}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}
