use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Frames go to stdout, diagnostics to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Solve(args) => args.run(),
        Command::Animate(args) => args.run(),
        Command::Manual(args) => args.run(),
    }
}

#[derive(Parser)]
#[command(name = "robot-arm", about = "Three-joint robotic arm kinematics and playback")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the joint angles that reach a point.
    Solve(cli::solve::SolveArgs),
    /// Move an object from one point to another and print every frame.
    Animate(cli::animate::AnimateArgs),
    /// Adjust joints by hand from standard input.
    Manual(cli::manual::ManualArgs),
}
