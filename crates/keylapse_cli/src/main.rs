//! Keylapse CLI
//!
//! Drives the replay engine from the command line: rebuild a typing
//! session's timeline from its report fragments and print any recorded
//! state. The interactive slider lives elsewhere; this is the scriptable
//! consumer of the same snapshot sequence.

#![warn(missing_docs)]
#![warn(clippy::all)]

use clap::{Parser, Subcommand};
use color_eyre::Result;
use keylapse_log::Session;
use keylapse_replay::Timeline;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "keylapse")]
#[command(about = "Replay a recorded typing session from its event log", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the document state at a timeline position
    Replay {
        /// Path to any report fragment of the session
        #[arg(short, long)]
        report: PathBuf,
        /// Timeline index (default: the final state)
        #[arg(long)]
        at: Option<usize>,
        /// Emit the state as a JSON line array
        #[arg(long)]
        json: bool,
    },
    /// Dump every snapshot of the timeline as a JSON array
    States {
        /// Path to any report fragment of the session
        #[arg(short, long)]
        report: PathBuf,
    },
    /// List the merged, normalized events
    Inspect {
        /// Path to any report fragment of the session
        #[arg(short, long)]
        report: PathBuf,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Replay { report, at, json } => replay(&report, at, json),
        Commands::States { report } => states(&report),
        Commands::Inspect { report } => inspect(&report),
    }
}

fn build_timeline(report: &Path) -> Result<Timeline> {
    let session = Session::load(report)?;
    let timeline = Timeline::from_session(&session);
    for diagnostic in timeline.diagnostics() {
        eprintln!("warning: {}", diagnostic);
    }
    Ok(timeline)
}

fn replay(report: &Path, at: Option<usize>, json: bool) -> Result<()> {
    let timeline = build_timeline(report)?;
    let index = at.unwrap_or(timeline.len() - 1);
    let Some(state) = timeline.state(index) else {
        return Err(color_eyre::eyre::eyre!(
            "index {} out of range; timeline has {} states",
            index,
            timeline.len()
        ));
    };
    if json {
        println!("{}", serde_json::to_string(state)?);
    } else {
        println!("{}", state.to_text());
    }
    Ok(())
}

fn states(report: &Path) -> Result<()> {
    let timeline = build_timeline(report)?;
    println!("{}", serde_json::to_string(timeline.states())?);
    Ok(())
}

fn inspect(report: &Path) -> Result<()> {
    let timeline = build_timeline(report)?;
    println!("baseline: {} line(s)", timeline.baseline().line_count());
    for (i, event) in timeline.events().iter().enumerate() {
        println!("{:>6}  {}  {:?}", i + 1, event.time, event.kind);
    }
    Ok(())
}
