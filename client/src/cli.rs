use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[clap(author, version)]
#[clap(name = "Photo Slideshow Sequencer")]
#[clap(about = "Orders photo slides so neighbouring slides stay interesting", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Run(RunCommand),
    Compare(CompareCommand),
}

/// Sequences the photo collection with one sequencer and writes the submission.
#[derive(Args)]
pub struct RunCommand {
    /// Photo collection to sequence.
    pub input: String,

    #[clap(short, long)]
    pub config: Option<String>,

    /// Overrides the configured sequencer (random, greedy, nested, ucb, uct or nrpa).
    #[clap(short, long)]
    pub sequencer: Option<String>,

    #[clap(long)]
    pub seed: Option<u64>,

    #[clap(long)]
    pub max_slides: Option<usize>,

    /// Submission file. Printed to stdout when omitted.
    #[clap(short, long)]
    pub output: Option<String>,
}

/// Runs every sequencer over the same collection and reports their scores.
#[derive(Args)]
pub struct CompareCommand {
    pub input: String,

    #[clap(short, long)]
    pub config: Option<String>,

    #[clap(long)]
    pub seed: Option<u64>,

    #[clap(long)]
    pub max_slides: Option<usize>,

    /// Prints the report as JSON.
    #[clap(long)]
    pub json: bool,
}
