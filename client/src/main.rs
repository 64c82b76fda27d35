mod cli;

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, CompareCommand, RunCommand};
use common::{ConfigLoader, FsExt};
use dotenv::dotenv;
use env_logger::Env;
use log::info;
use search::{create_sequencer, run_sequencer, SearchOptions, SequencerKind};
use serde::Serialize;
use slideshow::{assemble_slides, load_photos, Slide};

const CONFIG_SCOPE: &str = "slideshow";

#[derive(Serialize)]
struct CompareRow {
    sequencer: SequencerKind,
    score: usize,
    elapsed_secs: f64,
}

fn main() -> Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(run_args) => run(run_args),
        Commands::Compare(compare_args) => compare(compare_args),
    }
}

fn run(args: RunCommand) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let mut options: SearchOptions = config.load()?;

    if let Some(sequencer) = &args.sequencer {
        options.sequencer = sequencer.parse()?;
    }
    if let Some(seed) = args.seed {
        options.seed = seed;
    }
    if args.max_slides.is_some() {
        options.max_slides = args.max_slides;
    }

    info!("{:?}", options);

    let slides = load_slides(&args.input, options.max_slides)?;
    let mut sequencer = create_sequencer(&options, &config)?;
    let outcome = run_sequencer(sequencer.as_mut(), &slides)?;

    info!("Score: {}", outcome.score);

    let submission = outcome.slideshow.to_string();
    match &args.output {
        Some(output) => {
            let path = output.relative_to_cwd()?;
            fs::write(&path, submission)
                .with_context(|| format!("Failed to write submission to {:?}", path))?;
            info!("Wrote submission to {:?}", path);
        }
        None => print!("{}", submission),
    }

    Ok(())
}

fn compare(args: CompareCommand) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let mut options: SearchOptions = config.load()?;

    if let Some(seed) = args.seed {
        options.seed = seed;
    }
    if args.max_slides.is_some() {
        options.max_slides = args.max_slides;
    }

    let slides = load_slides(&args.input, options.max_slides)?;
    let mut rows = Vec::with_capacity(SequencerKind::ALL.len());

    for kind in SequencerKind::ALL {
        options.sequencer = kind;

        let mut sequencer = create_sequencer(&options, &config)?;
        let outcome = run_sequencer(sequencer.as_mut(), &slides)?;

        rows.push(CompareRow {
            sequencer: kind,
            score: outcome.score,
            elapsed_secs: outcome.elapsed.as_secs_f64(),
        });
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for row in &rows {
            println!(
                "{:<8} {:>8} {:>10.3}s",
                row.sequencer.name(), row.score, row.elapsed_secs
            );
        }
    }

    Ok(())
}

fn load_config(path: Option<&str>) -> Result<ConfigLoader> {
    match path {
        Some(path) => ConfigLoader::new(path.existing_file()?, CONFIG_SCOPE.to_string()),
        None => Ok(ConfigLoader::empty(CONFIG_SCOPE.to_string())),
    }
}

fn load_slides(input: &str, max_slides: Option<usize>) -> Result<Vec<Slide>> {
    let photos = load_photos(input.existing_file()?)?;
    let mut slides = assemble_slides(photos)?;

    info!("Num slides: {}", slides.len());

    if let Some(max_slides) = max_slides {
        slides.truncate(max_slides);
    }

    Ok(slides)
}
