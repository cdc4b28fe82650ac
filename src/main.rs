mod cli;

use anyhow::Result;
use clap::Parser;
use log::debug;

use cli::{Cli, Command, CutArgs, ListArgs, SummaryArgs};
use rusty_emcal::config::AnalysisConfig;
use rusty_emcal::data::loader::load_file;
use rusty_emcal::data::model::ParticleContainer;
use rusty_emcal::{Collection, FilteredIndexView};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::List(args) => list(&args),
        Command::Summary(args) => summary(&args),
    }
}

/// Load the config (if any) and apply command-line overrides.
fn resolve_config(args: &CutArgs) -> Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(min_pt) = args.min_pt {
        config.cuts.min_pt = min_pt;
    }
    if let Some(max_pt) = args.max_pt {
        config.cuts.max_pt = max_pt;
    }
    if let Some(max_eta) = args.max_eta {
        config.cuts.min_eta = -max_eta;
        config.cuts.max_eta = max_eta;
    }
    config.validate()?;
    debug!("using {config:?}");
    Ok(config)
}

fn load_container(file: &std::path::Path, cuts: &CutArgs) -> Result<ParticleContainer> {
    let config = resolve_config(cuts)?;
    let slots = load_file(file)?;
    Ok(ParticleContainer::new(config.container, slots, config.cuts))
}

fn list(args: &ListArgs) -> Result<()> {
    let container = load_container(&args.file, &args.cuts)?;
    let view = FilteredIndexView::new(&container, args.accepted);

    let (mut cursor, stop) = if args.reverse {
        (view.rbegin(), view.rend())
    } else {
        (view.begin(), view.end())
    };

    while cursor != stop {
        let logical = usize::try_from(cursor.position())?;
        let physical = view.physical_index(logical).unwrap_or(logical);
        match cursor.get() {
            Some(particle) => println!("{logical:>6} {physical:>6}  {particle}"),
            None => println!("{logical:>6} {physical:>6}  <null>"),
        }
        cursor.advance();
    }
    Ok(())
}

fn summary(args: &SummaryArgs) -> Result<()> {
    let container = load_container(&args.file, &args.cuts)?;
    let accepted = container.accepted();

    println!("container: {}", container.name());
    println!("entries:   {}", container.entry_count());
    println!("accepted:  {}", accepted.entries());
    for (reason, count) in container.rejection_counts() {
        println!("  {reason:<16} {count}");
    }
    Ok(())
}
