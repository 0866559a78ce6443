use anyhow::Result;
use clap::Parser;
use log::info;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use wordslot::config::SessionConfig;
use wordslot::gesture::OccupiedPolicy;
use wordslot::question::Question;
use wordslot::repl::{run_script, start_session, Repl};

#[derive(Parser, Debug)]
#[command(author, version, about = "Arrange keywords into answer slots", long_about = None)]
struct Args {
    /// Question JSON (name, keywords, correctOrder); defaults to the built-in sample
    #[arg(long)]
    question: Option<PathBuf>,

    /// Session config JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Shuffle seed (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of answer slots (overrides config)
    #[arg(long)]
    slots: Option<usize>,

    /// Return a slot's occupant to the pool instead of rejecting the drop
    #[arg(long)]
    bounce: bool,

    /// Keep the question's keyword order
    #[arg(long)]
    no_shuffle: bool,

    /// Replay gesture events from a JSON-lines file instead of reading commands
    #[arg(long)]
    script: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(p) => SessionConfig::load(p)?,
        None => SessionConfig::default(),
    };
    if let Some(seed) = args.seed { cfg.seed = seed; }
    if let Some(n) = args.slots { cfg.slot_count = Some(n); }
    if args.bounce { cfg.on_occupied = OccupiedPolicy::BounceToPool; }
    if args.no_shuffle { cfg.no_shuffle = true; }

    let question = match &args.question {
        Some(p) => Question::load(p)?,
        None => Question::builtin(),
    };
    info!("question `{}` with {} keywords, seed {}", question.name, question.keywords.len(), cfg.seed);

    let mut driver = start_session(&question, &cfg)?;
    info!("occupied-slot policy: {:?}", driver.policy());
    if let Some(path) = args.script {
        let f = File::open(&path)?;
        return run_script(&mut driver, BufReader::new(f), io::stdout().lock());
    }
    Repl::new(driver, question).run_loop()
}
