use anyhow::{bail, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use wordslot::gesture::{GestureDriver, GestureError, GestureEvent, GestureOutcome, OccupiedPolicy};
use wordslot::{Location, PlacementEngine, PuzzleState, Token, TokenId};

#[derive(Parser, Debug)]
#[command(name = "soak", about = "Random gesture walks checking the closed-world invariant")]
struct Args {
    /// Number of independent puzzles
    #[arg(long, default_value_t = 200)]
    games: usize,
    /// Gestures per puzzle
    #[arg(long, default_value_t = 500)]
    gestures: usize,
    /// Tokens per puzzle
    #[arg(long, default_value_t = 8)]
    tokens: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Use the bounce-to-pool policy for occupied slots
    #[arg(long, default_value_t = false)]
    bounce: bool,
}

// Includes one-past-the-end positions so range errors get exercised too.
fn random_location(rng: &mut SmallRng, state: &PuzzleState) -> Location {
    if rng.gen_bool(0.5) {
        Location::Pool(rng.gen_range(0..=state.pool().len()))
    } else {
        Location::Slot(rng.gen_range(0..=state.slot_count()))
    }
}

fn random_token(rng: &mut SmallRng, roster: &[TokenId]) -> TokenId {
    roster[rng.gen_range(0..roster.len())]
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    if args.tokens == 0 {
        bail!("--tokens must be at least 1");
    }
    let policy = if args.bounce { OccupiedPolicy::BounceToPool } else { OccupiedPolicy::Reject };
    let mut rng = SmallRng::seed_from_u64(args.seed);

    let pb = ProgressBar::new(args.games as u64);
    pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} games {msg}")?);

    let (mut commits, mut rejected, mut cancelled) = (0u64, 0u64, 0u64);
    for _ in 0..args.games {
        let tokens: Vec<Token> = (0..args.tokens as TokenId).map(|i| Token::new(i, format!("k{i}"))).collect();
        let mut driver = GestureDriver::new(PlacementEngine::with_one_slot_per_token(tokens)?, policy);
        let roster = driver.engine().roster().to_vec();
        for _ in 0..args.gestures {
            let token = random_token(&mut rng, &roster);
            let Some(origin) = driver.state().locate(token) else { bail!("token {token} vanished") };
            driver.apply(GestureEvent::Begin { token, origin })?;
            for _ in 0..rng.gen_range(0..4) {
                let candidate = random_location(&mut rng, driver.state());
                driver.apply(GestureEvent::Over { candidate })?;
            }
            let before = driver.state().clone();
            let ev = if rng.gen_bool(0.1) {
                GestureEvent::Cancel
            } else {
                GestureEvent::Drop { destination: random_location(&mut rng, driver.state()) }
            };
            match driver.apply(ev) {
                Ok(GestureOutcome::Cancelled) => cancelled += 1,
                Ok(_) => commits += 1,
                Err(GestureError::Placement(e)) if !e.is_caller_bug() => {
                    rejected += 1;
                    if *driver.state() != before { bail!("rejected drop changed state: {e}"); }
                }
                Err(e) => bail!("unexpected gesture error: {e}"),
            }
            driver.engine().verify()?;
        }
        pb.inc(1);
    }
    pb.finish_with_message(format!("commits={commits} rejected={rejected} cancelled={cancelled}"));
    info!("soak done: {} games, {} commits, {} rejected, {} cancelled", args.games, commits, rejected, cancelled);
    Ok(())
}
