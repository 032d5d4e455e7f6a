use std::time::Instant;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use freecell_mcts::{play_out, rng_for_deal, rng_for_search, GameState, PlayLimits, PlayOutcome, SearchConfig};

#[derive(Debug, Parser)]
#[command(name = "autoplay", about = "Batch self-play: let MCTS play many seeded FreeCell deals")]
struct Args {
    /// Number of deals to play
    #[arg(long, default_value_t = 10)]
    games: u64,

    /// Base seed; game i is dealt from (seed, i)
    #[arg(long, default_value_t = 0x00C0_FFEEu64)]
    seed: u64,

    /// MCTS iterations per move
    #[arg(long, default_value_t = 100)]
    sims: u32,

    /// Independent search trees per move
    #[arg(long, default_value_t = 1)]
    trees: usize,

    /// Move cap per game
    #[arg(long, default_value_t = 300)]
    max_moves: u32,

    /// Print one JSON object per game on stdout
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

#[derive(Debug, Serialize)]
struct GameRecord {
    game: u64,
    #[serde(flatten)]
    outcome: PlayOutcome,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = SearchConfig { simulations: args.sims, trees: args.trees, ..SearchConfig::default() };
    let limits = PlayLimits { max_moves: args.max_moves, ..PlayLimits::default() };

    eprintln!(
        "[autoplay] games={} seed={} sims={} trees={} max_moves={}",
        args.games, args.seed, args.sims, args.trees, args.max_moves
    );

    let pb = if args.quiet { ProgressBar::hidden() } else { ProgressBar::new(args.games) };
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] games {bar:40.cyan/blue} {pos}/{len} {msg}")
            .map_err(|e| format!("progress template: {e}"))?,
    );

    let started = Instant::now();
    let records: Vec<GameRecord> = (0..args.games)
        .into_par_iter()
        .map(|game| {
            let mut deal_rng = rng_for_deal(args.seed, game);
            let mut search_rng = rng_for_search(args.seed, game);
            let mut state = GameState::dealt(&mut deal_rng);
            let outcome = play_out(&mut state, &config, &limits, &mut search_rng);
            pb.inc(1);
            GameRecord { game, outcome }
        })
        .collect();
    pb.finish_and_clear();

    if args.json {
        for rec in &records {
            println!("{}", serde_json::to_string(rec)?);
        }
    }

    let wins = records.iter().filter(|r| r.outcome.won).count();
    let avg_home = if records.is_empty() {
        0.0
    } else {
        records.iter().map(|r| f64::from(r.outcome.cards_home)).sum::<f64>() / records.len() as f64
    };
    eprintln!("[autoplay] done in {} ms", started.elapsed().as_millis());
    println!(
        "[autoplay] won {}/{} games, average {:.1} cards home",
        wins,
        records.len(),
        avg_home
    );

    Ok(())
}
