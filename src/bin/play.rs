use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use rand_pcg::Pcg64;
use freecell_mcts::{
    load_deal_from_json, play_out, rng_for_deal, rng_for_search, search, GameState, Move, PlayLimits,
    SearchConfig,
};

#[derive(Debug, Parser)]
#[command(name = "play", about = "Play FreeCell from the terminal, with MCTS hints")]
struct Args {
    /// Seed for the deal and the search RNG (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Deal file: JSON array of 52 cards in deal order, e.g. ["Ah","7c",...]
    #[arg(long)]
    deal: Option<PathBuf>,

    /// MCTS iterations per `ai` command
    #[arg(long, default_value_t = 100)]
    sims: u32,

    /// Independent search trees run in parallel
    #[arg(long, default_value_t = 1)]
    trees: usize,

    /// Wall-clock cap per search in milliseconds
    #[arg(long)]
    time_ms: Option<u64>,
}

const HELP: &str = "\
commands:
  show            print the board
  new             deal a new game
  mc SRC DST      column to column
  tf SRC          column to free cell
  ff SRC DST      free cell to column
  ch SRC          column to home
  fh SRC          free cell to home
  undo            take back the last move
  ai [SIMS]       let the computer play one move
  auto [MAX]      let the computer play until it wins, sticks or repeats
  json            print the board as JSON
  won             report whether the game is won
  help            this text
  quit            exit";

fn parse_indices(args: &[&str], n: usize) -> Result<Vec<usize>, String> {
    if args.len() != n {
        return Err(format!("expected {n} index argument(s), got {}", args.len()));
    }
    args.iter()
        .map(|a| a.parse::<usize>().map_err(|e| format!("bad index '{a}': {e}")))
        .collect()
}

fn parse_move(cmd: &str, args: &[&str]) -> Result<Move, String> {
    let mv = match cmd {
        "mc" => {
            let ix = parse_indices(args, 2)?;
            Move::ColumnToColumn { src: ix[0], dst: ix[1] }
        }
        "tf" => Move::ColumnToFree { src: parse_indices(args, 1)?[0] },
        "ff" => {
            let ix = parse_indices(args, 2)?;
            Move::FreeToColumn { src: ix[0], dst: ix[1] }
        }
        "ch" => Move::ColumnToHome { src: parse_indices(args, 1)?[0] },
        "fh" => Move::FreeToHome { src: parse_indices(args, 1)?[0] },
        _ => return Err(format!("unknown command '{cmd}' (try 'help')")),
    };
    Ok(mv)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    eprintln!("[play] seed {seed}");

    let mut deal_rng: Pcg64 = rng_for_deal(seed, 0);
    let mut search_rng: Pcg64 = rng_for_search(seed, 0);
    let mut game = match &args.deal {
        Some(path) => {
            let deck = load_deal_from_json(path).map_err(|e| format!("Deal load error: {e}"))?;
            GameState::from_deck(&deck)?
        }
        None => GameState::dealt(&mut deal_rng),
    };
    let config = SearchConfig {
        simulations: args.sims,
        trees: args.trees,
        time_ms: args.time_ms,
        ..SearchConfig::default()
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", game.board())?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let mut parts = line.split_whitespace();
        let Some(cmd) = parts.next() else { continue };
        let rest: Vec<&str> = parts.collect();

        match cmd {
            "quit" | "exit" | "q" => break,
            "help" | "?" => writeln!(out, "{HELP}")?,
            "show" => writeln!(out, "{}", game.board())?,
            "json" => writeln!(out, "{}", serde_json::to_string(&game.view())?)?,
            "won" => writeln!(out, "{}", game.is_won())?,
            "new" => {
                game.start_with_rng(&mut deal_rng);
                writeln!(out, "{}", game.board())?;
            }
            "undo" => match game.undo() {
                Ok(()) => writeln!(out, "{}", game.board())?,
                Err(e) => writeln!(out, "rejected: {e}")?,
            },
            "ai" => {
                let mut cfg = config;
                if let Some(n) = rest.first() {
                    match n.parse() {
                        Ok(sims) => cfg.simulations = sims,
                        Err(e) => {
                            eprintln!("[play] bad simulation count '{n}': {e}");
                            continue;
                        }
                    }
                }
                let report = search(game.board(), &cfg, &mut search_rng);
                eprintln!("[play] searched {} iterations over {} root moves", report.iterations, report.children.len());
                match report.best {
                    Some(mv) => {
                        game.apply(mv)?;
                        writeln!(out, "computer plays {mv}")?;
                        writeln!(out, "{}", game.board())?;
                    }
                    None => writeln!(out, "no move")?,
                }
            }
            "auto" => {
                let mut limits = PlayLimits::default();
                if let Some(n) = rest.first() {
                    match n.parse() {
                        Ok(max) => limits.max_moves = max,
                        Err(e) => {
                            eprintln!("[play] bad move limit '{n}': {e}");
                            continue;
                        }
                    }
                }
                let outcome = play_out(&mut game, &config, &limits, &mut search_rng);
                writeln!(
                    out,
                    "autoplay stopped ({:?}) after {} moves, {} cards home",
                    outcome.stop, outcome.moves, outcome.cards_home
                )?;
                writeln!(out, "{}", game.board())?;
            }
            _ => match parse_move(cmd, &rest) {
                Ok(mv) => match game.apply(mv) {
                    Ok(()) => {
                        writeln!(out, "ok {mv}")?;
                        writeln!(out, "{}", game.board())?;
                        if game.is_won() {
                            writeln!(out, "You won!")?;
                        }
                    }
                    Err(e) => writeln!(out, "rejected: {e}")?,
                },
                Err(e) => eprintln!("[play] {e}"),
            },
        }
        out.flush()?;
    }

    Ok(())
}
