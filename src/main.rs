use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use crossterm::style::Stylize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

use slider_astar::{Board, Solution, Solver, SolverConfig};

#[derive(Parser, Debug)]
#[command(name = "slider", version, about = "Solve sliding-tile puzzles with A*")]
struct Args {
    /// Puzzle file: the dimension, then n rows of n space-separated tiles (0 is the blank)
    #[arg(short, long, conflicts_with_all = ["size", "scramble", "seed"])]
    file: Option<PathBuf>,

    /// Side length of a generated puzzle
    #[arg(short, long, default_value_t = 3)]
    size: usize,

    /// Generate by sliding this many random moves away from the goal instead of shuffling
    #[arg(long)]
    scramble: Option<usize>,

    /// Keep a shuffled puzzle even if it cannot be solved
    #[arg(long)]
    allow_unsolvable: bool,

    /// RNG seed for generated puzzles
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many node expansions
    #[arg(long)]
    max_expansions: Option<u64>,

    /// Stop after this many milliseconds of searching
    #[arg(long, value_name = "ms")]
    timeout_ms: Option<u64>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn read_board_file(path: &PathBuf) -> Result<Board, String> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    content
        .parse::<Board>()
        .map_err(|e| format!("invalid board in {}: {}", path.display(), e))
}

fn generate_board(args: &Args) -> Result<Board, String> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    if let Some(steps) = args.scramble {
        return Board::scrambled(args.size, steps, &mut rng).map_err(|e| e.to_string());
    }

    loop {
        let board = Board::shuffled(args.size, &mut rng).map_err(|e| e.to_string())?;
        if args.allow_unsolvable || board.is_solvable_by_parity() {
            return Ok(board);
        }
    }
}

/// Padded grid with the blank dimmed and `moved` (the tile that just slid) highlighted.
fn render(board: &Board, moved: Option<(usize, usize)>) -> String {
    let size = board.dimension();
    let width = (size * size - 1).to_string().len();
    let mut out = String::new();

    for i in 0..size {
        for j in 0..size {
            let value = board.tile(i, j);
            let cell = format!("{:>width$} ", value, width = width);
            let styled = if value == 0 {
                format!("{}", format!("{:>width$} ", ".", width = width).dark_grey())
            } else if moved == Some((i, j)) {
                format!("{}", cell.bold().yellow())
            } else {
                cell
            };
            out.push_str(&styled);
        }
        out.push('\n');
    }
    out
}

fn print_solution(initial: &Board, solution: &Solution) {
    let Some(boards) = solution.boards() else {
        println!("{}", "Puzzle is not solvable".red());
        return;
    };

    println!(
        "Found optimal solution with {} moves:\n",
        solution.move_count()
    );
    let mut previous = initial;
    for (dir, board) in solution.moves_made().into_iter().zip(boards.iter().skip(1)) {
        // The tile that moved now sits where the blank was.
        println!("{}\n{}", dir, render(board, Some(previous.blank())));
        previous = board;
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let board = match &args.file {
        Some(path) => read_board_file(path),
        None => generate_board(&args),
    };
    let board = match board {
        Ok(board) => board,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Initial Puzzle:\n{}", render(&board, None));

    let mut config = SolverConfig::new();
    if let Some(max) = args.max_expansions {
        config = config.with_max_expansions(max);
    }
    if let Some(ms) = args.timeout_ms {
        config = config.with_time_limit(Duration::from_millis(ms));
    }

    let mut solver = Solver::with_config(board.clone(), config);
    match solver.solution() {
        Ok(solution) => {
            let solution = solution.clone();
            print_solution(&board, &solution);
            println!("Expanded {} search nodes.", solver.expansions());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
