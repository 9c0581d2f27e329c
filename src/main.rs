use anyhow::{anyhow, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use std::cmp::Ordering;
use std::io::{stdin, stdout, Stdin, Write};
use std::time::{Duration, Instant};

use tictactoe_ai::{
    board::Player,
    config::SearchConfig,
    solver::{ScoredMove, SearchEngine, INFINITE_SCORE},
    winning_lines::LineCache,
    DEFAULT_SIZE,
};

mod display;
use display::*;

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // stay quiet unless asked, the board is drawn on stdout
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn prompt(stdin: &Stdin, question: &str) -> Result<String> {
    print!("{}", question);
    stdout().flush()?;

    let mut buffer = String::new();
    if stdin.read_line(&mut buffer)? == 0 {
        return Err(anyhow!("input closed"));
    }
    Ok(buffer.trim().to_string())
}

fn ask_yes_no(stdin: &Stdin, question: &str) -> Result<bool> {
    loop {
        let answer = prompt(stdin, &format!("{} y/n: ", question))?;
        match answer.to_lowercase().chars().next() {
            Some('y') => return Ok(true),
            Some('n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

/// Reads a number, returning `None` for a blank answer
fn ask_number(stdin: &Stdin, question: &str) -> Result<Option<usize>> {
    loop {
        let answer = prompt(stdin, question)?;
        if answer.is_empty() {
            return Ok(None);
        }
        match answer.parse::<usize>() {
            Ok(number) => return Ok(Some(number)),
            Err(_) => println!("Invalid number: {}", answer),
        }
    }
}

fn report(player: Player, decision: &ScoredMove, elapsed: Duration) {
    let plies = if decision.depth == 1 { "ply" } else { "plies" };
    if decision.score == INFINITE_SCORE {
        println!("Player {} opens without searching.", player);
    } else {
        match decision.score.cmp(&0) {
            Ordering::Greater => println!(
                "Player {} can force a win in at most {} {}.",
                player, decision.depth, plies
            ),
            Ordering::Less => println!(
                "Player {} can force a win in at most {} {}.",
                player.opponent(),
                decision.depth,
                plies
            ),
            Ordering::Equal => println!(
                "Player {} can at best force a draw, {} {} searched.",
                player, decision.depth, plies
            ),
        }
    }

    let score = if decision.score == INFINITE_SCORE {
        "∞".to_string()
    } else {
        decision.score.to_string()
    };
    println!(
        "Best move: {}, Score: {}, Depth: {}",
        decision.index + 1,
        score,
        decision.depth
    );
    println!("Calculated in: {:.3}s", elapsed.as_secs_f64());
}

fn main() -> Result<()> {
    init_tracing();
    let stdin = stdin();

    println!("Welcome to Tic-Tac-Toe\n");

    // choose the board size
    let lines = LineCache::new();
    let mut board = loop {
        let size = ask_number(
            &stdin,
            &format!("Board size (blank for {}): ", DEFAULT_SIZE),
        )?
        .unwrap_or(DEFAULT_SIZE);
        match lines.new_board(size) {
            Ok(board) => break board,
            Err(err) => println!("{}", err),
        }
    };
    let size = board.size();

    let ai_players = (
        ask_yes_no(&stdin, "Is player X AI controlled?")?,
        ask_yes_no(&stdin, "Is player O AI controlled?")?,
    );

    let mut config = SearchConfig::for_size(size);
    if ai_players.0 || ai_players.1 {
        let default_depth = match config.max_depth {
            Some(depth) => depth.to_string(),
            None => "no limit".to_string(),
        };
        let question = format!(
            "Search depth limit in plies, 0 for no limit (blank for {}): ",
            default_depth
        );
        if let Some(depth) = ask_number(&stdin, &question)? {
            config.max_depth = if depth == 0 { None } else { Some(depth) };
        }
        config.parallel = ask_yes_no(&stdin, "Use parallel search?")?;
    }
    let mut engine = SearchEngine::with_line_cache(config, lines)?;

    // game loop
    loop {
        display(&board)?;

        if board.is_terminal() {
            match board.winner() {
                Some(player) => println!("Player {} wins!", player),
                None => println!("Draw!"),
            }
            info!(winner = ?board.winner(), moves = board.num_moves(), nodes = engine.node_count, "game over");
            break;
        }

        let player = board.turn();
        let ai_controlled = match player {
            Player::X => ai_players.0,
            Player::O => ai_players.1,
        };

        // AI player
        if ai_controlled {
            // slow down play if both players are AI
            if ai_players == (true, true) {
                std::thread::sleep(Duration::from_secs(1));
            }

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}"));
            spinner.set_message(&format!("Player {} is thinking...", player));
            spinner.enable_steady_tick(100);

            let start = Instant::now();
            let decision = engine.choose_move(&mut board, player)?;
            spinner.finish_and_clear();

            report(player, &decision, start.elapsed());

        // human player
        } else {
            let answer = prompt(
                &stdin,
                &format!("Player {} move (1-{}) > ", player, size * size),
            )?;
            let index = match answer.parse::<usize>() {
                Ok(cell) if cell >= 1 => cell - 1,
                _ => {
                    println!("Invalid number: {}", answer);
                    continue;
                }
            };
            if let Err(err) = board.place(index, player) {
                println!("{}", err);
                // try the move again
                continue;
            }
        }
    }
    Ok(())
}
