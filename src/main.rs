use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

use std::io::{stdin, stdout, Write};
use std::path::PathBuf;
use std::time::Duration;

use connect4_minimax::{
    config::AppConfig,
    game::{Controller, Game},
    leaderboard::{match_scores, Leaderboard, MatchLog, MatchRecord, HUMAN_WIN_POINTS},
    search::Searcher,
    Difficulty, GameOutcome, Grid, Piece,
};

mod display;
use display::display;

#[derive(Parser)]
#[command(name = "connect4", about = "Play Connect 4 against a minimax engine")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect4.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play against the computer
    Play {
        /// Name recorded on the leaderboard
        #[arg(long, default_value = "Player")]
        name: String,

        #[arg(long, value_enum, default_value = "medium")]
        difficulty: Difficulty,

        /// Who drops the first tile, chosen at random when omitted
        #[arg(long, value_enum)]
        first: Option<First>,
    },
    /// Two humans sharing the keyboard
    Pvp,
    /// Let the computer play itself
    AiVsAi {
        /// Number of matches to play
        #[arg(long, default_value_t = 1)]
        games: usize,

        /// Skip drawing the board for a single match
        #[arg(long)]
        quiet: bool,
    },
    /// Show the human leaderboard or the computer match log
    Leaderboard {
        #[arg(long)]
        matches: bool,
    },
    /// Print the engine's move for a position
    Suggest {
        /// Moves played so far as one-indexed columns, e.g. "4453"
        #[arg(long, default_value = "")]
        moves: String,

        #[arg(long, value_enum, default_value = "hard")]
        difficulty: Difficulty,
    },
}

#[derive(Copy, Clone, ValueEnum)]
enum First {
    Human,
    Computer,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    match cli.command {
        Command::Play {
            name,
            difficulty,
            first,
        } => play_vs_computer(&config, &name, difficulty, first),
        Command::Pvp => play_vs_human(),
        Command::AiVsAi { games, quiet } => {
            if games == 1 && !quiet {
                watch_match(&config)
            } else {
                run_series(&config, games)
            }
        }
        Command::Leaderboard { matches } => show_leaderboard(&config, matches),
        Command::Suggest { moves, difficulty } => suggest(&config, &moves, difficulty),
    }
}

/// Prompts until the human enters a playable column
fn human_turn(game: &mut Game) -> Result<()> {
    let stdin = stdin();
    loop {
        print!("Player {} move input > ", game.to_move().number());
        stdout().flush().expect("Failed to flush to stdout!");
        let mut input_str = String::new();
        stdin.read_line(&mut input_str)?;

        let column = match input_str.trim().parse::<usize>() {
            Ok(column) if column >= 1 => column - 1,
            _ => {
                println!("Invalid number: {}", input_str.trim());
                continue;
            }
        };
        match game.play_checked(column) {
            Ok(_) => return Ok(()),
            // try the move again
            Err(err) => println!("{}", err),
        }
    }
}

fn announce(game: &Game, names: [&str; 2]) -> Result<()> {
    display(game.grid())?;
    match game.outcome() {
        GameOutcome::Win(piece) => println!("{} wins!", names[piece.number() - 1]),
        GameOutcome::Draw => println!("Draw!"),
        GameOutcome::InProgress => {}
    }
    Ok(())
}

fn play_vs_computer(
    config: &AppConfig,
    name: &str,
    difficulty: Difficulty,
    first: Option<First>,
) -> Result<()> {
    let depth = config.depth(difficulty);
    let first = match first {
        Some(First::Human) => Piece::PlayerOne,
        Some(First::Computer) => Piece::PlayerTwo,
        None if rand::random::<bool>() => Piece::PlayerOne,
        None => Piece::PlayerTwo,
    };
    println!("Welcome to Connect 4, {} ({} difficulty)\n", name, difficulty);

    // the human always holds player one's tiles
    let mut game = Game::starting_with(Controller::Human, Controller::Computer { depth }, first);
    let mut searchers = [
        config.search.searcher(config.search.tie_break),
        config.search.searcher(config.search.tie_break),
    ];

    while !game.outcome().is_over() {
        display(game.grid())?;
        match game.controller(game.to_move()) {
            Controller::Human => human_turn(&mut game)?,
            Controller::Computer { .. } => {
                println!("AI is thinking...");
                stdout().flush().expect("Failed to flush to stdout!");
                game.advance(&mut searchers)?;
            }
        }
    }
    announce(&game, [name, "AI"])?;

    let score = match game.outcome() {
        GameOutcome::Win(Piece::PlayerOne) => HUMAN_WIN_POINTS,
        _ => 0,
    };
    let mut leaderboard = Leaderboard::load(&config.leaderboard.path)?;
    if leaderboard.record(name, score) {
        leaderboard.save()?;
    }
    println!("Score: {}", score);
    Ok(())
}

fn play_vs_human() -> Result<()> {
    let mut game = Game::new(Controller::Human, Controller::Human);
    while !game.outcome().is_over() {
        display(game.grid())?;
        human_turn(&mut game)?;
    }
    announce(&game, ["Player 1", "Player 2"])
}

fn computer_game(config: &AppConfig) -> Game {
    let depth = config.depth(config.ai_vs_ai.difficulty);
    Game::new(
        Controller::Computer { depth },
        Controller::Computer { depth },
    )
}

fn record_matches(config: &AppConfig, games: &[Game]) -> Result<()> {
    let mut log = MatchLog::load(&config.leaderboard.match_log_path)?;
    for game in games {
        let scores = match_scores(game.outcome(), game.player_one_moves());
        log.record(&MatchRecord::now(
            game.outcome(),
            game.grid().piece_count(),
            scores,
        ));
    }
    log.save()?;
    Ok(())
}

/// Plays one computer match, drawing the board after every move
fn watch_match(config: &AppConfig) -> Result<()> {
    let mut game = computer_game(config);
    let tie_break = config.ai_vs_ai.tie_break;
    let mut searchers = [
        config.search.searcher(tie_break),
        config.search.searcher(tie_break),
    ];
    let depth = config.depth(config.ai_vs_ai.difficulty);

    while !game.outcome().is_over() {
        display(game.grid())?;
        let piece = game.to_move();
        let searcher = &mut searchers[piece.number() - 1];
        if let Some(column) = game.computer_move(searcher, depth)? {
            println!("AI {} plays column {}", piece.number(), column + 1);
        }
        std::thread::sleep(Duration::from_millis(config.ai_vs_ai.move_delay_ms));
    }
    announce(&game, ["AI 1", "AI 2"])?;

    let (one, two) = match_scores(game.outcome(), game.player_one_moves());
    println!("AI 1: {}, AI 2: {}", one, two);
    record_matches(config, &[game])
}

/// Plays `games` computer matches in parallel and logs every result
fn run_series(config: &AppConfig, games: usize) -> Result<()> {
    let progress = ProgressBar::new(games as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Playing matches: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );

    let tie_break = config.ai_vs_ai.tie_break;
    let finished = (0..games)
        .into_par_iter()
        .map(|index| -> Result<Game> {
            let mut game = computer_game(config);
            // offset the seed so reproducible series still vary between matches
            let mut searchers = match config.search.seed {
                Some(seed) => {
                    let seed = seed.wrapping_add(2 * index as u64);
                    [
                        Searcher::seeded(tie_break, seed),
                        Searcher::seeded(tie_break, seed.wrapping_add(1)),
                    ]
                }
                None => [
                    Searcher::with_tie_break(tie_break),
                    Searcher::with_tie_break(tie_break),
                ],
            };
            game.advance(&mut searchers)?;
            progress.inc(1);
            Ok(game)
        })
        .collect::<Result<Vec<Game>>>()?;
    progress.finish_and_clear();

    let mut wins = [0usize; 2];
    let mut draws = 0;
    for game in finished.iter() {
        match game.outcome() {
            GameOutcome::Win(piece) => wins[piece.number() - 1] += 1,
            _ => draws += 1,
        }
    }
    println!(
        "AI 1 wins: {}, AI 2 wins: {}, draws: {}",
        wins[0], wins[1], draws
    );
    record_matches(config, &finished)
}

fn show_leaderboard(config: &AppConfig, matches: bool) -> Result<()> {
    if matches {
        let log = MatchLog::load(&config.leaderboard.match_log_path)?;
        if log.entries().is_empty() {
            println!("No AI vs AI games yet!");
        }
        for entry in log.entries() {
            println!("{}", entry);
        }
    } else {
        let leaderboard = Leaderboard::load(&config.leaderboard.path)?;
        let ranked = leaderboard.ranked();
        if ranked.is_empty() {
            println!("No scores yet!");
        }
        for (place, (name, score)) in ranked.iter().enumerate() {
            println!("{:>3}. {:<20} {}", place + 1, name, score);
        }
    }
    Ok(())
}

fn suggest(config: &AppConfig, moves: &str, difficulty: Difficulty) -> Result<()> {
    let grid = Grid::from_moves(moves)?;
    display(&grid)?;

    if grid.outcome().is_over() {
        println!("The game is already over: {:?}", grid.outcome());
        return Ok(());
    }
    let piece = if grid.piece_count() % 2 == 0 {
        Piece::PlayerOne
    } else {
        Piece::PlayerTwo
    };
    let mut searcher = config.search.searcher(config.search.tie_break);
    let depth = config.depth(difficulty);
    match searcher.choose_move(&grid, depth, piece, piece.opponent()) {
        Some(column) => println!(
            "Best move for player {}: {} ({} positions searched)",
            piece.number(),
            column + 1,
            searcher.node_count
        ),
        None => println!("No legal moves"),
    }
    Ok(())
}
