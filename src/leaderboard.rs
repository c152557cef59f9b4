//! Match scoring and the two plain-text leaderboards
//!
//! The human leaderboard keeps one `name:score` line per player holding their
//! best score. The computer-vs-computer match log keeps one line per match,
//! sorted by the highest score mentioned in the line.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::board::{GameOutcome, Piece};
use crate::error::LeaderboardError;

/// Points a human earns for beating the computer
pub const HUMAN_WIN_POINTS: u32 = 100;
/// Points each side earns for a drawn computer-vs-computer match
pub const DRAW_POINTS: u32 = 50;

const BASE_WIN_POINTS: u32 = 1000;
const POINTS_PER_MOVE: u32 = 20;
const MIN_WIN_POINTS: u32 = 100;

/// Scores a computer-vs-computer match as `(player one, player two)`
///
/// The winner's score shrinks by 20 for every move player one made, but never
/// drops below 100.
pub fn match_scores(outcome: GameOutcome, player_one_moves: usize) -> (u32, u32) {
    let penalty = (player_one_moves as u32).saturating_mul(POINTS_PER_MOVE);
    let winner = BASE_WIN_POINTS.saturating_sub(penalty).max(MIN_WIN_POINTS);
    match outcome {
        GameOutcome::Win(Piece::PlayerOne) => (winner, 0),
        GameOutcome::Win(Piece::PlayerTwo) => (0, winner),
        GameOutcome::Draw => (DRAW_POINTS, DRAW_POINTS),
        GameOutcome::InProgress => (0, 0),
    }
}

fn read_lines(path: &Path) -> Result<Vec<String>, LeaderboardError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect()),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!("{} not found, starting empty", path.display());
            Ok(Vec::new())
        }
        Err(source) => Err(LeaderboardError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn write_lines<'a, I>(path: &Path, lines: I) -> Result<(), LeaderboardError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut content = String::new();
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    fs::write(path, content).map_err(|source| LeaderboardError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("saved {}", path.display());
    Ok(())
}

/// Best scores of human players
#[derive(Debug, Clone)]
pub struct Leaderboard {
    path: PathBuf,
    scores: BTreeMap<String, u32>,
}

impl Leaderboard {
    /// Loads the leaderboard at `path`, treating a missing file as empty
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LeaderboardError> {
        let path = path.as_ref().to_path_buf();
        let mut scores = BTreeMap::new();

        for (index, line) in read_lines(&path)?.into_iter().enumerate() {
            let parsed = line
                .rsplit_once(':')
                .and_then(|(name, score)| Some((name, score.trim().parse::<u32>().ok()?)));
            match parsed {
                Some((name, score)) => {
                    scores.insert(name.to_string(), score);
                }
                None => {
                    return Err(LeaderboardError::Malformed {
                        path,
                        line: index + 1,
                        content: line.clone(),
                    })
                }
            }
        }
        Ok(Self { path, scores })
    }

    /// Records `score` for `name`, keeping only their best
    ///
    /// Returns true if the stored score changed.
    pub fn record(&mut self, name: &str, score: u32) -> bool {
        match self.scores.get_mut(name) {
            Some(best) if *best >= score => false,
            Some(best) => {
                *best = score;
                true
            }
            None => {
                self.scores.insert(name.to_string(), score);
                true
            }
        }
    }

    pub fn best(&self, name: &str) -> Option<u32> {
        self.scores.get(name).copied()
    }

    /// Players ordered from the highest score down
    pub fn ranked(&self) -> Vec<(&str, u32)> {
        let mut ranked: Vec<_> = self.scores.iter().map(|(n, &s)| (n.as_str(), s)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }

    pub fn save(&self) -> Result<(), LeaderboardError> {
        let lines: Vec<String> = self
            .scores
            .iter()
            .map(|(name, score)| format!("{}:{}", name, score))
            .collect();
        write_lines(&self.path, lines.iter().map(String::as_str))
    }
}

/// The result of one computer-vs-computer match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    /// Formatted as `YYYY-MM-DD HH:MM`
    pub timestamp: String,
    pub outcome: GameOutcome,
    /// Total tiles on the board when the match ended
    pub moves: usize,
    /// Scores of player one and player two
    pub scores: (u32, u32),
}

impl MatchRecord {
    /// A record stamped with the current local time
    pub fn now(outcome: GameOutcome, moves: usize, scores: (u32, u32)) -> Self {
        Self {
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M").to_string(),
            outcome,
            moves,
            scores,
        }
    }

    pub fn to_line(&self) -> String {
        let (one, two) = self.scores;
        match self.outcome {
            GameOutcome::Win(Piece::PlayerTwo) => format!(
                "[{}] Winner: AI 2 | Moves: {} | AI 2: {}, AI 1: {}",
                self.timestamp, self.moves, two, one
            ),
            GameOutcome::Win(Piece::PlayerOne) => format!(
                "[{}] Winner: AI 1 | Moves: {} | AI 1: {}, AI 2: {}",
                self.timestamp, self.moves, one, two
            ),
            GameOutcome::Draw | GameOutcome::InProgress => format!(
                "[{}] Winner: Draw | Moves: {} | Draw: {}, {}",
                self.timestamp, self.moves, one, two
            ),
        }
    }
}

/// The highest number that follows a `": "` in a match log line
pub fn line_score(line: &str) -> u32 {
    line.match_indices(": ")
        .filter_map(|(i, sep)| {
            let rest = &line[i + sep.len()..];
            let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
            rest[..digits].parse::<u32>().ok()
        })
        .max()
        .unwrap_or(0)
}

/// Computer-vs-computer results, best first
#[derive(Debug, Clone)]
pub struct MatchLog {
    path: PathBuf,
    entries: Vec<String>,
}

impl MatchLog {
    /// Loads the match log at `path`, treating a missing file as empty
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LeaderboardError> {
        let path = path.as_ref().to_path_buf();
        let entries = read_lines(&path)?;
        Ok(Self { path, entries })
    }

    /// Adds a match and re-sorts the log by score
    pub fn record(&mut self, record: &MatchRecord) {
        self.entries.push(record.to_line());
        // stable, so equal scores keep their insertion order
        self.entries.sort_by_key(|entry| std::cmp::Reverse(line_score(entry)));
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn save(&self) -> Result<(), LeaderboardError> {
        write_lines(&self.path, self.entries.iter().map(String::as_str))
    }
}
