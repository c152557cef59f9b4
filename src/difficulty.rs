//! Difficulty levels and the search depth each one maps to

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// The default policy table: 1, 3 and 5 plies
    pub fn default_depth(self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 3,
            Difficulty::Hard => 5,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

/// Maps each difficulty to a search depth
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthTable {
    pub easy_depth: u32,
    pub medium_depth: u32,
    pub hard_depth: u32,
}

impl DepthTable {
    pub fn depth(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.easy_depth,
            Difficulty::Medium => self.medium_depth,
            Difficulty::Hard => self.hard_depth,
        }
    }
}

impl Default for DepthTable {
    fn default() -> Self {
        Self {
            easy_depth: Difficulty::Easy.default_depth(),
            medium_depth: Difficulty::Medium.default_depth(),
            hard_depth: Difficulty::Hard.default_depth(),
        }
    }
}
