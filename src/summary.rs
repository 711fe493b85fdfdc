//! Series summaries and text scorecards

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::PERFECT_GAME;
use crate::scoring::{Game, Scorekeeper};

/// One player's completed games
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub name: String,
    /// Totals of completed games, in order
    pub game_scores: Vec<u16>,
    pub average: u16,
}

/// End-of-series standings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub players: Vec<PlayerSummary>,
    /// Sum of every player's average
    pub combined_average: u32,
    /// Best possible combined average
    pub max_possible: u32,
}

impl From<&Scorekeeper> for SeriesSummary {
    fn from(scores: &Scorekeeper) -> Self {
        let players = scores
            .players
            .iter()
            .map(|p| PlayerSummary {
                name: p.name.clone(),
                game_scores: p
                    .series
                    .games
                    .iter()
                    .filter(|g| g.is_complete)
                    .map(|g| g.total_score)
                    .collect(),
                average: p.series.series_average(),
            })
            .collect::<Vec<_>>();

        Self {
            combined_average: scores.combined_average(),
            max_possible: PERFECT_GAME as u32 * players.len() as u32,
            players,
        }
    }
}

impl SeriesSummary {
    /// Highest single completed game across all players
    pub fn high_game(&self) -> Option<(&str, u16)> {
        self.players
            .iter()
            .flat_map(|p| p.game_scores.iter().map(move |&s| (p.name.as_str(), s)))
            .max_by_key(|&(_, s)| s)
    }
}

impl fmt::Display for SeriesSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Series complete")?;
        for player in &self.players {
            let games = player
                .game_scores
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(f, "  {:<10} [{}] avg {}", player.name, games, player.average)?;
        }
        if self.players.len() > 1 {
            writeln!(f, "  Combined average: {}", self.combined_average)?;
        }
        write!(f, "  Max possible: {}", self.max_possible)
    }
}

/// Three-line text scorecard for one game
///
/// ```text
/// |  1  |  2  | ... |   10    |
/// | X   | 7 / | ... | X X X   |
/// |  20 |  39 | ... |     150 |
/// ```
pub fn render_game(game: &Game) -> String {
    let mut numbers = String::from("|");
    let mut marks = String::from("|");
    let mut totals = String::from("|");

    for frame in &game.frames {
        let cell = frame.max_throws() * 2 + 1;
        let mark_text: String = frame
            .marks()
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        let total = frame.cumulative.map(|c| c.to_string()).unwrap_or_default();

        numbers.push_str(&format!("{:^cell$}|", frame.frame_number));
        marks.push_str(&format!(" {:<w$}|", mark_text, w = cell - 1));
        totals.push_str(&format!("{:>w$} |", total, w = cell - 1));
    }

    format!("{}\n{}\n{}", numbers, marks, totals)
}

/// Every game a player has started, headed by name and game number
pub fn render_scorecard(player: &crate::scoring::Player) -> String {
    player
        .series
        .games
        .iter()
        .enumerate()
        .map(|(i, game)| {
            format!(
                "{} - Game {} ({})\n{}",
                player.name,
                i + 1,
                game.total_score,
                render_game(game)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
