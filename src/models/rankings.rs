use crate::dates::DateWindow;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameDay {
    pub date: String, // DD/MM/YY as parsed
    pub game: String,
    pub players: Vec<PlayerRank>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRank {
    pub name: String,
    pub rank: u32,
    pub game: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankingsDocument {
    #[serde(default)]
    pub games: BTreeMap<String, DayRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayRecord {
    pub game: String,
    pub ranks: Vec<RankEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankEntry {
    pub rank: u32,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImmunityDocument {
    #[serde(default)]
    pub points: Vec<ImmunityEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImmunityEntry {
    pub date: String,
    pub players: Vec<PlayerPoints>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPoints {
    pub name: String,
    pub points: i64,
}

#[derive(Debug)]
pub struct ImmunitySheet {
    pub date: String,
    pub players: Vec<PlayerPoints>,
    pub skipped: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerScore {
    pub name: String,
    pub total_score: i64,
    pub games_played: usize,
    pub total_games: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub immunity_points: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameKingsWeek {
    pub week: DateWindow,
    pub winners: Vec<String>,
    pub best_rank: u32,
}

#[derive(Debug, Serialize)]
pub struct CalculateOutcome {
    pub days_processed: usize,
    pub total_players: usize,
    pub rankings: Vec<PlayerScore>,
}

#[derive(Debug, Serialize)]
pub struct ImmunityOutcome {
    pub date: String,
    pub entries_processed: usize,
    pub skipped: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub start: Option<String>,
    pub end: Option<String>,
    pub game: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GameQuery {
    pub game: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ImmunitySubmission {
    pub data: String,
}
