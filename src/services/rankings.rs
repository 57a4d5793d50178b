use crate::dates;
use crate::error::AppError;
use crate::models::rankings::{
    CalculateOutcome, DayRecord, GameKingsWeek, ImmunityEntry, ImmunityOutcome, PlayerScore,
};
use crate::services::parser;
use crate::store::Store;
use chrono::NaiveDate;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

fn empty_score(name: &str, total_games: usize) -> PlayerScore {
    PlayerScore {
        name: name.to_string(),
        total_score: 0,
        games_played: 0,
        total_games,
        immunity_points: None,
    }
}

// Rank r among P participants earns P - r + 1; absentees earn nothing.
// Immunity pass points only count when no game filter is active.
pub fn points_table(
    days: &BTreeMap<String, DayRecord>,
    game: Option<&str>,
    immunity: &[ImmunityEntry],
) -> Vec<PlayerScore> {
    let considered: Vec<&DayRecord> = days
        .values()
        .filter(|day| game.map_or(true, |g| day.game == g))
        .collect();
    let total_games = considered.len();

    let mut totals: BTreeMap<String, PlayerScore> = BTreeMap::new();
    for day in &considered {
        let participants = day.ranks.len() as i64;
        for entry in &day.ranks {
            let score = totals
                .entry(entry.name.clone())
                .or_insert_with(|| empty_score(&entry.name, total_games));
            score.total_score += participants - entry.rank as i64 + 1;
            score.games_played += 1;
        }
    }

    if game.is_none() {
        for entry in immunity {
            for player in &entry.players {
                let score = totals
                    .entry(player.name.clone())
                    .or_insert_with(|| empty_score(&player.name, total_games));
                score.total_score += player.points;
                *score.immunity_points.get_or_insert(0) += player.points;
            }
        }
    }

    let mut table: Vec<PlayerScore> = totals.into_values().collect();
    table.sort_by(|a, b| {
        b.total_score
            .cmp(&a.total_score)
            .then_with(|| a.name.cmp(&b.name))
    });
    table
}

// Historical formula: participants accrue their rank, absentees accrue
// (participants that day + 1); lower totals are better.
pub fn penalty_table(days: &BTreeMap<String, DayRecord>, game: Option<&str>) -> Vec<PlayerScore> {
    let considered: Vec<&DayRecord> = days
        .values()
        .filter(|day| game.map_or(true, |g| day.game == g))
        .collect();
    let total_games = considered.len();

    let mut totals: BTreeMap<String, PlayerScore> = BTreeMap::new();
    for day in &considered {
        for entry in &day.ranks {
            totals
                .entry(entry.name.clone())
                .or_insert_with(|| empty_score(&entry.name, total_games));
        }
    }

    for day in &considered {
        let penalty = day.ranks.len() as i64 + 1;
        let mut present: BTreeSet<&str> = BTreeSet::new();
        for entry in &day.ranks {
            present.insert(entry.name.as_str());
            if let Some(score) = totals.get_mut(&entry.name) {
                score.total_score += entry.rank as i64;
                score.games_played += 1;
            }
        }
        for (name, score) in totals.iter_mut() {
            if !present.contains(name.as_str()) {
                score.total_score += penalty;
            }
        }
    }

    let mut table: Vec<PlayerScore> = totals.into_values().collect();
    table.sort_by(|a, b| {
        a.total_score
            .cmp(&b.total_score)
            .then_with(|| a.name.cmp(&b.name))
    });
    table
}

pub fn game_kings(games: &BTreeMap<String, DayRecord>, game: &str) -> Vec<GameKingsWeek> {
    let mut weeks: BTreeMap<NaiveDate, GameKingsWeek> = BTreeMap::new();
    for (date, day) in games {
        if day.game != game || day.ranks.is_empty() {
            continue;
        }
        let parsed = match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            Ok(parsed) => parsed,
            Err(_) => continue,
        };
        let top = match day.ranks.iter().map(|r| r.rank).min() {
            Some(top) => top,
            None => continue,
        };
        let winners: Vec<String> = day
            .ranks
            .iter()
            .filter(|r| r.rank == top)
            .map(|r| r.name.clone())
            .collect();

        let window = dates::week_range(parsed);
        match weeks.entry(window.start) {
            Entry::Vacant(slot) => {
                slot.insert(GameKingsWeek {
                    week: window,
                    winners,
                    best_rank: top,
                });
            }
            Entry::Occupied(mut slot) => {
                let record = slot.get_mut();
                if top < record.best_rank {
                    record.best_rank = top;
                    record.winners = winners;
                } else if top == record.best_rank {
                    for name in winners {
                        if !record.winners.contains(&name) {
                            record.winners.push(name);
                        }
                    }
                }
            }
        }
    }
    weeks.into_values().rev().collect()
}

pub fn calculate_from_text(store: &Store, text: &str) -> Result<CalculateOutcome, AppError> {
    let days = parser::parse_leaderboard(text);
    if days.is_empty() {
        return Err(AppError::BadRequest(
            "No leaderboard data found in input".into(),
        ));
    }
    let days_processed = days.len();
    let stored = store.store_days(&days)?;

    // Aggregate from the persisted document over the span just stored
    let start = stored.iter().min().cloned().unwrap_or_default();
    let end = stored.iter().max().cloned().unwrap_or_default();
    let rankings = range_table(store, &start, &end, None)?;
    Ok(CalculateOutcome {
        days_processed,
        total_players: rankings.len(),
        rankings,
    })
}

pub fn range_table(
    store: &Store,
    start: &str,
    end: &str,
    game: Option<&str>,
) -> Result<Vec<PlayerScore>, AppError> {
    let days = store.rankings_in_range(start, end)?;
    let immunity = if game.is_none() {
        store.immunity_points_in_range(start, end)?
    } else {
        Vec::new()
    };
    Ok(points_table(&days, game, &immunity))
}

pub fn kings_for_game(store: &Store, game: &str) -> Result<Vec<GameKingsWeek>, AppError> {
    let doc = store.all_rankings()?;
    Ok(game_kings(&doc.games, game))
}

pub fn submit_immunity_sheet(store: &Store, text: &str) -> Result<ImmunityOutcome, AppError> {
    let sheet = parser::parse_immunity_sheet(text)?;
    let entries_processed = store.put_immunity_points(&sheet.date, sheet.players)?;
    Ok(ImmunityOutcome {
        date: sheet.date,
        entries_processed,
        skipped: sheet.skipped,
    })
}
