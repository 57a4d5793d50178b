use crate::dates;
use crate::error::AppError;
use crate::models::rankings::{GameDay, ImmunitySheet, PlayerPoints, PlayerRank};
use regex::Regex;
use std::sync::OnceLock;

fn header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\w+(?:\s+\w+)*)\s+Leaderboard\s+(\d{2}/\d{2}/\d{2})").unwrap()
    })
}

fn rank_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d+)\.\s*(.+?)(?:\s+(?:\d+/\d+|\d+:\d+|[\d,]+|X).*)?$").unwrap()
    })
}

// Zero-width joiners that chat clients sneak into copied leaderboards
fn joiner_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\x{200B}\x{200C}\x{200D}\x{2060}\x{FEFF}]").unwrap())
}

fn fraction_tail_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+\d+/\d+.*$").unwrap())
}

fn clock_tail_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+\d+:\d+.*$").unwrap())
}

fn grouped_number_tail_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+\d+,\s*\d+.*$").unwrap())
}

fn x_tail_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+X.*$").unwrap())
}

fn and_split_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+and\s+").unwrap())
}

pub fn parse_leaderboard(text: &str) -> Vec<GameDay> {
    let mut days: Vec<GameDay> = Vec::new();
    for raw_line in text.lines() {
        let cleaned = joiner_regex().replace_all(raw_line, " ");
        let line = cleaned.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = header_regex().captures(line) {
            days.push(GameDay {
                date: caps[2].to_string(),
                game: caps[1].trim().to_string(),
                players: Vec::new(),
            });
            continue;
        }

        // Rank lines only count once a leaderboard header has opened a day
        let day = match days.last_mut() {
            Some(day) => day,
            None => continue,
        };
        let caps = match rank_line_regex().captures(line) {
            Some(caps) => caps,
            None => continue,
        };
        let rank: u32 = match caps[1].parse() {
            Ok(rank) => rank,
            Err(_) => continue,
        };
        let section = strip_score_tokens(&caps[2]);
        let game = day.game.clone();
        for name in split_names(&section) {
            day.players.push(PlayerRank {
                name,
                rank,
                game: game.clone(),
            });
        }
    }
    days
}

fn strip_score_tokens(rest: &str) -> String {
    let mut section = rest.trim().to_string();
    for re in [
        fraction_tail_regex(),
        clock_tail_regex(),
        grouped_number_tail_regex(),
        x_tail_regex(),
    ] {
        section = re.replace(&section, "").into_owned();
    }
    section.trim().to_string()
}

fn split_names(section: &str) -> Vec<String> {
    let mut names = Vec::new();
    for part in section.split(',') {
        for candidate in and_split_regex().split(part) {
            let cleaned: String = candidate
                .chars()
                .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
                .collect();
            let cleaned = cleaned.trim();
            if !cleaned.is_empty() {
                names.push(cleaned.to_string());
            }
        }
    }
    names
}

pub fn parse_immunity_sheet(text: &str) -> Result<ImmunitySheet, AppError> {
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
    let date_line = lines
        .next()
        .ok_or_else(|| AppError::BadRequest("Immunity pass data is empty".into()))?;
    let date = dates::canonical_date(date_line).ok_or_else(|| {
        AppError::BadRequest(format!("Invalid immunity pass date: {}", date_line))
    })?;

    let mut players = Vec::new();
    let mut skipped = Vec::new();
    for line in lines {
        match split_points_line(line) {
            Some(player) => players.push(player),
            None => skipped.push(line.to_string()),
        }
    }
    if players.is_empty() {
        return Err(AppError::BadRequest("No valid immunity pass entries found".into()));
    }
    Ok(ImmunitySheet {
        date,
        players,
        skipped,
    })
}

// Points are the final token; everything before them is the name
fn split_points_line(line: &str) -> Option<PlayerPoints> {
    let (name, points) = line.rsplit_once(char::is_whitespace)?;
    let points: i64 = points.parse().ok()?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some(PlayerPoints {
        name: name.to_string(),
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_day_per_header_in_order() {
        let text = "Wordle Leaderboard 16/06/25\n\
                    1. Mayank 2/6\n\
                    Geo Leaderboard 17/06/25\n\
                    1. Sage 3/7\n\
                    Sunday Marathon Leaderboard 15/06/25\n\
                    1. Anushka 2, 5000, 12:41";
        let days = parse_leaderboard(text);
        assert_eq!(days.len(), 3);
        assert_eq!(days[0].game, "Wordle");
        assert_eq!(days[0].date, "16/06/25");
        assert_eq!(days[1].game, "Geo");
        assert_eq!(days[2].game, "Sunday Marathon");
        assert_eq!(days[2].date, "15/06/25");
    }

    #[test]
    fn test_end_to_end_sample() {
        let days = parse_leaderboard(
            "Wordle Leaderboard 16/06/25\n1. Mayank 2/6, 25\n2. Sage 3/6, 24",
        );
        assert_eq!(days.len(), 1);
        let day = &days[0];
        assert_eq!(day.date, "16/06/25");
        assert_eq!(day.game, "Wordle");
        assert_eq!(day.players.len(), 2);
        assert_eq!(day.players[0].name, "Mayank");
        assert_eq!(day.players[0].rank, 1);
        assert_eq!(day.players[0].game, "Wordle");
        assert_eq!(day.players[1].name, "Sage");
        assert_eq!(day.players[1].rank, 2);
    }

    #[test]
    fn test_comma_tie_yields_all_names() {
        let days = parse_leaderboard(
            "Word Games Leaderboard 17/06/25\n9. Akd, Monika, Prakriti, Megha 4/6",
        );
        let players = &days[0].players;
        assert_eq!(players.len(), 4);
        let names: Vec<&str> = players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Akd", "Monika", "Prakriti", "Megha"]);
        assert!(players.iter().all(|p| p.rank == 9));
    }

    #[test]
    fn test_and_joined_tie() {
        let days = parse_leaderboard("Geo Leaderboard 17/06/25\n3. Prakriti and Arnab 3/7");
        let players = &days[0].players;
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].name, "Prakriti");
        assert_eq!(players[1].name, "Arnab");
        assert!(players.iter().all(|p| p.rank == 3));
    }

    #[test]
    fn test_mixed_comma_and_pair_with_decorated_score() {
        let days =
            parse_leaderboard("Wordle Leaderboard 16/06/25\n12. Manav and Paarth 5/6, 20X");
        let names: Vec<&str> = days[0].players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Manav", "Paarth"]);
    }

    #[test]
    fn test_strips_invisible_joiners() {
        let days = parse_leaderboard(
            "Wordle Leaderboard 16/06/25\n1.\u{2060} \u{2060}Anushka 0:51",
        );
        assert_eq!(days[0].players.len(), 1);
        assert_eq!(days[0].players[0].name, "Anushka");
        assert_eq!(days[0].players[0].rank, 1);
    }

    #[test]
    fn test_marathon_scores_stripped() {
        let days = parse_leaderboard("Sunday Marathon Leaderboard 15/06/25\n1. Sage 2, 5000, 12:41");
        assert_eq!(days[0].players.len(), 1);
        assert_eq!(days[0].players[0].name, "Sage");
    }

    #[test]
    fn test_comma_grouped_number_stripped() {
        let days = parse_leaderboard("Geo Leaderboard 14/06/25\n2. Sankar 41,766");
        assert_eq!(days[0].players.len(), 1);
        assert_eq!(days[0].players[0].name, "Sankar");
    }

    #[test]
    fn test_header_decorations_ignored() {
        let days = parse_leaderboard("\u{1F3C6} Wordle Leaderboard 16/06/25 \u{1F3C6}\n1. Mayank 2/6");
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].game, "Wordle");
        assert_eq!(days[0].date, "16/06/25");
    }

    #[test]
    fn test_rank_line_without_header_ignored() {
        assert!(parse_leaderboard("1. Mayank 2/6\n2. Sage 3/6").is_empty());
    }

    #[test]
    fn test_unmatched_lines_ignored() {
        let days = parse_leaderboard(
            "Wordle Leaderboard 16/06/25\nGreat games everyone!\n1. Mayank 2/6\n\n",
        );
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].players.len(), 1);
    }

    #[test]
    fn test_duplicate_ranks_preserved_in_source_order() {
        let days = parse_leaderboard(
            "Wordle Leaderboard 16/06/25\n1. Anushka 0:51\n1. Mayank 0:51\n3. Sage 1:10",
        );
        let players = &days[0].players;
        assert_eq!(players.len(), 3);
        assert_eq!(players[0].name, "Anushka");
        assert_eq!(players[1].name, "Mayank");
        assert_eq!(players[0].rank, 1);
        assert_eq!(players[1].rank, 1);
        assert_eq!(players[2].rank, 3);
    }

    #[test]
    fn test_name_decorations_removed() {
        let days = parse_leaderboard("Geo Leaderboard 14/06/25\n5. @Vangi! 3/6");
        assert_eq!(days[0].players[0].name, "Vangi");
    }

    #[test]
    fn test_immunity_sheet_parses_names_with_spaces() {
        let sheet = parse_immunity_sheet("20/06/2025\nMayank 3\nMary Jane 5").unwrap();
        assert_eq!(sheet.date, "2025-06-20");
        assert_eq!(
            sheet.players,
            vec![
                PlayerPoints {
                    name: "Mayank".into(),
                    points: 3
                },
                PlayerPoints {
                    name: "Mary Jane".into(),
                    points: 5
                },
            ]
        );
        assert!(sheet.skipped.is_empty());
    }

    #[test]
    fn test_immunity_sheet_short_year_date() {
        let sheet = parse_immunity_sheet("20/06/25\nMayank 3").unwrap();
        assert_eq!(sheet.date, "2025-06-20");
    }

    #[test]
    fn test_immunity_sheet_skips_malformed_lines() {
        let sheet = parse_immunity_sheet("20/06/2025\nMayank 3\nbadline\nSage x").unwrap();
        assert_eq!(sheet.players.len(), 1);
        assert_eq!(sheet.skipped, vec!["badline".to_string(), "Sage x".to_string()]);
    }

    #[test]
    fn test_immunity_sheet_requires_date_line() {
        assert!(parse_immunity_sheet("Mayank 3\nSage 5").is_err());
        assert!(parse_immunity_sheet("").is_err());
    }

    #[test]
    fn test_immunity_sheet_requires_valid_entries() {
        assert!(parse_immunity_sheet("20/06/2025\nnothing here at all").is_err());
    }
}
