use crate::error::AppError;
use crate::models::solver::GRID_INPUT_VALUES;
use chrono::NaiveDate;

pub fn validate_iso_date(value: &str, field: &str) -> Result<(), AppError> {
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(_) => Ok(()),
        Err(_) => Err(AppError::BadRequest(format!(
            "Invalid {} date: {}",
            field, value
        ))),
    }
}

pub fn validate_range(
    start: Option<&str>,
    end: Option<&str>,
) -> Result<(String, String), AppError> {
    let start = start
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("Start date is required".into()))?;
    let end = end
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("End date is required".into()))?;
    validate_iso_date(start, "start")?;
    validate_iso_date(end, "end")?;
    Ok((start.to_string(), end.to_string()))
}

pub fn validate_game_filter(game: Option<&str>) -> Option<String> {
    game.map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
}

pub fn require_game(game: Option<&str>) -> Result<String, AppError> {
    validate_game_filter(game)
        .ok_or_else(|| AppError::BadRequest("Game parameter is required".into()))
}

pub fn validate_grid_line(input: &str) -> Result<String, AppError> {
    let values: Vec<&str> = input.split_whitespace().collect();
    if values.len() != GRID_INPUT_VALUES {
        return Err(AppError::BadRequest(format!(
            "Grid input must contain {} values, got {}",
            GRID_INPUT_VALUES,
            values.len()
        )));
    }
    for value in &values {
        if value.parse::<i64>().is_err() {
            return Err(AppError::BadRequest(format!(
                "Grid value is not an integer: {}",
                value
            )));
        }
    }
    Ok(values.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_range_accepts_iso_dates() {
        let (start, end) = validate_range(Some("2025-06-12"), Some("2025-06-18")).unwrap();
        assert_eq!(start, "2025-06-12");
        assert_eq!(end, "2025-06-18");
    }

    #[test]
    fn test_validate_range_requires_both_ends() {
        assert!(validate_range(None, Some("2025-06-18")).is_err());
        assert!(validate_range(Some("2025-06-12"), None).is_err());
        assert!(validate_range(Some("  "), Some("2025-06-18")).is_err());
    }

    #[test]
    fn test_validate_range_rejects_non_iso() {
        assert!(validate_range(Some("16/06/25"), Some("2025-06-18")).is_err());
        assert!(validate_range(Some("2025-06-12"), Some("2025-13-01")).is_err());
    }

    #[test]
    fn test_game_filter_blank_is_absent() {
        assert_eq!(validate_game_filter(Some("  ")), None);
        assert_eq!(validate_game_filter(None), None);
        assert_eq!(
            validate_game_filter(Some(" Wordle ")).as_deref(),
            Some("Wordle")
        );
        assert!(require_game(Some("")).is_err());
    }

    #[test]
    fn test_grid_line_counts_values() {
        let line = vec!["5"; GRID_INPUT_VALUES].join(" ");
        assert_eq!(validate_grid_line(&line).unwrap(), line);
        assert!(validate_grid_line("1 2 3").is_err());
    }

    #[test]
    fn test_grid_line_rejects_non_numeric() {
        let mut values = vec!["5"; GRID_INPUT_VALUES];
        values[10] = "abc";
        assert!(validate_grid_line(&values.join(" ")).is_err());
    }

    #[test]
    fn test_grid_line_normalizes_whitespace() {
        let line = vec!["3"; GRID_INPUT_VALUES].join("  ");
        let normalized = validate_grid_line(&line).unwrap();
        assert_eq!(normalized, vec!["3"; GRID_INPUT_VALUES].join(" "));
    }
}
