//! Player roster loading and team filtering.

use std::path::Path;

use crate::error::PipelineError;
use crate::types::{FilteredRoster, PlayerRecord};

/// Load the player-info file: a JSON array of `{team, name, jersey_number}`.
pub fn load_player_info(path: &Path) -> Result<Vec<PlayerRecord>, PipelineError> {
    let content = std::fs::read_to_string(path).map_err(|e| PipelineError::Roster {
        path: path.to_path_buf(),
        message: format!("Cannot read player info: {e}"),
    })?;
    serde_json::from_str(&content).map_err(|e| PipelineError::Roster {
        path: path.to_path_buf(),
        message: format!("Cannot parse player info: {e}"),
    })
}

/// Load the player-map file: a JSON object of alias -> canonical name.
///
/// Used by caption post-processing to normalize names the model emits.
pub fn load_player_map(
    path: &Path,
) -> Result<std::collections::HashMap<String, String>, PipelineError> {
    let content = std::fs::read_to_string(path).map_err(|e| PipelineError::Roster {
        path: path.to_path_buf(),
        message: format!("Cannot read player map: {e}"),
    })?;
    serde_json::from_str(&content).map_err(|e| PipelineError::Roster {
        path: path.to_path_buf(),
        message: format!("Cannot parse player map: {e}"),
    })
}

/// Group player records by team, keep only allowed teams, and format each
/// player as `Name(JerseyNumber)`.
///
/// Pure and deterministic: teams appear in first-seen order, players keep
/// their input order, and teams outside `allowed_teams` are dropped entirely
/// rather than emitted as empty lists. Names and jersey numbers are trusted
/// as-is, with no sanitization.
pub fn filter_roster(records: &[PlayerRecord], allowed_teams: &[String]) -> FilteredRoster {
    let mut grouped = FilteredRoster::new();
    for record in records {
        grouped
            .entry(record.team.clone())
            .or_default()
            .push(format!("{}({})", record.name, record.jersey_number));
    }
    grouped.retain(|team, _| allowed_teams.iter().any(|t| t == team));
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn record(team: &str, name: &str, jersey: &str) -> PlayerRecord {
        PlayerRecord {
            team: team.to_string(),
            name: name.to_string(),
            jersey_number: jersey.to_string(),
        }
    }

    #[test]
    fn test_filter_drops_disallowed_teams_entirely() {
        let records = vec![record("A", "X", "1"), record("B", "Y", "2")];
        let allowed = vec!["A".to_string()];
        let roster = filter_roster(&records, &allowed);

        assert_eq!(roster.len(), 1);
        assert_eq!(roster.get("A").unwrap(), &vec!["X(1)".to_string()]);
        assert!(!roster.contains_key("B"));
    }

    #[test]
    fn test_filter_preserves_player_order_within_team() {
        let records = vec![
            record("A", "First", "1"),
            record("A", "Second", "2"),
            record("A", "Third", "3"),
        ];
        let roster = filter_roster(&records, &["A".to_string()]);
        assert_eq!(
            roster.get("A").unwrap(),
            &vec![
                "First(1)".to_string(),
                "Second(2)".to_string(),
                "Third(3)".to_string()
            ]
        );
    }

    #[test]
    fn test_filter_preserves_first_seen_team_order() {
        let records = vec![
            record("Wolves", "W", "1"),
            record("Aces", "A", "2"),
            record("Wolves", "W2", "3"),
        ];
        let allowed = vec!["Aces".to_string(), "Wolves".to_string()];
        let roster = filter_roster(&records, &allowed);
        let teams: Vec<&String> = roster.keys().collect();
        assert_eq!(teams, vec!["Wolves", "Aces"]);
    }

    #[test]
    fn test_filter_formats_without_sanitization() {
        let records = vec![record("A", "O'Neil Jr.", "00")];
        let roster = filter_roster(&records, &["A".to_string()]);
        assert_eq!(roster.get("A").unwrap()[0], "O'Neil Jr.(00)");
    }

    #[test]
    fn test_filter_empty_allowed_teams_yields_empty_roster() {
        let records = vec![record("A", "X", "1")];
        let roster = filter_roster(&records, &[]);
        assert!(roster.is_empty());
    }

    #[test]
    fn test_load_player_info_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"team":"A","name":"X","jersey_number":"1"}},
                {{"team":"B","name":"Y","jersey_number":"2"}}]"#
        )
        .unwrap();
        let records = load_player_info(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name, "Y");
    }

    #[test]
    fn test_load_player_info_missing_file() {
        let err = load_player_info(std::path::Path::new("/nonexistent/players.json")).unwrap_err();
        assert!(matches!(err, PipelineError::Roster { .. }));
    }

    #[test]
    fn test_load_player_map_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"J. Doe":"Jane Doe"}}"#).unwrap();
        let map = load_player_map(file.path()).unwrap();
        assert_eq!(map.get("J. Doe").map(String::as_str), Some("Jane Doe"));
    }
}
