use rusequence_core::{Difficulty, Player, RulesConfig, TeamColor};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct CliOptions {
    pub players: usize,
    pub difficulties: Vec<Difficulty>,
    pub seed: Option<u64>,
    pub max_turns: Option<u32>,
    pub think_scale: f64,
    pub config: Option<PathBuf>,
    pub save: Option<PathBuf>,
    pub load: Option<PathBuf>,
    pub json: bool,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            players: 2,
            difficulties: vec![Difficulty::Hard, Difficulty::Medium],
            seed: None,
            max_turns: None,
            think_scale: 0.0,
            config: None,
            save: None,
            load: None,
            json: false,
        }
    }
}

pub fn parse_cli_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions::default();
    let mut idx = 0usize;
    while idx < args.len() {
        let value = args.get(idx + 1);
        let mut consumed = true;
        match (args[idx].as_str(), value) {
            ("--players" | "-p", Some(value)) => {
                if let Ok(count) = value.parse::<usize>() {
                    options.players = count;
                }
            }
            ("--difficulty" | "-d", Some(value)) => {
                let parsed: Vec<Difficulty> =
                    value.split(',').filter_map(Difficulty::parse).collect();
                if !parsed.is_empty() {
                    options.difficulties = parsed;
                }
            }
            ("--seed", Some(value)) => options.seed = value.parse::<u64>().ok(),
            ("--max-turns", Some(value)) => options.max_turns = value.parse::<u32>().ok(),
            ("--think-scale", Some(value)) => {
                options.think_scale = value.parse::<f64>().unwrap_or(0.0)
            }
            ("--config", Some(value)) => options.config = Some(PathBuf::from(value)),
            ("--save", Some(value)) => options.save = Some(PathBuf::from(value)),
            ("--load", Some(value)) => options.load = Some(PathBuf::from(value)),
            ("--json", _) => {
                options.json = true;
                consumed = false;
            }
            _ => consumed = false,
        }
        idx += if consumed { 2 } else { 1 };
    }
    options
}

/// Three teams when the table divides by three, two otherwise.
pub fn team_count(players: usize) -> usize {
    if players >= 3 && players % 3 == 0 {
        3
    } else {
        2
    }
}

/// Automated seats, teams alternating around the table.
pub fn build_players(options: &CliOptions) -> Vec<Player> {
    let teams = team_count(options.players);
    (0..options.players)
        .map(|seat| {
            let team = TeamColor::ALL[seat % teams];
            let difficulty = options
                .difficulties
                .get(seat % options.difficulties.len().max(1))
                .copied()
                .unwrap_or_default();
            Player::automated(format!("{team}-{}", seat / teams + 1), team, difficulty)
        })
        .collect()
}

pub fn load_rules(path: &Path) -> anyhow::Result<RulesConfig> {
    let body = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn parses_known_flags() {
        let options = parse_cli_options(&args(&[
            "--players",
            "3",
            "--difficulty",
            "easy,hard",
            "--seed",
            "42",
            "--json",
            "--max-turns",
            "50",
        ]));
        assert_eq!(options.players, 3);
        assert_eq!(options.difficulties, vec![Difficulty::Easy, Difficulty::Hard]);
        assert_eq!(options.seed, Some(42));
        assert_eq!(options.max_turns, Some(50));
        assert!(options.json);
    }

    #[test]
    fn unknown_difficulty_keeps_default() {
        let options = parse_cli_options(&args(&["--difficulty", "brutal"]));
        assert_eq!(options.difficulties, CliOptions::default().difficulties);
    }

    #[test]
    fn seats_alternate_teams() {
        let options = CliOptions {
            players: 6,
            ..CliOptions::default()
        };
        let players = build_players(&options);
        let teams: Vec<TeamColor> = players.iter().map(|p| p.team).collect();
        assert_eq!(
            teams,
            vec![
                TeamColor::Blue,
                TeamColor::Green,
                TeamColor::Red,
                TeamColor::Blue,
                TeamColor::Green,
                TeamColor::Red
            ]
        );
        assert_eq!(team_count(4), 2);
        assert!(players.iter().all(Player::is_automated));
    }

    #[test]
    fn partial_rules_file_fills_defaults() {
        let rules: RulesConfig = serde_json::from_str(r#"{"run_length": 4}"#).expect("parse");
        assert_eq!(rules.run_length, 4);
        assert_eq!(rules.hand_size_for(2), 7);
    }
}
