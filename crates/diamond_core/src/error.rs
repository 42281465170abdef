use thiserror::Error;

/// Rejected input to schedule generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("round-robin needs an even number of teams, got {count}")]
    OddTeamCount { count: usize },

    #[error("round-robin needs at least two teams, got {count}")]
    TooFewTeams { count: usize },

    #[error("duplicate team id: {0}")]
    DuplicateTeam(String),
}

/// Season bookkeeping that no longer matches the fixture list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeasonError {
    #[error("no standings entry for team {0}")]
    MissingStandings(String),

    #[error("team {team_id} has {recorded} decisions recorded but {played} fixtures played")]
    StandingsMismatch { team_id: String, recorded: u32, played: u32 },

    #[error("fixture {fixture_id} is played on day {day} but the season is only at day {current_day}")]
    PlayedInFuture { fixture_id: String, day: u32, current_day: u32 },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
