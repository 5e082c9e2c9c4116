use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("win percentage {0} is outside [0, 1]")]
    WinPercentageOutOfRange(f64),

    #[error("{wins} championship wins exceed {appearances} championship appearances")]
    ChampionshipWinsExceedAppearances { wins: u32, appearances: u32 },

    #[error("{field} ({value}) exceeds seasons served ({seasons})")]
    ExceedsSeasons {
        field: &'static str,
        value: u32,
        seasons: u32,
    },

    #[error("win percentage {recorded} does not match record ({expected})")]
    WinPercentageMismatch { recorded: f64, expected: f64 },

    #[error("{field} ({value}) is outside [0, 100]")]
    ScoreOutOfRange { field: &'static str, value: i64 },

    #[error("severance total {total} does not match its base and bonus portions")]
    SeveranceMismatch { total: u64 },

    #[error("firing record has an empty {0}")]
    MissingStatement(&'static str),
}

#[derive(Debug, Error)]
pub enum SeasonError {
    #[error("invalid career data: {0}")]
    Validation(#[from] ValidationError),

    #[error("controlled team {0} is not registered in the league")]
    UnknownControlledTeam(u32),
}
