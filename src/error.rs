use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoiError {
    #[error("\"{0}\" is not a valid number")]
    InvalidNumber(String),

    #[error("investment cannot be zero")]
    ZeroInvestment,

    #[error("input cancelled")]
    Cancelled,

    #[error("unable to write \"{path}\": {source}")]
    Export {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("invalid choice \"{0}\"")]
    InvalidChoice(String),

    #[error("unable to parse config: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}
