#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    YAML(#[from] serde_yaml::Error),
    #[error(transparent)]
    Regex(#[from] fancy_regex::Error),
    #[error(transparent)]
    AhoCorasick(#[from] aho_corasick::BuildError),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("analytics transport failed: {0}")]
    Transport(String),
    #[error("unknown event type '{0}'")]
    UnknownEvent(String),
}

pub type Result<T> = std::result::Result<T, Error>;
