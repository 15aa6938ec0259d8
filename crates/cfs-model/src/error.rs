use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("CFS score {0} is outside 1-9")]
    OutOfRange(i64),
    #[error("invalid CFS score text: {0:?}")]
    Parse(String),
}
