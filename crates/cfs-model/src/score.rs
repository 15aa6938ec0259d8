//! Clinical Frailty Scale score value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScoreError;

/// A CFS rating between 1 (very fit) and 9 (terminally ill).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CfsScore(u8);

impl CfsScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 9;

    pub fn new(value: u8) -> Result<Self, ScoreError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ScoreError::OutOfRange(i64::from(value)))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// All nine scores in ascending order.
    pub fn all() -> impl Iterator<Item = CfsScore> {
        (Self::MIN..=Self::MAX).map(CfsScore)
    }
}

impl TryFrom<u8> for CfsScore {
    type Error = ScoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for CfsScore {
    type Error = ScoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| ScoreError::OutOfRange(value))
            .and_then(Self::new)
    }
}

impl From<CfsScore> for u8 {
    fn from(score: CfsScore) -> Self {
        score.0
    }
}

impl FromStr for CfsScore {
    type Err = ScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| ScoreError::Parse(s.to_string()))?;
        Self::try_from(value)
    }
}

impl fmt::Display for CfsScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
