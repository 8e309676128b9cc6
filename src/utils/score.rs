use std::{fmt::Display, ops::Deref, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_SCORE: i64 = 1;
pub const MAX_SCORE: i64 = 10;

/// A mood or sleep rating. Always within [MIN_SCORE]..=[MAX_SCORE].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Score(u8);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("Invalid input. Please enter a valid number.")]
    NotANumber,
    #[error("Please enter a number between {min} and {max}.")]
    OutOfRange { min: i64, max: i64 },
}

impl Score {
    pub fn new_opt(value: i64) -> Option<Score> {
        if (MIN_SCORE..=MAX_SCORE).contains(&value) {
            Some(Score(value as u8))
        } else {
            None
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

/// Parses a textual integer and checks that it's within `min..=max`. Surrounding whitespace is
/// ignored.
pub fn parse_int_in_range(input: &str, min: i64, max: i64) -> Result<i64, ScoreError> {
    let value = input
        .trim()
        .parse::<i64>()
        .map_err(|_| ScoreError::NotANumber)?;
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ScoreError::OutOfRange { min, max })
    }
}

pub fn parse_score(input: &str) -> Result<Score, ScoreError> {
    let value = parse_int_in_range(input, MIN_SCORE, MAX_SCORE)?;
    Ok(Score(value as u8))
}

impl FromStr for Score {
    type Err = ScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_score(s)
    }
}

impl TryFrom<i64> for Score {
    type Error = ScoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Score::new_opt(value).ok_or(ScoreError::OutOfRange {
            min: MIN_SCORE,
            max: MAX_SCORE,
        })
    }
}

impl From<Score> for i64 {
    fn from(value: Score) -> Self {
        value.0 as i64
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Deref for Score {
    type Target = u8;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
