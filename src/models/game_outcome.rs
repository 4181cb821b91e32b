use crate::prelude::*;

use std::{fmt, str::FromStr};

pub const INVALID_GAME_RESULT: &str = "Invalid game result";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Lose,
    Draw,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        return match self {
            Outcome::Win => "win",
            Outcome::Lose => "lose",
            Outcome::Draw => "draw",
        };
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive match.
impl FromStr for Outcome {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        return match s {
            "win" => Ok(Outcome::Win),
            "lose" => Ok(Outcome::Lose),
            "draw" => Ok(Outcome::Draw),
            _ => Err(AppError::InvalidInput(INVALID_GAME_RESULT.to_string())),
        };
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOutcome {
    pub result: Outcome,
    pub promo_code: Option<String>,
}
