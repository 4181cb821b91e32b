use super::{GameOutcome, Outcome};

use crate::prelude::*;

use serde::{Deserialize, Serialize};

pub const STATUS_SUCCESS: &str = "success";

/// Body of `POST /api/game-result`.
///
/// `result` stays a plain string here so an unknown value becomes our own 400
/// instead of a deserialization rejection.
#[derive(Deserialize, Debug, Clone)]
pub struct GameResultRequest {
    pub result: String,
    #[serde(default)]
    pub promo_code: Option<String>,
}

impl TryFrom<GameResultRequest> for GameOutcome {
    type Error = AppError;

    fn try_from(req: GameResultRequest) -> Result<Self, Self::Error> {
        let result: Outcome = req.result.parse()?;

        return Ok(GameOutcome {
            result,
            promo_code: req.promo_code,
        });
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GameResultResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_code: Option<String>,
    pub telegram_sent: bool,
}

impl GameResultResponse {
    pub fn success(promo_code: Option<String>, telegram_sent: bool) -> Self {
        return Self {
            status: STATUS_SUCCESS,
            promo_code,
            telegram_sent,
        };
    }
}
