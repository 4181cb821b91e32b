use crate::{
    interpreter,
    models::{GameOutcome, GameResultRequest, GameResultResponse},
    prelude::*,
};

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    return router.route("/api/game-result", post(game_result));
}

async fn game_result(
    State(state): State<AppState>,
    body: std::result::Result<Json<GameResultRequest>, JsonRejection>,
) -> Result<Json<GameResultResponse>> {
    let Json(body) = body.map_err(|rejection| {
        tracing::info!("Rejected game result body: {}", rejection.body_text());
        AppError::Malformed(rejection)
    })?;

    let outcome = match GameOutcome::try_from(body) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::info!("Rejected game result: {e}");
            return Err(e);
        }
    };

    tracing::info!(result = %outcome.result, "Game result received");

    let notification = {
        let mut rng = rand::thread_rng();
        interpreter::interpret(outcome, &mut rng)?
    };

    let telegram_sent = state.notifier.notify(&notification.message).await;

    return Ok(Json(GameResultResponse::success(
        notification.promo_code,
        telegram_sent,
    )));
}
