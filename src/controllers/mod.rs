mod game;

use crate::prelude::*;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    let router = game::add_routes(router);

    return router
        .route("/", get(index))
        .route("/api/health", get(health));
}

async fn index() -> Json<Value> {
    return Json(json!({ "message": "Tic-Tac-Toe API is running" }));
}

async fn health() -> Json<Value> {
    return Json(json!({ "status": "healthy" }));
}
