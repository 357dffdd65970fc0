//! Static game content endpoints

use axum::{extract::State, Json};
use vowel_core::StageTable;

use crate::models::IntroductionCard;
use crate::AppState;

/// GET /api/introduction
pub async fn introduction(State(state): State<AppState>) -> Json<Vec<IntroductionCard>> {
    Json(state.sessions.catalog().introduction())
}

/// GET /api/levels
pub async fn levels(State(state): State<AppState>) -> Json<StageTable> {
    Json(state.sessions.stages().clone())
}
