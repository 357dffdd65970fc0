//! Game session endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::services::sessions::schedule_feedback;
use crate::AppState;

/// POST /api/sessions
pub async fn create(State(state): State<AppState>) -> Json<CreateSessionResponse> {
    let (session_id, created_at) = state.sessions.create().await;
    Json(CreateSessionResponse {
        session_id,
        created_at,
    })
}

/// GET /api/sessions/:id
pub async fn snapshot(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>> {
    let snapshot = state
        .sessions
        .with_session(id, |slot| slot.session.snapshot())
        .await?;
    Ok(Json(snapshot))
}

/// DELETE /api/sessions/:id
pub async fn discard(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/sessions/:id/start
pub async fn start(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<StartLevelRequest>,
) -> Result<Json<InstructionsResponse>> {
    if let Some(index) = request.sub_level {
        let len = state.sessions.stages().level(request.level).len();
        if index >= len {
            return Err(ApiError::BadRequest(format!(
                "{} has {} sub-levels, no sub-level {}",
                request.level.as_str(),
                len,
                index
            )));
        }
    }

    let instructions = state
        .sessions
        .with_session(id, |slot| {
            slot.events.clear();
            match request.sub_level {
                Some(index) => slot.session.start_sub_level(request.level, index),
                None => slot.session.start_level(request.level),
            }
        })
        .await??;

    Ok(Json(InstructionsResponse { instructions }))
}

/// POST /api/sessions/:id/select
pub async fn select(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SelectRequest>,
) -> Result<Json<SelectResponse>> {
    let feedback = state
        .sessions
        .with_session(id, |slot| slot.session.handle_selection(&request.vowel))
        .await?;

    let feedback_delay_ms = feedback.ticket.map(|ticket| {
        schedule_feedback(Arc::clone(&state.sessions), id, ticket);
        ticket.delay.as_millis() as u64
    });

    Ok(Json(SelectResponse {
        instructions: feedback.instructions,
        feedback_delay_ms,
    }))
}

/// POST /api/sessions/:id/replay
pub async fn replay(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InstructionsResponse>> {
    let instructions = state
        .sessions
        .with_session(id, |slot| slot.session.replay())
        .await?;
    Ok(Json(InstructionsResponse { instructions }))
}

/// POST /api/sessions/:id/proceed
pub async fn proceed(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InstructionsResponse>> {
    let instructions = state
        .sessions
        .with_session(id, |slot| {
            slot.events.clear();
            slot.session.proceed()
        })
        .await??;
    Ok(Json(InstructionsResponse { instructions }))
}

/// POST /api/sessions/:id/menu
pub async fn menu(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InstructionsResponse>> {
    let instructions = state
        .sessions
        .with_session(id, |slot| {
            slot.events.clear();
            slot.session.navigate_to_menu()
        })
        .await?;
    Ok(Json(InstructionsResponse { instructions }))
}

/// GET /api/sessions/:id/events
pub async fn events(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InstructionsResponse>> {
    let instructions = state
        .sessions
        .with_session(id, |slot| std::mem::take(&mut slot.events))
        .await?;
    Ok(Json(InstructionsResponse { instructions }))
}
