//! Common test utilities and fixtures for integration tests.
//!
//! Sessions use a fixed seed and a zero feedback delay so timer-driven
//! transitions land almost immediately.

pub mod fixtures;

use std::time::Duration;

use axum::Router;
use axum_test::TestServer;
use uuid::Uuid;
use vowel_core::{GameSettings, StageTable, VowelCatalog};

use vowel_game_server::{router, AppState};

/// Test context holding the shared state behind the router.
pub struct TestContext {
    pub state: AppState,
    app: Router,
}

impl TestContext {
    /// Create a new test context with instant feedback.
    pub fn new() -> Self {
        Self::with_settings(GameSettings {
            feedback_delay_ms: 0,
            ..GameSettings::default()
        })
    }

    pub fn with_settings(settings: GameSettings) -> Self {
        let state = AppState::new(
            VowelCatalog::builtin(),
            StageTable::builtin(),
            settings,
            Some(7),
        );
        let app = router(state.clone());
        Self { state, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Create a session through the API and return its id.
    pub async fn create_session(server: &TestServer) -> Uuid {
        let response = server.post("/api/sessions").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        Uuid::parse_str(body["session_id"].as_str().unwrap()).unwrap()
    }

    /// Peek at the answer the server expects for the current round.
    pub async fn correct_answer(&self, id: Uuid) -> String {
        self.state
            .sessions
            .with_session(id, |slot| {
                slot.session
                    .progress()
                    .and_then(|p| p.correct_answer())
                    .map(str::to_string)
            })
            .await
            .unwrap()
            .expect("round in progress")
    }

    /// A card on screen that is not the answer.
    pub async fn wrong_answer(&self, id: Uuid) -> String {
        self.state
            .sessions
            .with_session(id, |slot| {
                let p = slot.session.progress().expect("level in progress");
                p.cards()
                    .iter()
                    .find(|c| Some(c.vowel_name.as_str()) != p.correct_answer())
                    .map(|c| c.vowel_name.clone())
            })
            .await
            .unwrap()
            .expect("a wrong card")
    }

    /// Wait until the session's feedback timer has fired.
    ///
    /// Polls the session instead of sleeping a fixed time, so it holds up
    /// on a multi-threaded runtime too.
    pub async fn settle(&self, id: Uuid) {
        for _ in 0..200 {
            let awaiting = self
                .state
                .sessions
                .with_session(id, |slot| slot.session.snapshot().awaiting_feedback)
                .await
                .unwrap();
            if !awaiting {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("feedback for session {} never completed", id);
    }

    pub fn session_path(id: Uuid, action: &str) -> String {
        if action.is_empty() {
            format!("/api/sessions/{}", id)
        } else {
            format!("/api/sessions/{}/{}", id, action)
        }
    }
}
