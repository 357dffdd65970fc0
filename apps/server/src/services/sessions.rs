//! In-memory store of game sessions and the feedback timers that drive them.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;
use vowel_core::{FeedbackTicket, GameSession, GameSettings, Instruction, StageTable, VowelCatalog};

use crate::error::{ApiError, Result};

/// A session plus the instructions produced while no request was in flight.
pub struct SessionSlot {
    pub session: GameSession,
    pub events: Vec<Instruction>,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

/// Default time a session may sit untouched before it is evicted.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Owns every live session. Shared content is held once and handed to
/// each new session.
pub struct SessionStore {
    catalog: Arc<VowelCatalog>,
    stages: Arc<StageTable>,
    settings: Arc<GameSettings>,
    seed: Option<u64>,
    idle_timeout: Duration,
    created: AtomicU64,
    sessions: Mutex<HashMap<Uuid, SessionSlot>>,
}

impl SessionStore {
    pub fn new(
        catalog: VowelCatalog,
        stages: StageTable,
        settings: GameSettings,
        seed: Option<u64>,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            stages: Arc::new(stages),
            settings: Arc::new(settings),
            seed,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            created: AtomicU64::new(0),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn catalog(&self) -> &VowelCatalog {
        &self.catalog
    }

    pub fn stages(&self) -> &StageTable {
        &self.stages
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Create a session in the menu state.
    pub async fn create(&self) -> (Uuid, DateTime<Utc>) {
        let catalog = Arc::clone(&self.catalog);
        let stages = Arc::clone(&self.stages);
        let settings = Arc::clone(&self.settings);
        let session = match self.seed {
            Some(seed) => {
                let n = self.created.fetch_add(1, Ordering::Relaxed);
                GameSession::seeded(catalog, stages, settings, seed.wrapping_add(n))
            }
            None => GameSession::new(catalog, stages, settings),
        };

        let id = Uuid::new_v4();
        let now = Utc::now();
        self.sessions.lock().await.insert(
            id,
            SessionSlot {
                session,
                events: Vec::new(),
                created_at: now,
                last_active_at: now,
            },
        );

        tracing::info!(session = %id, "session created");
        (id, now)
    }

    pub async fn remove(&self, id: Uuid) -> Result<()> {
        match self.sessions.lock().await.remove(&id) {
            Some(_) => {
                tracing::info!(session = %id, "session discarded");
                Ok(())
            }
            None => Err(session_not_found(id)),
        }
    }

    /// Run `f` against a session while holding the store lock.
    pub async fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut SessionSlot) -> T,
    ) -> Result<T> {
        let mut sessions = self.sessions.lock().await;
        let slot = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;
        slot.last_active_at = Utc::now();
        Ok(f(slot))
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Drop every session untouched for longer than the idle timeout.
    /// Returns how many were evicted.
    pub async fn evict_idle(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|id, slot| {
            // A clock step backwards makes the age negative; keep those.
            let idle = (now - slot.last_active_at)
                .to_std()
                .map_or(false, |age| age > self.idle_timeout);
            if idle {
                tracing::info!(
                    session = %id,
                    created_at = %slot.created_at,
                    "evicting idle session"
                );
            }
            !idle
        });
        before - sessions.len()
    }
}

/// Periodically evict idle sessions for as long as the store is alive.
pub fn spawn_idle_sweep(store: Arc<SessionStore>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            let evicted = store.evict_idle(Utc::now()).await;
            if evicted > 0 {
                tracing::debug!(evicted, "idle sweep finished");
            }
        }
    })
}

/// Complete a selection's feedback once its delay has passed.
///
/// The resulting instructions are queued on the session for the client to
/// poll. A ticket outdated by navigation is dropped by the session itself.
pub fn schedule_feedback(store: Arc<SessionStore>, id: Uuid, ticket: FeedbackTicket) {
    tokio::spawn(async move {
        tokio::time::sleep(ticket.delay).await;
        let completed = store
            .with_session(id, |slot| {
                let out = slot.session.complete_feedback(ticket);
                slot.events.extend(out);
            })
            .await;
        if completed.is_err() {
            tracing::debug!(session = %id, "session gone before feedback finished");
        }
    });
}

fn session_not_found(id: Uuid) -> ApiError {
    ApiError::NotFound(format!("Session {} not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use vowel_core::LevelKind;

    fn store() -> Arc<SessionStore> {
        let settings = GameSettings {
            feedback_delay_ms: 0,
            ..GameSettings::default()
        };
        Arc::new(SessionStore::new(
            VowelCatalog::builtin(),
            StageTable::builtin(),
            settings,
            Some(1),
        ))
    }

    #[tokio::test]
    async fn create_and_remove() {
        let store = store();
        let (id, _) = store.create().await;
        assert_eq!(store.len().await, 1);

        store.remove(id).await.unwrap();
        assert_eq!(store.len().await, 0);
        assert!(matches!(store.remove(id).await, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn idle_sessions_are_evicted() {
        let store = store();
        let (stale, _) = store.create().await;
        let (fresh, _) = store.create().await;

        store
            .with_session(stale, |slot| {
                slot.last_active_at = Utc::now() - chrono::Duration::hours(2);
            })
            .await
            .unwrap();

        assert_eq!(store.evict_idle(Utc::now()).await, 1);
        assert_eq!(store.len().await, 1);
        assert!(matches!(
            store.with_session(stale, |_| ()).await,
            Err(ApiError::NotFound(_))
        ));
        assert!(store.with_session(fresh, |_| ()).await.is_ok());
    }

    #[tokio::test]
    async fn touching_a_session_keeps_it_alive() {
        let store = store();
        let (id, _) = store.create().await;

        let later = Utc::now() + chrono::Duration::minutes(20);
        assert_eq!(store.evict_idle(later).await, 0);

        let much_later = Utc::now() + chrono::Duration::minutes(31);
        assert_eq!(store.evict_idle(much_later).await, 1);
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let store = store();
        let result = store.with_session(Uuid::new_v4(), |_| ()).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn scheduled_feedback_queues_events() {
        let store = store();
        let (id, _) = store.create().await;

        let ticket = store
            .with_session(id, |slot| {
                slot.session.start_level(LevelKind::Distinction).unwrap();
                let p = slot.session.progress().unwrap();
                let wrong = p
                    .cards()
                    .iter()
                    .find(|c| Some(c.vowel_name.as_str()) != p.correct_answer())
                    .unwrap()
                    .vowel_name
                    .clone();
                slot.session.handle_selection(&wrong).ticket.unwrap()
            })
            .await
            .unwrap();

        schedule_feedback(Arc::clone(&store), id, ticket);
        tokio::time::sleep(Duration::from_millis(50)).await;

        let events = store
            .with_session(id, |slot| std::mem::take(&mut slot.events))
            .await
            .unwrap();
        assert_eq!(events, vec![Instruction::UnlockInput]);
    }
}
