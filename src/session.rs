//! # Session Store Module
//!
//! Bounded, expiring dialogue storage. The store is created once in `main`,
//! handed to the dispatcher as a dependency, and reached from handlers through
//! [`FitDialogue`](crate::dialogue::FitDialogue).

use chrono::{DateTime, Duration, Utc};
use futures_util::future::BoxFuture;
use std::collections::HashMap;
use std::sync::Arc;
use teloxide::dispatching::dialogue::Storage;
use teloxide::types::ChatId;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::dialogue::FitDialogueState;
use crate::errors::SessionStoreError;

/// A stored dialogue state and the last time it was written
#[derive(Debug, Clone)]
struct StoredDialogue {
    state: FitDialogueState,
    updated_at: DateTime<Utc>,
}

impl StoredDialogue {
    fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.updated_at > ttl
    }
}

/// In-memory dialogue storage
///
/// Holds at most `capacity` dialogues; when full, the least recently updated
/// one is evicted. Dialogues idle for longer than `ttl` are dropped on read
/// and by [`SessionStore::purge_expired`].
#[derive(Debug)]
pub struct SessionStore {
    dialogues: Mutex<HashMap<ChatId, StoredDialogue>>,
    capacity: usize,
    ttl: Duration,
}

impl SessionStore {
    #[must_use]
    pub fn new(capacity: usize, ttl: Duration) -> Arc<Self> {
        Arc::new(Self {
            dialogues: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
            ttl,
        })
    }

    #[must_use]
    pub fn from_config(config: &SessionConfig) -> Arc<Self> {
        Self::new(config.capacity, config.ttl)
    }

    /// Store `state` for `chat_id` as if it was written at `at`
    pub async fn update_dialogue_at(
        &self,
        chat_id: ChatId,
        state: FitDialogueState,
        at: DateTime<Utc>,
    ) {
        let mut dialogues = self.dialogues.lock().await;

        if !dialogues.contains_key(&chat_id) && dialogues.len() >= self.capacity {
            dialogues.retain(|_, d| !d.is_expired(at, self.ttl));

            if dialogues.len() >= self.capacity {
                let oldest = dialogues
                    .iter()
                    .min_by_key(|(_, d)| d.updated_at)
                    .map(|(id, _)| *id);
                if let Some(oldest) = oldest {
                    debug!(chat_id = %oldest, "Evicting least recently updated dialogue");
                    dialogues.remove(&oldest);
                }
            }
        }

        dialogues.insert(
            chat_id,
            StoredDialogue {
                state,
                updated_at: at,
            },
        );
    }

    pub async fn len(&self) -> usize {
        self.dialogues.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.dialogues.lock().await.is_empty()
    }

    /// Remove every dialogue idle for longer than the TTL, returning how many were dropped
    pub async fn purge_expired(&self) -> usize {
        self.purge_expired_at(Utc::now()).await
    }

    pub async fn purge_expired_at(&self, now: DateTime<Utc>) -> usize {
        let mut dialogues = self.dialogues.lock().await;
        let before = dialogues.len();
        dialogues.retain(|_, d| !d.is_expired(now, self.ttl));
        before - dialogues.len()
    }
}

impl Storage<FitDialogueState> for SessionStore {
    type Error = SessionStoreError;

    fn remove_dialogue(
        self: Arc<Self>,
        chat_id: ChatId,
    ) -> BoxFuture<'static, Result<(), Self::Error>> {
        Box::pin(async move {
            self.dialogues
                .lock()
                .await
                .remove(&chat_id)
                .map_or(Err(SessionStoreError::DialogueNotFound), |_| Ok(()))
        })
    }

    fn update_dialogue(
        self: Arc<Self>,
        chat_id: ChatId,
        dialogue: FitDialogueState,
    ) -> BoxFuture<'static, Result<(), Self::Error>> {
        Box::pin(async move {
            self.update_dialogue_at(chat_id, dialogue, Utc::now()).await;
            Ok(())
        })
    }

    fn get_dialogue(
        self: Arc<Self>,
        chat_id: ChatId,
    ) -> BoxFuture<'static, Result<Option<FitDialogueState>, Self::Error>> {
        Box::pin(async move {
            let mut dialogues = self.dialogues.lock().await;

            match dialogues.get(&chat_id) {
                Some(stored) if stored.is_expired(Utc::now(), self.ttl) => {
                    debug!(chat_id = %chat_id, "Dropping expired dialogue");
                    dialogues.remove(&chat_id);
                    Ok(None)
                }
                Some(stored) => Ok(Some(stored.state.clone())),
                None => Ok(None),
            }
        })
    }
}

/// Periodically purge expired dialogues until the process exits
pub fn spawn_expiry_task(
    store: Arc<SessionStore>,
    every: std::time::Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            let purged = store.purge_expired().await;
            if purged > 0 {
                info!(purged, "Purged expired dialogues");
            }
        }
    })
}
