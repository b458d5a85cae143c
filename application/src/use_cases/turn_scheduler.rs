//! Turn Scheduler use case
//!
//! Drives the round-robin discussion: pick the identity at the turn pointer,
//! project the log for it, resolve its reply, append the result, wait, repeat.
//!
//! The scheduler is the only writer of the [`ConversationStore`]. Its state
//! lives behind a mutex that is never held across an await; the two
//! suspension points (the backend call and the inter-turn wait) run with the
//! lock released. Every mutation is published as a [`ChatSnapshot`] on a
//! `watch` channel.
//!
//! Cancellation never aborts an in-flight backend call. Instead each session
//! carries an epoch, bumped on restart and clear, and results are re-checked
//! against the epoch and the running flag at the append boundary. A
//! [`CancellationToken`] wakes the pacing loop out of its inter-turn wait.

use crate::error::ForumError;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::settings_provider::SettingsProvider;
use crate::resolver::{ResolutionRequest, Resolver};
use forum_domain::{
    ChatSnapshot, ConversationStore, Identity, Message, Rotation, Topic, project_history,
};
use serde_json::json;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Text recorded when a backend answers with nothing
pub const EMPTY_REPLY: &str = "(No content)";

/// Result of one per-turn cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// A message was appended and the pointer advanced.
    Appended { identity: Identity, is_error: bool },
    /// The session is stopped (or was replaced); nothing happened.
    NotRunning,
    /// Another resolution is in flight for this identity.
    Busy(Identity),
    /// The reply arrived after stop or restart and was dropped.
    Discarded(Identity),
    /// Fatal configuration error; the session was stopped.
    Halted { identity: Identity, reason: String },
}

struct SchedulerState {
    store: ConversationStore,
    epoch: u64,
    cancel: CancellationToken,
}

struct Shared {
    rotation: Rotation,
    resolver: Resolver,
    settings: Arc<dyn SettingsProvider>,
    logger: Arc<dyn ConversationLogger>,
    state: Mutex<SchedulerState>,
    snapshots: watch::Sender<ChatSnapshot>,
}

/// Owner of one chat session's state machine.
///
/// Cheap to clone; clones drive the same session.
#[derive(Clone)]
pub struct TurnScheduler {
    shared: Arc<Shared>,
}

impl TurnScheduler {
    /// Create an idle scheduler.
    ///
    /// Fails when some rotation identity has no strategy for its default mode.
    pub fn new(
        rotation: Rotation,
        resolver: Resolver,
        settings: Arc<dyn SettingsProvider>,
        logger: Arc<dyn ConversationLogger>,
    ) -> Result<Self, ForumError> {
        resolver.check_rotation(&rotation)?;

        let (snapshots, _) = watch::channel(ChatSnapshot::default());
        let state = SchedulerState {
            store: ConversationStore::new(),
            epoch: 0,
            cancel: CancellationToken::new(),
        };

        Ok(Self {
            shared: Arc::new(Shared {
                rotation,
                resolver,
                settings,
                logger,
                state: Mutex::new(state),
                snapshots,
            }),
        })
    }

    pub fn rotation(&self) -> &Rotation {
        &self.shared.rotation
    }

    pub fn primary(&self) -> Identity {
        self.shared.resolver.primary()
    }

    /// Start (or restart) a session and spawn its pacing loop.
    ///
    /// The first turn is resolved immediately. Must be called from within a
    /// tokio runtime.
    pub fn start(&self, topic: impl Into<String>) -> Result<(), ForumError> {
        let (epoch, cancel) = self.reset_session(topic)?;
        tokio::spawn(self.clone().drive(epoch, cancel));
        Ok(())
    }

    /// Reset to a fresh running session without spawning the loop.
    ///
    /// Turns are then driven by [`TurnScheduler::advance_turn`].
    pub fn seed(&self, topic: impl Into<String>) -> Result<(), ForumError> {
        self.reset_session(topic).map(|_| ())
    }

    /// Stop the session. A pending reply is discarded when it arrives.
    pub fn stop(&self) {
        let mut state = self.lock();
        state.cancel.cancel();
        let was_running = state.store.session().is_running;
        state.store.set_running(false);
        state.store.set_resolving(None);
        self.publish(&state);

        if was_running {
            let epoch = state.epoch;
            let turns = state.store.messages().len().saturating_sub(1);
            drop(state);
            info!("Session stopped after {} turns", turns);
            self.log(
                "session_stopped",
                json!({ "epoch": epoch, "turns": turns, "reason": "stopped" }),
            );
        }
    }

    /// Stop and forget everything: empty log, no topic, pointer at 0.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.cancel.cancel();
        state.epoch += 1;
        state.store.reset();
        self.publish(&state);
        let epoch = state.epoch;
        drop(state);

        info!("Session cleared");
        self.log("session_cleared", json!({ "epoch": epoch }));
    }

    pub fn snapshot(&self) -> ChatSnapshot {
        self.lock().store.snapshot()
    }

    pub fn is_running(&self) -> bool {
        self.lock().store.session().is_running
    }

    /// Live view of the session; a new value is sent on every mutation.
    pub fn subscribe(&self) -> watch::Receiver<ChatSnapshot> {
        self.shared.snapshots.subscribe()
    }

    /// Run exactly one per-turn cycle for the current session.
    pub async fn advance_turn(&self) -> TurnOutcome {
        let epoch = self.lock().epoch;
        self.advance_in(epoch).await
    }

    fn reset_session(
        &self,
        topic: impl Into<String>,
    ) -> Result<(u64, CancellationToken), ForumError> {
        let topic = Topic::try_new(topic)?;

        let mut state = self.lock();
        state.cancel.cancel();
        state.cancel = CancellationToken::new();
        state.epoch += 1;
        state.store.seed(topic);
        state.store.set_running(true);
        self.publish(&state);

        let epoch = state.epoch;
        let cancel = state.cancel.clone();
        let topic = state.store.session().topic.clone();
        drop(state);

        info!(
            "Session {} started with {} participants",
            epoch,
            self.shared.rotation.len()
        );
        let rotation: Vec<_> = self.shared.rotation.iter().map(|i| i.key()).collect();
        self.log(
            "session_started",
            json!({ "epoch": epoch, "topic": topic, "rotation": rotation }),
        );
        Ok((epoch, cancel))
    }

    async fn advance_in(&self, epoch: u64) -> TurnOutcome {
        let (identity, history) = {
            let mut state = self.lock();
            let session = state.store.session();
            if state.epoch != epoch || !session.is_running {
                return TurnOutcome::NotRunning;
            }
            if let Some(busy) = session.resolving {
                return TurnOutcome::Busy(busy);
            }

            let identity = self.shared.rotation.at(session.turn_pointer);
            state.store.set_resolving(Some(identity));
            let history = project_history(state.store.messages(), identity);
            self.publish(&state);
            (identity, history)
        };

        let settings = self.shared.settings.current();
        debug!(
            "Resolving {} with {} history entries",
            identity,
            history.len()
        );
        let request = ResolutionRequest {
            identity,
            master_prompt: &settings.master_prompt,
            history: &history,
            credentials: &settings.credentials,
            tuning: &settings.tuning,
        };
        let result = self
            .shared
            .resolver
            .resolve(&request, settings.modes.mode_for(identity))
            .await;

        let mut state = self.lock();
        if state.epoch != epoch || !state.store.session().is_running {
            drop(state);
            warn!("Discarding late reply from {}", identity);
            self.log(
                "turn_discarded",
                json!({ "epoch": epoch, "identity": identity.key(), "failed": result.is_err() }),
            );
            return TurnOutcome::Discarded(identity);
        }
        state.store.set_resolving(None);

        match result {
            Err(err) if err.is_configuration() => {
                let reason = err.to_string();
                state.cancel.cancel();
                state.store.set_running(false);
                state.store.set_last_error(Some(reason.clone()));
                self.publish(&state);
                let turns = state.store.messages().len().saturating_sub(1);
                drop(state);

                error!("Halting session: {}", reason);
                self.log(
                    "session_stopped",
                    json!({ "epoch": epoch, "turns": turns, "reason": reason }),
                );
                TurnOutcome::Halted { identity, reason }
            }
            Err(err) => {
                let description = err.to_string();
                state
                    .store
                    .append_message(Message::error(identity, description.clone()));
                state.store.set_last_error(Some(description.clone()));
                self.advance_pointer(&mut state);
                self.publish(&state);
                drop(state);

                warn!("{} failed: {}", identity, description);
                self.log(
                    "turn_failed",
                    json!({ "epoch": epoch, "identity": identity.key(), "error": description }),
                );
                TurnOutcome::Appended {
                    identity,
                    is_error: true,
                }
            }
            Ok(text) => {
                let content = if text.trim().is_empty() {
                    EMPTY_REPLY.to_string()
                } else {
                    text
                };
                let message = Message::reply(identity, content);
                let payload = json!({
                    "epoch": epoch,
                    "identity": identity.key(),
                    "message_id": message.id.to_string(),
                    "content": message.content,
                });
                state.store.append_message(message);
                self.advance_pointer(&mut state);
                self.publish(&state);
                drop(state);

                info!("{} replied", identity);
                self.log("turn_completed", payload);
                TurnOutcome::Appended {
                    identity,
                    is_error: false,
                }
            }
        }
    }

    /// Pacing loop for one session epoch.
    async fn drive(self, epoch: u64, cancel: CancellationToken) {
        loop {
            match self.advance_in(epoch).await {
                TurnOutcome::Appended { .. } | TurnOutcome::Busy(_) => {}
                outcome => {
                    debug!("Pacing loop {} finished: {:?}", epoch, outcome);
                    break;
                }
            }

            let delay = self.shared.settings.current().tuning.response_delay();
            debug!("Waiting {:?} before next turn", delay);
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }

    fn advance_pointer(&self, state: &mut SchedulerState) {
        let next = self
            .shared
            .rotation
            .next_slot(state.store.session().turn_pointer);
        state.store.set_turn_pointer(next);
    }

    fn lock(&self) -> MutexGuard<'_, SchedulerState> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn publish(&self, state: &SchedulerState) {
        self.shared.snapshots.send_replace(state.store.snapshot());
    }

    fn log(&self, event_type: &'static str, payload: serde_json::Value) {
        self.shared
            .logger
            .log(ConversationEvent::new(event_type, payload));
    }
}
