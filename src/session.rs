//! Conversation session.
//!
//! A session owns one append-only transcript and answers at most one user
//! message at a time:
//!
//! ```text
//!            submit(text)                    reply_delay elapses
//!   Idle ───────────────────▶ AwaitingResponse ───────────────────▶ Idle
//!    ▲  append user message    (is_typing = true)   classify + append  │
//!    └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The reply is produced by a spawned tokio task that sleeps for the
//! configured delay. The task only holds a `Weak` reference to the session
//! state, and dropping the `Session` aborts it, so a late reply can never
//! touch a torn-down transcript.

use crate::api::default_engine;
use crate::engine::Engine;
use crate::SubmitError;
use chrono::{DateTime, Local};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sender {
    User,
    Assistant,
}

/// Message identifier: creation time in epoch milliseconds, bumped when two
/// messages land in the same millisecond. Strictly increasing per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(u64);

impl MessageId {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One transcript entry. Never modified once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Local>,
}

impl Message {
    /// Hour and minute of the timestamp, e.g. `"09:41"`.
    pub fn clock_label(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

/// Session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Simulated "thinking" time before the assistant replies.
    pub reply_delay: Duration,
    /// Seed for the session's response picks. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Start the transcript with the assistant's welcome message.
    pub welcome: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { reply_delay: Duration::from_millis(1000), seed: None, welcome: true }
    }
}

struct State {
    transcript: Vec<Message>,
    awaiting: bool,
    last_id: u64,
    rng: StdRng,
    typing: watch::Sender<bool>,
}

impl State {
    fn push(&mut self, sender: Sender, text: String) -> MessageId {
        let timestamp = Local::now();
        let millis = u64::try_from(timestamp.timestamp_millis()).unwrap_or(0);
        let id = millis.max(self.last_id + 1);
        self.last_id = id;

        let id = MessageId(id);
        self.transcript.push(Message { id, text, sender, timestamp });
        id
    }

    fn set_awaiting(&mut self, awaiting: bool) {
        self.awaiting = awaiting;
        self.typing.send_replace(awaiting);
    }
}

fn lock(state: &Mutex<State>) -> MutexGuard<'_, State> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One conversation with the assistant.
///
/// `submit` spawns the reply task, so it only accepts messages when called
/// from within a tokio runtime.
pub struct Session {
    state: Arc<Mutex<State>>,
    engine: Arc<Engine>,
    reply_delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Session {
    /// New session over the built-in catalog.
    pub fn new(config: SessionConfig) -> Self {
        Self::with_engine(default_engine(), config)
    }

    pub fn with_engine(engine: Arc<Engine>, config: SessionConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (typing, _) = watch::channel(false);

        let mut state = State { transcript: Vec::new(), awaiting: false, last_id: 0, rng, typing };
        if config.welcome {
            state.push(Sender::Assistant, crate::rules::health::rules::WELCOME.to_string());
        }

        Session { state: Arc::new(Mutex::new(state)), engine, reply_delay: config.reply_delay, pending: None }
    }

    /// Submit a user message.
    ///
    /// Blank input, input arriving while a reply is pending, and calls made
    /// outside a tokio runtime are rejected without touching the transcript.
    /// On success the user message is appended, the session starts "typing",
    /// and the reply is scheduled.
    pub fn submit(&mut self, text: impl Into<String>) -> Result<MessageId, SubmitError> {
        let text = text.into();
        if text.trim().is_empty() {
            debug!("rejected blank submission");
            return Err(SubmitError::EmptyInput);
        }

        let (id, runtime) = {
            let mut state = lock(&self.state);
            if state.awaiting {
                debug!("rejected submission while awaiting response");
                return Err(SubmitError::AwaitingResponse);
            }
            // Nothing is appended unless the reply task can be spawned.
            let Ok(runtime) = Handle::try_current() else {
                debug!("rejected submission outside a tokio runtime");
                return Err(SubmitError::NoRuntime);
            };
            let id = state.push(Sender::User, text.clone());
            state.set_awaiting(true);
            (id, runtime)
        };
        debug!(%id, "accepted user message");

        let shared = Arc::downgrade(&self.state);
        let engine = Arc::clone(&self.engine);
        let delay = self.reply_delay;

        self.pending = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;

            let Some(shared) = shared.upgrade() else {
                trace!(%id, "session gone before reply, discarding");
                return;
            };
            let mut state = lock(&shared);
            let response = engine.classify(&text, &mut state.rng);
            let reply = state.push(Sender::Assistant, response.to_string());
            state.set_awaiting(false);
            debug!(%id, %reply, "appended assistant reply");
        }));

        Ok(id)
    }

    /// Snapshot of the transcript in display order.
    pub fn transcript(&self) -> Vec<Message> {
        lock(&self.state).transcript.clone()
    }

    /// The most recent message, if any.
    pub fn last_message(&self) -> Option<Message> {
        lock(&self.state).transcript.last().cloned()
    }

    /// Whether a reply is pending.
    pub fn is_typing(&self) -> bool {
        lock(&self.state).awaiting
    }

    /// Watch the typing flag.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        lock(&self.state).typing.subscribe()
    }

    /// Resolve once no reply is pending.
    pub async fn wait_for_reply(&self) {
        let mut typing = self.subscribe();
        // The sender lives as long as `self`, so this cannot fail here.
        let _ = typing.wait_for(|typing| !*typing).await;
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = lock(&self.state);
        f.debug_struct("Session")
            .field("messages", &state.transcript.len())
            .field("awaiting", &state.awaiting)
            .field("reply_delay", &self.reply_delay)
            .finish()
    }
}
