//! Session struct, state, and log accessors.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Utc;
use fixr_common::MessageId;
use futures_util::FutureExt;
use tokio::sync::broadcast;
use tracing::{debug, error};

use crate::{Message, MessageKind, MessageTransport, Sender, TransportError, TransportReply};

use super::events::SessionEvent;
use super::types::DEFAULT_GREETING;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const EVENT_CAPACITY: usize = 64;

pub(super) struct SessionState {
    pub(super) messages: Vec<Message>,
    pub(super) thread_id: String,
    pub(super) draft: String,
    next_id: u64,
}

impl SessionState {
    pub(super) fn push(&mut self, sender: Sender, text: String, kind: MessageKind) -> Message {
        self.next_id += 1;
        let message = Message {
            id: MessageId::new(self.next_id),
            text,
            sender,
            created_at: Utc::now(),
            kind,
        };
        self.messages.push(message.clone());
        message
    }
}

/// A conversation with the AI backend.
///
/// Operations take `&self`, so a session can be shared behind an `Arc`
/// between the task that sends and the task that renders.
pub struct Session {
    pub(super) state: Mutex<SessionState>,
    /// True while a request is in flight.
    pub(super) pending: AtomicBool,
    pub(super) transport: Arc<dyn MessageTransport>,
    pub(super) request_timeout: Duration,
    pub(super) events: broadcast::Sender<SessionEvent>,
}

impl Session {
    /// New session seeded with the default assistant greeting.
    pub fn new(transport: Arc<dyn MessageTransport>) -> Self {
        Self::with_greeting(transport, DEFAULT_GREETING)
    }

    /// New session seeded with a custom assistant greeting.
    pub fn with_greeting(transport: Arc<dyn MessageTransport>, greeting: impl Into<String>) -> Self {
        let mut state = SessionState {
            messages: Vec::new(),
            thread_id: String::new(),
            draft: String::new(),
            next_id: 0,
        };
        state.push(Sender::Assistant, greeting.into(), MessageKind::Plain);

        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state: Mutex::new(state),
            pending: AtomicBool::new(false),
            transport,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            events,
        }
    }

    /// Upper bound on a single transport call; expiry is folded as a failure.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub(super) fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(super) fn publish(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    /// Store a thread id from a successful response. Empty or missing ids
    /// leave the current one untouched.
    pub(super) fn adopt_thread_id(&self, thread_id: Option<String>) {
        let Some(thread_id) = thread_id.filter(|t| !t.is_empty()) else {
            return;
        };
        let changed = {
            let mut state = self.lock_state();
            if state.thread_id == thread_id {
                false
            } else {
                state.thread_id = thread_id.clone();
                true
            }
        };
        if changed {
            debug!(thread = %thread_id, "thread id updated");
            self.publish(SessionEvent::ThreadChanged(thread_id));
        }
    }

    /// Drive one transport call to a result, converting timeouts and
    /// panics into transport errors.
    ///
    /// `call` is only invoked inside the unwind guard, so a transport that
    /// panics while building its future is caught as well.
    pub(super) async fn call_transport<C, F>(
        &self,
        call: C,
    ) -> Result<TransportReply, TransportError>
    where
        C: FnOnce() -> F,
        F: Future<Output = Result<TransportReply, TransportError>>,
    {
        let guarded = AssertUnwindSafe(async move { call().await }).catch_unwind();
        match tokio::time::timeout(self.request_timeout, guarded).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => {
                error!("transport panicked during request");
                Err(TransportError::Panicked)
            }
            Err(_) => Err(TransportError::Timeout),
        }
    }

    /// Snapshot of the conversation log, in display order.
    pub fn messages(&self) -> Vec<Message> {
        self.lock_state().messages.clone()
    }

    /// Number of messages in the log.
    pub fn message_count(&self) -> usize {
        self.lock_state().messages.len()
    }

    /// The most recent message.
    pub fn last_message(&self) -> Option<Message> {
        self.lock_state().messages.last().cloned()
    }

    /// Current thread id; empty before the first successful exchange.
    pub fn thread_id(&self) -> String {
        self.lock_state().thread_id.clone()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// The unsent input buffer.
    pub fn draft(&self) -> String {
        self.lock_state().draft.clone()
    }

    pub fn set_draft(&self, text: impl Into<String>) {
        self.lock_state().draft = text.into();
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}
