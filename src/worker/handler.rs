//! Favorites worker thread.
//!
//! The worker owns a [`FavoritesStore`] on a dedicated thread so storage I/O
//! never blocks the caller's loop. Requests arrive over a channel together
//! with a reply sender; each request is answered exactly once.

use crate::domain::error::{FlicklistError, Result};
use crate::favorites::FavoritesStore;
use crate::storage::Storage;
use crate::worker::{WorkerMessage, WorkerResponse};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;

type Envelope = (WorkerMessage, Sender<WorkerResponse>);

/// Message loop state owned by the worker thread.
pub struct FavoritesWorker<S = Box<dyn Storage>> {
    store: FavoritesStore<S>,
}

impl<S: Storage + 'static> FavoritesWorker<S> {
    /// Moves `store` onto a new thread and returns a handle to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be spawned.
    pub fn spawn(store: FavoritesStore<S>) -> Result<WorkerHandle> {
        let (sender, receiver) = mpsc::channel::<Envelope>();
        let worker = Self { store };

        let thread = std::thread::Builder::new()
            .name("flicklist-favorites".to_string())
            .spawn(move || worker.run(&receiver))?;

        Ok(WorkerHandle {
            sender,
            thread: Some(thread),
        })
    }

    fn run(mut self, receiver: &Receiver<Envelope>) {
        tracing::debug!("favorites worker started");

        while let Ok((message, reply)) = receiver.recv() {
            let stop = matches!(message, WorkerMessage::Shutdown { .. });
            let response = self.handle_message(message);

            if reply.send(response).is_err() {
                tracing::debug!("requester went away before the reply");
            }
            if stop {
                break;
            }
        }

        tracing::debug!(count = self.store.len(), "favorites worker stopped");
    }

    /// Processes one message against the store.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = attach_parent_trace_context(&message);
        let _span = tracing::debug_span!("worker_handle_message", message_type = ?message).entered();

        match message {
            WorkerMessage::Hydrate { .. } => WorkerResponse::Hydrated {
                count: self.store.hydrate(),
            },
            WorkerMessage::Add { movie, .. } => {
                let changed = self.store.add(movie);
                self.updated(changed)
            }
            WorkerMessage::AddMany { movies, .. } => {
                let changed = self.store.add_many(movies);
                self.updated(changed)
            }
            WorkerMessage::Remove { id, .. } => {
                let changed = self.store.remove(id);
                self.updated(changed)
            }
            WorkerMessage::RemoveMany { ids, .. } => {
                let changed = self.store.remove_many(&ids);
                self.updated(changed)
            }
            WorkerMessage::Contains { id, .. } => WorkerResponse::Membership {
                id,
                present: self.store.contains(id),
            },
            WorkerMessage::List { .. } => WorkerResponse::Favorites {
                movies: self.store.list(),
            },
            WorkerMessage::Shutdown { .. } => WorkerResponse::Stopped,
        }
    }

    fn updated(&self, changed: bool) -> WorkerResponse {
        WorkerResponse::Updated {
            changed,
            count: self.store.len(),
        }
    }
}

/// Reconstructs the remote parent span so worker spans join the caller's trace.
///
/// The returned guard must be held for the duration of the operation.
fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
    use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

    let trace_context = message.trace_context()?;

    let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
    let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

    let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());

    Some(
        opentelemetry::Context::current()
            .with_remote_span_context(span_context)
            .attach(),
    )
}

/// Caller side of a running [`FavoritesWorker`].
///
/// Dropping the handle stops the worker and waits for it.
#[derive(Debug)]
pub struct WorkerHandle {
    sender: Sender<Envelope>,
    thread: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    /// Sends `message` and blocks until the worker replies.
    ///
    /// # Errors
    ///
    /// Returns [`FlicklistError::Worker`] if the worker has stopped.
    pub fn request(&self, message: WorkerMessage) -> Result<WorkerResponse> {
        let (reply, response) = mpsc::channel();
        self.sender
            .send((message, reply))
            .map_err(|_| FlicklistError::Worker("favorites worker is not running".to_string()))?;
        response
            .recv()
            .map_err(|_| FlicklistError::Worker("favorites worker dropped the request".to_string()))
    }

    /// Stops the worker and waits for its thread to finish.
    ///
    /// # Errors
    ///
    /// Returns [`FlicklistError::Worker`] if the worker thread panicked.
    pub fn shutdown(mut self) -> Result<()> {
        self.stop()
    }

    fn stop(&mut self) -> Result<()> {
        let Some(thread) = self.thread.take() else {
            return Ok(());
        };
        // Already stopped is fine; the join below still reaps the thread.
        let _ = self.request(WorkerMessage::shutdown());
        thread
            .join()
            .map_err(|_| FlicklistError::Worker("favorites worker panicked".to_string()))
    }
}

impl Drop for WorkerHandle {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            tracing::warn!(error = %e, "favorites worker did not stop cleanly");
        }
    }
}
