//! Request and response protocol of the favorites worker.
//!
//! Every request carries an optional [`TraceContext`] so spans opened on the
//! worker thread link back to the span that issued the request.

use crate::domain::{Movie, MovieId};
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry to maintain
/// trace continuity when passing messages to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the current
    /// span context is invalid.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use flicklist::worker::TraceContext;
    ///
    /// if let Some(ctx) = TraceContext::from_current() {
    ///     println!("Trace ID: {}", ctx.trace_id);
    /// }
    /// ```
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    hydrate(Hydrate {}),
    add(Add { movie: Movie }),
    add_many(AddMany { movies: Vec<Movie> }),
    remove(Remove { id: MovieId }),
    remove_many(RemoveMany { ids: Vec<MovieId> }),
    contains(Contains { id: MovieId }),
    list(List {}),
    shutdown(Shutdown {}),
}

/// Requests sent to the favorites worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Load the persisted record.
    Hydrate {
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    Add {
        movie: Movie,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    AddMany {
        movies: Vec<Movie>,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    Remove {
        id: MovieId,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    RemoveMany {
        ids: Vec<MovieId>,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    Contains {
        id: MovieId,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Snapshot of all favorites in insertion order.
    List {
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Stop the worker loop after replying.
    Shutdown {
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Trace context attached to the message, if any.
    #[must_use]
    pub fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::Hydrate { trace_context }
            | Self::Add { trace_context, .. }
            | Self::AddMany { trace_context, .. }
            | Self::Remove { trace_context, .. }
            | Self::RemoveMany { trace_context, .. }
            | Self::Contains { trace_context, .. }
            | Self::List { trace_context }
            | Self::Shutdown { trace_context } => trace_context.as_ref(),
        }
    }
}

/// Responses sent back from the favorites worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// Hydration finished.
    Hydrated {
        /// Favorites held after hydration.
        count: usize,
    },

    /// A mutation was processed.
    Updated {
        /// Whether the collection changed.
        changed: bool,
        /// Favorites held afterwards.
        count: usize,
    },

    /// Answer to [`WorkerMessage::Contains`].
    Membership { id: MovieId, present: bool },

    /// Answer to [`WorkerMessage::List`].
    Favorites { movies: Vec<Movie> },

    /// The worker loop has stopped.
    Stopped,

    /// The request could not be served.
    Error {
        /// Human-readable error message.
        message: String,
    },
}
