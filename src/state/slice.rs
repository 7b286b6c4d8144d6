//! Request-tracked state
//!
//! Every piece of server data the console caches lives in a `Slice<T>`:
//! the last good payload, a tri-state request status and the last error.
//!
//! Requests are identified by a `Ticket` allocated from a process-wide
//! counter, so a later request always has a larger ticket. A slice only
//! lets the newest request it has seen settle its status or replace its
//! data; an older response that arrives late is dropped. A reset raises a
//! fence below which nothing is applied at all.

use serde::Serialize;
use tracing::debug;

/// Lifecycle of the most recent request against a slice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Request in flight
    Loading,
    /// Last request succeeded
    Succeeded,
    /// Last request failed; see `Slice::error`
    Failed,
}

/// Identity of one request, ordered by issue time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    /// Wrap a sequence number
    pub fn new(seq: u64) -> Self {
        Self(seq)
    }

    /// Sequence number of the ticket
    pub fn seq(self) -> u64 {
        self.0
    }
}

/// Step of a request lifecycle
#[derive(Debug, Clone, PartialEq)]
pub enum Phase<T> {
    /// Request issued
    Pending,
    /// Request succeeded with a payload
    Fulfilled(T),
    /// Request failed with a user-facing reason
    Rejected(String),
}

/// Lifecycle event of one request
#[derive(Debug, Clone, PartialEq)]
pub struct Request<T> {
    /// Which request this is
    pub ticket: Ticket,
    /// What happened to it
    pub phase: Phase<T>,
}

impl<T> Request<T> {
    /// Request issued
    pub fn pending(ticket: Ticket) -> Self {
        Self {
            ticket,
            phase: Phase::Pending,
        }
    }

    /// Request succeeded
    pub fn fulfilled(ticket: Ticket, payload: T) -> Self {
        Self {
            ticket,
            phase: Phase::Fulfilled(payload),
        }
    }

    /// Request failed
    pub fn rejected(ticket: Ticket, reason: impl Into<String>) -> Self {
        Self {
            ticket,
            phase: Phase::Rejected(reason.into()),
        }
    }

    /// True for the `Pending` phase
    pub fn is_pending(&self) -> bool {
        matches!(self.phase, Phase::Pending)
    }
}

/// Server data plus the status of the request that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice<T> {
    /// Last successfully loaded payload
    pub data: Option<T>,
    /// Status of the newest request
    pub status: RequestStatus,
    /// Reason of the last failure, cleared on success
    pub error: Option<String>,
    #[serde(skip)]
    latest: Option<Ticket>,
    #[serde(skip)]
    fence: Option<Ticket>,
}

impl<T> Default for Slice<T> {
    fn default() -> Self {
        Self {
            data: None,
            status: RequestStatus::Idle,
            error: None,
            latest: None,
            fence: None,
        }
    }
}

impl<T> Slice<T> {
    /// Slice already holding `data`
    pub fn with_data(data: T) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }

    /// True while a request is in flight
    pub fn is_loading(&self) -> bool {
        self.status == RequestStatus::Loading
    }

    /// Apply a request whose payload replaces `data` wholesale
    pub fn replace(&mut self, request: Request<T>) {
        let Request { ticket, phase } = request;
        if self.is_fenced(ticket) {
            return;
        }
        match phase {
            Phase::Pending => self.begin(ticket),
            Phase::Fulfilled(payload) => {
                if self.is_current(ticket) {
                    self.data = Some(payload);
                    self.succeed();
                } else {
                    debug!(ticket = ticket.seq(), "Dropping superseded response");
                }
            }
            Phase::Rejected(reason) => self.fail(ticket, reason),
        }
    }

    /// Apply a request whose payload is folded into `data` by `apply`
    ///
    /// Merges reflect changes the server already committed, so they are
    /// applied even when a newer request is in flight. Only the status is
    /// reserved for the newest request.
    pub fn merge<U>(&mut self, request: Request<U>, apply: impl FnOnce(&mut Option<T>, U)) {
        let Request { ticket, phase } = request;
        if self.is_fenced(ticket) {
            return;
        }
        match phase {
            Phase::Pending => self.begin(ticket),
            Phase::Fulfilled(payload) => {
                apply(&mut self.data, payload);
                if self.is_current(ticket) {
                    self.succeed();
                }
            }
            Phase::Rejected(reason) => self.fail(ticket, reason),
        }
    }

    /// Forget everything and ignore requests issued before `fence`
    pub fn reset(&mut self, fence: Ticket) {
        *self = Self {
            fence: Some(fence),
            ..Self::default()
        };
    }

    /// False for requests issued before the last reset
    pub fn accepts(&self, ticket: Ticket) -> bool {
        !self.is_fenced(ticket)
    }

    fn begin(&mut self, ticket: Ticket) {
        // A start that reaches the store after a newer request owns nothing
        if self.latest.is_some_and(|latest| ticket < latest) {
            debug!(ticket = ticket.seq(), "Ignoring superseded request start");
            return;
        }
        self.status = RequestStatus::Loading;
        self.latest = Some(ticket);
    }

    fn succeed(&mut self) {
        self.status = RequestStatus::Succeeded;
        self.error = None;
    }

    fn fail(&mut self, ticket: Ticket, reason: String) {
        if self.is_current(ticket) {
            self.status = RequestStatus::Failed;
            self.error = Some(reason);
        } else {
            debug!(ticket = ticket.seq(), reason = %reason, "Dropping superseded failure");
        }
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.map_or(true, |latest| ticket >= latest)
    }

    fn is_fenced(&self, ticket: Ticket) -> bool {
        self.fence.is_some_and(|fence| ticket < fence)
    }
}
