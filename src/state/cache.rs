//! Time-bounded entity cache
//!
//! Maps ids to recently fetched entities. An entry is fresh for `ttl` after
//! it was stored; a cache without a TTL stores nothing.
//!
//! Every write carries the ticket of the request that produced it. A write
//! older than what the cache already saw for that key is ignored, so a slow
//! response cannot replace the result of a newer one. Invalidation and
//! clearing leave the same kind of floor behind.

use super::slice::Ticket;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone)]
struct Entry<V> {
    value: Option<V>,
    ticket: Ticket,
    stored_at: Instant,
}

/// Id → entity cache with a staleness window
#[derive(Debug, Clone)]
pub struct EntityCache<K, V> {
    ttl: Option<Duration>,
    entries: HashMap<K, Entry<V>>,
    floor: Option<Ticket>,
}

impl<K: Eq + Hash, V: Clone> EntityCache<K, V> {
    /// Cache whose entries stay fresh for `ttl`; `None` disables caching
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
            floor: None,
        }
    }

    /// True when the cache stores anything at all
    pub fn is_enabled(&self) -> bool {
        self.ttl.is_some()
    }

    /// Entity for `key` if it was stored less than `ttl` ago
    pub fn get_fresh(&self, key: &K) -> Option<V> {
        let ttl = self.ttl?;
        self.entries
            .get(key)
            .filter(|entry| entry.stored_at.elapsed() < ttl)
            .and_then(|entry| entry.value.clone())
    }

    /// Store `value` produced by request `ticket`, restarting its freshness window
    ///
    /// Returns false when a newer write, invalidation or clear already covers `key`.
    pub fn insert(&mut self, key: K, value: V, ticket: Ticket) -> bool {
        if !self.is_enabled() {
            return false;
        }
        if !self.is_newer(&key, ticket) {
            debug!(ticket = ticket.seq(), "Ignoring superseded cache write");
            return false;
        }
        self.entries.insert(
            key,
            Entry {
                value: Some(value),
                ticket,
                stored_at: Instant::now(),
            },
        );
        true
    }

    /// Drop the entry for `key`; writes older than `ticket` stay out
    pub fn invalidate(&mut self, key: K, ticket: Ticket) {
        if self.is_newer(&key, ticket) {
            self.entries.insert(
                key,
                Entry {
                    value: None,
                    ticket,
                    stored_at: Instant::now(),
                },
            );
        }
    }

    /// Drop every entry; writes older than `fence` stay out
    pub fn clear(&mut self, fence: Ticket) {
        self.entries.clear();
        self.floor = Some(self.floor.map_or(fence, |floor| floor.max(fence)));
    }

    /// Number of stored entities, fresh or not
    pub fn len(&self) -> usize {
        self.entries.values().filter(|e| e.value.is_some()).count()
    }

    /// True when no entity is stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_newer(&self, key: &K, ticket: Ticket) -> bool {
        self.floor.map_or(true, |floor| ticket >= floor)
            && self
                .entries
                .get(key)
                .map_or(true, |entry| ticket > entry.ticket)
    }
}
