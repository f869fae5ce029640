//! Bounded alert history.
//!
//! Append-then-truncate: once the capacity is exceeded the oldest records are
//! dropped first. Records keep insertion order. A record whose id is already
//! present is ignored.

use crate::domain::{AlertId, AlertRecord};
use std::collections::VecDeque;

pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

#[derive(Debug, Clone)]
pub struct AlertHistory {
    records: VecDeque<AlertRecord>,
    capacity: usize,
}

impl Default for AlertHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl AlertHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append one record. Returns false if its id was already present.
    pub fn push(&mut self, record: AlertRecord) -> bool {
        if self.contains(&record.id) {
            return false;
        }
        self.records.push_back(record);
        while self.records.len() > self.capacity {
            self.records.pop_front();
        }
        true
    }

    /// Append records in order. Returns how many were accepted.
    pub fn extend(&mut self, records: impl IntoIterator<Item = AlertRecord>) -> usize {
        let mut accepted = 0;
        for record in records {
            if self.push(record) {
                accepted += 1;
            }
        }
        accepted
    }

    pub fn contains(&self, id: &AlertId) -> bool {
        self.records.iter().any(|r| &r.id == id)
    }

    /// Remove a record by id. Returns the removed record, if any.
    pub fn remove(&mut self, id: &AlertId) -> Option<AlertRecord> {
        let pos = self.records.iter().position(|r| &r.id == id)?;
        self.records.remove(pos)
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn latest(&self) -> Option<&AlertRecord> {
        self.records.back()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &AlertRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn to_vec(&self) -> Vec<AlertRecord> {
        self.records.iter().cloned().collect()
    }
}
