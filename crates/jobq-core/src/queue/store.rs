//! Authoritative job record store.

use std::collections::HashMap;

use super::JobRecord;
use crate::domain::JobId;

/// Every job ever enqueued, keyed by id. Entries are never removed.
#[derive(Debug, Default)]
pub struct JobStore {
    records: HashMap<JobId, JobRecord>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: JobRecord) {
        self.records.insert(record.id, record);
    }

    pub fn get(&self, id: JobId) -> Option<&JobRecord> {
        self.records.get(&id)
    }

    pub fn get_mut(&mut self, id: JobId) -> Option<&mut JobRecord> {
        self.records.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &JobRecord> {
        self.records.values()
    }
}
