//! In-memory triage history.
//!
//! Append-only record store behind an `RwLock`. The engine never reads
//! from it; only the API surface does, so a process restart losing the
//! log does not affect triage behavior.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{PatientInput, TriageResult};

/// Hard cap on a single listing page.
pub const MAX_PAGE_SIZE: usize = 200;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history store lock poisoned")]
    LockFailed,
}

/// One persisted triage encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageRecord {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub patient: PatientInput,
    pub result: TriageResult,
}

pub struct HistoryStore {
    records: std::sync::RwLock<Vec<TriageRecord>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self {
            records: std::sync::RwLock::new(Vec::new()),
        }
    }

    /// Append a new record; returns the stored copy with its assigned id.
    pub fn append(
        &self,
        patient: PatientInput,
        result: TriageResult,
    ) -> Result<TriageRecord, HistoryError> {
        let record = TriageRecord {
            id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            patient,
            result,
        };
        let mut records = self.records.write().map_err(|_| HistoryError::LockFailed)?;
        records.push(record.clone());
        Ok(record)
    }

    /// Newest-first page of records.
    pub fn list(&self, skip: usize, limit: usize) -> Result<Vec<TriageRecord>, HistoryError> {
        let records = self.records.read().map_err(|_| HistoryError::LockFailed)?;
        let limit = limit.min(MAX_PAGE_SIZE);
        Ok(records.iter().rev().skip(skip).take(limit).cloned().collect())
    }

    pub fn get(&self, id: &Uuid) -> Result<Option<TriageRecord>, HistoryError> {
        let records = self.records.read().map_err(|_| HistoryError::LockFailed)?;
        Ok(records.iter().find(|r| r.id == *id).cloned())
    }

    pub fn len(&self) -> Result<usize, HistoryError> {
        let records = self.records.read().map_err(|_| HistoryError::LockFailed)?;
        Ok(records.len())
    }

    pub fn is_empty(&self) -> Result<bool, HistoryError> {
        Ok(self.len()? == 0)
    }

    /// Remove all records; returns how many were dropped.
    pub fn clear(&self) -> Result<usize, HistoryError> {
        let mut records = self.records.write().map_err(|_| HistoryError::LockFailed)?;
        let dropped = records.len();
        records.clear();
        Ok(dropped)
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}
