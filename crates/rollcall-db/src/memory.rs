//! In-process record store for tests.
//!
//! Lookups yield to the scheduler before returning so that concurrent
//! callers interleave between their check and their insert, the same window
//! a real database round trip opens.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use rollcall_models::{AttendanceRecord, NewAttendanceRecord};

use crate::error::StoreError;
use crate::store::{AttendanceStore, RevocationStore, token_digest};

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<HashMap<(i64, i64), AttendanceRecord>>>,
    revoked: Arc<Mutex<HashSet<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_count(&self) -> usize {
        self.records.lock().expect("memory store poisoned").len()
    }
}

impl AttendanceStore for MemoryStore {
    async fn find_attendance_record(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        let found = {
            let records = self.records.lock().expect("memory store poisoned");
            records.get(&(student_id, course_id)).cloned()
        };
        tokio::task::yield_now().await;
        Ok(found)
    }

    async fn insert_attendance_record(
        &self,
        record: NewAttendanceRecord,
    ) -> Result<AttendanceRecord, StoreError> {
        let mut records = self.records.lock().expect("memory store poisoned");
        let key = (record.student_id, record.course_id);
        if records.contains_key(&key) {
            return Err(StoreError::UniqueViolation(
                "attendance_records_pkey".to_string(),
            ));
        }
        let record = AttendanceRecord::from(record);
        records.insert(key, record.clone());
        Ok(record)
    }
}

impl RevocationStore for MemoryStore {
    async fn is_revoked(&self, token: &str) -> Result<bool, StoreError> {
        let revoked = self.revoked.lock().expect("memory store poisoned");
        Ok(revoked.contains(&token_digest(token)))
    }

    async fn revoke(&self, token: &str) -> Result<(), StoreError> {
        let mut revoked = self.revoked.lock().expect("memory store poisoned");
        revoked.insert(token_digest(token));
        Ok(())
    }
}
