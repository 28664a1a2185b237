// ABOUTME: Optimistic write wrapper applying tentative local state before the backend write
// ABOUTME: Reverts the local snapshot and surfaces the error when the write fails
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

//! Optimistic entry writes.
//!
//! Interactive clients show the edited value immediately and reconcile with
//! the backend asynchronously: apply a tentative local value, issue the
//! write, and on failure revert and surface the error. This is a UI-boundary
//! concern layered over the store; the pure calculators never see tentative
//! state.

use chrono::NaiveDate;
use dashmap::DashMap;
use std::future::Future;
use tracing::warn;
use vitalis_core::errors::AppResult;

/// Optimistic local view of one user's entries for one domain
///
/// Holds the tentative entry map the view layer reads while writes are in
/// flight. One writer exists per user and domain; the entry type is the
/// domain's dated entry model.
#[derive(Default)]
pub struct OptimisticEntryWriter<E: Clone> {
    local: DashMap<NaiveDate, E>,
}

impl<E: Clone> OptimisticEntryWriter<E> {
    /// Create an empty local view
    #[must_use]
    pub fn new() -> Self {
        Self {
            local: DashMap::new(),
        }
    }

    /// Seed the local view from a fetched entry list
    pub fn load(&self, entries: impl IntoIterator<Item = (NaiveDate, E)>) {
        self.local.clear();
        for (date, entry) in entries {
            self.local.insert(date, entry);
        }
    }

    /// Read the tentative entry for a date
    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<E> {
        self.local.get(&date).map(|e| e.clone())
    }

    /// Apply `entry` locally, run the backend write, revert on failure
    ///
    /// The previous local value (or its absence) is restored when `write`
    /// fails, and the error propagates to the caller for surfacing.
    ///
    /// # Errors
    /// Returns the backend write error unchanged.
    pub async fn upsert<F, Fut>(&self, date: NaiveDate, entry: E, write: F) -> AppResult<()>
    where
        F: FnOnce(E) -> Fut,
        Fut: Future<Output = AppResult<()>>,
    {
        let previous = self.local.insert(date, entry.clone());

        match write(entry).await {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!(%date, "optimistic write failed, reverting local state: {err}");
                match previous {
                    Some(prev) => {
                        self.local.insert(date, prev);
                    }
                    None => {
                        self.local.remove(&date);
                    }
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitalis_core::errors::AppError;
    use vitalis_core::models::SleepEntry;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    #[tokio::test]
    async fn test_successful_write_keeps_tentative_value() {
        let writer = OptimisticEntryWriter::new();
        let entry = SleepEntry::new(date(1), 7.5, 85.0);

        writer
            .upsert(date(1), entry, |_| async { Ok(()) })
            .await
            .unwrap();

        assert!((writer.get(date(1)).unwrap().total_sleep - 7.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_failed_write_reverts_to_previous_value() {
        let writer = OptimisticEntryWriter::new();
        writer.load([(date(1), SleepEntry::new(date(1), 6.0, 70.0))]);

        let result = writer
            .upsert(date(1), SleepEntry::new(date(1), 9.0, 95.0), |_| async {
                Err(AppError::storage("backend unavailable"))
            })
            .await;

        assert!(result.is_err());
        // Tentative 9.0h entry rolled back to the stored 6.0h entry
        assert!((writer.get(date(1)).unwrap().total_sleep - 6.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_failed_insert_removes_tentative_value() {
        let writer: OptimisticEntryWriter<SleepEntry> = OptimisticEntryWriter::new();

        let result = writer
            .upsert(date(2), SleepEntry::new(date(2), 8.0, 90.0), |_| async {
                Err(AppError::storage("backend unavailable"))
            })
            .await;

        assert!(result.is_err());
        assert!(writer.get(date(2)).is_none());
    }
}
