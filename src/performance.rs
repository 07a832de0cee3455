// src/performance.rs

use crate::constants::*;
use crate::error::Result;
use crate::models::{PerformanceData, PerformanceEntry, PerformanceSnapshot, ProblemId};
use crate::repository::{load_json_or_default, save_json, KvStore};
use crate::srs;
use chrono::{DateTime, Local, NaiveDate, Utc};
use log::{debug, info};
use std::sync::Arc;

/// Calendar day of `now` in the user's time zone.
pub fn local_date(now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&Local).date_naive()
}

/// Owns per-problem performance and the practice streak, mirroring every
/// change to the store.
pub struct PerformanceTracker {
    store: Arc<dyn KvStore>,
    data: PerformanceData,
    current_streak: u32,
    last_practice_date: Option<NaiveDate>,
}

impl PerformanceTracker {
    /// Reads persisted state. Missing or unreadable keys start fresh.
    pub fn load(store: Arc<dyn KvStore>) -> Self {
        let data: PerformanceData = load_json_or_default(store.as_ref(), KEY_PERFORMANCE_DATA);
        let current_streak: u32 = load_json_or_default(store.as_ref(), KEY_CURRENT_STREAK);
        let last_practice_date: Option<NaiveDate> =
            load_json_or_default(store.as_ref(), KEY_LAST_PRACTICE_DATE);

        info!(
            "Loaded performance for {} problems (streak {}, last practice {:?})",
            data.len(),
            current_streak,
            last_practice_date
        );

        PerformanceTracker {
            store,
            data,
            current_streak,
            last_practice_date,
        }
    }

    /// Applies the answer and the streak update in memory, then writes all
    /// three keys. The first write error is returned; memory stays updated.
    pub fn record_answer_at(
        &mut self,
        problem_id: ProblemId,
        is_correct: bool,
        now: DateTime<Utc>,
    ) -> Result<()> {
        info!(
            "Recording answer for Problem ID: {} (correct: {})",
            problem_id, is_correct
        );

        let entry = self
            .data
            .entry(problem_id)
            .or_insert_with(|| PerformanceEntry::new(now));
        srs::apply_answer(entry, is_correct, now);
        self.update_streak(local_date(now));

        self.persist()
    }

    fn update_streak(&mut self, today: NaiveDate) {
        let old_streak = self.current_streak;
        self.current_streak = srs::next_streak(self.current_streak, self.last_practice_date, today);
        self.last_practice_date = Some(today);

        if old_streak != self.current_streak {
            info!("[Streak] {} -> {}", old_streak, self.current_streak);
        }
    }

    /// Writes every key, even after a failure, and reports the first error.
    fn persist(&self) -> Result<()> {
        let store = self.store.as_ref();
        let results = [
            save_json(store, KEY_PERFORMANCE_DATA, &self.data),
            save_json(store, KEY_CURRENT_STREAK, &self.current_streak),
            save_json(store, KEY_LAST_PRACTICE_DATE, &self.last_practice_date),
        ];
        results.into_iter().collect()
    }

    pub fn review_problems_at(&self, now: DateTime<Utc>) -> Vec<ProblemId> {
        let due = srs::due_problem_ids(&self.data, now);
        debug!("{} problems due for review", due.len());
        due
    }

    /// Forgets everything. Safe to call repeatedly.
    pub fn reset(&mut self) -> Result<()> {
        info!("Resetting all performance data");
        self.data.clear();
        self.current_streak = 0;
        self.last_practice_date = None;

        self.store.remove(KEY_PERFORMANCE_DATA)?;
        self.store.remove(KEY_CURRENT_STREAK)?;
        self.store.remove(KEY_LAST_PRACTICE_DATE)?;
        Ok(())
    }

    pub fn data(&self) -> &PerformanceData {
        &self.data
    }

    pub fn entry(&self, problem_id: ProblemId) -> Option<&PerformanceEntry> {
        self.data.get(&problem_id)
    }

    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    pub fn last_practice_date(&self) -> Option<NaiveDate> {
        self.last_practice_date
    }

    pub fn total_correct(&self) -> u32 {
        self.data.values().map(|e| e.correct).sum()
    }

    pub fn snapshot(&self) -> PerformanceSnapshot {
        PerformanceSnapshot {
            data: self.data.clone(),
            current_streak: self.current_streak,
            last_practice_date: self.last_practice_date,
        }
    }
}
