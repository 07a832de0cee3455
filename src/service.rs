// src/service.rs

//! Single-writer front for the performance tracker.
//!
//! One task owns the [`PerformanceTracker`]; everyone else talks to it through
//! a cloneable [`TrackerHandle`]. Commands are applied in arrival order, so two
//! quick answers can never overwrite each other's snapshot.

use crate::constants::TRACKER_CHANNEL_CAPACITY;
use crate::error::{Error, Result};
use crate::models::{PerformanceSnapshot, ProblemId};
use crate::performance::PerformanceTracker;
use chrono::{DateTime, Utc};
use log::{debug, error};
use tokio::sync::{mpsc, oneshot};

/// Messages understood by the tracker task
#[derive(Debug)]
pub enum TrackerCommand {
    RecordAnswer {
        problem_id: ProblemId,
        is_correct: bool,
        now: DateTime<Utc>,
        reply: oneshot::Sender<Result<()>>,
    },
    ReviewProblems {
        now: DateTime<Utc>,
        reply: oneshot::Sender<Vec<ProblemId>>,
    },
    Reset {
        reply: oneshot::Sender<Result<()>>,
    },
    Snapshot {
        reply: oneshot::Sender<PerformanceSnapshot>,
    },
}

#[derive(Clone)]
pub struct TrackerHandle {
    sender: mpsc::Sender<TrackerCommand>,
}

/// Moves `tracker` into its own task. Must be called inside a tokio runtime.
/// The task exits once every handle is dropped.
pub fn spawn_tracker(tracker: PerformanceTracker) -> TrackerHandle {
    let (tx, rx) = mpsc::channel(TRACKER_CHANNEL_CAPACITY);
    tokio::spawn(tracker_loop(tracker, rx));
    TrackerHandle { sender: tx }
}

async fn tracker_loop(mut tracker: PerformanceTracker, mut rx: mpsc::Receiver<TrackerCommand>) {
    while let Some(cmd) = rx.recv().await {
        match cmd {
            TrackerCommand::RecordAnswer {
                problem_id,
                is_correct,
                now,
                reply,
            } => {
                let result = tracker.record_answer_at(problem_id, is_correct, now);
                if let Err(e) = &result {
                    error!("Failed to persist answer for {}: {}", problem_id, e);
                }
                let _ = reply.send(result);
            }
            TrackerCommand::ReviewProblems { now, reply } => {
                let _ = reply.send(tracker.review_problems_at(now));
            }
            TrackerCommand::Reset { reply } => {
                let _ = reply.send(tracker.reset());
            }
            TrackerCommand::Snapshot { reply } => {
                let _ = reply.send(tracker.snapshot());
            }
        }
    }
    debug!("Tracker task stopped");
}

impl TrackerHandle {
    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> TrackerCommand,
    ) -> Result<T> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(make(tx))
            .await
            .map_err(|_| Error::TrackerClosed)?;
        rx.await.map_err(|_| Error::TrackerClosed)
    }

    pub async fn record_answer(&self, problem_id: ProblemId, is_correct: bool) -> Result<()> {
        self.record_answer_at(problem_id, is_correct, Utc::now()).await
    }

    pub async fn record_answer_at(
        &self,
        problem_id: ProblemId,
        is_correct: bool,
        now: DateTime<Utc>,
    ) -> Result<()> {
        self.request(|reply| TrackerCommand::RecordAnswer {
            problem_id,
            is_correct,
            now,
            reply,
        })
        .await?
    }

    pub async fn review_problems(&self) -> Result<Vec<ProblemId>> {
        self.review_problems_at(Utc::now()).await
    }

    pub async fn review_problems_at(&self, now: DateTime<Utc>) -> Result<Vec<ProblemId>> {
        self.request(|reply| TrackerCommand::ReviewProblems { now, reply })
            .await
    }

    pub async fn reset(&self) -> Result<()> {
        self.request(|reply| TrackerCommand::Reset { reply }).await?
    }

    pub async fn snapshot(&self) -> Result<PerformanceSnapshot> {
        self.request(|reply| TrackerCommand::Snapshot { reply }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryStore;
    use chrono::{Duration, TimeZone};
    use std::sync::Arc;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_concurrent_answers_are_not_lost() {
        let store = Arc::new(MemoryStore::new());
        let handle = spawn_tracker(PerformanceTracker::load(store.clone()));

        let mut tasks = Vec::new();
        for i in 0..20 {
            let h = handle.clone();
            tasks.push(tokio::spawn(async move {
                h.record_answer_at(7, i % 2 == 0, noon()).await
            }));
        }
        for t in tasks {
            t.await.unwrap().unwrap();
        }

        let snapshot = handle.snapshot().await.unwrap();
        let entry = &snapshot.data[&7];
        assert_eq!(entry.correct, 10);
        assert_eq!(entry.incorrect, 10);
        assert_eq!(snapshot.current_streak, 1);

        let reloaded = PerformanceTracker::load(store);
        assert_eq!(reloaded.entry(7).map(|e| e.answered()), Some(20));
    }

    #[tokio::test]
    async fn test_review_and_reset_through_handle() {
        let handle = spawn_tracker(PerformanceTracker::load(Arc::new(MemoryStore::new())));

        handle.record_answer_at(1, false, noon()).await.unwrap();
        assert!(handle.review_problems_at(noon()).await.unwrap().is_empty());
        assert_eq!(
            handle
                .review_problems_at(noon() + Duration::hours(5))
                .await
                .unwrap(),
            vec![1]
        );

        handle.reset().await.unwrap();
        let snapshot = handle.snapshot().await.unwrap();
        assert!(snapshot.data.is_empty());
        assert_eq!(snapshot.current_streak, 0);
        assert!(handle
            .review_problems_at(noon() + Duration::days(400))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_stopped_tracker_reports_closed() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let handle = TrackerHandle { sender: tx };

        assert!(matches!(handle.snapshot().await, Err(Error::TrackerClosed)));
        assert!(matches!(
            handle.record_answer_at(1, true, noon()).await,
            Err(Error::TrackerClosed)
        ));
        assert!(matches!(handle.reset().await, Err(Error::TrackerClosed)));
    }

    #[tokio::test]
    async fn test_dropped_reply_reports_closed() {
        let (tx, mut rx) = mpsc::channel(1);
        let handle = TrackerHandle { sender: tx };
        tokio::spawn(async move {
            // Drop each command without answering.
            while rx.recv().await.is_some() {}
        });

        assert!(matches!(
            handle.review_problems_at(noon()).await,
            Err(Error::TrackerClosed)
        ));
    }
}
