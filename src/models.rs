// src/models.rs

use crate::achievements::Achievements;
use crate::constants::{ALL_TOPICS, UNKNOWN_CATEGORY};
use crate::daily::DailyProblem;
use crate::favorites::Favorites;
use crate::service::TrackerHandle;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

pub type ProblemId = i64;

/// Keyed by problem id; serialized as a JSON object with string keys.
pub type PerformanceData = BTreeMap<ProblemId, PerformanceEntry>;

// --- App State ---

/// Services built once at startup and handed to every command.
pub struct AppState {
    pub catalog: Vec<Problem>,
    pub tracker: TrackerHandle,
    pub favorites: Favorites,
    pub daily: DailyProblem,
    pub achievements: Achievements,
}

// --- Data Models ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy = 1,
    Medium = 2,
    Hard = 3,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {}", other)),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A catalog problem as presented to the deck.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Problem {
    pub id: ProblemId,
    pub title: String,
    pub description: String,
    pub solution: String,
    pub difficulty: Difficulty,
    pub category: String,
    pub topic_tags: Vec<String>,
    pub hint: Option<String>,
}

impl From<JsonProblem> for Problem {
    fn from(p: JsonProblem) -> Self {
        let category = p
            .topic_tags
            .first()
            .cloned()
            .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());
        Problem {
            id: p.id,
            title: p.title,
            description: p.content,
            solution: p.solution,
            difficulty: p.difficulty,
            category,
            topic_tags: p.topic_tags,
            hint: p.hint,
        }
    }
}

// Used for loading the catalog
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JsonProblem {
    pub id: ProblemId,
    pub title: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub topic_tags: Vec<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub solution: String,
    #[serde(default)]
    pub hint: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceEntry {
    pub correct: u32,
    pub incorrect: u32,
    #[serde(default)]
    pub srs_level: u32,
    pub next_review: DateTime<Utc>,
}

impl PerformanceEntry {
    pub fn new(now: DateTime<Utc>) -> Self {
        PerformanceEntry {
            correct: 0,
            incorrect: 0,
            srs_level: 0,
            next_review: now,
        }
    }

    pub fn answered(&self) -> u32 {
        self.correct + self.incorrect
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TopicStats {
    pub topic: String,
    pub correct: u32,
    pub incorrect: u32,
    pub total_problems: u32,
    pub accuracy: f64, // Percent, 0 when unanswered
}

impl TopicStats {
    pub fn answered(&self) -> u32 {
        self.correct + self.incorrect
    }
}

/// Transient deck selection chosen by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub topic: String,
    pub difficulties: HashSet<Difficulty>,
    pub search_query: String,
    pub favorites_only: bool,
    pub review_only: bool,
    pub problem_of_day_only: bool,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        FilterCriteria {
            topic: ALL_TOPICS.to_string(),
            difficulties: HashSet::new(),
            search_query: String::new(),
            favorites_only: false,
            review_only: false,
            problem_of_day_only: false,
        }
    }
}

/// Read-only state from other services that some filter modes need.
#[derive(Debug, Clone, Default)]
pub struct SelectionContext {
    pub due: HashSet<ProblemId>,
    pub favorites: HashSet<ProblemId>,
    pub problem_of_day: Option<ProblemId>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
}

/// Copy of the tracker state handed out by the actor.
#[derive(Debug, Clone, Default)]
pub struct PerformanceSnapshot {
    pub data: PerformanceData,
    pub current_streak: u32,
    pub last_practice_date: Option<chrono::NaiveDate>,
}
