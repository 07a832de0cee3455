// src/achievements.rs

use crate::constants::*;
use crate::error::Result;
use crate::models::{Achievement, TopicStats};
use crate::repository::{load_json_or_default, save_json, KvStore};
use log::info;
use std::sync::Arc;

fn achievement(id: &str, title: &str, description: &str, icon: &str) -> Achievement {
    Achievement {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
    }
}

pub fn builtin_achievements() -> Vec<Achievement> {
    vec![
        achievement("FIRST_CORRECT", "First Blood", "Answer your first problem correctly.", "🎯"),
        achievement("ALL_CORRECT_10", "Getting Warm", "Answer 10 problems correctly.", "🔥"),
        achievement("STREAK_3", "Habit Forming", "Practice 3 days in a row.", "📅"),
        achievement("STREAK_7", "Week Warrior", "Practice 7 days in a row.", "🏆"),
    ]
}

pub fn topic_master_id(topic: &str) -> String {
    let slug: String = topic
        .to_uppercase()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    format!("{}{}", TOPIC_MASTER_PREFIX, slug)
}

fn topic_master(topic: &str) -> Achievement {
    achievement(
        &topic_master_id(topic),
        &format!("{} Master", topic),
        &format!("Reach 100% accuracy in {}.", topic),
        "🧠",
    )
}

/// Every achievement whose threshold the given aggregates meet.
pub fn earned(stats: &[TopicStats], current_streak: u32) -> Vec<Achievement> {
    let total_correct: u32 = stats.iter().map(|s| s.correct).sum();
    let mut out = Vec::new();

    for a in builtin_achievements() {
        let met = match a.id.as_str() {
            "FIRST_CORRECT" => total_correct >= FIRST_CORRECT_THRESHOLD,
            "ALL_CORRECT_10" => total_correct >= CORRECT_10_THRESHOLD,
            "STREAK_3" => current_streak >= STREAK_SHORT_THRESHOLD,
            "STREAK_7" => current_streak >= STREAK_LONG_THRESHOLD,
            _ => false,
        };
        if met {
            out.push(a);
        }
    }

    for s in stats {
        if s.answered() > 0 && s.incorrect == 0 {
            out.push(topic_master(&s.topic));
        }
    }
    out
}

pub struct Achievements {
    store: Arc<dyn KvStore>,
    unlocked: Vec<String>,
}

impl Achievements {
    pub fn load(store: Arc<dyn KvStore>) -> Self {
        let unlocked: Vec<String> = load_json_or_default(store.as_ref(), KEY_UNLOCKED_ACHIEVEMENTS);
        Achievements { store, unlocked }
    }

    pub fn unlocked(&self) -> &[String] {
        &self.unlocked
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked.iter().any(|u| u == id)
    }

    /// Unlocks everything newly earned and returns only the new ones.
    pub fn check(&mut self, stats: &[TopicStats], current_streak: u32) -> Result<Vec<Achievement>> {
        let fresh: Vec<Achievement> = earned(stats, current_streak)
            .into_iter()
            .filter(|a| !self.is_unlocked(&a.id))
            .collect();

        if fresh.is_empty() {
            return Ok(fresh);
        }

        for a in &fresh {
            info!("Achievement Unlocked! {}: {}", a.title, a.description);
            self.unlocked.push(a.id.clone());
        }
        save_json(self.store.as_ref(), KEY_UNLOCKED_ACHIEVEMENTS, &self.unlocked)?;
        Ok(fresh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryStore;

    fn stats(topic: &str, correct: u32, incorrect: u32) -> TopicStats {
        let answered = correct + incorrect;
        TopicStats {
            topic: topic.to_string(),
            correct,
            incorrect,
            total_problems: 3,
            accuracy: if answered == 0 {
                0.0
            } else {
                correct as f64 / answered as f64 * 100.0
            },
        }
    }

    #[test]
    fn test_topic_master_id() {
        assert_eq!(topic_master_id("Array"), "TOPIC_MASTER_ARRAY");
        assert_eq!(topic_master_id("Linked List"), "TOPIC_MASTER_LINKED_LIST");
    }

    #[test]
    fn test_thresholds() {
        let none = earned(&[stats("Array", 0, 0)], 0);
        assert!(none.is_empty());

        let ids: Vec<String> = earned(&[stats("Array", 6, 1), stats("Stack", 4, 0)], 7)
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(
            ids,
            vec![
                "FIRST_CORRECT",
                "ALL_CORRECT_10",
                "STREAK_3",
                "STREAK_7",
                "TOPIC_MASTER_STACK"
            ]
        );
    }

    #[test]
    fn test_check_only_returns_new_unlocks() {
        let store = Arc::new(MemoryStore::new());
        let mut achievements = Achievements::load(store.clone());

        let first = achievements.check(&[stats("Array", 1, 0)], 1).unwrap();
        assert_eq!(first.len(), 2);
        assert!(achievements.is_unlocked("FIRST_CORRECT"));
        assert!(achievements.is_unlocked("TOPIC_MASTER_ARRAY"));

        let again = achievements.check(&[stats("Array", 1, 0)], 3).unwrap();
        assert_eq!(again.len(), 1);
        assert_eq!(again[0].id, "STREAK_3");

        let reloaded = Achievements::load(store);
        assert_eq!(reloaded.unlocked().len(), 3);
    }
}
