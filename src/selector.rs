// src/selector.rs

use crate::constants::{ALL_TOPICS, NEEDS_PRACTICE_ACCURACY};
use crate::models::{FilterCriteria, PerformanceData, Problem, SelectionContext, TopicStats};
use log::debug;
use std::collections::BTreeMap;

// --- Deck Filtering ---

/// Builds the active deck, preserving catalog order.
///
/// The problem-of-the-day, review and favorites modes are exclusive and take
/// precedence in that order over the topic/difficulty filters. The title
/// search always applies on top of whichever base list was chosen.
pub fn filter_problems<'a>(
    catalog: &'a [Problem],
    criteria: &FilterCriteria,
    ctx: &SelectionContext,
) -> Vec<&'a Problem> {
    let base: Vec<&Problem> = if criteria.problem_of_day_only {
        match ctx.problem_of_day {
            Some(id) => catalog.iter().filter(|p| p.id == id).take(1).collect(),
            None => Vec::new(),
        }
    } else if criteria.review_only {
        catalog.iter().filter(|p| ctx.due.contains(&p.id)).collect()
    } else if criteria.favorites_only {
        catalog
            .iter()
            .filter(|p| ctx.favorites.contains(&p.id))
            .collect()
    } else {
        catalog
            .iter()
            .filter(|p| criteria.topic == ALL_TOPICS || p.category == criteria.topic)
            .filter(|p| {
                criteria.difficulties.is_empty() || criteria.difficulties.contains(&p.difficulty)
            })
            .collect()
    };

    // A blank query disables the search; otherwise it matches as typed.
    let deck: Vec<&Problem> = if criteria.search_query.trim().is_empty() {
        base
    } else {
        let query = criteria.search_query.to_lowercase();
        base.into_iter()
            .filter(|p| p.title.to_lowercase().contains(&query))
            .collect()
    };

    debug!("Deck built: {} of {} problems ({:?})", deck.len(), catalog.len(), criteria);
    deck
}

// --- Topic Statistics ---

/// "All" followed by every category in first-seen catalog order.
pub fn topics(catalog: &[Problem]) -> Vec<String> {
    let mut out = vec![ALL_TOPICS.to_string()];
    for p in catalog {
        if !out.iter().any(|t| t == &p.category) {
            out.push(p.category.clone());
        }
    }
    out
}

/// Per-category totals, sorted by category name.
pub fn topic_stats(catalog: &[Problem], data: &PerformanceData) -> Vec<TopicStats> {
    let mut by_topic: BTreeMap<&str, (u32, u32, u32)> = BTreeMap::new();

    for p in catalog {
        let slot = by_topic.entry(p.category.as_str()).or_default();
        if let Some(perf) = data.get(&p.id) {
            slot.0 += perf.correct;
            slot.1 += perf.incorrect;
        }
        slot.2 += 1;
    }

    by_topic
        .into_iter()
        .map(|(topic, (correct, incorrect, total_problems))| TopicStats {
            topic: topic.to_string(),
            correct,
            incorrect,
            total_problems,
            accuracy: accuracy(correct, incorrect).unwrap_or(0.0),
        })
        .collect()
}

/// Percent correct, or `None` when nothing was answered.
pub fn accuracy(correct: u32, incorrect: u32) -> Option<f64> {
    let total = correct + incorrect;
    if total == 0 {
        return None;
    }
    Some(correct as f64 / total as f64 * 100.0)
}

pub fn needs_practice(stats: &TopicStats) -> bool {
    stats.answered() > 0 && stats.accuracy < NEEDS_PRACTICE_ACCURACY
}

/// Lowest-accuracy category among those with at least one answer.
/// Ties go to the alphabetically first category.
pub fn find_weakest_topic(catalog: &[Problem], data: &PerformanceData) -> Option<String> {
    let mut weakest: Option<(String, f64)> = None;

    for stats in topic_stats(catalog, data) {
        let Some(acc) = accuracy(stats.correct, stats.incorrect) else {
            continue;
        };
        let is_weaker = weakest.as_ref().map_or(true, |(_, best)| acc < *best);
        if is_weaker {
            weakest = Some((stats.topic, acc));
        }
    }

    if let Some((topic, acc)) = &weakest {
        debug!("Weakest topic: {} ({:.1}%)", topic, acc);
    }
    weakest.map(|(topic, _)| topic)
}
