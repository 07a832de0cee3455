// src/daily.rs

use crate::constants::{DATE_FORMAT, KEY_DAILY_COMPLETED_DATE};
use crate::error::Result;
use crate::models::Problem;
use crate::repository::{load_json, save_json, KvStore};
use chrono::{Datelike, NaiveDate};
use log::{info, warn};
use std::sync::Arc;

/// Problem for a calendar day: the day of year (Jan 1 = 0) modulo the
/// catalog length.
pub fn assign_daily_problem(catalog: &[Problem], date: NaiveDate) -> Option<&Problem> {
    if catalog.is_empty() {
        return None;
    }
    let index = date.ordinal0() as usize % catalog.len();
    catalog.get(index)
}

pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Tracks whether today's problem was completed. Completion is stored as the
/// date it happened, so a new day starts incomplete without any write.
pub struct DailyProblem {
    store: Arc<dyn KvStore>,
}

impl DailyProblem {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        DailyProblem { store }
    }

    pub fn is_completed(&self, today: NaiveDate) -> bool {
        match load_json::<String>(self.store.as_ref(), KEY_DAILY_COMPLETED_DATE) {
            Ok(Some(last)) => last == date_key(today),
            Ok(None) => false,
            Err(e) => {
                warn!("Failed to read daily completion, assuming incomplete: {}", e);
                false
            }
        }
    }

    pub fn mark_completed(&self, today: NaiveDate) -> Result<()> {
        let key = date_key(today);
        info!("Problem of the day completed for {}", key);
        save_json(self.store.as_ref(), KEY_DAILY_COMPLETED_DATE, &key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::bundled_catalog;
    use crate::repository::MemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_assignment_is_day_of_year_mod_len() {
        let catalog = bundled_catalog().unwrap();
        let len = catalog.len();

        assert_eq!(assign_daily_problem(&catalog, date(2026, 1, 1)).unwrap().id, catalog[0].id);
        assert_eq!(assign_daily_problem(&catalog, date(2026, 1, 3)).unwrap().id, catalog[2].id);

        let feb_10 = date(2026, 2, 10); // day 40
        assert_eq!(
            assign_daily_problem(&catalog, feb_10).unwrap().id,
            catalog[40 % len].id
        );
    }

    #[test]
    fn test_assignment_is_deterministic() {
        let catalog = bundled_catalog().unwrap();
        let d = date(2026, 10, 16);
        let first = assign_daily_problem(&catalog, d).map(|p| p.id);
        let second = assign_daily_problem(&catalog, d).map(|p| p.id);
        assert_eq!(first, second);
        assert!(assign_daily_problem(&[], d).is_none());
    }

    #[test]
    fn test_completion_resets_next_day() {
        let daily = DailyProblem::new(Arc::new(MemoryStore::new()));
        let today = date(2026, 10, 16);

        assert!(!daily.is_completed(today));
        daily.mark_completed(today).unwrap();
        assert!(daily.is_completed(today));
        assert!(!daily.is_completed(date(2026, 10, 17)));
    }
}
