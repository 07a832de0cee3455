// src/favorites.rs

use crate::constants::KEY_FAVORITES;
use crate::error::Result;
use crate::models::ProblemId;
use crate::repository::{load_json_or_default, save_json, KvStore};
use log::info;
use std::collections::HashSet;
use std::sync::Arc;

pub struct Favorites {
    store: Arc<dyn KvStore>,
    ids: Vec<ProblemId>,
}

impl Favorites {
    pub fn load(store: Arc<dyn KvStore>) -> Self {
        let ids: Vec<ProblemId> = load_json_or_default(store.as_ref(), KEY_FAVORITES);
        Favorites { store, ids }
    }

    /// Adds or removes `problem_id`; returns whether it is now a favorite.
    pub fn toggle(&mut self, problem_id: ProblemId) -> Result<bool> {
        let now_favorite = if let Some(pos) = self.ids.iter().position(|&id| id == problem_id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(problem_id);
            true
        };

        info!("Problem {} favorite: {}", problem_id, now_favorite);
        save_json(self.store.as_ref(), KEY_FAVORITES, &self.ids)?;
        Ok(now_favorite)
    }

    pub fn is_favorite(&self, problem_id: ProblemId) -> bool {
        self.ids.contains(&problem_id)
    }

    /// In the order they were added.
    pub fn ids(&self) -> &[ProblemId] {
        &self.ids
    }

    pub fn id_set(&self) -> HashSet<ProblemId> {
        self.ids.iter().copied().collect()
    }
}
