// src/lib.rs

pub mod achievements;
pub mod config;
pub mod constants;
pub mod daily;
pub mod database;
pub mod error;
pub mod favorites;
pub mod models;
pub mod performance;
pub mod repository;
pub mod selector;
pub mod service;
pub mod srs;

use crate::achievements::Achievements;
use crate::config::Config;
use crate::daily::DailyProblem;
use crate::error::Result;
use crate::favorites::Favorites;
use crate::models::AppState;
use crate::performance::PerformanceTracker;
use log::info;

/// Opens the store, loads the catalog and starts the tracker task.
/// Must be called inside a tokio runtime.
pub fn build_app_state(config: &Config) -> Result<AppState> {
    let store = config.open_store()?;
    let catalog = database::load_catalog(config.catalog_path.as_deref())?;

    let tracker = service::spawn_tracker(PerformanceTracker::load(store.clone()));
    let favorites = Favorites::load(store.clone());
    let daily = DailyProblem::new(store.clone());
    let achievements = Achievements::load(store);

    info!("App state ready ({} problems)", catalog.len());
    Ok(AppState {
        catalog,
        tracker,
        favorites,
        daily,
        achievements,
    })
}
