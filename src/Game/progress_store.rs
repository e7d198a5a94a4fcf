//! # Progress Store
//!
//! ## Purpose
//! Keeps player progress and preferences between sessions. The store is an ordinary value
//! owned by the caller and passed by reference, there is no global instance. Balance checks
//! are delegated to `Balancing::validation`, the store only books their outcome.
//!
//! ## Persistence
//! Only `ProgressState` is written, as pretty JSON:
//! ```json
//! {
//!   "playerStats": { "level": 1, "experience": 0, "protonPoints": 100, ... },
//!   "userPreferences": { "soundEnabled": true, ... },
//!   "unlockedLevels": ["level-1"],
//!   "completedEquations": [],
//!   "equationAttempts": []
//! }
//! ```
//! A missing file means a new player. The current equation and the hint level are session
//! state and are not saved.
//!
//! ## Usage
//! ```rust,no_run
//! use ChemMatch::Game::equations::get_equation_by_id;
//! use ChemMatch::Game::progress_store::ProgressStore;
//!
//! let mut store = ProgressStore::load("chem_match_progress.json")?;
//! store.set_current_equation(get_equation_by_id("eq-001").unwrap().clone());
//! let verdict = store.submit_solution(&[2, 1], &[2])?;
//! assert!(verdict.balanced);
//! store.save()?;
//! # Ok::<(), ChemMatch::Game::progress_store::StoreError>(())
//! ```

use crate::Balancing::errors::BalanceError;
use crate::Balancing::validation::{BalanceVerdict, validate_equation};
use crate::Game::equations::Equation;
use crate::Game::player::{Currency, EquationAttempt, PlayerStats, UserPreferences};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// electron credits charged for every hint
pub const HINT_COST: u64 = 10;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no equation is selected")]
    NoCurrentEquation,
    #[error(transparent)]
    Balance(#[from] BalanceError),
    #[error("store has no file to save to")]
    NoBackingFile,
}

/// part of the store that is persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressState {
    pub player_stats: PlayerStats,
    pub user_preferences: UserPreferences,
    pub unlocked_levels: Vec<String>,
    pub completed_equations: Vec<String>,
    pub equation_attempts: Vec<EquationAttempt>,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            player_stats: PlayerStats::default(),
            user_preferences: UserPreferences::default(),
            unlocked_levels: vec!["level-1".to_string()],
            completed_equations: Vec::new(),
            equation_attempts: Vec::new(),
        }
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[derive(Debug, Clone, Default)]
pub struct ProgressStore {
    state: ProgressState,
    current_equation: Option<Equation>,
    hint_level: usize,
    equation_started_at: u64,
    file: Option<PathBuf>,
}

impl ProgressStore {
    /// in-memory store for a new player
    pub fn new() -> Self {
        Self::default()
    }

    /// Store backed by a JSON file. A missing file gives a new player, an unreadable or
    /// invalid one is an error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let state = if path.exists() {
            let content = fs::read_to_string(path)?;
            let state: ProgressState = serde_json::from_str(&content)?;
            info!("loaded progress from {}", path.display());
            state
        } else {
            info!("no progress file at {}, starting a new player", path.display());
            ProgressState::default()
        };
        Ok(Self {
            state,
            file: Some(path.to_path_buf()),
            ..Self::default()
        })
    }

    /// writes the persisted part to the backing file
    pub fn save(&self) -> Result<(), StoreError> {
        let path = self.file.as_ref().ok_or(StoreError::NoBackingFile)?;
        self.save_to(path)
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(&self.state)?;
        fs::write(path.as_ref(), content)?;
        info!("progress saved to {}", path.as_ref().display());
        Ok(())
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.state.player_stats
    }

    pub fn preferences(&self) -> &UserPreferences {
        &self.state.user_preferences
    }

    pub fn current_equation(&self) -> Option<&Equation> {
        self.current_equation.as_ref()
    }

    pub fn hint_level(&self) -> usize {
        self.hint_level
    }

    /////////////////////////////////COUNTERS///////////////////////////////////////////
    pub fn add_experience(&mut self, xp: u64) {
        let stats = &mut self.state.player_stats;
        stats.experience = stats.experience.saturating_add(xp);
        stats.level = PlayerStats::level_for_experience(stats.experience);
    }

    pub fn add_points(&mut self, points: u64, currency: Currency) {
        let balance = self.state.player_stats.balance_mut(currency);
        *balance = balance.saturating_add(points);
    }

    pub fn update_preferences(&mut self, update: impl FnOnce(&mut UserPreferences)) {
        update(&mut self.state.user_preferences);
        self.state.user_preferences = self.state.user_preferences.clone().normalized();
    }

    pub fn unlock_level(&mut self, level_id: &str) {
        if !self.state.unlocked_levels.iter().any(|l| l == level_id) {
            self.state.unlocked_levels.push(level_id.to_string());
        }
    }

    pub fn complete_equation(&mut self, equation_id: &str) {
        if !self.state.completed_equations.iter().any(|e| e == equation_id) {
            self.state.completed_equations.push(equation_id.to_string());
        }
    }

    /////////////////////////////////PLAYING AN EQUATION///////////////////////////////////////////
    pub fn set_current_equation(&mut self, equation: Equation) {
        self.current_equation = Some(equation);
        self.hint_level = 0;
        self.equation_started_at = now_millis();
    }

    /// Checks the coefficients against the current equation and books the attempt. A
    /// balanced verdict counts one more balanced equation, extends the streak and marks the
    /// equation completed; an unbalanced one leaves the counters alone.
    pub fn submit_solution(
        &mut self,
        reactant_coefficients: &[i64],
        product_coefficients: &[i64],
    ) -> Result<BalanceVerdict, StoreError> {
        let equation = self
            .current_equation
            .as_ref()
            .ok_or(StoreError::NoCurrentEquation)?;
        let verdict = validate_equation(equation, reactant_coefficients, product_coefficients)?;
        let equation_id = equation.id.clone();

        let now = now_millis();
        self.state.equation_attempts.push(EquationAttempt {
            equation_id: equation_id.clone(),
            timestamp: now,
            is_correct: verdict.balanced,
            time_spent: now.saturating_sub(self.equation_started_at),
            hints_used: self.hint_level as u32,
        });

        if verdict.balanced {
            let stats = &mut self.state.player_stats;
            stats.equations_balanced += 1;
            stats.current_streak += 1;
            stats.best_streak = stats.best_streak.max(stats.current_streak);
            self.complete_equation(&equation_id);
            info!("equation {} balanced", equation_id);
        } else {
            warn!(
                "equation {} not balanced, mismatched elements: {:?}",
                equation_id, verdict.unbalanced_elements
            );
        }
        Ok(verdict)
    }

    /// next hint of the current equation; each one costs `HINT_COST` electron credits
    /// (never below zero). None when there is no equation or no hints left
    pub fn use_hint(&mut self) -> Option<String> {
        let hint = self
            .current_equation
            .as_ref()?
            .hints
            .get(self.hint_level)?
            .clone();
        self.hint_level += 1;
        let credits = self.state.player_stats.balance_mut(Currency::Electron);
        *credits = credits.saturating_sub(HINT_COST);
        Some(hint)
    }

    /// back to a new player, preferences are kept
    pub fn reset_progress(&mut self) {
        let preferences = self.state.user_preferences.clone();
        self.state = ProgressState {
            user_preferences: preferences,
            ..ProgressState::default()
        };
    }
}
