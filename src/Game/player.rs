//! Player statistics, reward currencies and user preferences.
use serde::{Deserialize, Serialize};

/// Reward currencies. Each one is backed by its own counter in `PlayerStats`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Currency {
    Proton,
    Electron,
    Neutron,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Proton, Currency::Electron, Currency::Neutron];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerStats {
    pub level: u32,
    pub experience: u64,
    pub proton_points: u64,
    pub electron_credits: u64,
    pub neutron_nuggets: u64,
    pub equations_balanced: u64,
    pub perfect_balances: u64,
    /// seconds
    pub total_play_time: u64,
    pub current_streak: u64,
    pub best_streak: u64,
}

impl Default for PlayerStats {
    /// starting capital of a new player
    fn default() -> Self {
        Self {
            level: 1,
            experience: 0,
            proton_points: 100,
            electron_credits: 50,
            neutron_nuggets: 10,
            equations_balanced: 0,
            perfect_balances: 0,
            total_play_time: 0,
            current_streak: 0,
            best_streak: 0,
        }
    }
}

impl PlayerStats {
    pub fn balance(&self, currency: Currency) -> u64 {
        match currency {
            Currency::Proton => self.proton_points,
            Currency::Electron => self.electron_credits,
            Currency::Neutron => self.neutron_nuggets,
        }
    }

    pub fn balance_mut(&mut self, currency: Currency) -> &mut u64 {
        match currency {
            Currency::Proton => &mut self.proton_points,
            Currency::Electron => &mut self.electron_credits,
            Currency::Neutron => &mut self.neutron_nuggets,
        }
    }

    /// level grows by one every 100 experience points, starting at 1
    pub fn level_for_experience(experience: u64) -> u32 {
        u32::try_from(experience / 100 + 1).unwrap_or(u32::MAX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameDifficulty {
    Easy,
    Normal,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Animations {
    Full,
    Reduced,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    pub sound_enabled: bool,
    pub music_enabled: bool,
    pub sound_volume: f64,
    pub music_volume: f64,
    pub theme: String,
    pub difficulty: GameDifficulty,
    pub hints_enabled: bool,
    pub animations: Animations,
    pub language: String,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            music_enabled: true,
            sound_volume: 0.7,
            music_volume: 0.5,
            theme: "default".to_string(),
            difficulty: GameDifficulty::Normal,
            hints_enabled: true,
            animations: Animations::Full,
            language: "en".to_string(),
        }
    }
}

impl UserPreferences {
    /// volumes clamped into 0..=1
    pub fn normalized(mut self) -> Self {
        self.sound_volume = self.sound_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self
    }
}

/// one submitted solution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquationAttempt {
    pub equation_id: String,
    /// unix time, milliseconds
    pub timestamp: u64,
    pub is_correct: bool,
    /// milliseconds
    pub time_spent: u64,
    pub hints_used: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_counters() {
        let mut stats = PlayerStats::default();
        assert_eq!(stats.balance(Currency::Proton), 100);
        assert_eq!(stats.balance(Currency::Electron), 50);
        assert_eq!(stats.balance(Currency::Neutron), 10);
        *stats.balance_mut(Currency::Neutron) += 5;
        assert_eq!(stats.neutron_nuggets, 15);
        // every currency has its own counter
        for currency in Currency::ALL {
            let before: Vec<u64> = Currency::ALL.iter().map(|&c| stats.balance(c)).collect();
            *stats.balance_mut(currency) += 1;
            for (i, &other) in Currency::ALL.iter().enumerate() {
                let expected = if other == currency { before[i] + 1 } else { before[i] };
                assert_eq!(stats.balance(other), expected);
            }
        }
    }

    #[test]
    fn test_level_for_experience() {
        assert_eq!(PlayerStats::level_for_experience(0), 1);
        assert_eq!(PlayerStats::level_for_experience(99), 1);
        assert_eq!(PlayerStats::level_for_experience(100), 2);
        assert_eq!(PlayerStats::level_for_experience(250), 3);
    }

    #[test]
    fn test_preferences_json() {
        let prefs: UserPreferences =
            serde_json::from_str(r#"{"soundVolume": 1.5, "animations": "reduced"}"#).unwrap();
        assert_eq!(prefs.animations, Animations::Reduced);
        assert!(prefs.hints_enabled);
        assert_eq!(prefs.language, "en");
        assert_eq!(prefs.normalized().sound_volume, 1.0);
    }
}
