//! Virtual character state: satiety decay over time, meal rewards, and
//! level progression.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stat ceiling for satiety and friendship.
pub const STAT_MAX: u8 = 100;

/// Satiety lost per elapsed hour since the last update.
pub const SATIETY_DECAY_PER_HOUR: f64 = 10.0;

/// Experience needed to clear `level` is `level * EXP_PER_LEVEL`.
pub const EXP_PER_LEVEL: u32 = 100;

/// Rewards granted by one meal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealReward {
    pub satiety: u8,
    pub friendship: u8,
    pub exp: u32,
}

/// Recommended meals reward bonding harder than free-choice meals; satiety
/// gain is the same either way.
pub fn meal_reward(is_recommended: bool) -> MealReward {
    if is_recommended {
        MealReward { satiety: 40, friendship: 20, exp: 50 }
    } else {
        MealReward { satiety: 40, friendship: 5, exp: 10 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterState {
    pub user_id: String,
    pub satiety: u8,
    pub friendship: u8,
    pub exp: u32,
    pub level: u32,
    pub last_meal_time: Option<DateTime<Utc>>,
    pub last_update_time: DateTime<Utc>,
}

impl CharacterState {
    pub fn new(user_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.into(),
            satiety: 50,
            friendship: 0,
            exp: 0,
            level: 1,
            last_meal_time: None,
            last_update_time: now,
        }
    }

    /// Applies time-based satiety decay since the last update, saturating at
    /// zero, and stamps `last_update_time`. Clock skew into the past is a
    /// no-op on satiety.
    pub fn apply_satiety_decay(&mut self, now: DateTime<Utc>) {
        let elapsed = now - self.last_update_time;
        let hours = elapsed.num_seconds().max(0) as f64 / 3600.0;
        let loss = (hours * SATIETY_DECAY_PER_HOUR) as u32;
        self.satiety = u8::try_from(u32::from(self.satiety).saturating_sub(loss)).unwrap_or(0);
        self.last_update_time = now;
    }

    /// Applies a meal's rewards and runs level-ups. Returns true when at
    /// least one level was gained.
    pub fn record_meal(&mut self, reward: &MealReward, now: DateTime<Utc>) -> bool {
        self.satiety = clamp_stat(u32::from(self.satiety) + u32::from(reward.satiety));
        self.friendship = clamp_stat(u32::from(self.friendship) + u32::from(reward.friendship));
        self.exp += reward.exp;
        self.last_meal_time = Some(now);
        self.last_update_time = now;
        self.apply_level_ups()
    }

    fn apply_level_ups(&mut self) -> bool {
        let mut leveled = false;
        while self.exp >= self.level * EXP_PER_LEVEL {
            self.exp -= self.level * EXP_PER_LEVEL;
            self.level += 1;
            leveled = true;
        }
        leveled
    }

    pub fn exp_to_next_level(&self) -> u32 {
        (self.level * EXP_PER_LEVEL).saturating_sub(self.exp)
    }
}

fn clamp_stat(value: u32) -> u8 {
    value.min(u32::from(STAT_MAX)) as u8
}

/// One logged meal: what was eaten, the rewards granted, and the weather at
/// the time. Rows feed the food diary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealRecord {
    pub id: Uuid,
    pub user_id: String,
    pub food_name: String,
    pub category: Option<String>,
    pub is_recommended: bool,
    pub satiety_gain: u8,
    pub friendship_gain: u8,
    pub exp_gain: u32,
    pub weather_condition: Option<String>,
    pub temperature_c: Option<f64>,
    pub eaten_at: DateTime<Utc>,
}

impl MealRecord {
    pub fn new(
        user_id: impl Into<String>,
        food_name: impl Into<String>,
        category: Option<String>,
        is_recommended: bool,
        reward: &MealReward,
        eaten_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            food_name: food_name.into(),
            category,
            is_recommended,
            satiety_gain: reward.satiety,
            friendship_gain: reward.friendship,
            exp_gain: reward.exp,
            weather_condition: None,
            temperature_c: None,
            eaten_at,
        }
    }

    pub fn with_weather(mut self, condition: impl Into<String>, temperature_c: f64) -> Self {
        self.weather_condition = Some(condition.into());
        self.temperature_c = Some(temperature_c);
        self
    }
}
