//! One JSON document per day under `days/`, saved scores under `scores/`.

use crate::core::model::{
    ActivityRecord, DayInputs, FoodCategory, FoodRecord, Mood, TimeSlot, WaterEntry, WaterIntake,
};
use crate::core::score::{Breakdown, Category, HealthScoreResult};
use crate::utils::fs::{read_json, relative_path, write_json_atomic};
use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;
use walkdir::WalkDir;

static DATE_FILE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4}-\d{2}-\d{2})\.json$").expect("valid date file regex"));

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    pub date: NaiveDate,
    #[serde(default)]
    pub activities: Vec<ActivityRecord>,
    #[serde(default)]
    pub foods: Vec<FoodRecord>,
    pub water: WaterIntake,
    #[serde(default)]
    pub mood: Option<Mood>,
}

impl DayRecord {
    pub fn new(date: NaiveDate, water_goal: u32) -> Self {
        Self {
            date,
            activities: Vec::new(),
            foods: Vec::new(),
            water: WaterIntake::new(0, water_goal),
            mood: None,
        }
    }
}

impl From<&DayRecord> for DayInputs {
    fn from(day: &DayRecord) -> Self {
        Self {
            activities: day.activities.clone(),
            foods: day.foods.clone(),
            water_intake: day.water.clone(),
            mood: day.mood,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedScore {
    pub date: NaiveDate,
    pub score: u8,
    pub breakdown: Breakdown,
    pub category: Category,
    pub saved_at: DateTime<Utc>,
}

pub struct DayStore {
    root: PathBuf,
    default_water_goal: u32,
}

impl DayStore {
    pub fn new(root: impl Into<PathBuf>, default_water_goal: u32) -> Self {
        Self {
            root: root.into(),
            default_water_goal,
        }
    }

    fn day_path(&self, date: NaiveDate) -> PathBuf {
        self.root.join("days").join(date_file_name(date))
    }

    fn score_path(&self, date: NaiveDate) -> PathBuf {
        self.root.join("scores").join(date_file_name(date))
    }

    pub fn load_day(&self, date: NaiveDate) -> Result<DayRecord> {
        match read_json::<DayRecord>(&self.day_path(date))? {
            Some(day) => Ok(day),
            None => {
                debug!(%date, "no stored day, starting fresh");
                Ok(DayRecord::new(date, self.default_water_goal))
            }
        }
    }

    pub fn save_day(&self, day: &DayRecord) -> Result<()> {
        write_json_atomic(&self.day_path(day.date), day)?;
        Ok(())
    }

    fn update_day<T>(
        &self,
        date: NaiveDate,
        apply: impl FnOnce(&mut DayRecord) -> Result<T>,
    ) -> Result<T> {
        let mut day = self.load_day(date)?;
        let out = apply(&mut day)?;
        self.save_day(&day)?;
        Ok(out)
    }

    pub fn add_activity(
        &self,
        date: NaiveDate,
        title: &str,
        time_slot: TimeSlot,
    ) -> Result<ActivityRecord> {
        let title = non_empty(title, "activity title")?;
        self.update_day(date, |day| {
            let activity = ActivityRecord {
                id: Uuid::new_v4().to_string(),
                title,
                time_slot,
                selected: true,
                completed: false,
                created_at: Some(Utc::now()),
            };
            day.activities.push(activity.clone());
            debug!(%date, id = %activity.id, "activity added");
            Ok(activity)
        })
    }

    pub fn toggle_activity(&self, date: NaiveDate, id: &str) -> Result<ActivityRecord> {
        self.update_day(date, |day| {
            let idx = position_by_id(&day.activities, id, |a| &a.id)?;
            let activity = &mut day.activities[idx];
            activity.completed = !activity.completed;
            let toggled = activity.clone();

            if toggled.completed && is_drink_water(&toggled.title) {
                debug!(%date, "drink water activity completed, logging a glass");
                log_water(&mut day.water, 1);
            }
            Ok(toggled)
        })
    }

    pub fn remove_activity(&self, date: NaiveDate, id: &str) -> Result<ActivityRecord> {
        self.update_day(date, |day| {
            let idx = position_by_id(&day.activities, id, |a| &a.id)?;
            Ok(day.activities.remove(idx))
        })
    }

    pub fn add_food(
        &self,
        date: NaiveDate,
        name: &str,
        category: FoodCategory,
        time_slot: TimeSlot,
    ) -> Result<FoodRecord> {
        let name = non_empty(name, "food name")?;
        self.update_day(date, |day| {
            let food = FoodRecord {
                id: Uuid::new_v4().to_string(),
                name,
                category,
                time_slot,
                selected: true,
                completed: false,
                created_at: Some(Utc::now()),
            };
            day.foods.push(food.clone());
            debug!(%date, id = %food.id, %category, "food added");
            Ok(food)
        })
    }

    pub fn toggle_food(&self, date: NaiveDate, id: &str) -> Result<FoodRecord> {
        self.update_day(date, |day| {
            let idx = position_by_id(&day.foods, id, |f| &f.id)?;
            let food = &mut day.foods[idx];
            food.completed = !food.completed;
            Ok(food.clone())
        })
    }

    pub fn remove_food(&self, date: NaiveDate, id: &str) -> Result<FoodRecord> {
        self.update_day(date, |day| {
            let idx = position_by_id(&day.foods, id, |f| &f.id)?;
            Ok(day.foods.remove(idx))
        })
    }

    pub fn add_water(&self, date: NaiveDate, amount: u32) -> Result<WaterIntake> {
        if amount == 0 {
            return Err(StoreError::Invalid("water amount must be at least 1".into()));
        }

        self.update_day(date, |day| {
            log_water(&mut day.water, amount);
            Ok(day.water.clone())
        })
    }

    pub fn set_water_goal(&self, date: NaiveDate, goal: u32) -> Result<WaterIntake> {
        if goal < 1 {
            return Err(StoreError::Invalid("water goal must be at least 1".into()));
        }

        self.update_day(date, |day| {
            day.water.goal = goal;
            Ok(day.water.clone())
        })
    }

    pub fn reset_water(&self, date: NaiveDate) -> Result<WaterIntake> {
        self.update_day(date, |day| {
            day.water.current = 0;
            day.water.entries.clear();
            Ok(day.water.clone())
        })
    }

    pub fn set_mood(&self, date: NaiveDate, mood: Mood) -> Result<()> {
        self.update_day(date, |day| {
            day.mood = Some(mood);
            Ok(())
        })
    }

    pub fn clear_mood(&self, date: NaiveDate) -> Result<()> {
        self.update_day(date, |day| {
            day.mood = None;
            Ok(())
        })
    }

    pub fn save_score(&self, date: NaiveDate, result: &HealthScoreResult) -> Result<SavedScore> {
        let saved = SavedScore {
            date,
            score: result.score,
            breakdown: result.breakdown,
            category: result.category.category,
            saved_at: Utc::now(),
        };
        write_json_atomic(&self.score_path(date), &saved)?;
        debug!(%date, score = saved.score, "health score saved");
        Ok(saved)
    }

    pub fn load_score(&self, date: NaiveDate) -> Result<Option<SavedScore>> {
        Ok(read_json(&self.score_path(date))?)
    }

    pub fn list_scores(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<SavedScore>> {
        let dir = self.root.join("scores");
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut scores = Vec::new();
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy();
            let Some(date) = parse_date_file_name(&file_name) else {
                debug!(file = %relative_path(&self.root, entry.path()), "skipping non-date file");
                continue;
            };
            if from.is_some_and(|from| date < from) || to.is_some_and(|to| date > to) {
                continue;
            }

            match read_json::<SavedScore>(entry.path()) {
                Ok(Some(saved)) => scores.push(saved),
                Ok(None) => {}
                Err(err) => warn!(
                    file = %relative_path(&self.root, entry.path()),
                    error = %err,
                    "skipping unreadable score file"
                ),
            }
        }

        scores.sort_by_key(|saved| saved.date);
        Ok(scores)
    }
}

fn log_water(water: &mut WaterIntake, amount: u32) {
    water.current = water.current.saturating_add(amount);
    water.entries.push(WaterEntry {
        amount,
        at: Utc::now(),
    });
}

fn date_file_name(date: NaiveDate) -> String {
    format!("{}.json", date.format("%Y-%m-%d"))
}

fn parse_date_file_name(file_name: &str) -> Option<NaiveDate> {
    let captures = DATE_FILE_RE.captures(file_name)?;
    NaiveDate::parse_from_str(&captures[1], "%Y-%m-%d").ok()
}

fn non_empty(value: &str, what: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::Invalid(format!("{what} must not be empty")));
    }
    Ok(trimmed.to_string())
}

fn is_drink_water(title: &str) -> bool {
    title.to_lowercase().contains("drink water")
}

/// Matches an exact id first, then a unique id prefix.
fn position_by_id<T>(items: &[T], id: &str, key: impl Fn(&T) -> &str) -> Result<usize> {
    if let Some(idx) = items.iter().position(|item| key(item) == id) {
        return Ok(idx);
    }

    let matches: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| !id.is_empty() && key(item).starts_with(id))
        .map(|(idx, _)| idx)
        .collect();

    match matches.as_slice() {
        [idx] => Ok(*idx),
        [] => Err(StoreError::NotFound(format!("no entry with id {id}"))),
        _ => Err(StoreError::Invalid(format!("id prefix {id} is ambiguous"))),
    }
}
