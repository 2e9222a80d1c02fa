//! Daily planner: activities, food, water and mood per day, scored into a
//! 0-100 health score.

pub mod auth;
pub mod config;
pub mod core;
pub mod store;
pub mod utils;

pub use crate::core::model::{
    ActivityRecord, DayInputs, FoodCategory, FoodRecord, Mood, TimeSlot, WaterIntake,
};
pub use crate::core::score::{
    Breakdown, Category, CategoryInfo, HealthScoreResult, categorize, compute_score,
};
