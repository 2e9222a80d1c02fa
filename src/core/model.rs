use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    #[default]
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeSlot {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum FoodCategory {
    Healthy,
    NonHealthy,
}

impl fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Healthy => write!(f, "healthy"),
            Self::NonHealthy => write!(f, "non-healthy"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Normal,
    Tired,
    Sad,
}

impl Mood {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Normal => "normal",
            Self::Tired => "tired",
            Self::Sad => "sad",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Happy => "😊",
            Self::Normal => "😐",
            Self::Tired => "😴",
            Self::Sad => "😢",
        }
    }

    pub fn suggestions(self) -> MoodSuggestions {
        match self {
            Self::Happy => MoodSuggestions {
                tasks: ["Exercise", "Social Activity", "Creative Work", "Outdoor Activity"],
                foods: ["Fruits", "Smoothies", "Nuts", "Whole Grains"],
            },
            Self::Normal => MoodSuggestions {
                tasks: ["Regular Work", "Exercise", "Reading", "Planning"],
                foods: ["Balanced Meals", "Vegetables", "Protein", "Water"],
            },
            Self::Tired => MoodSuggestions {
                tasks: ["Light Exercise", "Rest", "Meditation", "Short Walk"],
                foods: ["Energy Foods", "Green Tea", "Nuts", "Fruits"],
            },
            Self::Sad => MoodSuggestions {
                tasks: ["Gentle Exercise", "Talk to Someone", "Hobby", "Nature Walk"],
                foods: ["Comfort Foods", "Dark Chocolate", "Warm Drinks", "Healthy Snacks"],
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct MoodSuggestions {
    pub tasks: [&'static str; 4],
    pub foods: [&'static str; 4],
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An activity the user added to the day's plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub time_slot: TimeSlot,
    pub selected: bool,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ActivityRecord {
    pub fn selected(title: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            time_slot: TimeSlot::default(),
            selected: true,
            completed: false,
            created_at: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub category: FoodCategory,
    #[serde(default)]
    pub time_slot: TimeSlot,
    pub selected: bool,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl FoodRecord {
    pub fn selected(name: impl Into<String>, category: FoodCategory) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            category,
            time_slot: TimeSlot::default(),
            selected: true,
            completed: false,
            created_at: None,
        }
    }

    pub fn is_selected_in(&self, category: FoodCategory) -> bool {
        self.selected && self.category == category
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WaterEntry {
    pub amount: u32,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WaterIntake {
    pub current: u32,
    pub goal: u32,
    #[serde(default)]
    pub entries: Vec<WaterEntry>,
}

impl WaterIntake {
    pub fn new(current: u32, goal: u32) -> Self {
        Self {
            current,
            goal,
            entries: Vec::new(),
        }
    }

    pub fn goal_reached(&self) -> bool {
        self.goal > 0 && self.current >= self.goal
    }
}

impl Default for WaterIntake {
    fn default() -> Self {
        Self::new(0, 8)
    }
}

/// Everything the health score engine looks at for one day.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DayInputs {
    pub activities: Vec<ActivityRecord>,
    pub foods: Vec<FoodRecord>,
    pub water_intake: WaterIntake,
    pub mood: Option<Mood>,
}
