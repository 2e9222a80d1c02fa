use crate::core::model::{DayInputs, FoodCategory, Mood, WaterIntake};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_COMPONENT: f64 = 25.0;
pub const POINTS_PER_ITEM: f64 = 5.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::NeedsImprovement => "Needs Improvement",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Excellent => "🌟",
            Self::Good => "😊",
            Self::Fair => "😐",
            Self::NeedsImprovement => "⚠️",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Excellent => "#4CAF50",
            Self::Good => "#2196F3",
            Self::Fair => "#FF9800",
            Self::NeedsImprovement => "#F44336",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct CategoryInfo {
    pub category: Category,
    pub label: &'static str,
    pub emoji: &'static str,
    pub color: &'static str,
}

impl From<Category> for CategoryInfo {
    fn from(category: Category) -> Self {
        Self {
            category,
            label: category.label(),
            emoji: category.emoji(),
            color: category.color(),
        }
    }
}

/// Per-component points. `non_healthy_food` is a penalty and is not capped.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    pub tasks: f64,
    pub healthy_food: f64,
    pub non_healthy_food: f64,
    pub water_intake: f64,
    pub mood: f64,
}

impl Breakdown {
    pub fn total(&self) -> f64 {
        self.tasks + self.healthy_food + self.water_intake + self.mood - self.non_healthy_food
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct HealthScoreResult {
    pub score: u8,
    pub breakdown: Breakdown,
    pub category: CategoryInfo,
}

pub fn compute_score(inputs: &DayInputs) -> HealthScoreResult {
    let selected_activities = inputs.activities.iter().filter(|a| a.selected).count();
    let healthy = count_selected_foods(inputs, FoodCategory::Healthy);
    let non_healthy = count_selected_foods(inputs, FoodCategory::NonHealthy);

    let breakdown = Breakdown {
        tasks: capped_points(selected_activities),
        healthy_food: capped_points(healthy),
        non_healthy_food: non_healthy as f64 * POINTS_PER_ITEM,
        water_intake: water_points(&inputs.water_intake),
        mood: mood_points(inputs.mood),
    };

    let score = (breakdown.total() + 0.5).floor().clamp(0.0, 100.0) as u8;

    HealthScoreResult {
        score,
        breakdown,
        category: categorize(score),
    }
}

pub fn categorize(score: u8) -> CategoryInfo {
    category_for_score(score).into()
}

pub fn category_for_score(score: u8) -> Category {
    match score {
        80..=u8::MAX => Category::Excellent,
        60..=79 => Category::Good,
        40..=59 => Category::Fair,
        _ => Category::NeedsImprovement,
    }
}

pub fn mood_points(mood: Option<Mood>) -> f64 {
    match mood {
        Some(Mood::Happy) => 25.0,
        Some(Mood::Normal) => 18.0,
        Some(Mood::Tired) => 10.0,
        Some(Mood::Sad) => 5.0,
        None => 0.0,
    }
}

pub fn water_points(water: &WaterIntake) -> f64 {
    if water.goal == 0 {
        return 0.0;
    }

    (f64::from(water.current) / f64::from(water.goal) * MAX_COMPONENT).min(MAX_COMPONENT)
}

fn capped_points(count: usize) -> f64 {
    (count as f64 * POINTS_PER_ITEM).min(MAX_COMPONENT)
}

fn count_selected_foods(inputs: &DayInputs, category: FoodCategory) -> usize {
    inputs
        .foods
        .iter()
        .filter(|food| food.is_selected_in(category))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{ActivityRecord, FoodRecord};

    fn day(activities: usize, healthy: usize, non_healthy: usize) -> DayInputs {
        let mut foods = Vec::new();
        for i in 0..healthy {
            foods.push(FoodRecord::selected(format!("h{i}"), FoodCategory::Healthy));
        }
        for i in 0..non_healthy {
            foods.push(FoodRecord::selected(format!("n{i}"), FoodCategory::NonHealthy));
        }

        DayInputs {
            activities: (0..activities)
                .map(|i| ActivityRecord::selected(format!("a{i}")))
                .collect(),
            foods,
            water_intake: WaterIntake::new(0, 8),
            mood: None,
        }
    }

    #[test]
    fn empty_day_scores_zero() {
        let result = compute_score(&DayInputs {
            water_intake: WaterIntake::new(0, 8),
            ..DayInputs::default()
        });
        assert_eq!(result.score, 0);
        assert_eq!(result.breakdown, Breakdown::default());
        assert_eq!(result.category.category, Category::NeedsImprovement);
    }

    #[test]
    fn zero_goal_gives_no_water_credit() {
        let mut inputs = DayInputs::default();
        inputs.water_intake = WaterIntake::new(5, 0);
        let result = compute_score(&inputs);
        assert_eq!(result.breakdown.water_intake, 0.0);
        assert!(!result.breakdown.water_intake.is_nan());
        assert_eq!(result.score, 0);
    }

    #[test]
    fn water_is_capped_at_goal() {
        assert_eq!(water_points(&WaterIntake::new(8, 8)), 25.0);
        assert_eq!(water_points(&WaterIntake::new(16, 8)), 25.0);
        assert_eq!(water_points(&WaterIntake::new(4, 8)), 12.5);
    }

    #[test]
    fn activities_saturate_after_five() {
        let five = compute_score(&day(5, 0, 0));
        let six = compute_score(&day(6, 0, 0));
        assert_eq!(five.breakdown.tasks, 25.0);
        assert_eq!(six.breakdown.tasks, five.breakdown.tasks);
        assert_eq!(compute_score(&day(2, 0, 0)).breakdown.tasks, 10.0);
    }

    #[test]
    fn unselected_records_do_not_count() {
        let mut inputs = day(1, 1, 1);
        inputs.activities[0].selected = false;
        inputs.foods.iter_mut().for_each(|food| food.selected = false);
        let result = compute_score(&inputs);
        assert_eq!(result.breakdown.tasks, 0.0);
        assert_eq!(result.breakdown.healthy_food, 0.0);
        assert_eq!(result.breakdown.non_healthy_food, 0.0);
    }

    #[test]
    fn mood_weights_are_exact() {
        assert_eq!(mood_points(Some(Mood::Happy)), 25.0);
        assert_eq!(mood_points(Some(Mood::Normal)), 18.0);
        assert_eq!(mood_points(Some(Mood::Tired)), 10.0);
        assert_eq!(mood_points(Some(Mood::Sad)), 5.0);
        assert_eq!(mood_points(None), 0.0);
    }

    #[test]
    fn category_boundaries() {
        let label = |score| categorize(score).label;
        assert_eq!(label(0), "Needs Improvement");
        assert_eq!(label(39), "Needs Improvement");
        assert_eq!(label(40), "Fair");
        assert_eq!(label(59), "Fair");
        assert_eq!(label(60), "Good");
        assert_eq!(label(79), "Good");
        assert_eq!(label(80), "Excellent");
        assert_eq!(label(100), "Excellent");
    }

    #[test]
    fn perfect_day_scores_hundred() {
        let mut inputs = day(5, 5, 0);
        inputs.water_intake = WaterIntake::new(8, 8);
        inputs.mood = Some(Mood::Happy);
        let result = compute_score(&inputs);
        assert_eq!(result.score, 100);
        assert_eq!(result.category.category, Category::Excellent);
    }

    #[test]
    fn penalty_is_flat_and_clamped() {
        let mut inputs = day(2, 1, 1);
        inputs.mood = Some(Mood::Normal);
        assert_eq!(compute_score(&inputs).score, 28);

        let flooded = day(0, 0, 40);
        let result = compute_score(&flooded);
        assert_eq!(result.breakdown.non_healthy_food, 200.0);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn extra_non_healthy_food_never_raises_score() {
        for non_healthy in 0..8 {
            let mut fewer = day(3, 2, non_healthy);
            fewer.mood = Some(Mood::Happy);
            fewer.water_intake = WaterIntake::new(6, 8);
            let mut more = fewer.clone();
            more.foods
                .push(FoodRecord::selected("fries", FoodCategory::NonHealthy));

            assert!(compute_score(&more).score <= compute_score(&fewer).score);
        }
    }

    #[test]
    fn fractional_totals_round_half_up() {
        let mut inputs = DayInputs::default();
        inputs.water_intake = WaterIntake::new(1, 8);
        assert_eq!(compute_score(&inputs).score, 3);
        inputs.water_intake = WaterIntake::new(3, 8);
        assert_eq!(compute_score(&inputs).score, 9);
        inputs.water_intake = WaterIntake::new(4, 8);
        assert_eq!(compute_score(&inputs).score, 13);
    }

    #[test]
    fn score_stays_in_range_and_is_repeatable() {
        for activities in [0, 3, 12] {
            for healthy in [0, 4, 9] {
                for non_healthy in [0, 2, 30] {
                    for current in [0, 7, 500] {
                        let mut inputs = day(activities, healthy, non_healthy);
                        inputs.water_intake = WaterIntake::new(current, 8);
                        inputs.mood = Some(Mood::Happy);

                        let first = compute_score(&inputs);
                        assert!(first.score <= 100);
                        assert!(first.breakdown.tasks <= MAX_COMPONENT);
                        assert!(first.breakdown.healthy_food <= MAX_COMPONENT);
                        assert!(first.breakdown.water_intake <= MAX_COMPONENT);
                        assert_eq!(first, compute_score(&inputs));
                    }
                }
            }
        }
    }
}
