use crate::core::DayEvaluation;
use crate::core::model::{DayInputs, FoodCategory, Mood};
use crate::core::score::{Breakdown, Category, CategoryInfo, HealthScoreResult, MAX_COMPONENT};
use crate::store::SavedScore;
use chrono::NaiveDate;
use colored::{ColoredString, Colorize};
use serde::Serialize;

const BAR_WIDTH: usize = 20;

trait CategoryColor {
    fn paint(self, text: &str) -> ColoredString;
}

impl CategoryColor for Category {
    fn paint(self, text: &str) -> ColoredString {
        match self {
            Self::Excellent => text.green().bold(),
            Self::Good => text.blue().bold(),
            Self::Fair => text.yellow().bold(),
            Self::NeedsImprovement => text.red().bold(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub score: u8,
    pub breakdown: Breakdown,
    pub category: CategoryInfo,
    pub counts: Counts,
    pub progress: Progress,
}

impl JsonReport {
    pub fn new(date: Option<NaiveDate>, inputs: &DayInputs, result: &HealthScoreResult) -> Self {
        Self {
            date,
            score: result.score,
            breakdown: result.breakdown,
            category: result.category,
            counts: Counts::from_inputs(inputs),
            progress: Progress::from_inputs(inputs),
        }
    }
}

impl From<&DayEvaluation> for JsonReport {
    fn from(evaluation: &DayEvaluation) -> Self {
        Self::new(Some(evaluation.date), &evaluation.inputs, &evaluation.result)
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Counts {
    pub activities: usize,
    pub healthy_foods: usize,
    pub non_healthy_foods: usize,
    pub water_glasses: u32,
    pub water_goal: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
}

impl Counts {
    pub fn from_inputs(inputs: &DayInputs) -> Self {
        Self {
            activities: inputs.activities.iter().filter(|a| a.selected).count(),
            healthy_foods: count_foods(inputs, FoodCategory::Healthy),
            non_healthy_foods: count_foods(inputs, FoodCategory::NonHealthy),
            water_glasses: inputs.water_intake.current,
            water_goal: inputs.water_intake.goal,
            mood: inputs.mood,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub completed: usize,
    pub pending: usize,
    pub total: usize,
    pub percentage: u8,
    pub water_percentage: u8,
}

impl Progress {
    pub fn from_inputs(inputs: &DayInputs) -> Self {
        let completed = inputs.activities.iter().filter(|a| a.completed).count()
            + inputs.foods.iter().filter(|f| f.completed).count();
        let total = inputs.activities.len() + inputs.foods.len();
        let water = &inputs.water_intake;
        let water_ratio = if water.goal == 0 {
            0.0
        } else {
            (f64::from(water.current) / f64::from(water.goal)).min(1.0)
        };

        Self {
            completed,
            pending: total - completed,
            total,
            percentage: percent(completed as f64, total as f64),
            water_percentage: percent(water_ratio, 1.0),
        }
    }
}

fn percent(part: f64, whole: f64) -> u8 {
    if whole <= 0.0 {
        return 0;
    }
    (part / whole * 100.0).round().clamp(0.0, 100.0) as u8
}

fn count_foods(inputs: &DayInputs, category: FoodCategory) -> usize {
    inputs
        .foods
        .iter()
        .filter(|food| food.is_selected_in(category))
        .count()
}

pub fn print_human(date: Option<NaiveDate>, inputs: &DayInputs, result: &HealthScoreResult) {
    let category = result.category.category;
    let heading = match date {
        Some(date) => format!("Health Score for {date}"),
        None => "Health Score".to_string(),
    };
    println!(
        "{}: {}/100 {}",
        heading,
        category.paint(&result.score.to_string()),
        category.paint(&format!("{} {}", category.emoji(), category.label()))
    );

    let counts = Counts::from_inputs(inputs);
    let breakdown = &result.breakdown;
    let mood = counts.mood.map_or_else(
        || "none".to_string(),
        |mood| format!("{} {}", mood.emoji(), mood),
    );

    println!();
    println!("{}", "Breakdown".bold());
    print_row(
        "Tasks",
        breakdown.tasks,
        format!("{} selected", counts.activities),
    );
    print_row(
        "Healthy food",
        breakdown.healthy_food,
        format!("{} items", counts.healthy_foods),
    );
    print_row(
        "Hydration",
        breakdown.water_intake,
        format!("{}/{} glasses", counts.water_glasses, counts.water_goal),
    );
    print_row("Mood", breakdown.mood, mood);
    if breakdown.non_healthy_food > 0.0 {
        println!(
            "{:<14} {} ({} items)",
            "Non-healthy",
            format!("-{}", format_points(breakdown.non_healthy_food)).red(),
            counts.non_healthy_foods
        );
    }

    let progress = Progress::from_inputs(inputs);
    println!();
    println!("{}", "Progress".bold());
    println!(
        "{:<14} {} {:>5}%  {}",
        "Completed",
        bar(f64::from(progress.percentage) / 100.0 * MAX_COMPONENT),
        progress.percentage,
        format!(
            "{}/{} done, {} pending",
            progress.completed, progress.total, progress.pending
        )
        .dimmed()
    );
    println!(
        "{:<14} {} {:>5}%",
        "Water goal",
        bar(f64::from(progress.water_percentage) / 100.0 * MAX_COMPONENT),
        progress.water_percentage
    );
}

pub fn print_suggestions(mood: Mood) {
    let suggestions = mood.suggestions();
    println!("{}", "Suggested for today".bold());
    println!("  tasks: {}", suggestions.tasks.join(", "));
    println!("  foods: {}", suggestions.foods.join(", "));
}

fn print_row(label: &str, points: f64, detail: String) {
    println!(
        "{:<14} {} {:>5}/25  {}",
        label,
        bar(points),
        format_points(points),
        detail.dimmed()
    );
}

pub fn print_category(score: u8, info: &CategoryInfo) {
    println!(
        "{} -> {}",
        score,
        info.category
            .paint(&format!("{} {}", info.emoji, info.label))
    );
}

pub fn print_history(scores: &[SavedScore]) {
    if scores.is_empty() {
        println!("no saved scores (run `dayplanner score --save` to record one)");
        return;
    }

    for saved in scores {
        println!(
            "{}  {}  {}  {}",
            saved.date,
            saved.category.paint(&format!("{:>3}", saved.score)),
            bar(f64::from(saved.score) / 100.0 * MAX_COMPONENT),
            saved.category.label()
        );
    }

    let total: u32 = scores.iter().map(|saved| u32::from(saved.score)).sum();
    let average = f64::from(total) / scores.len() as f64;
    println!();
    println!("average: {:.1} over {} day(s)", average, scores.len());
}

fn bar(points: f64) -> String {
    let filled = ((points / MAX_COMPONENT) * BAR_WIDTH as f64)
        .round()
        .clamp(0.0, BAR_WIDTH as f64) as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

fn format_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{points:.0}")
    } else {
        format!("{points:.1}")
    }
}
