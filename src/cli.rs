use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use dayplanner::core::model::{FoodCategory, Mood, TimeSlot};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "dayplanner",
    version,
    about = "Plan your day and track a daily health score"
)]
pub struct Cli {
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compute the health score for a day
    Score(ScoreArgs),
    /// Show which category a score falls into
    Categorize(CategorizeArgs),
    /// List saved scores
    History(HistoryArgs),
    Activity {
        #[command(subcommand)]
        command: ActivitySubcommand,
    },
    Food {
        #[command(subcommand)]
        command: FoodSubcommand,
    },
    Water {
        #[command(subcommand)]
        command: WaterSubcommand,
    },
    Mood {
        #[command(subcommand)]
        command: MoodSubcommand,
    },
    Account {
        #[command(subcommand)]
        command: AccountSubcommand,
    },
    /// Write a default dayplanner.toml in the current directory
    Init,
}

#[derive(Debug, Args, Clone, Default)]
pub struct DateArg {
    /// Day to operate on (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Args, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub day: DateArg,
    /// Score a JSON day document instead of the stored day
    #[arg(long, conflicts_with = "save")]
    pub input: Option<PathBuf>,
    /// Persist the computed score for the day
    #[arg(long)]
    pub save: bool,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct CategorizeArgs {
    #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
    pub score: u8,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct HistoryArgs {
    #[arg(long)]
    pub from: Option<NaiveDate>,
    #[arg(long)]
    pub to: Option<NaiveDate>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum ActivitySubcommand {
    Add {
        title: String,
        #[arg(long, value_enum, default_value_t = SlotArg::Morning)]
        slot: SlotArg,
        #[command(flatten)]
        day: DateArg,
    },
    /// Mark an activity done (or not done)
    Toggle {
        id: String,
        #[command(flatten)]
        day: DateArg,
    },
    Remove {
        id: String,
        #[command(flatten)]
        day: DateArg,
    },
}

#[derive(Debug, Subcommand)]
pub enum FoodSubcommand {
    Add {
        name: String,
        #[arg(long, value_enum)]
        category: FoodCategoryArg,
        #[arg(long, value_enum, default_value_t = SlotArg::Morning)]
        slot: SlotArg,
        #[command(flatten)]
        day: DateArg,
    },
    Toggle {
        id: String,
        #[command(flatten)]
        day: DateArg,
    },
    Remove {
        id: String,
        #[command(flatten)]
        day: DateArg,
    },
}

#[derive(Debug, Subcommand)]
pub enum WaterSubcommand {
    /// Log glasses of water
    Add {
        #[arg(default_value_t = 1)]
        amount: u32,
        #[command(flatten)]
        day: DateArg,
    },
    /// Set the day's goal in glasses
    Goal {
        goal: u32,
        #[command(flatten)]
        day: DateArg,
    },
    Reset {
        #[command(flatten)]
        day: DateArg,
    },
}

#[derive(Debug, Subcommand)]
pub enum MoodSubcommand {
    Set {
        #[arg(value_enum)]
        mood: MoodArg,
        #[command(flatten)]
        day: DateArg,
    },
    Clear {
        #[command(flatten)]
        day: DateArg,
    },
}

#[derive(Debug, Subcommand)]
pub enum AccountSubcommand {
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long, env = "DAYPLANNER_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "DAYPLANNER_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        json: bool,
    },
    /// Check a login token's signature and expiry
    Verify { token: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SlotArg {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl From<SlotArg> for TimeSlot {
    fn from(slot: SlotArg) -> Self {
        match slot {
            SlotArg::Morning => Self::Morning,
            SlotArg::Afternoon => Self::Afternoon,
            SlotArg::Evening => Self::Evening,
            SlotArg::Night => Self::Night,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FoodCategoryArg {
    Healthy,
    NonHealthy,
}

impl From<FoodCategoryArg> for FoodCategory {
    fn from(category: FoodCategoryArg) -> Self {
        match category {
            FoodCategoryArg::Healthy => Self::Healthy,
            FoodCategoryArg::NonHealthy => Self::NonHealthy,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MoodArg {
    Happy,
    Normal,
    Tired,
    Sad,
}

impl From<MoodArg> for Mood {
    fn from(mood: MoodArg) -> Self {
        match mood {
            MoodArg::Happy => Self::Happy,
            MoodArg::Normal => Self::Normal,
            MoodArg::Tired => Self::Tired,
            MoodArg::Sad => Self::Sad,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_food_add_with_category_and_date() {
        let cli = Cli::try_parse_from([
            "dayplanner",
            "food",
            "add",
            "Fries",
            "--category",
            "non-healthy",
            "--slot",
            "evening",
            "--date",
            "2026-04-01",
        ])
        .expect("parse");

        let Commands::Food {
            command:
                FoodSubcommand::Add {
                    name,
                    category,
                    slot,
                    day,
                },
        } = cli.command
        else {
            panic!("expected food add");
        };
        assert_eq!(name, "Fries");
        assert_eq!(FoodCategory::from(category), FoodCategory::NonHealthy);
        assert_eq!(TimeSlot::from(slot), TimeSlot::Evening);
        assert_eq!(day.date, NaiveDate::from_ymd_opt(2026, 4, 1));
    }

    #[test]
    fn categorize_rejects_out_of_range_scores() {
        assert!(Cli::try_parse_from(["dayplanner", "categorize", "101"]).is_err());
        assert!(Cli::try_parse_from(["dayplanner", "categorize", "100"]).is_ok());
    }

    #[test]
    fn score_input_conflicts_with_save() {
        assert!(
            Cli::try_parse_from(["dayplanner", "score", "--input", "day.json", "--save"]).is_err()
        );
    }
}
