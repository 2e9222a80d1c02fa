mod cli;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate};
use clap::Parser;
use cli::{
    AccountSubcommand, ActivitySubcommand, Cli, Commands, DateArg, FoodSubcommand,
    MoodSubcommand, ScoreArgs, WaterSubcommand,
};
use dayplanner::auth::{AccountStore, AuthError, LoginRequest, SignupRequest, TokenSettings};
use dayplanner::config::{self, Config};
use dayplanner::core::model::{DayInputs, Mood, WaterIntake};
use dayplanner::core::{self as planner, report};
use dayplanner::store::DayStore;
use std::fs;
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let exit_code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir()?;

    let cfg = if matches!(cli.command, Commands::Init) {
        Config::default()
    } else {
        let loaded = config::load_config(cli.config.as_deref(), &cwd)?;
        if let Some(path) = &loaded.path {
            tracing::debug!(path = %path.display(), "loaded config");
        }
        loaded.config
    };
    let data_dir = cfg.data_dir(&cwd);
    let store = DayStore::new(&data_dir, cfg.water.default_goal);

    match cli.command {
        Commands::Score(args) => run_score(&store, &cfg, args),
        Commands::Categorize(args) => {
            let info = dayplanner::categorize(args.score);
            if args.json || cfg.general.json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                report::print_category(args.score, &info);
            }
            Ok(0)
        }
        Commands::History(args) => {
            let scores = store.list_scores(args.from, args.to)?;
            if args.json || cfg.general.json {
                println!("{}", serde_json::to_string_pretty(&scores)?);
            } else {
                report::print_history(&scores);
            }
            Ok(0)
        }
        Commands::Activity { command } => {
            match command {
                ActivitySubcommand::Add { title, slot, day } => {
                    let activity = store.add_activity(day_of(&day), &title, slot.into())?;
                    println!("added activity {} ({})", activity.title, short_id(&activity.id));
                }
                ActivitySubcommand::Toggle { id, day } => {
                    let activity = store.toggle_activity(day_of(&day), &id)?;
                    println!("{} {}", done_mark(activity.completed), activity.title);
                }
                ActivitySubcommand::Remove { id, day } => {
                    let activity = store.remove_activity(day_of(&day), &id)?;
                    println!("removed activity {}", activity.title);
                }
            }
            Ok(0)
        }
        Commands::Food { command } => {
            match command {
                FoodSubcommand::Add {
                    name,
                    category,
                    slot,
                    day,
                } => {
                    let food = store.add_food(day_of(&day), &name, category.into(), slot.into())?;
                    println!(
                        "added {} food {} ({})",
                        food.category,
                        food.name,
                        short_id(&food.id)
                    );
                }
                FoodSubcommand::Toggle { id, day } => {
                    let food = store.toggle_food(day_of(&day), &id)?;
                    println!("{} {}", done_mark(food.completed), food.name);
                }
                FoodSubcommand::Remove { id, day } => {
                    let food = store.remove_food(day_of(&day), &id)?;
                    println!("removed food {}", food.name);
                }
            }
            Ok(0)
        }
        Commands::Water { command } => {
            let water = match command {
                WaterSubcommand::Add { amount, day } => store.add_water(day_of(&day), amount)?,
                WaterSubcommand::Goal { goal, day } => store.set_water_goal(day_of(&day), goal)?,
                WaterSubcommand::Reset { day } => store.reset_water(day_of(&day))?,
            };
            print_water(&water);
            Ok(0)
        }
        Commands::Mood { command } => {
            match command {
                MoodSubcommand::Set { mood, day } => {
                    let mood: Mood = mood.into();
                    store.set_mood(day_of(&day), mood)?;
                    println!("mood set to {} {}", mood.emoji(), mood);
                    report::print_suggestions(mood);
                }
                MoodSubcommand::Clear { day } => {
                    store.clear_mood(day_of(&day))?;
                    println!("mood cleared");
                }
            }
            Ok(0)
        }
        Commands::Account { command } => run_account(&data_dir, &cfg, command),
        Commands::Init => {
            if cli.config.is_some() {
                eprintln!(
                    "warning: --config is ignored by `dayplanner init`; writing ./dayplanner.toml"
                );
            }

            let path = cwd.join(config::CONFIG_FILE_NAME);
            config::write_default_config(&path)?;
            println!("created {}", path.display());
            Ok(0)
        }
    }
}

fn run_score(store: &DayStore, cfg: &Config, args: ScoreArgs) -> Result<i32> {
    let as_json = args.json || cfg.general.json;

    if let Some(input) = &args.input {
        let inputs = read_inputs(input)?;
        let result = dayplanner::compute_score(&inputs);
        if as_json {
            let json = report::JsonReport::new(args.day.date, &inputs, &result);
            println!("{}", serde_json::to_string_pretty(&json)?);
        } else {
            report::print_human(args.day.date, &inputs, &result);
        }
        return Ok(0);
    }

    let evaluation = planner::evaluate_day(store, day_of(&args.day))?;
    if as_json {
        let json = report::JsonReport::from(&evaluation);
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        report::print_human(Some(evaluation.date), &evaluation.inputs, &evaluation.result);
    }

    if args.save {
        planner::persist_score(store, &evaluation)?;
        if !as_json {
            println!();
            println!("saved score for {}", evaluation.date);
        }
    }

    Ok(0)
}

fn run_account(data_dir: &Path, cfg: &Config, command: AccountSubcommand) -> Result<i32> {
    let accounts = AccountStore::new(
        data_dir,
        TokenSettings {
            secret: cfg.auth.secret_key.clone(),
            ttl_secs: cfg.auth.token_ttl_secs,
        },
    );

    let outcome = match command {
        AccountSubcommand::Signup {
            email,
            username,
            password,
        } => accounts
            .signup(SignupRequest {
                email,
                password,
                username,
            })
            .map(|account| println!("User created successfully ({})", account.email)),
        AccountSubcommand::Login {
            email,
            password,
            json,
        } => accounts
            .login(LoginRequest { email, password })
            .and_then(|response| {
                if json || cfg.general.json {
                    let rendered = serde_json::to_string_pretty(&response)
                        .map_err(|err| AuthError::Internal(err.to_string()))?;
                    println!("{rendered}");
                } else {
                    println!("{} as {}", response.message, response.user.username);
                    println!("token: {}", response.token);
                }
                Ok(())
            }),
        AccountSubcommand::Verify { token } => accounts.verify_token(&token).map(|claims| {
            let expires = DateTime::from_timestamp(claims.exp, 0)
                .map_or_else(|| claims.exp.to_string(), |at| at.to_rfc3339());
            println!("token valid for user {} until {}", claims.user_id, expires);
        }),
    };

    match outcome {
        Ok(()) => Ok(0),
        Err(err) if err.status() < 500 => {
            eprintln!("error ({}): {}", err.status(), err);
            Ok(1)
        }
        Err(err) => Err(err.into()),
    }
}

fn read_inputs(path: &Path) -> Result<DayInputs> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed reading day inputs {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed parsing day inputs {}", path.display()))
}

fn day_of(arg: &DateArg) -> NaiveDate {
    arg.date.unwrap_or_else(|| Local::now().date_naive())
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn done_mark(completed: bool) -> &'static str {
    if completed { "[x]" } else { "[ ]" }
}

fn print_water(water: &WaterIntake) {
    println!("water: {}/{} glasses", water.current, water.goal);
    if water.goal_reached() {
        println!("daily water goal reached");
    }
}
