// src/main.rs

use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, error, info};
use std::collections::HashSet;
use std::path::PathBuf;
use std::process::ExitCode;
use swipe_lib::achievements::builtin_achievements;
use swipe_lib::config::Config;
use swipe_lib::daily::assign_daily_problem;
use swipe_lib::error::Error;
use swipe_lib::models::{AppState, Difficulty, FilterCriteria, Problem, SelectionContext};
use swipe_lib::performance::local_date;
use swipe_lib::{build_app_state, selector};

#[derive(Parser)]
#[command(
    name = "neetcode-swipe",
    about = "Swipe through interview problems with spaced repetition",
    version
)]
struct Cli {
    /// Directory holding the database (default: platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Problem catalog JSON to use instead of the bundled one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Keep state in memory only
    #[arg(long, global = true)]
    in_memory: bool,

    /// Log filter when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Outcome {
    /// Swipe right: you knew it
    #[value(alias = "right", alias = "correct")]
    Known,
    /// Swipe left: you did not
    #[value(alias = "left", alias = "wrong")]
    Unknown,
}

#[derive(Subcommand)]
enum Command {
    /// List the active deck
    Deck {
        /// Topic (category) to keep, "All" for every topic
        #[arg(long, default_value = "All")]
        topic: String,
        /// Difficulty to keep; repeat for several
        #[arg(long = "difficulty")]
        difficulties: Vec<Difficulty>,
        /// Case-insensitive title search
        #[arg(long, default_value = "")]
        search: String,
        /// Only favorites
        #[arg(long)]
        favorites: bool,
        /// Only problems due for review
        #[arg(long)]
        review: bool,
        /// Only the problem of the day
        #[arg(long)]
        daily: bool,
    },

    /// Show a problem with its solution
    Show { id: i64 },

    /// Record an answer for a problem
    Answer { id: i64, outcome: Outcome },

    /// List problems due for review
    Review,

    /// Print the topic with the lowest accuracy
    Weakest,

    /// Per-topic accuracy and current streak
    Stats,

    /// Show the problem of the day
    Daily {
        /// Mark today's problem as completed
        #[arg(long)]
        complete: bool,
    },

    /// Toggle a problem as favorite
    Favorite { id: i64 },

    /// List achievements
    Achievements,

    /// Delete all performance data and the streak
    Reset,
}

fn find_problem(state: &AppState, id: i64) -> Result<&Problem, Error> {
    state
        .catalog
        .iter()
        .find(|p| p.id == id)
        .ok_or(Error::UnknownProblem(id))
}

fn print_problem_line(p: &Problem) {
    println!("{:>5}  {:<6}  {:<20}  {}", p.id, p.difficulty, p.category, p.title);
}

async fn build_deck(state: &AppState, criteria: &FilterCriteria) -> Result<Vec<Problem>, Error> {
    let today = local_date(chrono::Utc::now());
    let ctx = SelectionContext {
        due: state.tracker.review_problems().await?.into_iter().collect(),
        favorites: state.favorites.id_set(),
        problem_of_day: assign_daily_problem(&state.catalog, today).map(|p| p.id),
    };
    Ok(selector::filter_problems(&state.catalog, criteria, &ctx)
        .into_iter()
        .cloned()
        .collect())
}

async fn check_achievements(state: &mut AppState) -> Result<(), Error> {
    let snapshot = state.tracker.snapshot().await?;
    let stats = selector::topic_stats(&state.catalog, &snapshot.data);
    for a in state.achievements.check(&stats, snapshot.current_streak)? {
        println!("{} Achievement unlocked: {} - {}", a.icon, a.title, a.description);
    }
    Ok(())
}

async fn run(state: &mut AppState, command: Command) -> Result<(), Error> {
    match command {
        Command::Deck {
            topic,
            difficulties,
            search,
            favorites,
            review,
            daily,
        } => {
            let criteria = FilterCriteria {
                topic,
                difficulties: difficulties.into_iter().collect::<HashSet<_>>(),
                search_query: search,
                favorites_only: favorites,
                review_only: review,
                problem_of_day_only: daily,
            };
            let deck = build_deck(state, &criteria).await?;
            if deck.is_empty() {
                println!("No problems match.");
            }
            for p in &deck {
                print_problem_line(p);
            }
        }
        Command::Show { id } => {
            let p = find_problem(state, id)?;
            print_problem_line(p);
            if !p.topic_tags.is_empty() {
                println!("Tags: {}", p.topic_tags.join(", "));
            }
            println!("\n{}\n", p.description);
            if let Some(hint) = &p.hint {
                println!("Hint: {}\n", hint);
            }
            println!("Solution: {}", p.solution);
        }
        Command::Answer { id, outcome } => {
            find_problem(state, id)?;
            let is_correct = matches!(outcome, Outcome::Known);
            state.tracker.record_answer(id, is_correct).await?;

            let snapshot = state.tracker.snapshot().await?;
            if let Some(entry) = snapshot.data.get(&id) {
                println!(
                    "Recorded. Level {}, next review {}. Streak: {} days",
                    entry.srs_level,
                    entry.next_review.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M"),
                    snapshot.current_streak
                );
            }
            check_achievements(state).await?;
        }
        Command::Review => {
            let criteria = FilterCriteria {
                review_only: true,
                ..Default::default()
            };
            let deck = build_deck(state, &criteria).await?;
            if deck.is_empty() {
                println!("Nothing due for review.");
            }
            for p in &deck {
                print_problem_line(p);
            }
        }
        Command::Weakest => {
            let snapshot = state.tracker.snapshot().await?;
            match selector::find_weakest_topic(&state.catalog, &snapshot.data) {
                Some(topic) => println!("{}", topic),
                None => println!("No answers recorded yet."),
            }
        }
        Command::Stats => {
            let snapshot = state.tracker.snapshot().await?;
            println!("Current Streak: {} days", snapshot.current_streak);
            for s in selector::topic_stats(&state.catalog, &snapshot.data) {
                let flag = if selector::needs_practice(&s) { "  needs practice" } else { "" };
                if s.answered() > 0 {
                    println!(
                        "{:<24} {:>5.0}%  ({}/{}){}",
                        s.topic,
                        s.accuracy,
                        s.correct,
                        s.answered(),
                        flag
                    );
                } else {
                    println!("{:<24}     -", s.topic);
                }
            }
        }
        Command::Daily { complete } => {
            let today = local_date(chrono::Utc::now());
            let Some(p) = assign_daily_problem(&state.catalog, today) else {
                println!("Catalog is empty.");
                return Ok(());
            };
            print_problem_line(p);
            if complete {
                state.daily.mark_completed(today)?;
            }
            let done = state.daily.is_completed(today);
            println!("Completed today: {}", if done { "yes" } else { "no" });
        }
        Command::Favorite { id } => {
            find_problem(state, id)?;
            let now_favorite = state.favorites.toggle(id)?;
            let action = if now_favorite { "added to" } else { "removed from" };
            println!("{} {} favorites", id, action);
        }
        Command::Achievements => {
            for a in builtin_achievements() {
                let mark = if state.achievements.is_unlocked(&a.id) { "x" } else { " " };
                println!("[{}] {} {} - {}", mark, a.icon, a.title, a.description);
            }
            let builtin: Vec<String> = builtin_achievements().into_iter().map(|a| a.id).collect();
            for id in state.achievements.unlocked() {
                if !builtin.contains(id) {
                    println!("[x] {}", id);
                }
            }
        }
        Command::Reset => {
            state.tracker.reset().await?;
            println!("Progress reset.");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let env = env_logger::Env::default().default_filter_or(cli.log_level.as_str());
    env_logger::Builder::from_env(env).init();

    info!("Starting NeetCode Swipe...");
    let config = Config::new(cli.data_dir, cli.catalog, cli.in_memory);
    debug!("Config: {:?}", config);

    let mut state = match build_app_state(&config) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to initialize: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&mut state, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
