//! Command line front end for the todolist core.
//!
//! # Responsibility
//! - Map subcommands onto `TaskService` use-cases.
//! - Own process-level concerns: database location, logging, config file.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use todolist_core::db::open_db;
use todolist_core::{
    default_log_level, init_logging, Priority, SqliteTaskRepository, Suggestion, SuggestionConfig,
    Task, TaskFilter, TaskId, TaskService,
};

const DEFAULT_DB_FILE: &str = "todolist.sqlite3";

#[derive(Debug, Parser)]
#[command(name = "todolist", version, about = "Manage tasks and categories")]
struct Cli {
    /// SQLite database file.
    #[arg(long, global = true, default_value = DEFAULT_DB_FILE)]
    db: PathBuf,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[arg(long, global = true)]
    log_level: Option<String>,

    /// JSON file overriding suggestion weights.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add a task.
    Add {
        text: String,
        #[arg(long, value_enum, default_value_t = PriorityArg::Medium)]
        priority: PriorityArg,
        #[arg(long)]
        category: Option<String>,
    },
    /// List tasks.
    List {
        #[arg(long, value_enum, default_value_t = FilterArg::All)]
        filter: FilterArg,
        #[arg(long)]
        category: Option<String>,
    },
    /// Toggle completion of a task.
    Toggle { id: TaskId },
    /// Delete a task.
    Delete { id: TaskId },
    /// Set a task's category, or clear it when NAME is omitted.
    Categorize { id: TaskId, name: Option<String> },
    /// Manage the category list.
    Category(CategoryArgs),
    /// Suggest categories for task text.
    Suggest {
        text: String,
        #[arg(long)]
        json: bool,
    },
    /// Show task counts.
    Stats,
}

#[derive(Debug, Args)]
struct CategoryArgs {
    #[command(subcommand)]
    command: CategoryCommand,
}

#[derive(Debug, Subcommand)]
enum CategoryCommand {
    Add { name: String },
    Delete { name: String },
    List,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PriorityArg {
    Low,
    Medium,
    High,
}

impl From<PriorityArg> for Priority {
    fn from(value: PriorityArg) -> Self {
        match value {
            PriorityArg::Low => Priority::Low,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::High => Priority::High,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FilterArg {
    All,
    Active,
    Completed,
}

impl From<FilterArg> for TaskFilter {
    fn from(value: FilterArg) -> Self {
        match value {
            FilterArg::All => TaskFilter::All,
            FilterArg::Active => TaskFilter::Active,
            FilterArg::Completed => TaskFilter::Completed,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        setup_logging(log_dir, cli.log_level.as_deref())?;
    }
    let config = load_config(cli.config.as_deref())?;

    let mut conn = open_db(&cli.db)
        .with_context(|| format!("failed to open database `{}`", cli.db.display()))?;
    let repo = SqliteTaskRepository::try_new(&mut conn).context("database is not usable")?;
    let mut service = TaskService::new(repo).with_config(config);

    run(&mut service, cli.command)
}

fn run(service: &mut TaskService<SqliteTaskRepository<'_>>, command: Command) -> Result<()> {
    match command {
        Command::Add {
            text,
            priority,
            category,
        } => {
            let task = service.add_task(&text, priority.into(), category.as_deref())?;
            println!("added {}", task.id);
        }
        Command::List { filter, category } => {
            for task in service.list_tasks(filter.into(), category.as_deref())? {
                println!("{}", format_task(&task));
            }
        }
        Command::Toggle { id } => {
            let task = service.toggle_task(id)?;
            println!("{}", format_task(&task));
        }
        Command::Delete { id } => {
            service.delete_task(id)?;
            println!("deleted {id}");
        }
        Command::Categorize { id, name } => {
            let task = service.set_task_category(id, name.as_deref())?;
            println!("{}", format_task(&task));
        }
        Command::Category(args) => match args.command {
            CategoryCommand::Add { name } => {
                let stored = service.add_category(&name)?;
                println!("added category {stored}");
            }
            CategoryCommand::Delete { name } => {
                let cleared = service.delete_category(&name)?;
                println!("deleted category {name} ({cleared} tasks uncategorized)");
            }
            CategoryCommand::List => {
                for name in service.list_categories()? {
                    println!("{name}");
                }
            }
        },
        Command::Suggest { text, json } => {
            let suggestions = service.suggest_categories(&text)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&suggestions)?);
            } else {
                for suggestion in &suggestions {
                    println!("{}", format_suggestion(suggestion));
                }
            }
        }
        Command::Stats => {
            let stats = service.task_stats()?;
            println!(
                "{} total, {} active, {} completed",
                stats.total, stats.active, stats.completed
            );
        }
    }
    Ok(())
}

fn setup_logging(log_dir: &Path, level: Option<&str>) -> Result<()> {
    let Some(dir) = log_dir.to_str() else {
        bail!("log directory `{}` is not valid UTF-8", log_dir.display());
    };
    let level = level.map_or_else(|| default_log_level().to_string(), str::to_string);
    init_logging(&level, dir).context("failed to initialize logging")?;
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<SuggestionConfig> {
    let Some(path) = path else {
        return Ok(SuggestionConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config `{}`", path.display()))?;
    let config: SuggestionConfig = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse config `{}`", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config `{}`", path.display()))?;
    log::info!("event=config_load module=cli status=ok");
    Ok(config)
}

fn format_task(task: &Task) -> String {
    let mark = if task.completed { "x" } else { " " };
    let category = task
        .category
        .as_deref()
        .map(|name| format!(" #{name}"))
        .unwrap_or_default();
    format!(
        "[{mark}] {} ({}) {}{category}",
        task.id, task.priority, task.text
    )
}

fn format_suggestion(suggestion: &Suggestion) -> String {
    format!(
        "{:>3}% {} [{}]",
        suggestion.confidence,
        suggestion.category,
        suggestion.matches.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::{format_suggestion, format_task, Cli};
    use clap::CommandFactory;
    use todolist_core::{Priority, Suggestion, Task};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn task_line_shows_state_priority_and_category() {
        let mut task = Task::new("pay rent", Priority::High)
            .unwrap()
            .in_category("Home");
        task.completed = true;
        let line = format_task(&task);
        assert!(line.starts_with("[x] "));
        assert!(line.contains("(high) pay rent #Home"));
    }

    #[test]
    fn suggestion_line_lists_reasons() {
        let suggestion = Suggestion {
            category: "Work".to_string(),
            score: 65.0,
            confidence: 100,
            matches: vec!["exact match".to_string(), "100% similar".to_string()],
        };
        assert_eq!(
            format_suggestion(&suggestion),
            "100% Work [exact match, 100% similar]"
        );
    }
}
