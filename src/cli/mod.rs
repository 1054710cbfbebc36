//! Command-line front end over the services: one command per invocation.

mod commands;
pub mod output;

use chrono::{Local, NaiveDate};
use pulse_config::{Config, ConfigError, ConfigManager};
use strsim::levenshtein;
use thiserror::Error;

use crate::errors::BudgetError;
use crate::storage::JsonStore;

/// Every top-level command, used for help output and suggestions.
pub const COMMANDS: &[(&str, &str)] = &[
    ("period", "period [DATE]              budget period containing DATE"),
    ("status", "status [DATE]              spend against the monthly budget"),
    ("insights", "insights [DATE]            category usage, comparison, upcoming"),
    ("categories", "categories                 list categories (seeds defaults)"),
    ("add", "add <expense|income> <AMOUNT> <CATEGORY> [DATE] [NOTE...]"),
    ("backup", "backup [NOTE]              snapshot the data file"),
    ("backups", "backups                    list data backups, newest first"),
    ("restore", "restore <BACKUP>           replace data with a backup"),
    ("config", "config show | set-payday N | set-budget AMOUNT"),
    ("version", "version                    build information"),
    ("help", "help                       this message"),
];

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("unknown command `{input}`")]
    UnknownCommand {
        input: String,
        suggestion: Option<&'static str>,
    },
    #[error(transparent)]
    Budget(#[from] BudgetError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Configuration and data file resolved for one invocation.
pub struct CliContext {
    pub manager: ConfigManager,
    pub config: Config,
    pub store: JsonStore,
}

impl CliContext {
    pub fn from_env() -> Result<Self, CliError> {
        let manager = ConfigManager::from_env()?;
        Self::with_manager(manager)
    }

    fn with_manager(manager: ConfigManager) -> Result<Self, CliError> {
        let config = manager.load()?;
        let store = JsonStore::open(config.resolve_data_file(), None)?;
        Ok(Self {
            manager,
            config,
            store,
        })
    }
}

/// Runs a single command given the arguments after the program name.
pub fn run_cli(args: &[String]) -> Result<(), CliError> {
    let Some((command, rest)) = args.split_first() else {
        commands::help();
        return Ok(());
    };
    match command.as_str() {
        "help" | "--help" | "-h" => {
            commands::help();
            Ok(())
        }
        "version" | "--version" | "-V" => {
            commands::version();
            Ok(())
        }
        name if COMMANDS.iter().any(|(known, _)| *known == name) => {
            let mut context = CliContext::from_env()?;
            tracing::debug!(command = name, "dispatching command");
            commands::dispatch(&mut context, name, rest)
        }
        other => Err(CliError::UnknownCommand {
            input: other.to_string(),
            suggestion: suggest_command(other),
        }),
    }
}

/// Closest known command within an edit distance of three.
pub fn suggest_command(input: &str) -> Option<&'static str> {
    COMMANDS
        .iter()
        .map(|(name, _)| (levenshtein(name, input), *name))
        .filter(|(distance, _)| *distance <= 3)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, name)| name)
}

/// Prints an error with its suggestion, if any.
pub fn report_error(err: &CliError) {
    output::error(err);
    match err {
        CliError::UnknownCommand {
            suggestion: Some(best),
            ..
        } => output::info(format!("Did you mean `{best}`?")),
        CliError::Usage(_) | CliError::UnknownCommand { .. } => {
            output::info("Run `budget_pulse_cli help` for usage.")
        }
        _ => {}
    }
}

pub(crate) fn parse_date_arg(raw: Option<&String>) -> Result<NaiveDate, CliError> {
    match raw {
        None => Ok(Local::now().date_naive()),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
            CliError::Usage(format!("invalid date `{value}`, expected YYYY-MM-DD"))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggests_close_commands_only() {
        assert_eq!(suggest_command("stauts"), Some("status"));
        assert_eq!(suggest_command("insight"), Some("insights"));
        assert_eq!(suggest_command("xyzzyplugh"), None);
    }

    #[test]
    fn parses_dates_strictly() {
        let date = parse_date_arg(Some(&"2025-02-28".to_string())).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
        assert!(matches!(
            parse_date_arg(Some(&"28/02/2025".to_string())),
            Err(CliError::Usage(_))
        ));
    }
}
