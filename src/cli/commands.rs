use chrono::Local;
use pulse_domain::{Transaction, TransactionKind};
use uuid::Uuid;

use crate::currency::{format_amount, format_percent, parse_amount, CurrencyCode};
use crate::errors::BudgetError;
use crate::insights::CategoryUsage;
use crate::services::{BudgetService, CategoryService, InsightService, TransactionService};
use crate::storage::BudgetStore;
use crate::utils::build_info;

use super::output::{self, field, level_label, render_table};
use super::{parse_date_arg, CliContext, CliError, COMMANDS};

pub(super) fn dispatch(
    context: &mut CliContext,
    command: &str,
    args: &[String],
) -> Result<(), CliError> {
    match command {
        "period" => period(context, args),
        "status" => status(context, args),
        "insights" => insights(context, args),
        "categories" => categories(context),
        "add" => add(context, args),
        "backup" => backup(context, args),
        "backups" => backups(context),
        "restore" => restore(context, args),
        "config" => config(context, args),
        other => Err(CliError::UnknownCommand {
            input: other.to_string(),
            suggestion: super::suggest_command(other),
        }),
    }
}

pub(super) fn help() {
    output::section("budget_pulse_cli");
    output::info("Usage: budget_pulse_cli <command> [args]");
    for (_, usage) in COMMANDS {
        output::info(format!("  {usage}"));
    }
}

pub(super) fn version() {
    output::info(build_info::current().summary());
}

fn currency(context: &CliContext) -> CurrencyCode {
    CurrencyCode::new(context.config.currency.clone())
}

fn period(context: &CliContext, args: &[String]) -> Result<(), CliError> {
    let reference = parse_date_arg(args.first())?;
    let period = BudgetService::period_for(&context.config, reference)?;
    output::section("Budget period");
    field("Range", period);
    field("Payday", context.config.payday);
    field("Total days", period.total_days());
    field("Remaining days", period.remaining_days(reference));
    Ok(())
}

fn status(context: &CliContext, args: &[String]) -> Result<(), CliError> {
    let reference = parse_date_arg(args.first())?;
    let period = BudgetService::period_for(&context.config, reference)?;
    let status = BudgetService::status_for(&context.store, &context.config, reference)?;
    let code = currency(context);
    output::section(format!("Status {period}"));
    field("Monthly budget", format_amount(status.monthly_budget, &code));
    field("Spent", format_amount(status.total_expense, &code));
    field("Remaining", format_amount(status.remaining, &code));
    field("Per day", format_amount(status.daily_recommended, &code));
    field("Used", format_percent(status.percent_used));
    field("Days left", status.remaining_days);
    field("Level", level_label(status.level(&context.config.insights)));
    if status.is_over_budget {
        output::warning("Spending is over the monthly budget.");
    }
    Ok(())
}

fn usage_rows(usage: &[CategoryUsage], code: &CurrencyCode) -> Vec<Vec<String>> {
    usage
        .iter()
        .map(|entry| {
            vec![
                entry.name.clone(),
                format_amount(entry.spent, code),
                entry
                    .budget
                    .map(|budget| format_amount(budget, code))
                    .unwrap_or_else(|| "-".into()),
                format_percent(entry.percent_used),
            ]
        })
        .collect()
}

fn insights(context: &CliContext, args: &[String]) -> Result<(), CliError> {
    let reference = parse_date_arg(args.first())?;
    let insights = InsightService::generate(&context.store, &context.config, reference)?;
    let code = currency(context);

    output::section(format!("Insights {}", insights.period));
    field("Income", format_amount(insights.total_income, &code));
    field("Expense", format_amount(insights.total_expense, &code));
    field(
        "vs previous",
        format!(
            "{} ({:+.1}%)",
            format_amount(insights.previous_total_expense, &code),
            insights.expense_change
        ),
    );
    if insights.uncategorized_expense > 0 {
        field("Uncategorized", format_amount(insights.uncategorized_expense, &code));
    }

    let headers = ["Category", "Spent", "Budget", "Used"];
    if !insights.caution.is_empty() {
        output::section("Needs attention");
        output::info(render_table(&headers, &usage_rows(&insights.caution, &code)));
    }
    if !insights.room.is_empty() {
        output::section("Room to spare");
        output::info(render_table(&headers, &usage_rows(&insights.room, &code)));
    }
    if !insights.compare.is_empty() {
        output::section("Month over month");
        let rows: Vec<Vec<String>> = insights
            .compare
            .iter()
            .map(|entry| {
                vec![
                    entry.name.clone(),
                    format_amount(entry.current, &code),
                    format_amount(entry.previous, &code),
                    format!("{:+.1}%", entry.change),
                ]
            })
            .collect();
        output::info(render_table(&["Category", "Now", "Before", "Change"], &rows));
    }
    if !insights.upcoming.is_empty() {
        output::section("Upcoming");
        let names = category_names(context);
        let rows: Vec<Vec<String>> = insights
            .upcoming
            .items
            .iter()
            .map(|item| {
                vec![
                    item.date.format("%Y-%m-%d").to_string(),
                    item.kind.to_string(),
                    names
                        .iter()
                        .find(|(id, _)| *id == item.category_id)
                        .map(|(_, name)| name.clone())
                        .unwrap_or_default(),
                    format_amount(item.amount, &code),
                ]
            })
            .collect();
        output::info(render_table(&["Date", "Kind", "Category", "Amount"], &rows));
        field("Net impact", format_amount(insights.upcoming.net_impact, &code));
    }
    Ok(())
}

fn category_names(context: &CliContext) -> Vec<(Uuid, String)> {
    context
        .store
        .categories()
        .into_iter()
        .map(|category| (category.id, category.name))
        .collect()
}

fn categories(context: &mut CliContext) -> Result<(), CliError> {
    let seeded = CategoryService::seed_defaults(&mut context.store)?;
    if seeded > 0 {
        output::success(format!("Seeded {seeded} default categories."));
    }
    let code = currency(context);
    let rows: Vec<Vec<String>> = context
        .store
        .categories()
        .into_iter()
        .map(|category| {
            vec![
                category.name.clone(),
                category.kind.to_string(),
                category
                    .budget
                    .map(|budget| format_amount(budget, &code))
                    .unwrap_or_else(|| "-".into()),
            ]
        })
        .collect();
    output::info(render_table(&["Name", "Kind", "Budget"], &rows));
    Ok(())
}

fn add(context: &mut CliContext, args: &[String]) -> Result<(), CliError> {
    let usage = || {
        CliError::Usage("usage: add <expense|income> <AMOUNT> <CATEGORY> [DATE] [NOTE...]".into())
    };
    let [kind, amount, category, rest @ ..] = args else {
        return Err(usage());
    };
    let kind = match kind.as_str() {
        "expense" => TransactionKind::Expense,
        "income" => TransactionKind::Income,
        _ => return Err(usage()),
    };
    let code = currency(context);
    let amount = parse_amount(amount, &code)
        .ok_or_else(|| CliError::Usage(format!("invalid amount `{amount}`")))?;
    CategoryService::seed_defaults(&mut context.store)?;
    let category = CategoryService::list(&context.store, kind)
        .into_iter()
        .find(|candidate| candidate.name.eq_ignore_ascii_case(category.trim()))
        .ok_or_else(|| CliError::Usage(format!("no {kind} category named `{category}`")))?;
    let date = parse_date_arg(rest.first())?;
    let mut transaction = Transaction::new(kind, category.id, amount, date, Local::now().time())
        .map_err(BudgetError::from)?;
    if rest.len() > 1 {
        transaction = transaction.with_description(rest[1..].join(" "));
    }
    TransactionService::add(&mut context.store, transaction)?;
    output::success(format!(
        "Recorded {kind} of {} in {} on {date}.",
        format_amount(amount, &code),
        category.name
    ));
    Ok(())
}

fn backup(context: &CliContext, args: &[String]) -> Result<(), CliError> {
    let note = (!args.is_empty()).then(|| args.join(" "));
    let path = context.store.backup(note.as_deref())?;
    output::success(format!("Backup written to {}", path.display()));
    Ok(())
}

fn backups(context: &CliContext) -> Result<(), CliError> {
    let names = context.store.list_backups()?;
    if names.is_empty() {
        output::info("No backups yet.");
    }
    for name in names {
        output::info(name);
    }
    Ok(())
}

fn restore(context: &mut CliContext, args: &[String]) -> Result<(), CliError> {
    let name = args
        .first()
        .ok_or_else(|| CliError::Usage("usage: restore <BACKUP>".into()))?;
    context.store.restore(name)?;
    output::success(format!("Restored {name}."));
    Ok(())
}

fn config(context: &mut CliContext, args: &[String]) -> Result<(), CliError> {
    let usage = || CliError::Usage("usage: config show | set-payday N | set-budget AMOUNT".into());
    match args {
        [] => Err(usage()),
        [action] if action == "show" => {
            let json = serde_json::to_string_pretty(&context.config)
                .map_err(BudgetError::from)?;
            output::info(json);
            field("Config file", context.manager.config_path().display());
            field("Data file", context.store.path().display());
            Ok(())
        }
        [action, value] if action == "set-payday" => {
            let payday: u32 = value
                .trim()
                .parse()
                .map_err(|_| CliError::Usage(format!("invalid payday `{value}`")))?;
            let mut updated = context.config.clone();
            updated.payday = payday;
            context.manager.save(&updated)?;
            context.config = updated;
            output::success(format!("Payday set to {payday}."));
            Ok(())
        }
        [action, value] if action == "set-budget" => {
            let budget = if value.trim() == "0" {
                0
            } else {
                parse_amount(value, &currency(context))
                    .ok_or_else(|| CliError::Usage(format!("invalid amount `{value}`")))?
            };
            let mut updated = context.config.clone();
            updated.monthly_budget = budget;
            context.manager.save(&updated)?;
            context.config = updated;
            output::success(format!(
                "Monthly budget set to {}.",
                format_amount(budget, &currency(context))
            ));
            Ok(())
        }
        _ => Err(usage()),
    }
}
