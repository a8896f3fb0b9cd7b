//! User command implementations

use std::io::{self, BufRead};
use std::time::Duration;

use colored::Colorize;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::error::{Error, Result};
use crate::models::{SyncStats, UserRow, filter_rows};
use crate::output::{json, table};
use crate::tasks::{BulkDeleteTask, DeleteResult, FetchResult, FetchTask};

/// Sync all users and print them
pub async fn list(opts: &GlobalOptions, filter: Option<&str>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let result = sync(&ctx).await?;
    let stats = SyncStats::from(&result);

    let rows = UserRow::from_result(&result);
    let rows = match filter {
        Some(query) => filter_rows(rows, query),
        None => rows,
    };

    match ctx.format {
        OutputFormat::Json => {
            println!("{}", json::format_json_with_stats(&rows, stats)?);
        }
        _ => {
            eprintln!("{}", stats.to_string().bold());
            let empty = if filter.is_some() {
                "No users match the filter."
            } else {
                "No users found."
            };
            println!("{}", table::format_table_or(&rows, empty));
        }
    }

    Ok(())
}

/// Delete users by ID, one after another
pub async fn delete(
    opts: &GlobalOptions,
    ids: Vec<String>,
    from_stdin: bool,
    yes: bool,
    no_refresh: bool,
) -> Result<()> {
    let mut ids = ids;
    if from_stdin {
        ids.extend(read_stdin_lines()?);
    }

    if ids.is_empty() {
        return Err(Error::Other(
            "No user IDs given. Pass IDs as arguments or use --stdin.".to_string(),
        ));
    }

    let ctx = CommandContext::new(opts)?;

    if !yes {
        let confirm = Confirm::new()
            .with_prompt(format!("Delete {} users?", ids.len()))
            .default(false)
            .interact()?;

        if !confirm {
            eprintln!("Cancelled.");
            return Ok(());
        }
    }

    let bar = progress_bar(ids.len(), ctx.format);
    let handle = ctx
        .runner
        .dispatch(BulkDeleteTask::new(ctx.client()?, ids))?;
    debug!("Waiting on {} task", handle.kind());
    let outcome = handle
        .wait_with(|current, total| {
            bar.set_length(total as u64);
            bar.set_position(current as u64);
        })
        .await;
    bar.finish_and_clear();

    let result = outcome.map_err(Error::TaskFailed)?;
    debug!("Delete finished: {:?}", result);

    if ctx.format != OutputFormat::Json {
        print_delete_summary(&result);
    }

    let refreshed = if no_refresh {
        None
    } else {
        Some(SyncStats::from(&sync(&ctx).await?))
    };

    match ctx.format {
        OutputFormat::Json => println!("{}", delete_json(&result, refreshed)?),
        _ => {
            if let Some(stats) = refreshed {
                eprintln!("{}", stats.to_string().bold());
            }
        }
    }

    Ok(())
}

/// JSON envelope for a delete; `stats` carries the post-delete sync counts
fn delete_json(result: &DeleteResult, refreshed: Option<SyncStats>) -> Result<String> {
    let output = match refreshed {
        Some(stats) => json::format_json_with_stats(result, stats)?,
        None => json::format_json(result)?,
    };
    Ok(output)
}

/// Run a fetch task to completion behind a spinner
async fn sync(ctx: &CommandContext) -> Result<FetchResult> {
    let spinner = spinner("Syncing users...", ctx.format);
    let handle = ctx.runner.dispatch(FetchTask::new(ctx.client()?))?;
    let outcome = handle.wait().await;
    spinner.finish_and_clear();

    outcome.map_err(Error::TaskFailed)
}

fn print_delete_summary(result: &DeleteResult) {
    if result.failed() == 0 {
        eprintln!(
            "{} Deleted {} of {} users",
            "✓".green(),
            result.deleted,
            result.total
        );
    } else {
        eprintln!(
            "{} Deleted {} of {} users ({} failed)",
            "⚠".yellow(),
            result.deleted,
            result.total,
            result.failed()
        );
    }
}

fn spinner(message: &'static str, format: OutputFormat) -> ProgressBar {
    if !format.is_interactive() {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn progress_bar(total: usize, format: OutputFormat) -> ProgressBar {
    if !format.is_interactive() {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(total as u64);
    let style = ProgressStyle::with_template("Deleting {bar:30} {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar
}

/// Read identifiers from stdin (one per line)
#[allow(clippy::lines_filter_map_ok)]
fn read_stdin_lines() -> Result<Vec<String>> {
    let stdin = io::stdin();
    let lines: Vec<String> = stdin
        .lock()
        .lines()
        .filter_map(|l| l.ok())
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_hides_progress() {
        assert!(spinner("x", OutputFormat::Json).is_hidden());
        assert!(progress_bar(3, OutputFormat::Json).is_hidden());
    }

    #[test]
    fn test_progress_bar_length() {
        let bar = progress_bar(7, OutputFormat::Table);
        assert_eq!(bar.length(), Some(7));
    }

    #[test]
    fn test_delete_json_includes_refreshed_stats() {
        let result = DeleteResult { deleted: 1, total: 2 };
        let stats = SyncStats {
            users: 5,
            populations: 2,
        };

        let out: serde_json::Value =
            serde_json::from_str(&delete_json(&result, Some(stats)).unwrap()).unwrap();

        assert_eq!(out["data"]["deleted"], 1);
        assert_eq!(out["stats"]["users"], 5);
        assert_eq!(out["stats"]["populations"], 2);
    }

    #[test]
    fn test_delete_json_without_refresh_has_no_stats() {
        let result = DeleteResult { deleted: 2, total: 2 };

        let out: serde_json::Value =
            serde_json::from_str(&delete_json(&result, None).unwrap()).unwrap();

        assert_eq!(out["data"]["total"], 2);
        assert!(out.get("stats").is_none());
    }
}
