use anyhow::Context;
use clap::Parser;
use mp3tagger::cli::{Cli, Commands, HeadlessConfig};
use mp3tagger::error_log::{ErrorLogManager, Operation, OperationErrorEntry};
use mp3tagger::logger::Logger;
use mp3tagger::session::{self, EditConfig};
use mp3tagger::tag::{Field, TagError};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let logger = Logger::new(HeadlessConfig::from_cli(&cli));

    let error_log = match &cli.error_log {
        Some(dir) => Some(
            ErrorLogManager::new(dir)
                .with_context(|| format!("creating error log directory {}", dir.display()))?,
        ),
        None => None,
    };

    let ok = match &cli.command {
        Commands::View { path } => run_view(&logger, error_log.as_ref(), path),
        Commands::Edit {
            field, text, path, ..
        } => {
            let config = EditConfig::from_cli(&cli).unwrap_or_default();
            run_edit(&logger, error_log.as_ref(), path, *field, text, &config)
        }
        Commands::Errors { date, clear } => match &error_log {
            Some(log) => run_errors(&logger, log, date.as_deref(), *clear)?,
            None => {
                logger.error("errors needs --error-log DIR");
                false
            }
        },
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

fn run_view(logger: &Logger, error_log: Option<&ErrorLogManager>, path: &Path) -> bool {
    let report = match session::view(path) {
        Ok(report) => report,
        Err(err) => {
            logger.failure(Operation::View.display_name(), path, &err);
            record(logger, error_log, Operation::View, path, None, &err);
            return false;
        }
    };

    logger.debug(&format!(
        "{}: tag header {:02x?}, version {}",
        path.display(),
        report.header.raw(),
        report.header.version()
    ));
    logger.info(&format!("Tag details of {}", path.display()));

    for reading in &report.fields {
        match &reading.value {
            Ok(value) => logger.field_value(reading.field, value),
            Err(err) => {
                logger.field_error(reading.field, err);
                record(logger, error_log, Operation::View, path, Some(reading.field), err);
            }
        }
    }

    match report.failures() {
        0 => logger.success("Details displayed successfully"),
        n => logger.warn(&format!("{} of {} fields could not be read", n, report.fields.len())),
    }
    true
}

fn run_edit(
    logger: &Logger,
    error_log: Option<&ErrorLogManager>,
    path: &Path,
    field: Field,
    text: &str,
    config: &EditConfig,
) -> bool {
    logger.debug(&format!(
        "editing {} of {} with {:?} commit",
        field,
        path.display(),
        config.commit
    ));

    match session::edit(path, field, text, config) {
        Ok(outcome) => {
            logger.debug(&format!(
                "{} frame size {} -> {}, {} tail bytes copied",
                outcome.summary.field,
                outcome.summary.old_size,
                outcome.summary.new_size,
                outcome.summary.tail_bytes
            ));
            if let Some(artifact) = &outcome.artifact {
                logger.debug(&format!("staged copy kept at {}", artifact.display()));
            }
            logger.field_changed(&outcome.path, text, &outcome.summary);
            true
        }
        Err(err) => {
            logger.failure(Operation::Edit.display_name(), path, &err);
            record(logger, error_log, Operation::Edit, path, Some(field), &err);
            false
        }
    }
}

fn run_errors(
    logger: &Logger,
    log: &ErrorLogManager,
    date: Option<&str>,
    clear: bool,
) -> anyhow::Result<bool> {
    if clear {
        match date {
            Some(date) => {
                log.clear_date(date)
                    .with_context(|| format!("clearing failures of {}", date))?;
                logger.success(&format!("Cleared failures of {}", date));
            }
            None => {
                log.clear_all().context("clearing failure log")?;
                logger.success("Cleared all failures");
            }
        }
        return Ok(true);
    }

    let entries: Vec<(String, OperationErrorEntry)> = match date {
        Some(date) => [Operation::View, Operation::Edit]
            .into_iter()
            .flat_map(|op| log.get_for_date(date, op))
            .map(|entry| (date.to_string(), entry))
            .collect(),
        None => log.get_all(),
    };

    for (date, entry) in &entries {
        logger.logged_failure(date, entry);
    }
    logger.info(&format!("{} failures recorded", entries.len()));
    Ok(true)
}

fn record(
    logger: &Logger,
    error_log: Option<&ErrorLogManager>,
    operation: Operation,
    path: &Path,
    field: Option<Field>,
    err: &TagError,
) {
    let Some(log) = error_log else {
        return;
    };
    let entry = OperationErrorEntry::new(
        operation,
        path.display().to_string(),
        field.map(|f| f.to_string()),
        err.kind().to_string(),
        err.to_string(),
    );
    if let Err(e) = log.add(entry) {
        logger.warn(&format!("could not write error log: {}", e));
    }
}
