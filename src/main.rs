use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use post_guard::ui::{ConsoleCommit, ConsoleSurface};
use post_guard::validator::{counter_level, password_strength, text_stats};
use post_guard::{
    ConfirmationWorkflow, FormValidator, GuardConfig, Trigger, WorkflowElements, WorkflowState,
    resolve_form, spawn_workflow,
};

/// Post-Guard CLI: validate blog forms and walk through guarded delete flows
#[derive(Parser, Debug)]
#[command(name = "post-guard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate field values against a form's rules
    #[command(name = "validate")]
    Validate {
        /// Form name (signup, new-post, edit-post or a configured form)
        #[arg(short, long)]
        form: String,

        /// Field value as name=value (repeatable)
        #[arg(short = 'V', long = "value", value_parser = parse_key_value)]
        values: Vec<(String, String)>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Score a password the way the signup page does
    #[command(name = "strength")]
    Strength { password: String },

    /// Word/character counts for a text, with counter level against --max
    #[command(name = "stats")]
    Stats {
        text: String,

        #[arg(long, default_value = "200")]
        max: usize,
    },

    /// Drive a delete confirmation flow from stdin, one event per line
    /// (e.g. "delete", "input DELETE", "confirm")
    #[command(name = "delete")]
    Delete {
        /// Override the confirmation word
        #[arg(long)]
        literal: Option<String>,

        /// Name reported by the commit action
        #[arg(long, default_value = "delete-post")]
        form: String,
    },
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .ok_or_else(|| format!("expected name=value, got '{}'", raw))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config_path = cli.config.clone().or_else(GuardConfig::default_path);
    let config = GuardConfig::load_or_default(config_path.as_ref())?;

    match cli.command {
        Some(Command::Validate { form, values, json }) => {
            handle_validate(&config, &form, values, json)
        }
        Some(Command::Strength { password }) => {
            let strength = password_strength(&password);
            println!("{} ({}/4)", strength.label(), strength.segments());
            Ok(())
        }
        Some(Command::Stats { text, max }) => {
            let stats = text_stats(&text);
            println!("Words: {}", stats.words);
            println!(
                "Characters: {}/{} ({:?})",
                stats.chars,
                max,
                counter_level(stats.chars, max)
            );
            Ok(())
        }
        Some(Command::Delete { literal, form }) => handle_delete(config, literal, form).await,
        None => {
            // Default behavior: show help
            eprintln!("No command specified. Use --help for usage information.");
            eprintln!("Example: post-guard validate --form new-post -V title=Hello");
            std::process::exit(1);
        }
    }
}

fn handle_validate(
    config: &GuardConfig,
    form: &str,
    values: Vec<(String, String)>,
    json: bool,
) -> Result<()> {
    let rules = resolve_form(form, config)?;
    let values: HashMap<String, String> = values.into_iter().collect();

    let result = FormValidator::validate(&values, &rules);

    if json {
        let output = serde_json::to_string_pretty(&result).context("Failed to serialize result")?;
        println!("{}", output);
    } else if result.valid {
        println!("Form '{}' is valid", form);
    } else {
        println!("Form '{}' has {} problem(s):", form, result.failures.len());
        for failure in &result.failures {
            println!("  - {}: {}", failure.field_name, failure.message);
        }
    }

    if !result.valid {
        std::process::exit(1);
    }
    Ok(())
}

async fn handle_delete(
    mut config: GuardConfig,
    literal: Option<String>,
    form: String,
) -> Result<()> {
    if let Some(word) = literal {
        config.confirmation.literal = word;
    }

    let workflow = ConfirmationWorkflow::new(
        &config,
        WorkflowElements::default(),
        Arc::new(ConsoleSurface),
        ConsoleCommit::new(form),
    );
    let points = workflow.reconsider_points().to_vec();
    let (mut handle, driver) = spawn_workflow(workflow);

    info!(
        "Type events one per line: delete, reconsider, keep, continue, input <text>, confirm, cancel"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (name, payload) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, Some(rest)),
            None => (line, None),
        };
        let Some(trigger) = Trigger::from_event(name, payload) else {
            warn!("Unknown event '{}'", name);
            continue;
        };
        let is_reconsider = trigger == Trigger::Reconsider;

        if !handle.send(trigger) {
            break;
        }
        // Let the driver finish this event before reading the next line
        let state = handle.settled().await;
        if is_reconsider && state == WorkflowState::Reconsidering {
            println!("Think again! Consider these points before deleting:");
            for point in &points {
                println!("  - {}", point);
            }
        }
        println!("state: {}", state);

        if state.is_terminal() {
            break;
        }
    }

    if !handle.state().is_terminal() {
        handle.send(Trigger::Unload);
    }
    drop(handle);

    let report = driver.await.context("Workflow driver panicked")?;
    println!(
        "Final state: {} ({} transition(s), {} rejected)",
        report.final_state,
        report.history.len(),
        report.rejected
    );
    Ok(())
}
