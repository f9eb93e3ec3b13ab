use std::io::{self, Write};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::application::{
    play, ApplicationError, Problem, Replay, ReplayTiming, Solution, Solver, NO_SOLUTION,
};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{Node, SearchStatus, SearchTrace};

/// Run the parsed command against stdout.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)
}

/// Run the parsed command, writing all regular output to `out`.
pub fn run(cli: &Cli, out: &mut dyn Write) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, run with --help for usage".to_string(),
        ));
    };

    // Completion must work even with a broken config file
    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, out);
        return Ok(());
    }

    let settings = Settings::load(cli.config_dir.as_deref())?;
    debug!(?settings, "settings loaded");

    match command {
        Commands::Solve { file } => cmd_solve(&settings, file.as_deref(), out),
        Commands::Trace { file, json } => cmd_trace(&settings, file.as_deref(), *json, out),
        Commands::Replay { file, delay_ms } => {
            cmd_replay(&settings, file.as_deref(), *delay_ms, out)
        }
        Commands::Tree { file } => cmd_tree(&settings, file.as_deref(), out),
        Commands::Branches { file } => cmd_branches(&settings, file.as_deref(), out),
        Commands::Edges { file, path } => cmd_edges(&settings, file.as_deref(), *path, out),
        Commands::Config { command } => cmd_config(&settings, command, out),
        Commands::Completion { .. } => Ok(()),
    }
}

fn load_problem(file: Option<&Path>) -> CliResult<Problem> {
    let problem = match file {
        Some(path) => Problem::from_path(path)?,
        None => Problem::from_reader(io::stdin().lock())?,
    };
    Ok(problem)
}

fn solve(settings: &Settings, file: Option<&Path>) -> CliResult<(Problem, Solution)> {
    let problem = load_problem(file)?;
    let solution = Solver::new(settings).solve(&problem)?;
    Ok((problem, solution))
}

#[instrument(skip(settings, out))]
fn cmd_solve(settings: &Settings, file: Option<&Path>, out: &mut dyn Write) -> CliResult<()> {
    let (_, solution) = solve(settings, file)?;
    output::info(out, &solution.summary())?;
    Ok(())
}

/// Machine-readable view of one search.
#[derive(Serialize)]
struct TraceReport<'a> {
    found: bool,
    status: SearchStatus,
    directions: String,
    /// Root first
    path: Vec<&'a Node>,
    trace: &'a SearchTrace,
}

#[instrument(skip(settings, out))]
fn cmd_trace(
    settings: &Settings,
    file: Option<&Path>,
    json: bool,
    out: &mut dyn Write,
) -> CliResult<()> {
    let (_, solution) = solve(settings, file)?;
    let outcome = &solution.outcome;

    if json {
        let report = TraceReport {
            found: outcome.found(),
            status: outcome.status,
            directions: outcome.directions(),
            path: outcome.root_first_path(),
            trace: &outcome.trace,
        };
        let rendered = serde_json::to_string_pretty(&report).map_err(|e| {
            ApplicationError::OperationFailed {
                context: "serialize trace".to_string(),
                source: Box::new(e),
            }
        })?;
        output::info(out, &rendered)?;
        return Ok(());
    }

    for token in outcome.trace.tokens() {
        output::info(out, &token)?;
    }
    Ok(())
}

#[instrument(skip(settings, out))]
fn cmd_replay(
    settings: &Settings,
    file: Option<&Path>,
    delay_ms: Option<u64>,
    out: &mut dyn Write,
) -> CliResult<()> {
    let (problem, solution) = solve(settings, file)?;

    let mut timing = ReplayTiming::from(&settings.replay);
    if let Some(ms) = delay_ms {
        timing.step_delay = std::time::Duration::from_millis(ms);
    }

    output::header(out, &format!("target {}", problem.target))?;
    let mut written = Ok(());
    play(Replay::new(&solution.outcome.trace, timing), |step| {
        if written.is_ok() {
            written = output::step(out, step);
        }
    });
    written?;
    output::info(out, &solution.summary())?;
    Ok(())
}

#[instrument(skip(settings, out))]
fn cmd_tree(settings: &Settings, file: Option<&Path>, out: &mut dyn Write) -> CliResult<()> {
    let (_, solution) = solve(settings, file)?;
    output::info(out, &solution.pyramid.to_tree_string())?;
    Ok(())
}

#[instrument(skip(settings, out))]
fn cmd_branches(settings: &Settings, file: Option<&Path>, out: &mut dyn Write) -> CliResult<()> {
    let (problem, solution) = solve(settings, file)?;

    for path in solution.pyramid.leaf_paths() {
        let product: f64 = path.iter().map(|n| n.value).product();
        let line = format!("{} = {}", path.iter().map(|n| n.id).join(" -> "), product);
        if product == problem.target {
            output::success_detail(out, &line)?;
        } else {
            output::failure(out, &line)?;
        }
    }
    Ok(())
}

#[instrument(skip(settings, out))]
fn cmd_edges(
    settings: &Settings,
    file: Option<&Path>,
    winning_path: bool,
    out: &mut dyn Write,
) -> CliResult<()> {
    let (_, solution) = solve(settings, file)?;
    let layout = settings.layout();

    let edges = if winning_path {
        if !solution.outcome.found() {
            output::info(out, NO_SOLUTION)?;
            return Ok(());
        }
        let path = solution.outcome.root_first_path();
        layout.path_edges(&path, solution.pyramid.height())
    } else {
        layout.all_edges(&solution.pyramid)
    };

    for edge in edges {
        output::info(out, &edge.iter().join(","))?;
    }
    Ok(())
}

fn cmd_config(settings: &Settings, command: &ConfigCommands, out: &mut dyn Write) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(out, &settings.to_toml()?)?,
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(out, &path.display())?,
            None => {
                return Err(CliError::Usage(
                    "cannot determine global config directory".to_string(),
                ))
            }
        },
    }
    Ok(())
}
