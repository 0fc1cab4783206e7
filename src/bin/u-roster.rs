use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use u_roster::request::{ErrorBody, OptimizeRequest};
use u_roster::scheduler::DayCodeProjection;

#[derive(Parser)]
#[command(
    name = "u-roster",
    version,
    about = "Builds a shift roster from a JSON request"
)]
struct Cli {
    /// Request JSON file. Reads stdin when omitted.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Overrides `ga.seed`.
    #[arg(long)]
    seed: Option<u64>,

    /// Overrides `ga.generations`.
    #[arg(long)]
    generations: Option<usize>,

    /// Pretty-print the response.
    #[arg(long)]
    pretty: bool,

    /// Print the per-employee day-code table to stderr.
    #[arg(long)]
    codes: bool,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut body = read_body(cli.input.as_ref())?;
    if body.trim().is_empty() {
        body = "{}".to_string();
    }

    let outcome = OptimizeRequest::from_json(&body).and_then(|mut request| {
        if let Some(seed) = cli.seed {
            request.input.ga.seed = Some(seed);
        }
        if let Some(generations) = cli.generations {
            request.input.ga.generations = generations;
        }
        let projection = DayCodeProjection::new(&request.input.shifts)
            .with_calendar(request.input.rules.calendar.clone());
        let employees = request.input.employees.clone();
        let response = request.run()?;
        Ok((response, projection, employees))
    });

    match outcome {
        Ok((response, projection, employees)) => {
            if cli.codes {
                for row in projection.project_named(&response.result.best_grid, &employees) {
                    eprintln!("{:<12} {}", row.employee, row.codes);
                }
            }
            let value = serde_json::to_value(&response).context("encoding response")?;
            print_json(&value, cli.pretty)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::error!(status = err.status_code(), "{err}");
            let value = serde_json::to_value(ErrorBody::from(&err)).context("encoding error body")?;
            print_json(&value, cli.pretty)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

fn read_body(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        None => {
            let mut body = String::new();
            io::stdin().read_to_string(&mut body).context("reading stdin")?;
            Ok(body)
        }
    }
}

fn print_json(value: &Value, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{text}");
    Ok(())
}
