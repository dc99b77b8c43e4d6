//! Operation selection and the top-level command runner
//!
//! The field flags form a closed set: all four of major/minor/patch/build
//! select an update, `--details` alone selects a read. Any other mix is
//! refused before the store is opened.

use crate::cli::args::{Cli, OutputFormat};
use crate::cli::common::{self, EXIT_SUCCESS};
use crate::engine::{FieldFlags, Request, VersionManager, VersionReport};
use crate::error::VersionError;
use crate::output::human::print_error;
use crate::output::{HumanFormatter, JsonlFormatter};
use crate::store::open_store;
use crate::types::ObjectLocation;
use std::io::{self, Write};
use tracing::debug;

/// Operation chosen from the flags present on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// `--details`: print the stored version
    Details,
    /// `--major --minor --patch --build`: apply and persist
    Update(FieldFlags),
}

/// Pick the operation for the given flags
///
/// # Errors
///
/// Returns `VersionError::UnsupportedFlags` for any combination other than
/// exactly the four field flags or exactly `--details`.
pub fn select_operation(cli: &Cli) -> Result<Operation, VersionError> {
    let fields = [
        ("--major", cli.major.is_some()),
        ("--minor", cli.minor.is_some()),
        ("--patch", cli.patch.is_some()),
        ("--build", cli.build.is_some()),
    ];
    let present: Vec<&str> = fields
        .iter()
        .filter(|(_, set)| *set)
        .map(|(name, _)| *name)
        .chain(cli.details.then_some("--details"))
        .collect();

    if !cli.details && present.len() == fields.len() {
        return Ok(Operation::Update(FieldFlags::from_options(
            cli.major.clone(),
            cli.minor.clone(),
            cli.patch.clone(),
            cli.build.clone(),
        )));
    }
    if cli.details && present.len() == 1 {
        return Ok(Operation::Details);
    }

    let got = if present.is_empty() {
        "no version flags".to_string()
    } else {
        present.join(" ")
    };
    Err(VersionError::UnsupportedFlags(format!(
        "got {}; pass --major, --minor, --patch and --build together, or --details alone",
        got
    )))
}

/// Run one invocation and return the process exit code
///
/// The version (or JSONL record) goes to stdout; errors go to stderr.
pub fn run(cli: &Cli) -> i32 {
    match run_inner(cli) {
        Ok(output) => {
            print!("{}", output);
            let _ = io::stdout().flush();
            EXIT_SUCCESS
        }
        Err(e) => {
            print_error(&e.to_string(), cli.color.into());
            common::exit_code_for(&e)
        }
    }
}

fn run_inner(cli: &Cli) -> Result<String, VersionError> {
    let config = common::load_config(cli)?;
    common::init_logging(&config)?;

    let operation = select_operation(cli)?;
    let location = common::resolve_location(&cli.bucket, &cli.file)?;

    let store = open_store(&config.store)?;
    debug!(backend = ?config.store.backend, object = %location, "opened store");
    let manager = VersionManager::new(store);

    let request = match operation {
        Operation::Details => Request::Get {
            location: location.clone(),
        },
        Operation::Update(flags) => Request::Update {
            location: location.clone(),
            flags,
        },
    };
    let report = manager.execute(&request)?;

    render(cli.format, &location, &report)
}

fn render(
    format: OutputFormat,
    location: &ObjectLocation,
    report: &VersionReport,
) -> Result<String, VersionError> {
    match format {
        OutputFormat::Human => Ok(HumanFormatter::new().format(report)),
        OutputFormat::Jsonl => JsonlFormatter::new().format(location, report),
    }
}
