//! semverctl CLI entry point

use clap::Parser;
use semverctl::cli::{self, Cli};
use std::process;

fn main() {
    let cli = Cli::parse();
    let exit_code = cli::run(&cli);
    process::exit(exit_code);
}
