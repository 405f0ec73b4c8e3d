//! Reads an input file name and a verbosity level.
//!
//! ```txt
//! cargo run --example cli_example -- -vv -i input.txt
//! RUST_LOG=bindopt=trace cargo run --example cli_example -- -v --input-file input.txt
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use bindopt::{CliOption, Parser, UsageFormatter};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut input_file: Option<PathBuf> = None;
    let mut verbosity = 0;

    let mut parser = match Parser::new(vec![
        CliOption::path_existing('i', "input-file", "input file", true, &mut input_file),
        CliOption::flag_count('v', "verbose", "verbose logging", &mut verbosity),
    ]) {
        Ok(parser) => parser,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let mut formatter = UsageFormatter::new("cli_example");
    formatter.set_auto_usage(true);

    if parser.parse().is_err() || parser.validate_path_options().is_err() {
        eprintln!();
        parser.print_help(&formatter);
        return ExitCode::FAILURE;
    }
    let remaining = parser.into_remaining();

    if let Some(input_file) = &input_file {
        println!("Input file = {}", input_file.display());
    }
    println!("Verbosity = {}", verbosity);
    if !remaining.is_empty() {
        println!("Remaining = {:?}", remaining);
    }

    ExitCode::SUCCESS
}
