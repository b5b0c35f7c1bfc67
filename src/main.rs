use clap::Parser;
use fxsignal::cli::{Cli, run};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
