use clap::Parser;
use etherindex::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
