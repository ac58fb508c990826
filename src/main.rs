use anyhow::Result;
use clap::{Arg, ArgAction, Command};

use procwatch::core::DEFAULT_LOG_FILE;

fn build_cli() -> Command {
    Command::new("procwatch")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Kills processes that run longer than allowed")
        .long_about(
            "Kills processes that run longer than allowed\n\n\
             USAGE:\n    procwatch <process_name> <max_lifetime_minutes> <frequency_minutes>\n\n\
             EXAMPLE:\n    procwatch notepad 5 1\n\n\
             Every kill is appended to the kill log. Press 'q' or Ctrl+C to stop.",
        )
        .arg(
            Arg::new("args")
                .value_name("ARGS")
                .help("<process_name> <max_lifetime_minutes> <frequency_minutes>")
                .num_args(0..)
                .allow_negative_numbers(true)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("PATH")
                .help(format!("File kills are appended to (default: {})", DEFAULT_LOG_FILE)),
        )
        .arg(
            Arg::new("no-keyboard")
                .long("no-keyboard")
                .help("Do not listen for the 'q' key, stop with Ctrl+C only")
                .action(ArgAction::SetTrue),
        )
}

fn main() -> Result<()> {
    procwatch::init_logging();

    let matches = build_cli().get_matches();
    procwatch::commands::watch(&matches)
}
