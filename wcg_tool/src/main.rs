mod cli;
mod command;
mod error;
mod paths;
mod pixels;

use clap::Parser;
use cli::{run_command, Cli};
use log::error;

fn main() {
    let cli = Cli::parse();
    lib_wcg::init_logging(cli.log_level());

    if let Err(e) = run_command(cli.command) {
        error!("{}", e);
        std::process::exit(1);
    }
}
