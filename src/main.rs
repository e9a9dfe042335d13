// CLI binary entry point for riffy

mod cli;

use clap::Parser;
use cli::Config;
use std::process;

fn main() {
    let config = Config::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_filter()))
        .init();

    if let Err(e) = cli::commands::run(&config) {
        eprintln!("✗ {:#}", e);
        process::exit(1);
    }
}
