mod app;
mod config;
mod console;
mod controller;
mod error;
mod history;
mod input;
mod reports;
mod roi;

use std::io;
use std::process;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::config::Config;
use crate::console::ConsoleInput;
use crate::controller::Controller;
use crate::reports::chart::TerminalChart;

fn main() {
    let app = App::new();
    let conf_path = app.get_config_path();

    let config = Config::new(conf_path).unwrap_or_else(|err| {
        eprintln!("Unable to read config file \"{}\": {}", conf_path, err);
        process::exit(1);
    });

    init_logging(&config);

    if let Err(err) = run(&config) {
        eprintln!("{:#}", err);
        process::exit(1);
    }
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(config: &Config) -> anyhow::Result<()> {
    let input = ConsoleInput::spawn().context("unable to read from the console")?;
    let mut controller = Controller::new(input, io::stdout(), TerminalChart::new(), config);
    controller.run().context("interactive session failed")?;
    Ok(())
}
