use tracing::error;

mod adapters;
mod cli;
mod config;
mod core;
mod logging;

fn main() {
    logging::setup_logging();

    if let Err(e) = cli::run() {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
