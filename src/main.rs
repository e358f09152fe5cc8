use std::process::ExitCode;

use warpfield::{Simulation, SimulationError, StarfieldConfig};

/// Usage: `warpfield [config.json]`
fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), SimulationError> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading config from {}", path);
            StarfieldConfig::load(path)?
        }
        None => StarfieldConfig::default(),
    };

    Simulation::new().with_config(config).run()
}
