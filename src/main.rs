use std::process::ExitCode;

use swarm::{Settings, Swarm};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(&path).unwrap_or_else(|err| {
            tracing::warn!(target: "swarm", %err, path = %path, "falling back to default settings");
            Settings::default()
        }),
        None => Settings::default(),
    };

    match Swarm::new().with_settings(settings).run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(target: "swarm", %err, "swarm exited with an error");
            ExitCode::FAILURE
        }
    }
}
