use std::sync::Arc;

use identity_gate::config::{load_settings, settings_schema};
use identity_gate::startup;
use identity_gate::utils::logger::init_logging;
use tracing::error;

#[tokio::main]
async fn main() {
    // A missing .env file is fine; real deployments use the environment directly.
    let _ = dotenvy::dotenv();

    if std::env::args().any(|arg| arg == "--print-schema") {
        match settings_schema() {
            Ok(schema) => println!("{}", schema),
            Err(e) => {
                eprintln!("Error rendering settings schema: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(&settings) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    if let Err(e) = startup::run(Arc::new(settings)).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
