mod bot;
#[cfg(feature = "desktop")]
mod client;
mod model;

use dioxus_logger::tracing;

use crate::bot::{config::Config, startup};

fn main() {
    dotenvy::dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = startup::init_logging(&config) {
        eprintln!("{e}");
    }

    if let Err(e) = run(config) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(config: Config) -> Result<(), bot::error::AppError> {
    let bridge = startup::build_bridge(&config)?;

    #[cfg(feature = "desktop")]
    {
        let feed = client::LogFeed::attach(&bridge);
        let panel = startup::build_panel(&config, bridge)?;
        client::launch(panel, feed);
        Ok(())
    }

    #[cfg(not(feature = "desktop"))]
    {
        let panel = startup::build_panel(&config, bridge)?;
        startup::run_headless(panel)
    }
}
