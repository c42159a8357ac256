use tracing_subscriber::{fmt, EnvFilter};

mod api;
mod app;
mod config;
mod media;
mod state;
mod ui;
mod workflows;

use app::Portfolio;
use config::Config;
use state::session::SessionStore;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::new();

    // The app cannot track a session without its store
    let store = SessionStore::open(&config.storage_path)?;

    iced::application(app::TITLE, Portfolio::update, Portfolio::view)
        .theme(Portfolio::theme)
        .centered()
        .run_with(move || Portfolio::new(config, store))?;

    Ok(())
}
