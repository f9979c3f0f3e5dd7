use anyhow::Context;
use notepad_dev::logging::Logger;
use notepad_dev::{error, App, AppConfig, TuiApplication};

fn main() -> anyhow::Result<()> {
    error::setup_panic_handler();

    let (config, config_errors) = AppConfig::from_env();
    Logger::from_config(&config)
        .install()
        .context("failed to install logger")?;
    for err in &config_errors {
        log::warn!("{}; using default", err);
    }
    log::info!("notepad-dev {} starting", env!("CARGO_PKG_VERSION"));

    let mut app = App::new(config).context("failed to initialise editor")?;
    if let Some(path) = std::env::args().nth(1) {
        app.open_argument(&path);
    }

    TuiApplication::new(app)
        .run()
        .context("terminal session failed")?;
    Ok(())
}
