#![warn(clippy::pedantic)]

use std::io;
use std::process::ExitCode;

use popup::Popup;
use utilities::config::{Config, ConfigError};
use utilities::display::DisplayRegion;
use utilities::logchamp;
use widget::{FetchAndRenderWidget, RESULT_ID};

mod apis;
mod popup;
mod utilities;
mod widget;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = logchamp::init(&config.log_file) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    let widget = match build_widget(&config) {
        Ok(widget) => widget,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    log::info!("{} popup ready, press Enter to fetch", config.variant.name);
    Popup::new(widget, io::stdout()).run(popup::spawn_click_reader()).await;

    ExitCode::SUCCESS
}

fn build_widget(config: &Config) -> Result<FetchAndRenderWidget, ConfigError> {
    Ok(FetchAndRenderWidget::new(
        config.http_client()?,
        config.endpoint()?,
        config.variant,
        DisplayRegion::new(RESULT_ID),
    ))
}
