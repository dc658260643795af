#[cfg(feature = "gui")]
mod app;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use skyline_cockpit::{
    api::CockpitApiClient, config::AppConfig, controller::DashboardController, page::PageModel,
    schedule::RefreshScheduler,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[cfg(feature = "gui")]
use crate::app::{CockpitApp, Message};

#[derive(Parser, Debug)]
#[command(name = "skyline-cockpit")]
#[command(about = "Fleet utilization dashboard - windowed or headless")]
struct Args {
    /// Run without a window, logging every rendered report
    #[arg(long)]
    headless: bool,

    /// With --headless: load the latest report once, then exit
    #[arg(long, requires = "headless")]
    once: bool,

    /// Load configuration from this file instead of the default locations
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    #[cfg(feature = "gui")]
    let filter = if args.headless {
        EnvFilter::builder()
            .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
            .parse_lossy("skyline_cockpit=debug")
    } else {
        EnvFilter::builder()
            .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
            .parse_lossy("skyline_cockpit=debug,fontdb=error,wgpu=warn,naga=warn")
    };

    #[cfg(not(feature = "gui"))]
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
        .parse_lossy("skyline_cockpit=debug");

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = match &args.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
    .context("Failed to load configuration")?;
    let config = Arc::new(config);

    let api_client = CockpitApiClient::new(config.server.base_url.clone(), &config.network)?;
    tracing::info!("API client initialized for {}", api_client.base_url());

    if args.headless {
        run_headless(api_client, config, args.once)
    } else {
        #[cfg(feature = "gui")]
        {
            run_gui(api_client, config)
        }
        #[cfg(not(feature = "gui"))]
        {
            anyhow::bail!("GUI mode not available. Build with --features gui or run with --headless")
        }
    }
}

/// Run in headless mode - same synchronization, page logged instead of drawn
fn run_headless(api_client: CockpitApiClient, config: Arc<AppConfig>, once: bool) -> Result<()> {
    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;

    rt.block_on(async {
        let page = PageModel::new();
        let controller =
            DashboardController::new(api_client, page.clone(), config.refresh.request_fencing);
        tracing::info!("Skyline Cockpit Dashboard initialized");

        controller.load_available_dates().await;
        match controller.selected_date() {
            Some(_) => tracing::info!("{}", page.snapshot().summary()),
            None => tracing::warn!("No report loaded, waiting for the next refresh"),
        }

        if once {
            return Ok(());
        }

        let scheduler = RefreshScheduler::new(
            controller.clone(),
            Duration::from_secs(config.refresh.interval_secs),
        );
        let refresh = scheduler.spawn();

        tokio::signal::ctrl_c()
            .await
            .context("Failed to listen for shutdown signal")?;
        tracing::info!("Shutting down");
        refresh.abort();
        Ok(())
    })
}

/// Run in GUI mode - desktop window
#[cfg(feature = "gui")]
fn run_gui(api_client: CockpitApiClient, config: Arc<AppConfig>) -> Result<()> {
    let window_width = config.window.width;
    let window_height = config.window.height;

    let app = iced::application(
        move || {
            tracing::info!("Skyline Cockpit Dashboard initialized");
            CockpitApp::new(api_client.clone(), config.clone())
        },
        update,
        view,
    )
    .title(title)
    .subscription(subscription)
    .theme(theme)
    .window(iced::window::Settings {
        size: iced::Size::new(window_width, window_height),
        ..Default::default()
    })
    .antialiasing(true);

    app.run().context("Failed to run application")?;

    Ok(())
}

#[cfg(feature = "gui")]
fn title(app: &CockpitApp) -> String {
    app.title()
}

#[cfg(feature = "gui")]
fn update(app: &mut CockpitApp, message: Message) -> iced::Task<Message> {
    app.update(message)
}

#[cfg(feature = "gui")]
fn view(app: &CockpitApp) -> iced::Element<'_, Message> {
    app.view()
}

#[cfg(feature = "gui")]
fn subscription(app: &CockpitApp) -> iced::Subscription<Message> {
    app.subscription()
}

#[cfg(feature = "gui")]
fn theme(app: &CockpitApp) -> iced::Theme {
    app.theme()
}
