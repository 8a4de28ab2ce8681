//! Visit locations in the demo app and print the rendered pages.
//!
//! ```text
//! waypost-demo /hello/Jane/Doe '/lucky?pass=0' 'http://localhost:5000/?routemap=1#/regex/abc'
//! ```

use clap::Parser;
use tracing_subscriber::EnvFilter;
use waypost_core::RouterEvent;
use waypost_demo::{App, AppConfig, RouteTableMode};

#[derive(Parser, Debug)]
#[command(name = "waypost-demo", version, about = "Resolve locations against the demo route table")]
struct Cli {
    /// Locations (`/hello/Jane`) or hrefs (`http://host/#/lucky?pass=1`), visited in order
    #[arg(required = true)]
    locations: Vec<String>,

    /// Build the ordered-map table (also enabled by `?routemap` in the first href)
    #[arg(long)]
    routemap: bool,

    /// Seed for the lucky route's coin flip
    #[arg(long)]
    seed: Option<u64>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Print router events as they are emitted
    #[arg(long)]
    events: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> waypost_core::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let mut config = AppConfig::for_href(&cli.locations[0]);
    if cli.routemap {
        config = config.mode(RouteTableMode::Map);
    }
    if let Some(seed) = cli.seed {
        config = config.seed(seed);
    }

    let app = App::new(config)?;
    tracing::info!(mode = app.mode().as_str(), routes = app.router().table().len(), "route table loaded");

    if cli.events {
        app.router().subscribe(|event| {
            let detail = event.detail();
            let data = detail
                .user_data
                .as_ref()
                .map(|d| d.to_string())
                .unwrap_or_else(|| "null".to_string());
            match event {
                RouterEvent::RouteLoaded(loaded) => println!(
                    "  [{}] {} -> {} (data: {data})",
                    event.name(),
                    detail.location,
                    loaded.handler
                ),
                _ => println!("  [{}] {} (data: {data})", event.name(), detail.location),
            }
        });
    }

    for location in &cli.locations {
        let page = app.visit(location).await?;
        println!("== {location} [{}]", page.outcome);
        println!("{}", page.body);
    }

    Ok(())
}
