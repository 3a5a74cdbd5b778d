use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wireframe::{Cli, Scene, load_config};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config_path())?;
    let location = cli.resolved_location();

    if cli.headless {
        let scene = Scene::load(&location, &config)
            .with_context(|| format!("Failed to build grid for {}", location))?;
        for line in scene.report(&config).to_string().lines() {
            tracing::info!("{}", line);
        }
        return Ok(());
    }

    tracing::info!("Wireframe v{}", env!("CARGO_PKG_VERSION"));
    wireframe::run(config, &location, cli.frame_limit())
}
