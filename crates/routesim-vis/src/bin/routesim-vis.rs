//! Routesim visualizer server
//!
//! Serves an editable routing session over HTTP.

use routesim_vis::{Session, VisConfig, VisServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "routesim_vis=info,routesim=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = VisConfig::from_env();
    tracing::info!(
        addr = %config.addr,
        theme = ?config.render.theme,
        sample = config.load_sample,
        "Starting routing visualizer"
    );

    let mut session = Session::new(config.render.clone());
    if config.load_sample {
        session.load_sample();
    }

    VisServer::new(session).serve(config.addr).await?;

    Ok(())
}
