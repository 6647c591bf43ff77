use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use datamodel::Catalog;
use server::make_app;

#[cfg(test)]
mod client;
mod config;
mod datamodel;
mod server;


#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let app = make_app(Catalog::seeded());

    let listener = TcpListener::bind(config.socket_addr()).await?;
    tracing::info!("Server ready at http://{}/", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
