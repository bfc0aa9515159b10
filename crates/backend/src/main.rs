pub mod routes;
pub mod shared;
pub mod system;

use std::net::SocketAddr;

use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;

    let config = shared::config::load_config()?;
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    let state = system::state::AppState::new(config)?;
    tracing::info!("Serving frontend from {}", state.static_dir.display());

    let app = routes::build_app(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Apotek Alpro portal listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
