//! Web server for the starfield pages.
//!
//! Serves a landing page whose background container is populated with a
//! freshly sampled starfield on every request, plus the stylesheet that
//! defines the twinkle animation and a small status API.

mod assets;
mod handlers;
mod routes;
mod templates;

pub use routes::create_router;
pub use templates::standalone_page;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Settings;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }
}

/// Start the web server.
pub async fn serve(settings: Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings);
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
