//! REST server startup.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::api::router::api_router;
use crate::context::AppContext;
use crate::server::{start_server, ServerHandle};

/// Start the REST API on `addr` (port 0 picks an ephemeral port).
pub async fn start_api_server(
    app: Arc<AppContext>,
    addr: SocketAddr,
) -> Result<ServerHandle, String> {
    start_server("api", api_router(app), addr).await
}
